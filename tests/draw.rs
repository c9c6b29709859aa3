//! Integration tests for drawing indices without replacement.

use rand::rngs::StdRng;
use rand::SeedableRng;
use team_rotation::RandomDraw;

#[test]
fn draw_yields_every_index_once_then_reports_exhaustion() {
    for n in [0usize, 1, 2, 7, 50] {
        let mut draw = RandomDraw::with_rng(n, &mut StdRng::seed_from_u64(n as u64));
        let mut seen: Vec<usize> = (0..n).map(|_| draw.draw().unwrap()).collect();
        assert_eq!(draw.draw(), None, "draw {n} + 1 must be exhausted");
        seen.sort_unstable();
        assert_eq!(seen, (0..n).collect::<Vec<_>>());
    }
}

#[test]
fn empty_draw_is_exhausted_immediately() {
    let mut draw = RandomDraw::new(0);
    assert!(draw.is_exhausted());
    assert_eq!(draw.draw(), None);
}

#[test]
fn remaining_counts_down() {
    let mut draw = RandomDraw::new(3);
    assert_eq!(draw.len(), 3);
    draw.draw();
    assert_eq!(draw.remaining(), 2);
    draw.by_ref().for_each(drop);
    assert!(draw.is_exhausted());
    assert_eq!(draw.next(), None);
}

#[test]
fn same_seed_gives_same_order() {
    let a: Vec<usize> = RandomDraw::with_rng(20, &mut StdRng::seed_from_u64(42)).collect();
    let b: Vec<usize> = RandomDraw::with_rng(20, &mut StdRng::seed_from_u64(42)).collect();
    assert_eq!(a, b);
}
