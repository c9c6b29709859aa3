//! Pairing teams into matchups (circle-method round robin).

use crate::models::Matchup;

/// Pairs of team indices for one rotation of a round robin.
///
/// Slot 0 stays put and the others rotate by `rotation`; slot `i` meets slot `len - 1 - i`.
/// With an odd count one team gets a bye and is left out.
pub fn round_robin_pairs(team_count: usize, rotation: usize) -> Vec<(usize, usize)> {
    if team_count < 2 {
        return Vec::new();
    }
    let mut slots: Vec<Option<usize>> = (0..team_count).map(Some).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }
    let len = slots.len();
    slots[1..].rotate_right(rotation % (len - 1));

    (0..len / 2)
        .filter_map(|i| match (slots[i], slots[len - 1 - i]) {
            (Some(a), Some(b)) => Some((a.min(b), a.max(b))),
            _ => None,
        })
        .collect()
}

/// Matchups for `round` (1-based) over `team_count` teams.
pub fn generate_bracket(team_count: usize, round: u32) -> Vec<Matchup> {
    let rotation = round.saturating_sub(1) as usize;
    round_robin_pairs(team_count, rotation)
        .into_iter()
        .map(|(first, second)| Matchup::new(first, second))
        .collect()
}
