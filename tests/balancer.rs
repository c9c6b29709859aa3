//! Integration tests for team formation: initial split and score rebalancing.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use team_rotation::{
    initial_assignment, rebalance, team_sizes, Player, Team, TournamentError,
};

fn roster(scores: &[i32]) -> Vec<Player> {
    scores
        .iter()
        .enumerate()
        .map(|(i, &score)| {
            let mut p = Player::new(format!("P{i}"));
            p.score = score;
            p
        })
        .collect()
}

fn member_scores(team: &Team, players: &[Player]) -> Vec<i32> {
    team.members
        .iter()
        .map(|id| players.iter().find(|p| p.id == *id).unwrap().score)
        .collect()
}

#[test]
fn team_sizes_differ_by_at_most_one() {
    assert_eq!(team_sizes(4, 2), vec![2, 2]);
    assert_eq!(team_sizes(10, 3), vec![3, 3, 4]);
    assert_eq!(team_sizes(7, 7), vec![1; 7]);
    assert!(team_sizes(3, 0).is_empty());
}

#[test]
fn initial_assignment_places_every_player_once() {
    for (p, t) in [(2, 2), (4, 2), (5, 2), (7, 3), (10, 4), (15, 3)] {
        let players = roster(&vec![0; p]);
        let mut rng = StdRng::seed_from_u64(p as u64 * 31 + t as u64);
        let teams = initial_assignment(&players, t, &mut rng).unwrap();

        assert_eq!(teams.len(), t);
        let (floor, ceil) = (p / t, (p + t - 1) / t);
        for team in &teams {
            assert!(team.len() == floor || team.len() == ceil, "{p} players / {t} teams");
        }
        let placed: Vec<_> = teams.iter().flat_map(|team| team.members.iter().copied()).collect();
        assert_eq!(placed.len(), p);
        let unique: HashSet<_> = placed.iter().copied().collect();
        let all: HashSet<_> = players.iter().map(|pl| pl.id).collect();
        assert_eq!(unique, all);
    }
}

#[test]
fn initial_assignment_is_reproducible_with_a_seed() {
    let players = roster(&[0; 8]);
    let a = initial_assignment(&players, 2, &mut StdRng::seed_from_u64(9)).unwrap();
    let b = initial_assignment(&players, 2, &mut StdRng::seed_from_u64(9)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn initial_assignment_needs_two_players() {
    let players = roster(&[0]);
    let result = initial_assignment(&players, 2, &mut StdRng::seed_from_u64(1));
    assert_eq!(
        result,
        Err(TournamentError::NotEnoughPlayers { registered: 1, required: 2 })
    );
}

#[test]
fn initial_assignment_rejects_more_players_than_capacity() {
    let players = roster(&[0; 11]);
    let result = initial_assignment(&players, 2, &mut StdRng::seed_from_u64(1));
    assert_eq!(
        result,
        Err(TournamentError::TooManyPlayers { registered: 11, capacity: 10 })
    );
}

#[test]
fn rebalance_leaves_scores_untouched() {
    let players = roster(&[3, -2, 0, 1, -1, 2, 0, -3]);
    let before = players.clone();
    let total: i32 = players.iter().map(|p| p.score).sum();

    let teams = rebalance(&players, 2).unwrap();

    assert_eq!(players, before);
    assert_eq!(players.iter().map(|p| p.score).sum::<i32>(), total);
    let team_total: i32 = teams.iter().map(|t| t.points).sum();
    assert_eq!(team_total, total, "all 8 players are placed");
}

#[test]
fn rebalanced_teams_carry_no_offset() {
    let players = roster(&[-4, -1, 2, 5, 0, -2, 3]);
    let teams = rebalance(&players, 3).unwrap();
    assert_eq!(teams.len(), 3);
    for team in &teams {
        assert_eq!(team.offset, 0);
        assert_eq!(team.points, member_scores(team, &players).iter().sum::<i32>());
    }
}

#[test]
fn rebalance_fills_equal_teams_and_leaves_remainder_out() {
    let players = roster(&[0; 5]);
    let teams = rebalance(&players, 2).unwrap();

    assert_eq!(teams.len(), 2);
    assert!(teams.iter().all(|t| t.len() == 2));
    // all tied: registration order decides, so the last player is left over
    assert!(teams.iter().all(|t| !t.contains(players[4].id)));
}

#[test]
fn rebalance_splits_previous_winners() {
    // after one round of 2v2: the winners have 1, the losers -1
    let players = roster(&[1, 1, -1, -1]);
    let teams = rebalance(&players, 2).unwrap();

    assert_eq!(teams.len(), 2);
    for team in &teams {
        let mut scores = member_scores(team, &players);
        scores.sort_unstable();
        assert_eq!(scores, vec![-1, 1]);
        assert_eq!(team.points, 0);
    }
}

#[test]
fn rebalance_gives_strongest_remaining_player_to_weakest_team() {
    let players = roster(&[5, 4, 3, 2, 1, 0]);
    let teams = rebalance(&players, 2).unwrap();

    assert_eq!(teams[0].name, "Team 1");
    assert_eq!(member_scores(&teams[0], &players), vec![5, 2, 1]);
    assert_eq!(member_scores(&teams[1], &players), vec![4, 3, 0]);
    assert_eq!((teams[0].points, teams[1].points), (8, 7));
}

#[test]
fn rebalance_is_greedy_not_optimal() {
    // {6,4,0} vs {5,3,2} would be 10/10; the greedy pass settles for 11/9
    let players = roster(&[6, 5, 4, 3, 2, 0]);
    let teams = rebalance(&players, 2).unwrap();

    assert_eq!(member_scores(&teams[0], &players), vec![6, 3, 2]);
    assert_eq!(member_scores(&teams[1], &players), vec![5, 4, 0]);
    assert_eq!((teams[0].points, teams[1].points), (11, 9));
}

#[test]
fn rebalance_requires_a_player_per_team() {
    let players = roster(&[0, 0, 0]);
    assert_eq!(
        rebalance(&players, 4),
        Err(TournamentError::NotEnoughPlayers { registered: 3, required: 4 })
    );
}
