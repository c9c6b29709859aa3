//! Team formation: random initial split and score-based rebalancing between rounds.

use crate::logic::draw::RandomDraw;
use crate::models::{Player, Team, TournamentError, TEAM_CAPACITY};
use rand::Rng;
use std::cmp::Reverse;

/// Fewest players a tournament can run with.
pub const MIN_PLAYERS: usize = 2;

fn team_name(index: usize) -> String {
    format!("Team {}", index + 1)
}

/// Sizes for an even split of `players` into `teams_num` teams.
///
/// Sizes differ by at most one; the larger teams come last.
pub fn team_sizes(players: usize, teams_num: usize) -> Vec<usize> {
    if teams_num == 0 {
        return Vec::new();
    }
    let base = players / teams_num;
    let rest = players % teams_num;
    let mut sizes = vec![base; teams_num - rest];
    sizes.extend(std::iter::repeat(base + 1).take(rest));
    sizes
}

/// Check that `players` can be split into `teams_num` non-empty teams within capacity.
pub fn check_roster_size(players: usize, teams_num: usize) -> Result<(), TournamentError> {
    let required = MIN_PLAYERS.max(teams_num);
    if players < required {
        return Err(TournamentError::NotEnoughPlayers {
            registered: players,
            required,
        });
    }
    let capacity = teams_num * TEAM_CAPACITY;
    if players > capacity {
        return Err(TournamentError::TooManyPlayers {
            registered: players,
            capacity,
        });
    }
    Ok(())
}

/// First-round teams: even sizes, members picked at random regardless of registration order.
pub fn initial_assignment<R: Rng + ?Sized>(
    players: &[Player],
    teams_num: usize,
    rng: &mut R,
) -> Result<Vec<Team>, TournamentError> {
    check_roster_size(players.len(), teams_num)?;

    let mut draw = RandomDraw::with_rng(players.len(), rng);
    let teams = team_sizes(players.len(), teams_num)
        .into_iter()
        .enumerate()
        .map(|(i, size)| {
            let mut team = Team::new(team_name(i));
            for idx in draw.by_ref().take(size) {
                team.add_player(&players[idx]);
            }
            team
        })
        .collect();
    Ok(teams)
}

/// Re-roll teams so their totals end up as close as the greedy pass allows.
///
/// Players are taken strongest first and each goes to the weakest open team. Every team
/// starts with an offset of `|lowest score|` so negative scores do not make a half-filled
/// team look weaker than an empty one. A team closes at `players / teams_num` members;
/// whoever is left once all teams are closed sits out. Scores are not touched.
pub fn rebalance(players: &[Player], teams_num: usize) -> Result<Vec<Team>, TournamentError> {
    check_roster_size(players.len(), teams_num)?;

    let min_points = players.iter().map(|p| p.score).min().unwrap_or(0).abs();
    let target = players.len() / teams_num;

    let mut ranked: Vec<&Player> = players.iter().collect();
    ranked.sort_by_key(|p| Reverse(p.score));

    let mut open: Vec<Team> = (0..teams_num)
        .map(|i| Team::with_offset(team_name(i), min_points))
        .collect();
    let mut closed = Vec::with_capacity(teams_num);

    for player in ranked {
        // min_by_key keeps the first of equal minima
        let Some(weakest) = open
            .iter()
            .enumerate()
            .min_by_key(|(_, t)| t.points)
            .map(|(i, _)| i)
        else {
            break;
        };
        open[weakest].add_player(player);

        if open[weakest].len() >= target {
            let mut team = open.remove(weakest);
            team.remove_offset();
            closed.push(team);
            if open.is_empty() {
                break;
            }
        }
    }

    Ok(closed)
}
