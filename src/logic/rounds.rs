//! Round progression: deciding where each round's teams come from, pairing them,
//! and applying the results.

use crate::logic::balancer::{initial_assignment, rebalance};
use crate::logic::bracket::generate_bracket;
use crate::logic::decision::DecisionProvider;
use crate::logic::setup::start_tournament;
use crate::models::{
    MatchId, Matchup, Player, RoundRecord, Side, Team, Tournament, TournamentConfig,
    TournamentError, TournamentState,
};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Where the teams of a round come from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TeamSource {
    /// Random even split (round 1).
    Initial,
    /// Score-based re-roll.
    Rebalance,
    /// Locked composition reused unchanged.
    Locked,
}

/// Team source for `round` (1-based), or None once the best-of stretch is over.
///
/// Rounds before `prep_games_num` are preparation rounds. Deciding rounds start at round
/// `prep_games_num` and run while `round - prep_games_num < bo`; the round where that
/// difference reaches `bo` gets no teams. `locked` tells whether a final composition
/// already exists.
pub fn team_source(config: &TournamentConfig, round: u32, locked: bool) -> Option<TeamSource> {
    match round {
        0 => None,
        r if r >= config.prep_games_num + config.bo => None,
        r if is_deciding(config, r) && locked => Some(TeamSource::Locked),
        1 => Some(TeamSource::Initial),
        _ => Some(TeamSource::Rebalance),
    }
}

/// True for rounds of the best-of stretch.
pub fn is_deciding(config: &TournamentConfig, round: u32) -> bool {
    round >= config.prep_games_num
}

fn describe_team(team: &Team, players: &[Player]) -> String {
    let names: Vec<&str> = team
        .members
        .iter()
        .filter_map(|id| players.iter().find(|p| p.id == *id))
        .map(|p| p.name.as_str())
        .collect();
    format!("{} ({} pts): {}", team.name, team.points, names.join(", "))
}

/// Form the teams and bracket for the next round.
///
/// Returns `Ok(false)` when there is no next round (the tournament is then Completed).
pub fn start_round(tournament: &mut Tournament) -> Result<bool, TournamentError> {
    match tournament.state {
        TournamentState::Setup => return Err(TournamentError::InvalidState),
        TournamentState::Completed => return Ok(false),
        TournamentState::Preparation | TournamentState::Deciding => {}
    }
    if tournament.round_in_progress() {
        return Err(TournamentError::InvalidState);
    }

    let round = tournament.current_round + 1;
    let locked = tournament.final_teams.is_some();
    let Some(source) = team_source(&tournament.config, round, locked) else {
        tournament.state = TournamentState::Completed;
        return Ok(false);
    };

    let teams_num = tournament.config.teams_num;
    let teams = match source {
        TeamSource::Initial => {
            let mut rng = match tournament.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            initial_assignment(&tournament.players, teams_num, &mut rng)?
        }
        TeamSource::Rebalance => rebalance(&tournament.players, teams_num)?,
        TeamSource::Locked => {
            let mut teams = tournament
                .final_teams
                .clone()
                .ok_or(TournamentError::InvalidState)?;
            for team in &mut teams {
                team.recount(&tournament.players);
            }
            teams
        }
    };

    let deciding = is_deciding(&tournament.config, round);
    if deciding && tournament.final_teams.is_none() {
        tournament.final_teams = Some(teams.clone());
    }

    tournament.current_round = round;
    tournament.state = if deciding {
        TournamentState::Deciding
    } else {
        TournamentState::Preparation
    };
    tournament.bracket = generate_bracket(teams.len(), round);
    tournament.teams = teams;

    log::info!(
        "Round {} ({:?}, {:?}): {} teams, {} matchups",
        round,
        tournament.state,
        source,
        tournament.teams.len(),
        tournament.bracket.len()
    );
    for team in &tournament.teams {
        log::debug!("  {}", describe_team(team, &tournament.players));
    }
    let sitting_out = tournament.sitting_out();
    if !sitting_out.is_empty() {
        log::info!("Round {}: {} player(s) sit out", round, sitting_out.len());
    }
    Ok(true)
}

/// Record the winner of one matchup in the current round.
pub fn set_match_winner(
    tournament: &mut Tournament,
    match_id: MatchId,
    side: Side,
) -> Result<(), TournamentError> {
    if !tournament.round_in_progress() {
        return Err(TournamentError::InvalidState);
    }
    let matchup = tournament
        .bracket
        .iter_mut()
        .find(|m| m.id == match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    matchup.winner = Some(side);
    Ok(())
}

/// Apply every result of the current round, archive it, and clear the bracket.
///
/// All matchups must have a winner. Marks the tournament Completed after the last round.
pub fn submit_round(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if !tournament.round_in_progress() {
        return Err(TournamentError::InvalidState);
    }
    if tournament.bracket.iter().any(|m| m.winner.is_none()) {
        return Err(TournamentError::IncompleteResults);
    }

    let outcomes: Vec<(usize, usize)> = tournament.bracket.iter().filter_map(Matchup::outcome).collect();
    for (winner, loser) in outcomes {
        tournament
            .teams
            .get_mut(winner)
            .ok_or(TournamentError::InvalidState)?
            .win(&mut tournament.players)?;
        tournament
            .teams
            .get_mut(loser)
            .ok_or(TournamentError::InvalidState)?
            .lose(&mut tournament.players)?;
    }

    let round = tournament.current_round;
    let sitting_out = tournament.sitting_out();
    tournament.history.push(RoundRecord {
        round,
        state: tournament.state,
        teams: tournament.teams.clone(),
        matchups: std::mem::take(&mut tournament.bracket),
        sitting_out,
        played_at: Utc::now(),
    });
    log::info!("Round {} results applied", round);

    let locked = tournament.final_teams.is_some();
    if team_source(&tournament.config, round + 1, locked).is_none() {
        tournament.state = TournamentState::Completed;
        log::info!("Tournament {} completed after {} rounds", tournament.id, round);
    }
    Ok(())
}

/// Ask the provider for every matchup of the current round, then submit it.
pub fn run_round<D: DecisionProvider + ?Sized>(
    tournament: &mut Tournament,
    provider: &mut D,
) -> Result<(), TournamentError> {
    if !tournament.round_in_progress() {
        return Err(TournamentError::InvalidState);
    }
    log::info!("Playing round {}", tournament.current_round);
    for matchup in tournament.bracket.iter_mut() {
        let first = tournament
            .teams
            .get(matchup.first)
            .ok_or(TournamentError::InvalidState)?;
        let second = tournament
            .teams
            .get(matchup.second)
            .ok_or(TournamentError::InvalidState)?;
        matchup.winner = Some(provider.resolve(first, second));
    }
    submit_round(tournament)
}

/// Play the whole tournament: all preparation rounds, then the best-of stretch.
///
/// The first deciding round forms the composition that the rest of the stretch reuses,
/// so `TournamentConfig::new(2, 1, 1)` plays a single round on the initial split.
///
/// Starts the tournament if still in Setup. With too few players this returns
/// `NotEnoughPlayers` before any team is formed.
pub fn run_tournament<D: DecisionProvider + ?Sized>(
    tournament: &mut Tournament,
    provider: &mut D,
) -> Result<(), TournamentError> {
    if tournament.state == TournamentState::Setup {
        start_tournament(tournament)?;
    }
    if tournament.round_in_progress() {
        run_round(tournament, provider)?;
    }
    while start_round(tournament)? {
        run_round(tournament, provider)?;
    }
    Ok(())
}
