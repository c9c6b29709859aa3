//! Setup phase: start tournament (transition from Setup to Preparation).

use crate::logic::balancer::check_roster_size;
use crate::models::{Tournament, TournamentError, TournamentState};

/// Start the tournament: the config must be valid and the roster must fit the teams.
///
/// No teams are formed here; the first [`start_round`](crate::logic::start_round) does that.
pub fn start_tournament(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.state != TournamentState::Setup {
        return Err(TournamentError::InvalidState);
    }
    tournament.config.validate()?;
    if let Err(e) = check_roster_size(tournament.players.len(), tournament.config.teams_num) {
        log::warn!("Cannot start tournament {}: {}", tournament.id, e);
        return Err(e);
    }
    tournament.state = TournamentState::Preparation;
    log::info!(
        "Tournament {} started: {} players, {} teams, {} preparation + {} deciding rounds",
        tournament.id,
        tournament.players.len(),
        tournament.config.teams_num,
        tournament.config.prep_games_num,
        tournament.config.bo
    );
    Ok(())
}
