//! Data structures for the tournament: players, teams, matchups, tournament state.

mod config;
mod game;
mod player;
mod team;
mod tournament;

pub use config::TournamentConfig;
pub use game::{MatchId, Matchup, Side};
pub use player::{Player, PlayerId};
pub use team::{Team, TEAM_CAPACITY};
pub use tournament::{RoundRecord, Tournament, TournamentError, TournamentId, TournamentState};
