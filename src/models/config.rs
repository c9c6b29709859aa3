//! Tournament configuration recognised at construction.

use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};

/// Round structure of a tournament.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    /// Number of teams formed every round.
    pub teams_num: usize,
    /// Round at which the best-of stretch starts. Rounds `1..prep_games_num` are
    /// preparation rounds (random split first, then re-rolled by score).
    pub prep_games_num: u32,
    /// Deciding rounds played with one team composition, starting at round `prep_games_num`.
    pub bo: u32,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            teams_num: 2,
            prep_games_num: 3,
            bo: 3,
        }
    }
}

impl TournamentConfig {
    pub fn new(teams_num: usize, prep_games_num: u32, bo: u32) -> Self {
        Self {
            teams_num,
            prep_games_num,
            bo,
        }
    }

    /// Reject configurations the round table cannot express.
    ///
    /// `prep_games_num` must be at least 1. Rounds are numbered from 1 and the best-of
    /// stretch covers rounds `prep_games_num..prep_games_num + bo`, so 0 would put the
    /// first deciding round at round 0, which is never played, and silently drop it.
    pub fn validate(&self) -> Result<(), TournamentError> {
        if self.teams_num < 2 {
            return Err(TournamentError::InvalidConfig(format!(
                "need at least 2 teams, got {}",
                self.teams_num
            )));
        }
        if self.prep_games_num == 0 {
            return Err(TournamentError::InvalidConfig(
                "prep_games_num must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Total number of rounds a full run plays (for a valid config).
    pub fn total_rounds(&self) -> u32 {
        (self.prep_games_num + self.bo).saturating_sub(1)
    }
}
