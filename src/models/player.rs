//! Player data structure.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used by teams and lookups).
pub type PlayerId = Uuid;

/// A registered participant. Score moves by one per won or lost matchup.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Running score: wins minus losses.
    pub score: i32,
    pub wins: u32,
    pub losses: u32,
}

impl Player {
    /// Create a new player with the given name and a zero score.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            score: 0,
            wins: 0,
            losses: 0,
        }
    }

    /// Record a win for this player.
    pub fn win(&mut self) {
        self.score += 1;
        self.wins += 1;
    }

    /// Record a loss for this player.
    pub fn lose(&mut self) {
        self.score -= 1;
        self.losses += 1;
    }
}
