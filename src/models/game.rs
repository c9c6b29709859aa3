//! Matchup between two teams of the current round, and the Side that won it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a matchup.
pub type MatchId = Uuid;

/// Which side of a matchup won.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    #[default]
    First,
    Second,
}

impl Side {
    /// 0 for `First`, 1 for `Second`.
    pub fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }

    /// Inverse of [`Side::index`]; any other value is `None`.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Side::First),
            1 => Some(Side::Second),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }
}

/// A single matchup: two teams of the current round, by index into `Tournament::teams`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Matchup {
    pub id: MatchId,
    pub first: usize,
    pub second: usize,
    /// None if not yet decided.
    pub winner: Option<Side>,
}

impl Matchup {
    pub fn new(first: usize, second: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            first,
            second,
            winner: None,
        }
    }

    /// Team index on the given side.
    pub fn team(&self, side: Side) -> usize {
        match side {
            Side::First => self.first,
            Side::Second => self.second,
        }
    }

    /// (winning team index, losing team index), once decided.
    pub fn outcome(&self) -> Option<(usize, usize)> {
        self.winner
            .map(|side| (self.team(side), self.team(side.opposite())))
    }
}
