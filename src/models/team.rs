//! Team: a bounded roster of players with an aggregate score.

use crate::models::player::{Player, PlayerId};
use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};

/// Maximum number of players a team can hold.
pub const TEAM_CAPACITY: usize = 5;

/// A team for one round. Members are referenced by id; the roster owns the players.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub members: Vec<PlayerId>,
    /// Sum of member scores, plus `offset` per member while an offset is applied.
    pub points: i32,
    /// Only non-zero while the balancer is still filling the team.
    pub offset: i32,
}

impl Team {
    /// Create an empty team.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create an empty team with `offset` already applied.
    pub fn with_offset(name: impl Into<String>, offset: i32) -> Self {
        let mut team = Self::new(name);
        team.apply_offset(offset);
        team
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= TEAM_CAPACITY
    }

    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.members.contains(&player_id)
    }

    /// Append a player if there is room. Returns `false` (and changes nothing) when full.
    pub fn add_player(&mut self, player: &Player) -> bool {
        if self.is_full() {
            return false;
        }
        self.members.push(player.id);
        self.points += player.score + self.offset;
        true
    }

    /// Set the offset and count it once for every current member.
    pub fn apply_offset(&mut self, offset: i32) {
        self.offset = offset;
        self.points += offset * self.len() as i32;
    }

    /// Take the offset back out of `points` and reset it to zero.
    pub fn remove_offset(&mut self) {
        self.points -= self.offset * self.len() as i32;
        self.offset = 0;
    }

    /// Every member gains a point, and so does the team once per member.
    pub fn win(&mut self, roster: &mut [Player]) -> Result<(), TournamentError> {
        for idx in self.member_indices(roster)? {
            roster[idx].win();
            self.points += 1;
        }
        Ok(())
    }

    /// Every member loses a point, and so does the team once per member.
    pub fn lose(&mut self, roster: &mut [Player]) -> Result<(), TournamentError> {
        for idx in self.member_indices(roster)? {
            roster[idx].lose();
            self.points -= 1;
        }
        Ok(())
    }

    /// Reset `points` to the members' current scores (drops any offset).
    pub fn recount(&mut self, roster: &[Player]) {
        self.offset = 0;
        self.points = roster
            .iter()
            .filter(|p| self.contains(p.id))
            .map(|p| p.score)
            .sum();
    }

    /// Roster positions of all members. Fails before anything is mutated if a member is missing.
    fn member_indices(&self, roster: &[Player]) -> Result<Vec<usize>, TournamentError> {
        self.members
            .iter()
            .map(|&id| {
                roster
                    .iter()
                    .position(|p| p.id == id)
                    .ok_or(TournamentError::PlayerNotFound(id))
            })
            .collect()
    }
}
