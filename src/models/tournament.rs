//! Tournament, TournamentState, and the round history.

use crate::models::config::TournamentConfig;
use crate::models::game::{MatchId, Matchup};
use crate::models::player::{Player, PlayerId};
use crate::models::team::Team;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Not enough registered players to form the configured teams.
    NotEnoughPlayers { registered: usize, required: usize },
    /// More players than the configured teams can hold.
    TooManyPlayers { registered: usize, capacity: usize },
    /// Configuration can never produce a matchup.
    InvalidConfig(String),
    /// Tournament is not in a state that allows this action.
    InvalidState,
    /// Player not found in the roster.
    PlayerNotFound(PlayerId),
    /// Matchup not found in the current bracket.
    MatchNotFound(MatchId),
    /// Not all matchups of the current round have a winner.
    IncompleteResults,
    /// Roster file could not be read.
    RosterImport(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::NotEnoughPlayers { registered, required } => {
                write!(f, "Not enough players: need at least {} (have {})", required, registered)
            }
            TournamentError::TooManyPlayers { registered, capacity } => {
                write!(f, "Too many players: teams hold at most {} (have {})", capacity, registered)
            }
            TournamentError::InvalidConfig(reason) => write!(f, "Invalid configuration: {}", reason),
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
            TournamentError::PlayerNotFound(_) => write!(f, "Player not found"),
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::IncompleteResults => write!(f, "Not all matches have a result"),
            TournamentError::RosterImport(reason) => write!(f, "Could not read roster: {}", reason),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    /// Registering players; not started.
    #[default]
    Setup,
    /// Teams are re-rolled every round.
    Preparation,
    /// Best-of stretch: team composition is locked.
    Deciding,
    /// All rounds played.
    Completed,
}

/// One submitted round, kept for display and inspection.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: u32,
    pub state: TournamentState,
    /// Teams as they stood after the results were applied.
    pub teams: Vec<Team>,
    pub matchups: Vec<Matchup>,
    /// Players left out of every team this round.
    pub sitting_out: Vec<PlayerId>,
    pub played_at: DateTime<Utc>,
}

/// Full tournament state: roster, teams, bracket, and phase.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub config: TournamentConfig,
    /// Seed for the initial random assignment; None draws from entropy.
    pub seed: Option<u64>,
    /// Every registered player, in registration order.
    pub players: Vec<Player>,
    /// Teams of the current round.
    pub teams: Vec<Team>,
    /// Composition locked at the start of the deciding phase.
    pub final_teams: Option<Vec<Team>>,
    /// Current round's matchups; empty between rounds.
    pub bracket: Vec<Matchup>,
    /// Last started round (0 before the first one).
    pub current_round: u32,
    pub state: TournamentState,
    pub history: Vec<RoundRecord>,
}

impl Tournament {
    /// Create a new tournament in Setup state with no players.
    pub fn new(config: TournamentConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            config,
            seed: None,
            players: Vec::new(),
            teams: Vec::new(),
            final_teams: None,
            bracket: Vec::new(),
            current_round: 0,
            state: TournamentState::Setup,
            history: Vec::new(),
        }
    }

    /// Fix the seed used for the initial assignment (reproducible runs).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Create a tournament with initial players. Still in Setup until started.
    pub fn with_players(players: Vec<Player>, config: TournamentConfig) -> Self {
        Self {
            players,
            ..Self::new(config)
        }
    }

    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn get_player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Register a player with a zero score (Setup only). Duplicate names are accepted.
    pub fn register_player(&mut self, name: impl Into<String>) -> Result<PlayerId, TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        let player = Player::new(name);
        let id = player.id;
        self.players.push(player);
        Ok(id)
    }

    /// Remove a player by id (Setup only).
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<(), TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        let idx = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        self.players.remove(idx);
        Ok(())
    }

    /// Replace the round structure (Setup only).
    pub fn set_config(&mut self, config: TournamentConfig) -> Result<(), TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Team the player belongs to this round, if any.
    pub fn team_of(&self, player_id: PlayerId) -> Option<&Team> {
        self.teams.iter().find(|t| t.contains(player_id))
    }

    /// Players not placed on any team this round.
    pub fn sitting_out(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|p| self.team_of(p.id).is_none())
            .map(|p| p.id)
            .collect()
    }

    /// Sum of every player's score.
    pub fn total_score(&self) -> i32 {
        self.players.iter().map(|p| p.score).sum()
    }

    /// Players ordered by score, best first; registration order breaks ties.
    pub fn standings(&self) -> Vec<&Player> {
        let mut ranked: Vec<&Player> = self.players.iter().collect();
        ranked.sort_by_key(|p| std::cmp::Reverse(p.score));
        ranked
    }

    /// True while a round has been started and not yet submitted.
    pub fn round_in_progress(&self) -> bool {
        !self.bracket.is_empty()
    }

    /// Back to Setup with the same player names and config. Scores and teams are cleared.
    pub fn restart_tournament(&mut self) -> Result<(), TournamentError> {
        if self.state == TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        let names: Vec<String> = self.players.iter().map(|p| p.name.clone()).collect();
        let config = self.config;
        let (id, seed) = (self.id, self.seed);
        *self = Self::new(config);
        self.id = id;
        self.seed = seed;
        for name in names {
            self.register_player(name)?;
        }
        Ok(())
    }
}
