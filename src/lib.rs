//! Team rotation tournament: library with models and business logic.
//!
//! Players are split into teams, teams are re-rolled by score between preparation
//! rounds, and a locked composition plays out the deciding best-of rounds. Winners
//! come from an outside [`DecisionProvider`].

pub mod logic;
pub mod models;

pub use logic::{
    check_roster_size, generate_bracket, import_players, initial_assignment, is_deciding, read_player_names,
    rebalance, round_robin_pairs, run_round, run_tournament, set_match_winner, start_round,
    start_tournament, submit_round, team_sizes, team_source, DecisionProvider, RandomDraw,
    TeamSource, MIN_PLAYERS,
};
pub use models::{
    MatchId, Matchup, Player, PlayerId, RoundRecord, Side, Team, Tournament, TournamentConfig,
    TournamentError, TournamentId, TournamentState, TEAM_CAPACITY,
};
