//! Tournament business logic: setup, team formation, pairing, round progression.

mod balancer;
mod bracket;
mod decision;
mod draw;
mod roster;
mod rounds;
mod setup;

pub use balancer::{check_roster_size, initial_assignment, rebalance, team_sizes, MIN_PLAYERS};
pub use bracket::{generate_bracket, round_robin_pairs};
pub use decision::DecisionProvider;
pub use draw::RandomDraw;
pub use roster::{import_players, read_player_names};
pub use rounds::{
    is_deciding, run_round, run_tournament, set_match_winner, start_round, submit_round, team_source,
    TeamSource,
};
pub use setup::start_tournament;
