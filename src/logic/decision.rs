//! The outside party that decides who won each matchup.

use crate::models::{Side, Team};

/// Supplies the winner of a matchup. Implemented by whatever collects results.
pub trait DecisionProvider {
    fn resolve(&mut self, first: &Team, second: &Team) -> Side;
}

impl<F> DecisionProvider for F
where
    F: FnMut(&Team, &Team) -> Side,
{
    fn resolve(&mut self, first: &Team, second: &Team) -> Side {
        self(first, second)
    }
}
