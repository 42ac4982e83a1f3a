//! The step abstraction

use super::driver::Driver;
use super::outcome::Completion;
use super::state::TestState;
use crate::common::Result;

/// One executable unit, produced for a single script row
///
/// Steps capture their arguments when built and touch the driver or the
/// state only inside [`Step::execute`]. The `Err` branch is reserved for
/// conditions that must abort the whole process; anything a test can fail
/// on is reported through the returned [`Completion`].
pub trait Step {
    fn execute(&self, driver: &mut dyn Driver, state: &mut TestState) -> Result<Completion>;
}

/// Constructor for a step from a row's locator and value
pub type StepFactory = fn(locator: &str, value: &str) -> Box<dyn Step>;
