//! Built-in steps
//!
//! These are the commands handled without touching the browser driver.

use std::time::Duration;

use super::driver::Driver;
use super::outcome::{Completion, Decorator, FailureKind, Outcome};
use super::state::TestState;
use super::step::Step;
use crate::common::{Error, Result};

/// `assertErrorOnNext` and friends: wrap the next row
#[derive(Debug, Clone, Copy)]
pub struct NextCommandFails {
    failure: FailureKind,
}

impl NextCommandFails {
    pub fn new(failure: FailureKind) -> Self {
        Self { failure }
    }
}

impl Step for NextCommandFails {
    fn execute(&self, _driver: &mut dyn Driver, _state: &mut TestState) -> Result<Completion> {
        Ok(Completion::Wrap(Decorator::fails_if_next_succeeds(
            self.failure,
        )))
    }
}

/// `echo`: write the expanded locator to the run's log
#[derive(Debug, Clone)]
pub struct Echo {
    locator: String,
}

impl Echo {
    pub fn new(locator: &str) -> Self {
        Self {
            locator: locator.to_string(),
        }
    }
}

impl Step for Echo {
    fn execute(&self, _driver: &mut dyn Driver, state: &mut TestState) -> Result<Completion> {
        state.log(&state.expand(&self.locator));
        Ok(Outcome::Continue.into())
    }
}

/// `pause`: block the calling thread for a number of milliseconds
#[derive(Debug, Clone)]
pub struct Pause {
    locator: String,
}

impl Pause {
    pub fn new(locator: &str) -> Self {
        Self {
            locator: locator.to_string(),
        }
    }
}

impl Step for Pause {
    fn execute(&self, _driver: &mut dyn Driver, state: &mut TestState) -> Result<Completion> {
        let timeout = state.expand(&self.locator);
        let millis: u64 = match timeout.parse() {
            Ok(millis) => millis,
            Err(_) => {
                return Ok(Outcome::error(format!("Unable to parse timeout: {}", timeout)).into())
            }
        };

        tracing::debug!(millis, "pausing");
        if state.interrupt().wait(Duration::from_millis(millis)) {
            tracing::error!(millis, "pause interrupted");
            return Err(Error::Interrupted);
        }

        Ok(Outcome::Continue.into())
    }
}

/// `store`: save the expanded value under the expanded locator
#[derive(Debug, Clone)]
pub struct Store {
    locator: String,
    value: String,
}

impl Store {
    pub fn new(locator: &str, value: &str) -> Self {
        Self {
            locator: locator.to_string(),
            value: value.to_string(),
        }
    }
}

impl Step for Store {
    fn execute(&self, _driver: &mut dyn Driver, state: &mut TestState) -> Result<Completion> {
        let name = state.expand(&self.locator);
        let value = state.expand(&self.value);
        state.store(name, value);
        Ok(Completion::Silent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::driver::DryRunDriver;
    use crate::steps::state::{Interrupt, MemorySink};
    use std::time::Instant;

    fn run(step: &dyn Step, state: &mut TestState) -> Result<Completion> {
        let mut driver = DryRunDriver::new();
        step.execute(&mut driver, state)
    }

    #[test]
    fn test_next_command_fails_yields_decorator() {
        let mut state = TestState::new();
        let result = run(&NextCommandFails::new(FailureKind::Verification), &mut state).unwrap();
        assert_eq!(
            result,
            Completion::Wrap(Decorator::fails_if_next_succeeds(
                FailureKind::Verification
            ))
        );
    }

    #[test]
    fn test_echo_logs_expanded_locator() {
        let sink = MemorySink::new();
        let mut state = TestState::new().with_sink(sink.clone());
        state.store("who", "world");

        let result = run(&Echo::new("hello ${who}"), &mut state).unwrap();

        assert_eq!(result, Completion::Done(Outcome::Continue));
        assert_eq!(sink.lines(), vec!["hello world".to_string()]);
    }

    #[test]
    fn test_pause_blocks_for_duration() {
        let mut state = TestState::new();
        let started = Instant::now();
        let result = run(&Pause::new("100"), &mut state).unwrap();

        assert_eq!(result, Completion::Done(Outcome::Continue));
        assert!(started.elapsed() >= Duration::from_millis(100));
    }

    #[test]
    fn test_pause_expands_timeout() {
        let mut state = TestState::new();
        state.store("wait", "5");
        let result = run(&Pause::new("${wait}"), &mut state).unwrap();
        assert_eq!(result, Completion::Done(Outcome::Continue));
    }

    #[test]
    fn test_pause_rejects_non_numeric_timeout() {
        let mut state = TestState::new();
        let result = run(&Pause::new("abc"), &mut state).unwrap();
        assert_eq!(
            result,
            Completion::Done(Outcome::error("Unable to parse timeout: abc"))
        );
    }

    #[test]
    fn test_pause_rejects_negative_timeout() {
        let mut state = TestState::new();
        let result = run(&Pause::new("-5"), &mut state).unwrap();
        assert!(matches!(result, Completion::Done(Outcome::Error(_))));
    }

    #[test]
    fn test_interrupted_pause_is_fatal() {
        let interrupt = Interrupt::new();
        let mut state = TestState::new().with_interrupt(interrupt.clone());

        let handle = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(50));
            interrupt.trigger();
        });

        let err = run(&Pause::new("60000"), &mut state).unwrap_err();
        assert!(matches!(err, Error::Interrupted));
        assert_eq!(err.exit_code(), 255);
        handle.join().unwrap();
    }

    #[test]
    fn test_store_is_silent() {
        let mut state = TestState::new();
        state.store("key", "name");
        let result = run(&Store::new("${key}", "v-${key}"), &mut state).unwrap();

        assert_eq!(result, Completion::Silent);
        assert_eq!(state.get("name"), Some("v-name"));
    }
}
