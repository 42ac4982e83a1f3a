//! Browser driver capability
//!
//! The runner never looks inside a driver. Commands the registry does not
//! know are forwarded to it by name through [`DriverStep`].

use super::outcome::{Completion, Outcome};
use super::state::TestState;
use super::step::Step;
use crate::common::Result;

/// Opaque handle offering named browser actions
pub trait Driver: Send {
    /// Perform `command` with already-expanded arguments
    ///
    /// Returns the action's textual result. Ordinary failures should be
    /// [`Error::DriverCommand`](crate::common::Error::DriverCommand).
    fn execute(&mut self, command: &str, args: &[String]) -> Result<String>;
}

/// Driver that performs nothing and logs every action
///
/// Useful for checking a script's flow without a browser.
#[derive(Debug, Default)]
pub struct DryRunDriver {
    calls: Vec<(String, Vec<String>)>,
}

impl DryRunDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every command received so far, in order
    pub fn calls(&self) -> &[(String, Vec<String>)] {
        &self.calls
    }
}

impl Driver for DryRunDriver {
    fn execute(&mut self, command: &str, args: &[String]) -> Result<String> {
        tracing::info!(%command, ?args, "dry run");
        self.calls.push((command.to_string(), args.to_vec()));
        Ok(String::new())
    }
}

/// Step forwarding a row to the driver verbatim
#[derive(Debug, Clone)]
pub struct DriverStep {
    command: String,
    locator: String,
    value: String,
}

impl DriverStep {
    pub fn new(command: &str, locator: &str, value: &str) -> Self {
        Self {
            command: command.to_string(),
            locator: locator.to_string(),
            value: value.to_string(),
        }
    }
}

impl Step for DriverStep {
    fn execute(&self, driver: &mut dyn Driver, state: &mut TestState) -> Result<Completion> {
        let args = [state.expand(&self.locator), state.expand(&self.value)];
        match driver.execute(&self.command, &args) {
            Ok(_) => Ok(Outcome::Continue.into()),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                tracing::debug!(command = %self.command, error = %e, "driver command failed");
                Ok(Outcome::error(e.to_string()).into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Error;

    struct Failing;

    impl Driver for Failing {
        fn execute(&mut self, command: &str, _args: &[String]) -> Result<String> {
            Err(Error::driver_command(command, "element not found"))
        }
    }

    #[test]
    fn test_driver_step_expands_arguments() {
        let mut driver = DryRunDriver::new();
        let mut state = TestState::new();
        state.store("id", "login");

        let step = DriverStep::new("click", "id=${id}", "");
        let result = step.execute(&mut driver, &mut state).unwrap();

        assert_eq!(result, Completion::Done(Outcome::Continue));
        assert_eq!(
            driver.calls(),
            &[(
                "click".to_string(),
                vec!["id=login".to_string(), String::new()]
            )]
        );
    }

    #[test]
    fn test_driver_failure_becomes_error_outcome() {
        let mut state = TestState::new();
        let step = DriverStep::new("click", "id=missing", "");
        let result = step.execute(&mut Failing, &mut state).unwrap();

        match result {
            Completion::Done(Outcome::Error(message)) => {
                assert!(message.contains("element not found"));
            }
            other => panic!("Expected error outcome, got {:?}", other),
        }
    }
}
