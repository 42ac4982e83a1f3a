//! Test runner implementation
//!
//! Walks a script row by row, resolving each command through the
//! [`Registry`] and threading any pending decorator into the next row.

use serde::Serialize;

use crate::common::{Error, Result};
use crate::steps::{
    Completion, Decorator, Driver, DriverStep, Outcome, Registry, Step, TestState,
};

use super::config::{ScriptCommand, TestScript};

/// Result of a single row
#[derive(Debug, Clone, Serialize)]
pub struct RowResult {
    /// 1-based row number
    pub index: usize,
    pub command: String,
    pub locator: String,
    pub value: String,
    /// `None` when the step reported nothing (`store`)
    pub outcome: Option<Outcome>,
    /// Whether the row ran under a decorator from the previous row
    pub decorated: bool,
}

/// Result of a test run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub name: String,
    pub passed: bool,
    pub steps_run: usize,
    pub steps_total: usize,
    /// Whether a failure stopped the run before the last row
    pub halted: bool,
    pub rows: Vec<RowResult>,
}

impl RunReport {
    /// First row that counted against the test
    pub fn first_failure(&self) -> Option<&RowResult> {
        self.rows
            .iter()
            .find(|row| row.outcome.as_ref().is_some_and(Outcome::is_failure))
    }
}

/// Executes scripts against a driver
pub struct Runner<'a> {
    registry: &'a Registry,
    continue_on_failure: bool,
}

impl<'a> Runner<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            continue_on_failure: false,
        }
    }

    /// Keep going after outcomes that would normally stop the test
    pub fn continue_on_failure(mut self, enabled: bool) -> Self {
        self.continue_on_failure = enabled;
        self
    }

    /// Build the step for a row
    ///
    /// Names missing from the registry are forwarded to the driver.
    pub fn resolve(&self, row: &ScriptCommand) -> Box<dyn Step> {
        match self.registry.resolve(&row.command) {
            Some(factory) => factory(&row.locator, &row.value),
            None => {
                tracing::trace!(command = %row.command, "forwarding to driver");
                Box::new(DriverStep::new(&row.command, &row.locator, &row.value))
            }
        }
    }

    /// Run every row of `script`
    ///
    /// Soft failures end up in the report. Only fatal conditions come back
    /// as `Err`, and the caller must stop the process on those.
    pub fn run(
        &self,
        script: &TestScript,
        driver: &mut dyn Driver,
        state: &mut TestState,
    ) -> Result<RunReport> {
        let steps_total = script.commands.len();
        tracing::info!(name = %script.name, steps = steps_total, "running test");

        for (name, value) in &script.variables {
            state.store(name.as_str(), value.as_str());
        }

        let mut pending: Option<Decorator> = None;
        let mut rows = Vec::with_capacity(steps_total);
        let mut passed = true;
        let mut halted = false;

        for (i, row) in script.commands.iter().enumerate() {
            if state.interrupt().is_triggered() {
                return Err(Error::Interrupted);
            }

            let step = self.resolve(row);
            let decorated = pending.is_some();

            // A row that yields a decorator decides continuation itself
            let mut continuable = true;
            let outcome = match pending.take() {
                Some(decorator) => Some(decorator.evaluate(step.as_ref(), driver, state)?),
                None => match step.execute(driver, state)? {
                    Completion::Done(outcome) => Some(outcome),
                    Completion::Wrap(decorator) => {
                        continuable = decorator.continuable();
                        pending = Some(decorator);
                        Some(Outcome::Continue)
                    }
                    Completion::Silent => None,
                },
            };

            match &outcome {
                Some(o) if o.is_failure() => {
                    tracing::warn!(row = i + 1, command = %row.command, outcome = %o, "step failed")
                }
                _ => tracing::debug!(row = i + 1, command = %row.command, ?outcome, "step done"),
            }

            let stop = !continuable
                || outcome
                    .as_ref()
                    .is_some_and(|o| !o.is_okay_to_continue());
            if outcome.as_ref().is_some_and(Outcome::is_failure) {
                passed = false;
            }

            rows.push(RowResult {
                index: i + 1,
                command: row.command.clone(),
                locator: row.locator.clone(),
                value: row.value.clone(),
                outcome,
                decorated,
            });

            if stop && !self.continue_on_failure {
                halted = i + 1 < steps_total;
                break;
            }
        }

        if let Some(decorator) = pending {
            tracing::warn!(
                failure = ?decorator.failure(),
                "script ended with no command for the last ...OnNext to wrap"
            );
        }

        Ok(RunReport {
            name: script.name.clone(),
            passed,
            steps_run: rows.len(),
            steps_total,
            halted,
            rows,
        })
    }
}
