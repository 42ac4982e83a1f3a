//! Step outcomes and the next-step decorator protocol
//!
//! Outcomes are plain values. The `...OnNext` commands do not produce an
//! outcome of their own: they hand the runner a [`Decorator`] which is
//! applied to whatever row comes next and rewrites that row's result.

use serde::Serialize;
use std::fmt;

use super::driver::Driver;
use super::state::TestState;
use super::step::Step;
use crate::common::Result;

/// Result of executing a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum Outcome {
    /// Nothing happened; carry on
    Continue,
    AssertionFailed,
    VerificationFailed,
    Error(String),
}

impl Outcome {
    pub fn error(message: impl Into<String>) -> Self {
        Outcome::Error(message.into())
    }

    /// Whether the run may proceed to the next row
    ///
    /// Verification failures are soft; assertion failures and errors stop
    /// the test.
    pub fn is_okay_to_continue(&self) -> bool {
        matches!(self, Outcome::Continue | Outcome::VerificationFailed)
    }

    /// Whether this outcome counts against the test
    pub fn is_failure(&self) -> bool {
        !matches!(self, Outcome::Continue)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Continue => write!(f, "ok"),
            Outcome::AssertionFailed => write!(f, "assertion failed"),
            Outcome::VerificationFailed => write!(f, "verification failed"),
            Outcome::Error(message) => write!(f, "error: {}", message),
        }
    }
}

/// Which failure a decorator reports when the wrapped step succeeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Assertion,
    Verification,
}

impl FailureKind {
    pub fn outcome(self) -> Outcome {
        match self {
            FailureKind::Assertion => Outcome::AssertionFailed,
            FailureKind::Verification => Outcome::VerificationFailed,
        }
    }
}

/// What a step hands back to the runner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// An ordinary outcome for this row
    Done(Outcome),
    /// Apply this decorator to the next row
    Wrap(Decorator),
    /// The step reports nothing at all (`store`)
    Silent,
}

impl From<Outcome> for Completion {
    fn from(outcome: Outcome) -> Self {
        Completion::Done(outcome)
    }
}

/// Wrapper that expects the next step to fail
///
/// The check is inverted: if the wrapped step comes back clean the
/// decorator reports its [`FailureKind`]; any other result means the
/// expected failure happened and the row passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decorator {
    failure: FailureKind,
}

impl Decorator {
    pub fn fails_if_next_succeeds(failure: FailureKind) -> Self {
        Self { failure }
    }

    pub fn failure(&self) -> FailureKind {
        self.failure
    }

    /// Run `next` and remap its result
    ///
    /// A silent step did not fail, so it is treated like `Continue`. A step
    /// that itself yields a decorator is not a clean result; that inner
    /// decorator is consumed here and never wraps anything.
    pub fn evaluate(
        &self,
        next: &dyn Step,
        driver: &mut dyn Driver,
        state: &mut TestState,
    ) -> Result<Outcome> {
        let actual = next.execute(driver, state)?;
        tracing::debug!(?actual, failure = ?self.failure, "evaluating wrapped step");

        Ok(match actual {
            Completion::Done(Outcome::Continue) | Completion::Silent => self.failure.outcome(),
            Completion::Done(_) | Completion::Wrap(_) => Outcome::Continue,
        })
    }

    /// Whether the run proceeds after this decorator fires
    pub fn continuable(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Error;
    use crate::steps::driver::DryRunDriver;

    /// Step that returns a fixed completion
    struct Fixed(Completion);

    impl Step for Fixed {
        fn execute(&self, _driver: &mut dyn Driver, _state: &mut TestState) -> Result<Completion> {
            Ok(self.0.clone())
        }
    }

    struct Fatal;

    impl Step for Fatal {
        fn execute(&self, _driver: &mut dyn Driver, _state: &mut TestState) -> Result<Completion> {
            Err(Error::Interrupted)
        }
    }

    fn evaluate(failure: FailureKind, next: &dyn Step) -> Result<Outcome> {
        let mut driver = DryRunDriver::new();
        let mut state = TestState::new();
        Decorator::fails_if_next_succeeds(failure).evaluate(next, &mut driver, &mut state)
    }

    #[test]
    fn test_assert_decorator_inverts_success() {
        let next = Fixed(Outcome::Continue.into());
        assert_eq!(
            evaluate(FailureKind::Assertion, &next).unwrap(),
            Outcome::AssertionFailed
        );
    }

    #[test]
    fn test_assert_decorator_accepts_error() {
        let next = Fixed(Outcome::error("boom").into());
        assert_eq!(
            evaluate(FailureKind::Assertion, &next).unwrap(),
            Outcome::Continue
        );
    }

    #[test]
    fn test_verify_decorator_inverts_success() {
        let next = Fixed(Outcome::Continue.into());
        assert_eq!(
            evaluate(FailureKind::Verification, &next).unwrap(),
            Outcome::VerificationFailed
        );
    }

    #[test]
    fn test_decorator_accepts_any_failure_variant() {
        for outcome in [Outcome::AssertionFailed, Outcome::VerificationFailed] {
            let next = Fixed(outcome.into());
            assert_eq!(
                evaluate(FailureKind::Verification, &next).unwrap(),
                Outcome::Continue
            );
        }
    }

    #[test]
    fn test_silent_step_counts_as_success() {
        let next = Fixed(Completion::Silent);
        assert_eq!(
            evaluate(FailureKind::Assertion, &next).unwrap(),
            Outcome::AssertionFailed
        );
    }

    #[test]
    fn test_nested_decorator_counts_as_failure() {
        let inner = Decorator::fails_if_next_succeeds(FailureKind::Verification);
        let next = Fixed(Completion::Wrap(inner));
        assert_eq!(
            evaluate(FailureKind::Assertion, &next).unwrap(),
            Outcome::Continue
        );
    }

    #[test]
    fn test_fatal_error_passes_through() {
        let err = evaluate(FailureKind::Assertion, &Fatal).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_continuation_policy() {
        assert!(Outcome::Continue.is_okay_to_continue());
        assert!(Outcome::VerificationFailed.is_okay_to_continue());
        assert!(!Outcome::AssertionFailed.is_okay_to_continue());
        assert!(!Outcome::error("x").is_okay_to_continue());
        assert!(Decorator::fails_if_next_succeeds(FailureKind::Assertion).continuable());
        assert!(Decorator::fails_if_next_succeeds(FailureKind::Verification).continuable());
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(Outcome::error("bad")).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "bad");

        let json = serde_json::to_value(Outcome::Continue).unwrap();
        assert_eq!(json["status"], "continue");
    }
}
