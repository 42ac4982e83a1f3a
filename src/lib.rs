//! Selenese runner - an interpreter for legacy browser-automation scripts
//!
//! Scripts are sequences of `(command, locator, value)` rows. Each row
//! resolves to a step that runs against a per-run [`steps::TestState`] and
//! a browser [`steps::Driver`]. The `...OnNext` commands wrap the following
//! row and invert its result.

pub mod cli;
pub mod commands;
pub mod common;
pub mod steps;
pub mod testing;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use steps::{Completion, Outcome, Registry, TestState};
pub use testing::{RunReport, Runner, ScriptCommand, TestScript};
