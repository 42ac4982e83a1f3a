//! Script runner
//!
//! Loads YAML test scripts and executes them row by row on top of the
//! [`steps`](crate::steps) interpreter.

mod config;
mod runner;

pub use config::*;
pub use runner::{RowResult, RunReport, Runner};
