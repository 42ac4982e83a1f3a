//! Selenese step interpreter
//!
//! Resolves command names to steps, executes them against a per-run
//! [`TestState`], and implements the `...OnNext` decorator protocol.

mod builtin;
mod driver;
mod outcome;
mod registry;
mod state;
mod step;

pub use builtin::{Echo, NextCommandFails, Pause, Store};
pub use driver::{DryRunDriver, Driver, DriverStep};
pub use outcome::{Completion, Decorator, FailureKind, Outcome};
pub use registry::Registry;
pub use state::{Interrupt, LogSink, MemorySink, TestState, TracingSink};
pub use step::{Step, StepFactory};
