//! Per-run test state
//!
//! A [`TestState`] lives for exactly one script run. It owns the variable
//! store written by `store` and read back through `${name}` placeholders,
//! the sink that `echo` writes to, and the interrupt handle `pause` waits on.

use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

/// Destination for informational lines emitted by steps
pub trait LogSink: Send + Sync {
    fn info(&self, line: &str);
}

/// Sink that forwards lines to tracing at INFO
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn info(&self, line: &str) {
        tracing::info!(target: "selenese::echo", "{}", line);
    }
}

/// Sink that keeps every line in memory
///
/// Clones share the same buffer, so a caller can keep one handle and give
/// the other to a [`TestState`].
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the lines written so far
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl LogSink for MemorySink {
    fn info(&self, line: &str) {
        tracing::info!(target: "selenese::echo", "{}", line);
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(line.to_string());
    }
}

/// Shared flag used to break a run out of a blocking wait
///
/// Triggering is one-way: once set, every current and future wait returns
/// immediately.
#[derive(Debug, Default, Clone)]
pub struct Interrupt {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flag and wake every waiter
    pub fn trigger(&self) {
        let (flag, cvar) = &*self.inner;
        *flag.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = true;
        cvar.notify_all();
    }

    pub fn is_triggered(&self) -> bool {
        *self
            .inner
            .0
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Block for `duration` unless triggered first
    ///
    /// Returns `true` when the wait was cut short by [`Interrupt::trigger`].
    pub fn wait(&self, duration: Duration) -> bool {
        let (flag, cvar) = &*self.inner;
        let guard = flag.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let (guard, _timeout) = cvar
            .wait_timeout_while(guard, duration, |triggered| !*triggered)
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard
    }
}

/// Mutable state for a single test run
pub struct TestState {
    variables: HashMap<String, String>,
    sink: Box<dyn LogSink>,
    interrupt: Interrupt,
}

impl Default for TestState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestState")
            .field("variables", &self.variables)
            .field("interrupted", &self.interrupt.is_triggered())
            .finish_non_exhaustive()
    }
}

impl TestState {
    /// Empty state logging through tracing
    pub fn new() -> Self {
        Self {
            variables: HashMap::new(),
            sink: Box::new(TracingSink),
            interrupt: Interrupt::new(),
        }
    }

    /// Replace the sink `echo` writes to
    pub fn with_sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Share an interrupt handle with whoever may need to stop this run
    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// Insert or overwrite a variable
    pub fn store(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        tracing::debug!(%name, %value, "store");
        self.variables.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    /// Substitute `${name}` placeholders with stored values
    ///
    /// Placeholders naming an unknown variable, and an unterminated `${`,
    /// are left in the output verbatim.
    pub fn expand(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(start) = rest.find("${") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after.find('}') {
                Some(end) => {
                    let name = &after[..end];
                    match self.variables.get(name) {
                        Some(value) => out.push_str(value),
                        None => {
                            out.push_str("${");
                            out.push_str(name);
                            out.push('}');
                        }
                    }
                    rest = &after[end + 1..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }

        out.push_str(rest);
        out
    }

    pub fn log(&self, line: &str) {
        self.sink.info(line);
    }

    pub fn interrupt(&self) -> &Interrupt {
        &self.interrupt
    }
}
