//! Command registry
//!
//! Maps command names to step factories. The table is built once per
//! process and is read-only afterwards.

use std::collections::HashMap;
use std::sync::OnceLock;

use super::builtin::{Echo, NextCommandFails, Pause, Store};
use super::outcome::FailureKind;
use super::step::{Step, StepFactory};

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Immutable command name to factory table
pub struct Registry {
    factories: HashMap<&'static str, StepFactory>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("commands", &self.names())
            .finish()
    }
}

fn assert_next_fails(_locator: &str, _value: &str) -> Box<dyn Step> {
    Box::new(NextCommandFails::new(FailureKind::Assertion))
}

fn verify_next_fails(_locator: &str, _value: &str) -> Box<dyn Step> {
    Box::new(NextCommandFails::new(FailureKind::Verification))
}

fn echo(locator: &str, _value: &str) -> Box<dyn Step> {
    Box::new(Echo::new(locator))
}

fn pause(locator: &str, _value: &str) -> Box<dyn Step> {
    Box::new(Pause::new(locator))
}

fn store(locator: &str, value: &str) -> Box<dyn Step> {
    Box::new(Store::new(locator, value))
}

/// Every built-in command
static BUILTINS: &[(&str, StepFactory)] = &[
    ("assertErrorOnNext", assert_next_fails),
    ("assertFailureOnNext", assert_next_fails),
    ("verifyErrorOnNext", verify_next_fails),
    ("verifyFailureOnNext", verify_next_fails),
    ("echo", echo),
    ("pause", pause),
    ("store", store),
];

impl Registry {
    /// The process-wide registry, built on first use
    pub fn global() -> &'static Registry {
        REGISTRY.get_or_init(|| {
            let registry = Registry::build();
            tracing::debug!(commands = registry.len(), "built command registry");
            registry
        })
    }

    /// Build a fresh table of the built-in commands
    pub fn build() -> Self {
        Self {
            factories: BUILTINS.iter().copied().collect(),
        }
    }

    /// Look up the factory for `name`
    ///
    /// There is no fallback: unknown names are the caller's business.
    pub fn resolve(&self, name: &str) -> Option<StepFactory> {
        self.factories.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
