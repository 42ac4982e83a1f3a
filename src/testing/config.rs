//! Test script types
//!
//! Defines the data structures for deserializing YAML test scripts.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::common::{Error, Result};

/// A complete test script loaded from a YAML file
#[derive(Deserialize, Debug, Clone)]
pub struct TestScript {
    /// Name of the test
    pub name: String,
    /// Optional description of what the test verifies
    pub description: Option<String>,
    /// Variables stored before the first command runs
    #[serde(default)]
    pub variables: HashMap<String, String>,
    /// Rows to execute, in order
    pub commands: Vec<ScriptCommand>,
}

/// One row of a test table
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ScriptCommand {
    /// Command name (e.g. "store", "click")
    pub command: String,
    /// First argument, usually an element locator
    #[serde(default)]
    pub locator: String,
    /// Second argument
    #[serde(default)]
    pub value: String,
}

impl ScriptCommand {
    pub fn new(command: &str, locator: &str, value: &str) -> Self {
        Self {
            command: command.to_string(),
            locator: locator.to_string(),
            value: value.to_string(),
        }
    }
}

impl TestScript {
    /// Build a script in memory
    pub fn new(name: impl Into<String>, commands: Vec<ScriptCommand>) -> Self {
        Self {
            name: name.into(),
            description: None,
            variables: HashMap::new(),
            commands,
        }
    }

    /// Load and parse a YAML script
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| Error::script_read(path, e))?;
        let script: TestScript =
            serde_yaml::from_str(&content).map_err(|e| Error::script_parse(path, e))?;

        if script.commands.is_empty() {
            return Err(Error::EmptyScript(script.name));
        }

        Ok(script)
    }
}
