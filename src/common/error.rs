//! Error types for the Selenese runner
//!
//! Soft test failures are never errors: they travel as [`Outcome`] values.
//! This enum covers loading, configuration and driver plumbing, plus the one
//! fatal category ([`Error::Interrupted`]) that must halt the process.
//!
//! [`Outcome`]: crate::steps::Outcome

use std::io;
use thiserror::Error;

/// Exit status used when a run is interrupted mid-step
pub const INTERRUPTED_EXIT_CODE: i32 = 255;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Selenese runner
#[derive(Error, Debug)]
pub enum Error {
    // === Fatal ===
    #[error("Run interrupted while waiting; the session cannot continue safely")]
    Interrupted,

    // === Script Errors ===
    #[error("Failed to read test script '{path}': {error}")]
    ScriptRead { path: String, error: String },

    #[error("Failed to parse test script '{path}': {error}")]
    ScriptParse { path: String, error: String },

    #[error("Test script '{0}' contains no commands")]
    EmptyScript(String),

    #[error("{failed} of {total} test script(s) failed")]
    TestsFailed { failed: usize, total: usize },

    // === Driver Errors ===
    #[error("Driver command '{command}' failed: {message}")]
    DriverCommand { command: String, message: String },

    // === Configuration Errors ===
    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Invalid variable assignment '{0}'. Expected NAME=VALUE")]
    InvalidVariable(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Internal Errors ===
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a driver command error
    pub fn driver_command(command: &str, message: impl Into<String>) -> Self {
        Self::DriverCommand {
            command: command.to_string(),
            message: message.into(),
        }
    }

    /// Create a script read error
    pub fn script_read(path: &std::path::Path, error: impl ToString) -> Self {
        Self::ScriptRead {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    /// Create a script parse error
    pub fn script_parse(path: &std::path::Path, error: impl ToString) -> Self {
        Self::ScriptParse {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    /// Whether this error must stop the process rather than fail one test
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Interrupted)
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Interrupted => INTERRUPTED_EXIT_CODE,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interrupted_is_fatal_with_fixed_status() {
        let err = Error::Interrupted;
        assert!(err.is_fatal());
        assert_eq!(err.exit_code(), 255);
    }

    #[test]
    fn test_io_errors_convert_with_question_mark() {
        fn open_missing() -> Result<()> {
            std::fs::File::open("/nonexistent/selenese/file")?;
            Ok(())
        }

        let err = open_missing().unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_fatal());
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_ordinary_errors_exit_with_one() {
        let err = Error::driver_command("open", "no such page");
        assert!(!err.is_fatal());
        assert_eq!(err.exit_code(), 1);
        assert_eq!(
            err.to_string(),
            "Driver command 'open' failed: no such page"
        );
    }
}
