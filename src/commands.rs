//! CLI command definitions
//!
//! Defines the clap commands for the selenese CLI.

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Execute one or more YAML test scripts
    ///
    /// Built-in commands run in-process; every other command is handed to
    /// a dry-run driver that logs it instead of driving a browser.
    Run {
        /// Paths to the YAML test scripts
        #[arg(required = true)]
        scripts: Vec<PathBuf>,

        /// Seed a variable before the run (NAME=VALUE, repeatable)
        #[arg(long = "var", short = 'v')]
        vars: Vec<String>,

        /// Keep executing after assertion failures and errors
        #[arg(long)]
        continue_on_failure: bool,

        /// Configuration file to use instead of the default location
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the commands handled without a browser driver
    Commands,
}
