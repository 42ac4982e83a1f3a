//! Selenese runner - executes legacy browser-automation test scripts
//!
//! Scripts are tables of (command, locator, value) rows written in YAML.

use clap::Parser;
use selenese::common::logging;
use selenese::{cli, commands::Commands};

#[derive(Parser)]
#[command(name = "selenese", about = "Run Selenese test scripts")]
#[command(version, long_about = None)]
struct Cli {
    /// Debug-level logging (ignored when RUST_LOG is set)
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_cli(cli.verbose);

    if let Err(e) = cli::dispatch(cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
