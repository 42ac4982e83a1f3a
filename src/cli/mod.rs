//! CLI command handling
//!
//! Dispatches CLI commands and formats output.

use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::commands::Commands;
use crate::common::config::Config;
use crate::common::{parse_assignment, Error, Result};
use crate::steps::{DryRunDriver, Interrupt, Outcome, Registry, TestState};
use crate::testing::{RunReport, Runner, TestScript};

/// Dispatch a CLI command
pub async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run {
            scripts,
            vars,
            continue_on_failure,
            config,
            json,
        } => run_scripts(scripts, vars, continue_on_failure, config.as_deref(), json).await,

        Commands::Commands => {
            for name in Registry::global().names() {
                println!("{}", name);
            }
            Ok(())
        }
    }
}

async fn run_scripts(
    scripts: Vec<PathBuf>,
    vars: Vec<String>,
    continue_on_failure: bool,
    config_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    let config = match config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let continue_on_failure = continue_on_failure || config.runner.continue_on_failure;

    let overrides = vars
        .iter()
        .map(|var| parse_assignment(var))
        .collect::<Result<Vec<_>>>()?;

    // Every script must load before any of them runs
    let loaded = scripts
        .iter()
        .map(|path| TestScript::load(path))
        .collect::<Result<Vec<_>>>()?;

    let interrupt = Interrupt::new();
    listen_for_interrupt(interrupt.clone())?;

    let mut reports = Vec::with_capacity(loaded.len());
    for mut script in loaded {
        // Config seeds < script variables < --var
        let mut variables = config.variables.clone();
        variables.extend(script.variables.drain());
        variables.extend(overrides.iter().cloned());
        script.variables = variables;

        let mut state = TestState::new().with_interrupt(interrupt.clone());

        if !json {
            print_header(&script);
        }

        let report = tokio::task::spawn_blocking(move || {
            let mut driver = DryRunDriver::new();
            Runner::new(Registry::global())
                .continue_on_failure(continue_on_failure)
                .run(&script, &mut driver, &mut state)
        })
        .await
        .map_err(|e| Error::Internal(format!("Runner task failed: {}", e)))??;

        if !json {
            print_report(&report);
        }
        reports.push(report);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    let failed = reports.iter().filter(|r| !r.passed).count();
    if failed > 0 {
        return Err(Error::TestsFailed {
            failed,
            total: reports.len(),
        });
    }
    Ok(())
}

/// Trigger `interrupt` on SIGINT / Ctrl-C
///
/// The handler is installed before this returns, so a signal arriving at
/// any point of the run reaches the interrupt instead of killing the process.
#[cfg(unix)]
fn listen_for_interrupt(interrupt: Interrupt) -> Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    tokio::spawn(async move {
        if sigint.recv().await.is_some() {
            tracing::warn!("interrupt received");
            interrupt.trigger();
        }
    });
    Ok(())
}

#[cfg(not(unix))]
fn listen_for_interrupt(interrupt: Interrupt) -> Result<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received");
            interrupt.trigger();
        }
    });
    Ok(())
}

fn print_header(script: &TestScript) {
    println!(
        "\n{} {}",
        "Running Test:".blue().bold(),
        script.name.white().bold()
    );
    if let Some(desc) = &script.description {
        println!("  {}", desc.dimmed());
    }
    println!("\n{}", "Steps:".cyan());
}

fn print_report(report: &RunReport) {
    for row in &report.rows {
        let line = format_row(&row.command, &row.locator, &row.value);
        match &row.outcome {
            None | Some(Outcome::Continue) => {
                println!("  {} Step {}: {}", "✓".green(), row.index, line.dimmed())
            }
            Some(Outcome::VerificationFailed) => println!(
                "  {} Step {}: {} ({})",
                "!".yellow(),
                row.index,
                line,
                "verification failed".yellow()
            ),
            Some(outcome) => println!(
                "  {} Step {}: {} ({})",
                "✗".red(),
                row.index,
                line,
                outcome.to_string().red()
            ),
        }
    }

    if report.halted {
        println!(
            "  {}",
            format!(
                "Stopped after {} of {} steps",
                report.steps_run, report.steps_total
            )
            .dimmed()
        );
    }

    if report.passed {
        println!("\n{} {}\n", "✓".green().bold(), "Test Passed".green().bold());
    } else {
        println!("\n{} {}\n", "✗".red().bold(), "Test Failed".red().bold());
    }
}

fn format_row(command: &str, locator: &str, value: &str) -> String {
    match (locator.is_empty(), value.is_empty()) {
        (true, true) => command.to_string(),
        (false, true) => format!("{} {}", command, locator),
        (true, false) => format!("{} | {}", command, value),
        (false, false) => format!("{} {} | {}", command, locator, value),
    }
}
