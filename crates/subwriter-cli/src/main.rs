//! Submission writer CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};
use subwriter_cli::logging::{LogConfig, LogFormat, init_logging};
use subwriter_output::OutputError;
use subwriter_tracker::TrackerError;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_export, run_playlists, run_update};
use crate::summary::{print_export_summary, print_update_summary};

fn main() {
    // Connection settings may come from a .env file next to the project.
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "Loaded environment file");
    }

    let exit_code = match cli.command {
        Command::Playlists => match run_playlists(&cli.tracker) {
            Ok(()) => 0,
            Err(error) => report_error(&error),
        },
        Command::Export(args) => match run_export(&cli.tracker, &args) {
            Ok(result) => {
                print_export_summary(&result);
                0
            }
            Err(error) => report_error(&error),
        },
        Command::Update(args) => match run_update(&cli.tracker, &args) {
            Ok(report) => {
                print_update_summary(&report);
                if report.has_failures() { 1 } else { 0 }
            }
            Err(error) => report_error(&error),
        },
    };
    std::process::exit(exit_code);
}

/// Logs the error, prints a status line for the failures users can act on,
/// and returns the exit code.
fn report_error(error: &anyhow::Error) -> i32 {
    tracing::error!("{error:#}");
    if let Some(output) = error.downcast_ref::<OutputError>() {
        eprintln!("status: {}", output.user_message());
    } else if let Some(tracker) = error.downcast_ref::<TrackerError>() {
        eprintln!("status: {}", tracker.user_message());
    }
    eprintln!("error: {error:#}");
    1
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let mut config = LogConfig::default()
        .with_level_filter(level_filter)
        .with_format(format)
        .with_log_file(cli.log_file.clone());
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
