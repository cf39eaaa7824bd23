//! CLI argument definitions for the submission writer.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use subwriter_output::OutputFormat;
use subwriter_tracker::{DEFAULT_TIMEOUT_SECS, TrackerSettings};

use subwriter_cli::pipeline::DEFAULT_TASK;

#[derive(Parser)]
#[command(
    name = "subwriter",
    version,
    about = "Export playlist submission spreadsheets from the production tracker",
    long_about = "Export playlist submission spreadsheets from the production tracker.\n\n\
                  Columns come from a JSON field mapping; camera metrics come from each\n\
                  version's sidecar JSON. The update command writes those metrics back\n\
                  to the tracker."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub tracker: TrackerArgs,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

/// Tracker connection settings.
#[derive(Args)]
pub struct TrackerArgs {
    /// Tracker site URL.
    #[arg(long, env = "SHOTGUN_SITE", global = true)]
    pub site: Option<String>,

    /// Script (API user) name.
    #[arg(long = "script-name", env = "SHOTGUN_SCRIPT_NAME", global = true)]
    pub script_name: Option<String>,

    /// Script API key.
    #[arg(
        long = "api-key",
        env = "SHOTGUN_API_KEY",
        hide_env_values = true,
        global = true
    )]
    pub api_key: Option<String>,

    /// Project id all queries are scoped to.
    #[arg(long = "project-id", env = "SHOTGUN_PROJECT_ID", global = true)]
    pub project_id: Option<u64>,

    /// HTTP request timeout in seconds.
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout: u64,
}

impl TrackerArgs {
    /// Connection settings; missing values are left empty for validation.
    pub fn settings(&self) -> TrackerSettings {
        TrackerSettings::new(
            self.site.clone().unwrap_or_default(),
            self.script_name.clone().unwrap_or_default(),
            self.api_key.clone().unwrap_or_default(),
            self.project_id.unwrap_or_default(),
        )
        .with_timeout(Duration::from_secs(self.timeout))
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// List the project's playlists.
    Playlists,

    /// Write the submission spreadsheet for a playlist.
    Export(ExportArgs),

    /// Write camera metrics from sidecar JSON back to tracker versions.
    Update(UpdateArgs),
}

#[derive(Parser)]
pub struct ExportArgs {
    /// JSON field mapping with "Shotgun" and optional "External" groups.
    #[arg(long, value_name = "FILE")]
    pub config: PathBuf,

    /// Playlist code (exact, or a unique part of it).
    #[arg(long, value_name = "NAME")]
    pub playlist: String,

    /// Output file (default: <SUBMISSION_DIR>/<playlist code>.<format>).
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Directory exports are written to when --output is not given.
    #[arg(long = "submission-dir", value_name = "DIR", env = "SUBWRITER_SUBMISSION_DIR")]
    pub submission_dir: Option<PathBuf>,

    /// Spreadsheet format (default: from --output extension, else xlsx).
    #[arg(long, value_enum)]
    pub format: Option<OutputFormatArg>,
}

#[derive(Parser)]
pub struct UpdateArgs {
    /// Only shots with a task whose name contains this text.
    #[arg(long, default_value = DEFAULT_TASK)]
    pub task: String,

    /// Compute and log the fields without writing them.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Xlsx,
    Csv,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Xlsx => Self::Xlsx,
            OutputFormatArg::Csv => Self::Csv,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
