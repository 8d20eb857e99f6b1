//! CLI argument definitions using clap.
//!
//! The server has no user-facing command surface beyond `serve`, which starts
//! the MCP server on stdio. Connection settings can come from flags, from
//! environment variables, or from the `tasksheet.json` config file (flags and
//! environment win over the file).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the MCP server on stdio
    Serve(ServeArgs),
}

#[derive(Debug, Default, Args)]
pub struct ServeArgs {
    /// Spreadsheet id of the backing Google Sheet (overrides config file)
    #[arg(long, env = "TASKSHEET_SPREADSHEET_ID")]
    pub spreadsheet_id: Option<String>,

    /// Worksheet (tab) holding the task table (overrides config file)
    #[arg(long, env = "TASKSHEET_WORKSHEET")]
    pub worksheet: Option<String>,

    /// OAuth bearer token authorized for the Sheets API (overrides config file)
    #[arg(long, env = "TASKSHEET_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout for Sheets API calls, in seconds
    #[arg(long, env = "TASKSHEET_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Path to the config file (default: ./tasksheet.json)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Exit status for the process.
///
/// - `Success` (0): Server ran and shut down cleanly
/// - `Error` (2): Startup or runtime failure (config error, transport error)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Server ran and shut down cleanly.
    Success,
    /// Startup or runtime failure (config error, transport error).
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
