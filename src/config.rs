//! Configuration loading and resolution.
//!
//! Settings come from `tasksheet.json` in the working directory, overridden
//! by the serve command's flags and environment variables. The spreadsheet
//! id and the bearer token are required; everything else has a default.

use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::cli::ServeArgs;

pub const CONFIG_FILE_NAME: &str = "tasksheet.json";

const DEFAULT_WORKSHEET: &str = "Tasks";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Fully resolved server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Id of the backing Google Sheet (the long token in its URL).
    pub spreadsheet_id: String,
    /// Title of the worksheet (tab) holding the task table.
    pub worksheet: String,
    /// OAuth bearer token authorized for the Sheets API. Provisioning the
    /// token is a setup step outside this crate.
    pub token: String,
    /// Per-request timeout for Sheets API calls.
    pub timeout_secs: u64,
}

/// On-disk shape of `tasksheet.json`. All fields optional; required values
/// may instead arrive via flags or environment.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    #[serde(default)]
    pub spreadsheet_id: Option<String>,
    #[serde(default)]
    pub worksheet: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Resolve the effective configuration for `serve`.
    pub fn resolve(args: &ServeArgs) -> Result<Config> {
        let file = match &args.config {
            Some(path) => Some(
                load_file(path)?
                    .with_context(|| format!("config file not found: {}", path.display()))?,
            ),
            None => load_file(Path::new(CONFIG_FILE_NAME))?,
        };
        Config::from_parts(file, args)
    }

    /// Merge file values under flag/environment values.
    pub fn from_parts(file: Option<ConfigFile>, args: &ServeArgs) -> Result<Config> {
        let file = file.unwrap_or_default();

        let Some(spreadsheet_id) = args.spreadsheet_id.clone().or(file.spreadsheet_id) else {
            bail!(
                "spreadsheet id is required (set --spreadsheet-id, TASKSHEET_SPREADSHEET_ID, \
                 or \"spreadsheetId\" in {})",
                CONFIG_FILE_NAME
            );
        };
        let Some(token) = args.token.clone().or(file.token) else {
            bail!(
                "API token is required (set --token, TASKSHEET_TOKEN, \
                 or \"token\" in {})",
                CONFIG_FILE_NAME
            );
        };

        Ok(Config {
            spreadsheet_id,
            worksheet: args
                .worksheet
                .clone()
                .or(file.worksheet)
                .unwrap_or_else(|| DEFAULT_WORKSHEET.to_string()),
            token,
            timeout_secs: args
                .timeout_secs
                .or(file.timeout_secs)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }
}

/// Read and parse a config file. `Ok(None)` if the file does not exist;
/// a file that exists but does not parse is an error, not a silent default.
pub fn load_file(path: &Path) -> Result<Option<ConfigFile>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let file = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;
    Ok(Some(file))
}
