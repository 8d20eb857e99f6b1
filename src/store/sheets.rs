//! Google Sheets v4 REST client implementing [`RowStore`].
//!
//! Talks directly to `sheets.googleapis.com` with a pre-provisioned OAuth
//! bearer token; obtaining that token is a setup concern outside this crate.
//! Every request carries the configured timeout, and any transport failure,
//! timeout, or non-success HTTP status surfaces as `TaskError::Backend`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::config::Config;
use crate::error::{Result, TaskError};

use super::RowStore;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// A1 column letter of the last schema column (mirrors `store::HEADER`).
const LAST_COLUMN: char = 'G';

pub struct SheetsStore {
    http: reqwest::Client,
    spreadsheet_id: String,
    worksheet: String,
    token: String,
}

impl SheetsStore {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| TaskError::backend(format!("failed to build HTTP client: {}", err)))?;

        Ok(Self {
            http,
            spreadsheet_id: config.spreadsheet_id.clone(),
            worksheet: config.worksheet.clone(),
            token: config.token.clone(),
        })
    }

    /// Build an API URL from path segments below the spreadsheets root.
    /// Segments are percent-encoded, so worksheet titles with spaces are safe.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(SHEETS_API_BASE)
            .map_err(|err| TaskError::backend(format!("bad API base URL: {}", err)))?;
        url.path_segments_mut()
            .map_err(|_| TaskError::backend("API base URL cannot carry a path"))?
            .extend(segments);
        Ok(url)
    }

    async fn check(resp: reqwest::Response, what: &str) -> Result<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        tracing::debug!(%status, body, "sheets API error response");
        Err(TaskError::backend(format!(
            "{} failed with HTTP {}",
            what, status
        )))
    }

    /// Resolve the numeric sheetId of the configured worksheet. Needed only
    /// for row deletion; `DeleteDimensionRequest` does not accept A1 ranges.
    async fn sheet_id(&self) -> Result<i64> {
        let what = "reading spreadsheet metadata";
        let mut url = self.url(&[&self.spreadsheet_id])?;
        url.set_query(Some("fields=sheets.properties"));

        let resp = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|err| transport_error(what, err))?;
        let meta: SpreadsheetMeta = Self::check(resp, what)
            .await?
            .json()
            .await
            .map_err(|err| transport_error(what, err))?;

        meta.sheets
            .into_iter()
            .map(|sheet| sheet.properties)
            .find(|props| props.title == self.worksheet)
            .map(|props| props.sheet_id)
            .ok_or_else(|| {
                TaskError::backend(format!(
                    "worksheet '{}' not found in spreadsheet",
                    self.worksheet
                ))
            })
    }
}

#[async_trait]
impl RowStore for SheetsStore {
    async fn read_rows(&self) -> Result<Vec<Vec<String>>> {
        let what = "reading task rows";
        let range = data_range(&self.worksheet);
        let url = self.url(&[&self.spreadsheet_id, "values", &range])?;

        let resp = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|err| transport_error(what, err))?;
        let value_range: ValueRange = Self::check(resp, what)
            .await?
            .json()
            .await
            .map_err(|err| transport_error(what, err))?;

        Ok(value_range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }

    async fn append_row(&self, row: Vec<String>) -> Result<()> {
        let what = "appending task row";
        let segment = format!("{}:append", data_range(&self.worksheet));
        let url = self.url(&[&self.spreadsheet_id, "values", &segment])?;

        let resp = self
            .http
            .post(url)
            .query(&[
                ("valueInputOption", "RAW"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .bearer_auth(&self.token)
            .json(&json!({ "values": [row] }))
            .send()
            .await
            .map_err(|err| transport_error(what, err))?;
        Self::check(resp, what).await?;
        Ok(())
    }

    async fn update_row(&self, index: usize, row: Vec<String>) -> Result<()> {
        let what = "updating task row";
        let range = row_range(&self.worksheet, index);
        let url = self.url(&[&self.spreadsheet_id, "values", &range])?;

        let resp = self
            .http
            .put(url)
            .query(&[("valueInputOption", "RAW")])
            .bearer_auth(&self.token)
            .json(&json!({ "values": [row] }))
            .send()
            .await
            .map_err(|err| transport_error(what, err))?;
        Self::check(resp, what).await?;
        Ok(())
    }

    async fn delete_row(&self, index: usize) -> Result<()> {
        let what = "deleting task row";
        let sheet_id = self.sheet_id().await?;
        let segment = format!("{}:batchUpdate", self.spreadsheet_id);
        let url = self.url(&[&segment])?;

        // Dimension indexes are 0-based over the whole sheet including the
        // header row, so data index n lives at sheet row n + 1.
        let body = json!({
            "requests": [{
                "deleteDimension": {
                    "range": {
                        "sheetId": sheet_id,
                        "dimension": "ROWS",
                        "startIndex": index + 1,
                        "endIndex": index + 2,
                    }
                }
            }]
        });

        let resp = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|err| transport_error(what, err))?;
        Self::check(resp, what).await?;
        Ok(())
    }
}

fn transport_error(what: &str, err: reqwest::Error) -> TaskError {
    if err.is_timeout() {
        TaskError::backend(format!("{} timed out", what))
    } else {
        TaskError::backend(format!("{} failed: {}", what, err))
    }
}

/// A1 range covering the whole data region (row 2 downward).
fn data_range(worksheet: &str) -> String {
    format!("'{}'!A2:{}", worksheet, LAST_COLUMN)
}

/// A1 range addressing a single data row by 0-based data index.
fn row_range(worksheet: &str, index: usize) -> String {
    let sheet_row = index + 2;
    format!(
        "'{}'!A{}:{}{}",
        worksheet, sheet_row, LAST_COLUMN, sheet_row
    )
}

fn cell_to_string(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetProperties {
    sheet_id: i64,
    title: String,
}
