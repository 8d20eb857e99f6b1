//! Backing row store for the task table.
//!
//! The adapter owns the worksheet schema: row 1 is the header, data rows
//! start at row 2, and the columns are fixed in the order of [`HEADER`].
//! Everything above this module speaks in 0-based indexes into the data
//! region; the Sheets client translates those into A1 ranges.

mod sheets;

pub use sheets::SheetsStore;

use async_trait::async_trait;

use crate::error::Result;

/// Fixed column order of the task table.
pub const HEADER: [&str; 7] = [
    "id",
    "title",
    "status",
    "due_date",
    "notes",
    "created_at",
    "updated_at",
];

pub const COL_ID: usize = 0;
pub const COL_TITLE: usize = 1;
pub const COL_STATUS: usize = 2;
pub const COL_DUE_DATE: usize = 3;
pub const COL_NOTES: usize = 4;
pub const COL_CREATED_AT: usize = 5;
pub const COL_UPDATED_AT: usize = 6;

/// Minimal row-level interface to the backing table.
///
/// Implementations must not cache table contents between calls: the sheet
/// may be edited concurrently by a human, so every operation works against
/// live state. Row indexes are 0-based positions in the data region (index 0
/// is the first row below the header) and are only valid relative to the
/// `read_rows` call that produced them.
#[async_trait]
pub trait RowStore: Send + Sync {
    /// Read all data rows, in sheet order.
    async fn read_rows(&self) -> Result<Vec<Vec<String>>>;

    /// Append one row after the current end of the table.
    async fn append_row(&self, row: Vec<String>) -> Result<()>;

    /// Overwrite the data row at `index`.
    async fn update_row(&self, index: usize, row: Vec<String>) -> Result<()>;

    /// Remove the data row at `index`, shifting later rows up.
    async fn delete_row(&self, index: usize) -> Result<()>;
}
