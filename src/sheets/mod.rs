pub mod auth;
pub mod google;

pub use auth::{ServiceAccountKey, TokenProvider};
pub use google::GoogleSheetsClient;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::AppResult;

pub type SheetRow = Vec<Value>;

#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Rows of the A1 `range`, header included. Trailing empty cells are
    /// omitted by the API, so rows may be ragged.
    async fn read_range(&self, range: &str) -> AppResult<Vec<SheetRow>>;

    /// Inserts `count` empty rows before zero-based row `start` of `sheet_id`.
    async fn insert_rows(&self, sheet_id: i64, start: u32, count: u32) -> AppResult<()>;

    /// Removes `count` rows starting at zero-based row `start` of `sheet_id`.
    async fn delete_rows(&self, sheet_id: i64, start: u32, count: u32) -> AppResult<()>;

    /// Overwrites `range` with a single row of raw values.
    async fn write_row(&self, range: &str, row: SheetRow) -> AppResult<()>;
}

/// Renders a cell as text whatever JSON type the API used for it.
pub fn cell_text(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
