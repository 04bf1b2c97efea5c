use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, instrument};

use super::{SheetRow, SheetStore, TokenProvider};
use crate::errors::{AppError, AppResult};

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets/";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValueRange {
    #[serde(default)]
    range: Option<String>,
    #[serde(default)]
    major_dimension: Option<String>,
    #[serde(default)]
    values: Vec<SheetRow>,
}

/// Google Sheets v4 REST client bound to one spreadsheet.
#[derive(Clone)]
pub struct GoogleSheetsClient {
    http: Client,
    tokens: Arc<TokenProvider>,
    base: Url,
    spreadsheet_id: String,
}

impl GoogleSheetsClient {
    pub fn new(
        http: Client,
        tokens: Arc<TokenProvider>,
        spreadsheet_id: impl Into<String>,
    ) -> AppResult<Self> {
        let base = Url::parse(SHEETS_API_BASE)
            .map_err(|e| AppError::Config(format!("invalid sheets base url: {e}")))?;
        Ok(Self {
            http,
            tokens,
            base,
            spreadsheet_id: spreadsheet_id.into(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Config("sheets base url cannot carry a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn values_url(&self, range: &str) -> AppResult<Url> {
        self.endpoint(&[self.spreadsheet_id.as_str(), "values", range])
    }

    fn batch_update_url(&self) -> AppResult<Url> {
        let segment = format!("{}:batchUpdate", self.spreadsheet_id);
        self.endpoint(&[segment.as_str()])
    }

    async fn call(
        &self,
        method: Method,
        url: Url,
        body: Option<serde_json::Value>,
    ) -> AppResult<String> {
        let token = self.tokens.access_token().await?;
        let mut request = self.http.request(method, url).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(AppError::Upstream {
                service: "google sheets",
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(text)
    }
}

fn row_range(sheet_id: i64, start: u32, count: u32) -> serde_json::Value {
    json!({
        "sheetId": sheet_id,
        "dimension": "ROWS",
        "startIndex": start,
        "endIndex": start + count,
    })
}

fn insert_rows_request(sheet_id: i64, start: u32, count: u32) -> serde_json::Value {
    json!({
        "requests": [{
            "insertDimension": {
                "range": row_range(sheet_id, start, count),
                "inheritFromBefore": false,
            }
        }]
    })
}

fn delete_rows_request(sheet_id: i64, start: u32, count: u32) -> serde_json::Value {
    json!({
        "requests": [{
            "deleteDimension": {
                "range": row_range(sheet_id, start, count),
            }
        }]
    })
}

#[async_trait]
impl SheetStore for GoogleSheetsClient {
    #[instrument(skip(self))]
    async fn read_range(&self, range: &str) -> AppResult<Vec<SheetRow>> {
        let body = self.call(Method::GET, self.values_url(range)?, None).await?;
        let values: ValueRange = serde_json::from_str(&body)
            .map_err(|e| AppError::Sheets(format!("undecodable value range: {e}")))?;
        info!(rows = values.values.len(), "sheet range read");
        Ok(values.values)
    }

    #[instrument(skip(self))]
    async fn insert_rows(&self, sheet_id: i64, start: u32, count: u32) -> AppResult<()> {
        let request = insert_rows_request(sheet_id, start, count);
        self.call(Method::POST, self.batch_update_url()?, Some(request))
            .await?;
        info!("rows inserted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_rows(&self, sheet_id: i64, start: u32, count: u32) -> AppResult<()> {
        let request = delete_rows_request(sheet_id, start, count);
        self.call(Method::POST, self.batch_update_url()?, Some(request))
            .await?;
        info!("rows deleted");
        Ok(())
    }

    #[instrument(skip(self, row))]
    async fn write_row(&self, range: &str, row: SheetRow) -> AppResult<()> {
        let mut url = self.values_url(range)?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");
        let body = serde_json::to_value(ValueRange {
            range: Some(range.to_string()),
            major_dimension: Some("ROWS".into()),
            values: vec![row],
        })?;
        self.call(Method::PUT, url, Some(body)).await?;
        info!("row written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_request_targets_one_row_after_header() {
        let request = insert_rows_request(42, 1, 1);
        let dim = &request["requests"][0]["insertDimension"];
        assert_eq!(dim["range"]["sheetId"], 42);
        assert_eq!(dim["range"]["dimension"], "ROWS");
        assert_eq!(dim["range"]["startIndex"], 1);
        assert_eq!(dim["range"]["endIndex"], 2);
        assert_eq!(dim["inheritFromBefore"], false);
    }

    #[test]
    fn delete_request_mirrors_insert_range() {
        let request = delete_rows_request(42, 1, 1);
        let inserted = insert_rows_request(42, 1, 1);
        let range = &request["requests"][0]["deleteDimension"]["range"];
        assert_eq!(range, &inserted["requests"][0]["insertDimension"]["range"]);
        assert_eq!(range["startIndex"], 1);
        assert_eq!(range["endIndex"], 2);
    }

    #[test]
    fn value_range_tolerates_missing_values() {
        let values: ValueRange =
            serde_json::from_str(r#"{"range": "XAU!A1:C1", "majorDimension": "ROWS"}"#).unwrap();
        assert!(values.values.is_empty());
    }
}
