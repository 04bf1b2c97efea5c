use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;
use tracing::{error, info};

use super::{Job, JobContext};
use crate::errors::{AppError, AppResult};
use crate::messages::{BOT_TAG, XAU_SHEET_UPDATED};
use crate::models::{HistoricalPoint, Recipient};
use crate::notify::{Notifier, broadcast};
use crate::providers::MarketDataSource;
use crate::scheduler::SchedulePolicy;
use crate::sheets::{SheetRow, SheetStore};
use crate::utils::time::{SHEET_DATE, yesterday};

/// Zero-based index of the first data row, right below the header.
const FIRST_DATA_ROW: u32 = 1;

/// Builds the row recorded for one session.
pub fn sheet_row(day: NaiveDate, point: &HistoricalPoint) -> SheetRow {
    vec![
        json!(day.format(SHEET_DATE).to_string()),
        json!(point.close),
        json!(point.open),
        json!(point.high),
        json!(point.low),
        json!(point.volume),
        json!(point.change_percent),
        json!(BOT_TAG),
    ]
}

/// Records the previous XAUUSD session at the top of the sheet and tells
/// recipients the file changed.
pub struct XauSheetJob {
    market: Arc<dyn MarketDataSource>,
    sheets: Arc<dyn SheetStore>,
    notifier: Arc<dyn Notifier>,
    recipients: Arc<Vec<Recipient>>,
    sheet_id: i64,
    write_range: String,
}

impl XauSheetJob {
    pub const ID: &'static str = "xau_sheet";

    pub fn new(ctx: &JobContext) -> Self {
        Self {
            market: ctx.market.clone(),
            sheets: ctx.sheets.clone(),
            notifier: ctx.notifier.clone(),
            recipients: ctx.recipients.clone(),
            sheet_id: ctx.sheet_id,
            write_range: ctx.write_range.clone(),
        }
    }
}

#[async_trait]
impl Job for XauSheetJob {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn policy(&self) -> SchedulePolicy {
        SchedulePolicy::skip_sunday()
    }

    async fn run(&self, now: DateTime<Utc>) -> AppResult<()> {
        // Fetch before touching the sheet so a failed call leaves no blank row.
        let history = self.market.historical().await?;
        let point = history.previous_session().ok_or_else(|| {
            AppError::Provider(format!(
                "market data: need two sessions, got {}",
                history.historical.len()
            ))
        })?;

        let day = yesterday(now);
        self.sheets
            .insert_rows(self.sheet_id, FIRST_DATA_ROW, 1)
            .await?;
        if let Err(e) = self
            .sheets
            .write_row(&self.write_range, sheet_row(day, point))
            .await
        {
            error!(%day, error = %e, "row write failed, removing inserted row");
            if let Err(undo) = self.sheets.delete_rows(self.sheet_id, FIRST_DATA_ROW, 1).await {
                error!(
                    sheet_id = self.sheet_id,
                    row = FIRST_DATA_ROW,
                    error = %undo,
                    "blank row left in sheet"
                );
            }
            return Err(e);
        }
        info!(%day, close = point.close, "xau session recorded");

        let report = broadcast(self.notifier.as_ref(), &self.recipients, XAU_SHEET_UPDATED).await;
        info!(delivered = report.delivered, failed = report.failed, "xau update distributed");
        Ok(())
    }
}
