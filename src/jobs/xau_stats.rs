use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc, Weekday};
use tracing::{info, warn};

use super::{Job, JobContext};
use crate::errors::AppResult;
use crate::messages::xau_stats_message;
use crate::models::Recipient;
use crate::notify::{Notifier, broadcast};
use crate::sheets::{SheetRow, SheetStore, cell_text};
use crate::utils::math::percentage;
use crate::utils::time::parse_sheet_date;

/// Long/short split of past sessions that fell on one weekday.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionBias {
    pub long: usize,
    pub short: usize,
    pub long_pct: f64,
    pub short_pct: f64,
}

/// Classifies the data rows (header skipped) whose date falls on `weekday`.
/// A session is short when it opened above its close, long otherwise.
/// Returns `None` when no row matches.
pub fn session_bias(rows: &[SheetRow], weekday: Weekday) -> Option<SessionBias> {
    let mut long = 0;
    let mut short = 0;

    for (idx, row) in rows.iter().enumerate().skip(1) {
        if row.len() < 3 {
            warn!(row = idx, "sheet row too short");
            continue;
        }
        let raw_date = cell_text(&row[0]);
        let Some(date) = parse_sheet_date(&raw_date) else {
            warn!(row = idx, date = %raw_date, "unable to parse sheet date");
            continue;
        };
        if date.weekday() != weekday {
            continue;
        }

        let close = parse_price(&cell_text(&row[1]));
        let open = parse_price(&cell_text(&row[2]));
        if open > close {
            short += 1;
        } else {
            long += 1;
        }
    }

    let total = long + short;
    Some(SessionBias {
        long,
        short,
        long_pct: percentage(long, total)?,
        short_pct: percentage(short, total)?,
    })
}

/// Unparseable prices count as zero.
fn parse_price(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}

/// Posts the historical long/short split for today's weekday, read from the
/// XAU sheet.
pub struct XauStatsJob {
    sheets: Arc<dyn SheetStore>,
    notifier: Arc<dyn Notifier>,
    recipients: Arc<Vec<Recipient>>,
    read_range: String,
}

impl XauStatsJob {
    pub const ID: &'static str = "xau_stats";

    pub fn new(ctx: &JobContext) -> Self {
        Self {
            sheets: ctx.sheets.clone(),
            notifier: ctx.notifier.clone(),
            recipients: ctx.recipients.clone(),
            read_range: ctx.read_range.clone(),
        }
    }
}

#[async_trait]
impl Job for XauStatsJob {
    fn id(&self) -> &'static str {
        Self::ID
    }

    async fn run(&self, now: DateTime<Utc>) -> AppResult<()> {
        let rows = self.sheets.read_range(&self.read_range).await?;
        let weekday = now.weekday();
        let Some(bias) = session_bias(&rows, weekday) else {
            info!(?weekday, rows = rows.len(), "no sessions for weekday, nothing to send");
            return Ok(());
        };
        info!(?weekday, long = bias.long, short = bias.short, "xau sessions classified");

        let message = xau_stats_message(weekday, bias.long_pct, bias.short_pct);
        let report = broadcast(self.notifier.as_ref(), &self.recipients, &message).await;
        info!(delivered = report.delivered, failed = report.failed, "xau statistics distributed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn row(date: &str, close: &str, open: &str) -> SheetRow {
        vec![json!(date), json!(close), json!(open), json!("2000")]
    }

    fn header() -> SheetRow {
        vec![json!("DATE"), json!("CLOSE"), json!("OPEN")]
    }

    #[test]
    fn classifies_matching_weekday_only() {
        // 04/03/2024 and 11/03/2024 and 18/03/2024 are Mondays, 05/03/2024 a Tuesday.
        let rows = vec![
            header(),
            row("04/03/2024", "2114.7", "2083.2"),
            row("05/03/2024", "2000", "2100"),
            row("11/03/2024", "2170.0", "2180.5"),
            row("18/03/2024", "2160.1", "2155.0"),
        ];

        let bias = session_bias(&rows, Weekday::Mon).unwrap();
        assert_eq!((bias.long, bias.short), (2, 1));
        assert!((bias.long_pct + bias.short_pct - 100.0).abs() < 1e-9);
        assert!((bias.long_pct - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn equal_open_and_close_counts_as_long() {
        let rows = vec![header(), row("05/03/2024", "2000", "2000")];
        let bias = session_bias(&rows, Weekday::Tue).unwrap();
        assert_eq!((bias.long, bias.short), (1, 0));
        assert_eq!(bias.long_pct, 100.0);
        assert_eq!(bias.short_pct, 0.0);
    }

    #[test]
    fn header_only_or_no_match_yields_none() {
        assert!(session_bias(&[header()], Weekday::Mon).is_none());
        let rows = vec![header(), row("05/03/2024", "1", "2")];
        assert!(session_bias(&rows, Weekday::Mon).is_none());
    }

    #[test]
    fn malformed_rows_are_skipped() {
        let rows = vec![
            header(),
            vec![json!("04/03/2024")],
            row("not a date", "1", "2"),
            vec![json!("04/03/2024"), json!(2100.5), json!(2090.0)],
            vec![Value::Null, json!("1"), json!("2")],
        ];
        let bias = session_bias(&rows, Weekday::Mon).unwrap();
        assert_eq!((bias.long, bias.short), (1, 0));
    }
}
