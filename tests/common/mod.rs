#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use calbot::errors::{AppError, AppResult};
use calbot::jobs::JobContext;
use calbot::models::{CalendarEvent, HistoricalResponse, Recipient};
use calbot::notify::{Notifier, SendMessageForm};
use calbot::providers::{CalendarSource, MarketDataSource};
use calbot::sheets::{SheetRow, SheetStore};
use chrono::NaiveDate;
use parking_lot::Mutex;

/// Records every message as the form body the Bot API would receive.
#[derive(Default)]
pub struct RecordingNotifier {
    pub bodies: Mutex<Vec<String>>,
    pub sent: Mutex<Vec<(Recipient, String)>>,
    pub fail_chat: Option<i64>,
}

impl RecordingNotifier {
    pub fn failing_for(chat_id: i64) -> Self {
        Self {
            fail_chat: Some(chat_id),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(Recipient, String)> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_text(&self, recipient: Recipient, text: &str) -> AppResult<String> {
        self.bodies
            .lock()
            .push(SendMessageForm::new(recipient, text).encode()?);
        self.sent.lock().push((recipient, text.to_string()));
        if self.fail_chat == Some(recipient.chat_id) {
            return Err(AppError::Upstream {
                service: "telegram",
                status: 400,
                body: "{\"ok\":false}".into(),
            });
        }
        Ok("{\"ok\":true}".into())
    }
}

#[derive(Default)]
pub struct StaticCalendar {
    pub events: Vec<CalendarEvent>,
    pub fail: bool,
    pub calls: Mutex<Vec<(NaiveDate, NaiveDate)>>,
}

#[async_trait]
impl CalendarSource for StaticCalendar {
    async fn events_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<CalendarEvent>> {
        self.calls.lock().push((from, to));
        if self.fail {
            return Err(AppError::Provider("economic calendar: undecodable response".into()));
        }
        Ok(self.events.clone())
    }
}

#[derive(Default)]
pub struct StaticMarket {
    pub response: Option<HistoricalResponse>,
}

#[async_trait]
impl MarketDataSource for StaticMarket {
    async fn historical(&self) -> AppResult<HistoricalResponse> {
        self.response
            .clone()
            .ok_or_else(|| AppError::Provider("market data: connection refused".into()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SheetCall {
    Read(String),
    Insert { sheet_id: i64, start: u32, count: u32 },
    Write { range: String, row: SheetRow },
    Delete { sheet_id: i64, start: u32, count: u32 },
}

#[derive(Default)]
pub struct MemorySheet {
    pub rows: Vec<SheetRow>,
    pub calls: Mutex<Vec<SheetCall>>,
    pub fail_write: bool,
}

impl MemorySheet {
    pub fn failing_writes() -> Self {
        Self {
            fail_write: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<SheetCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl SheetStore for MemorySheet {
    async fn read_range(&self, range: &str) -> AppResult<Vec<SheetRow>> {
        self.calls.lock().push(SheetCall::Read(range.to_string()));
        Ok(self.rows.clone())
    }

    async fn insert_rows(&self, sheet_id: i64, start: u32, count: u32) -> AppResult<()> {
        self.calls.lock().push(SheetCall::Insert {
            sheet_id,
            start,
            count,
        });
        Ok(())
    }

    async fn write_row(&self, range: &str, row: SheetRow) -> AppResult<()> {
        self.calls.lock().push(SheetCall::Write {
            range: range.to_string(),
            row,
        });
        if self.fail_write {
            return Err(AppError::Upstream {
                service: "google sheets",
                status: 503,
                body: "backend unavailable".into(),
            });
        }
        Ok(())
    }

    async fn delete_rows(&self, sheet_id: i64, start: u32, count: u32) -> AppResult<()> {
        self.calls.lock().push(SheetCall::Delete {
            sheet_id,
            start,
            count,
        });
        Ok(())
    }
}

pub struct Fakes {
    pub notifier: Arc<RecordingNotifier>,
    pub calendar: Arc<StaticCalendar>,
    pub market: Arc<StaticMarket>,
    pub sheets: Arc<MemorySheet>,
}

impl Fakes {
    pub fn new(
        notifier: RecordingNotifier,
        calendar: StaticCalendar,
        market: StaticMarket,
        sheets: MemorySheet,
    ) -> Self {
        Self {
            notifier: Arc::new(notifier),
            calendar: Arc::new(calendar),
            market: Arc::new(market),
            sheets: Arc::new(sheets),
        }
    }

    pub fn context(&self, recipients: Vec<Recipient>) -> JobContext {
        JobContext {
            recipients: Arc::new(recipients),
            notifier: self.notifier.clone(),
            calendar: self.calendar.clone(),
            market: self.market.clone(),
            sheets: self.sheets.clone(),
            sheet_id: 987,
            read_range: "XAU!A1:C".into(),
            write_range: "XAU!A2:H2".into(),
        }
    }
}
