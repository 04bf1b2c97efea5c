use std::sync::Arc;

use crate::models::Recipient;
use crate::notify::Notifier;
use crate::providers::{CalendarSource, MarketDataSource};
use crate::sheets::SheetStore;

/// Everything a job may need, built once at startup and shared read-only.
#[derive(Clone)]
pub struct JobContext {
    pub recipients: Arc<Vec<Recipient>>,
    pub notifier: Arc<dyn Notifier>,
    pub calendar: Arc<dyn CalendarSource>,
    pub market: Arc<dyn MarketDataSource>,
    pub sheets: Arc<dyn SheetStore>,
    pub sheet_id: i64,
    pub read_range: String,
    pub write_range: String,
}
