use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, Utc};

/// Date format used in calendar-provider query parameters.
pub const ISO_DATE: &str = "%Y-%m-%d";
/// Timestamp format of calendar-provider event dates.
pub const PROVIDER_DATETIME: &str = "%Y-%m-%d %H:%M:%S";
/// Date format of the first column of the XAU sheet.
pub const SHEET_DATE: &str = "%d/%m/%Y";

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn tomorrow(now: DateTime<Utc>) -> NaiveDate {
    now.date_naive()
        .checked_add_days(Days::new(1))
        .unwrap_or(NaiveDate::MAX)
}

pub fn yesterday(now: DateTime<Utc>) -> NaiveDate {
    now.date_naive()
        .checked_sub_days(Days::new(1))
        .unwrap_or(NaiveDate::MIN)
}

pub fn parse_provider_datetime(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), PROVIDER_DATETIME).ok()
}

pub fn parse_sheet_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), SHEET_DATE).ok()
}
