use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::null_as_default;
use crate::utils::time::parse_provider_datetime;

/// Currencies whose high-impact events are worth a notification.
pub const MAJOR_CURRENCIES: [&str; 4] = ["EUR", "GBP", "USD", "JPY"];

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Impact {
    Low,
    Medium,
    High,
    Other(String),
    #[default]
    Unknown,
}

impl Impact {
    pub fn as_str(&self) -> &str {
        match self {
            Impact::Low => "Low",
            Impact::Medium => "Medium",
            Impact::High => "High",
            Impact::Other(raw) => raw,
            Impact::Unknown => "",
        }
    }
}

impl From<String> for Impact {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Low" => Impact::Low,
            "Medium" => Impact::Medium,
            "High" => Impact::High,
            "" => Impact::Unknown,
            _ => Impact::Other(raw),
        }
    }
}

impl From<Impact> for String {
    fn from(impact: Impact) -> Self {
        impact.as_str().to_string()
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub event: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub impact: Impact,
}

impl CalendarEvent {
    /// Calendar day of the event, `None` when the provider timestamp is malformed.
    pub fn day(&self) -> Option<NaiveDate> {
        parse_provider_datetime(&self.date).map(|ts| ts.date())
    }

    pub fn is_major_currency(&self) -> bool {
        MAJOR_CURRENCIES.contains(&self.currency.as_str())
    }

    pub fn is_high_impact(&self) -> bool {
        self.impact == Impact::High
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_provider_record() {
        let raw = r#"{
            "date": "2024-03-01 13:30:00",
            "country": "US",
            "event": "Nonfarm Payrolls",
            "currency": "USD",
            "previous": 1.2,
            "impact": "High"
        }"#;
        let event: CalendarEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(event.impact, Impact::High);
        assert!(event.is_major_currency());
        assert_eq!(event.day(), NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn tolerates_nulls_and_unknown_impact() {
        let raw = r#"{"date": "2024-03-01 13:30:00", "country": null, "event": "CPI", "currency": "CHF", "impact": "None"}"#;
        let event: CalendarEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(event.country, "");
        assert_eq!(event.impact, Impact::Other("None".into()));
        assert_eq!(event.impact.to_string(), "None");
        assert!(!event.is_major_currency());
    }
}
