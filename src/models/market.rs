use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalPoint {
    #[serde(default)]
    pub date: Option<String>,
    pub close: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    #[serde(default)]
    pub volume: f64,
    #[serde(default)]
    pub change_percent: f64,
}

/// Market-data provider payload; `historical` is ordered newest first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HistoricalResponse {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub historical: Vec<HistoricalPoint>,
}

impl HistoricalResponse {
    /// The session before the most recent one.
    pub fn previous_session(&self) -> Option<&HistoricalPoint> {
        self.historical.get(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn previous_session_is_second_entry() {
        let raw = r#"{
            "symbol": "XAUUSD",
            "historical": [
                {"date": "2024-03-05", "open": 2115.1, "high": 2141.6, "low": 2113.9, "close": 2128.4, "volume": 181234, "changePercent": 0.63},
                {"date": "2024-03-04", "open": 2083.2, "high": 2119.8, "low": 2079.0, "close": 2114.7, "volume": 201002, "changePercent": 1.51}
            ]
        }"#;
        let response: HistoricalResponse = serde_json::from_str(raw).unwrap();
        let point = response.previous_session().unwrap();
        assert_eq!(point.date.as_deref(), Some("2024-03-04"));
        assert_eq!(point.change_percent, 1.51);
    }

    #[test]
    fn short_history_has_no_previous_session() {
        let response: HistoricalResponse = serde_json::from_str(r#"{"historical": []}"#).unwrap();
        assert!(response.previous_session().is_none());
    }
}
