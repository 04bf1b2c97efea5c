//! Text bodies sent to chats. Pure functions only; no I/O.

use chrono::{NaiveDate, Weekday};

use crate::models::CalendarEvent;
use crate::utils::math::format_decimal;
use crate::utils::time::ISO_DATE;

pub const BOT_TAG: &str = "@EconomicCalendarAndNewsBot";
pub const NO_RELEVANT_NEWS: &str = "Nessuna Notizia Rilevante :(";
pub const XAU_SHEET_UPDATED: &str = "🧈XAUUSD DAILY FILE UPDATED :) ";
pub const HEARTBEAT: &str = "EconomicCalendarAndNewsBot Running 😁";
pub const START: &str = "Ciao! 👋 I am EconomicCalendarAndNewsBot.\n\n\
    📅 Every evening I post tomorrow's high-impact events for EUR, GBP, USD and JPY.\n\
    🧈 Every day I post XAUUSD long/short statistics for the current weekday.";
pub const COMMAND_NOT_FOUND: &str = "🤔 Command not found. Try /start";

pub fn calendar_message(day: NaiveDate, events: &[CalendarEvent]) -> String {
    let mut message = format!("Calendario Economico del {} \n\n", day.format(ISO_DATE));

    if events.is_empty() {
        message.push_str(NO_RELEVANT_NEWS);
        return message;
    }

    for e in events {
        message.push_str(&format!(
            "📅  DATE: {}\n\
             📣  EVENT: {}\n\
             🌍  COUNTRY: {}  {}\n\
             💱  CURRENCY: {}\n\
             🚦  IMPACT: {}  {}\n\n",
            e.date,
            e.event,
            e.country,
            country_flag(&e.country),
            e.currency,
            e.impact,
            impact_light(e.impact.as_str()),
        ));
    }
    message
}

pub fn country_flag(country: &str) -> &'static str {
    match country {
        "UK" => "🇬🇧",
        "US" => "🇺🇸",
        "JP" => "🇯🇵",
        "EU" => "🇪🇺",
        _ => "",
    }
}

pub fn impact_light(impact: &str) -> &'static str {
    match impact {
        "Low" => "🟢",
        "Medium" => "🟡",
        "High" => "🔴",
        _ => "",
    }
}

pub fn xau_stats_message(weekday: Weekday, long_pct: f64, short_pct: f64) -> String {
    format!(
        "🧈 XAUUSD {} statistics \n\nLONG {}% \n\nSHORT {}% \n\n",
        weekday_name(weekday),
        format_decimal(long_pct, 2),
        format_decimal(short_pct, 2),
    )
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Impact;

    fn event(date: &str, event: &str, country: &str, currency: &str, impact: &str) -> CalendarEvent {
        CalendarEvent {
            date: date.into(),
            country: country.into(),
            event: event.into(),
            currency: currency.into(),
            impact: Impact::from(impact.to_string()),
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn empty_calendar_uses_no_news_text() {
        let message = calendar_message(day(), &[]);
        assert_eq!(
            message,
            "Calendario Economico del 2024-03-01 \n\nNessuna Notizia Rilevante :("
        );
    }

    #[test]
    fn one_block_per_event_in_order() {
        let events = vec![
            event("2024-03-01 08:00:00", "GDP", "UK", "GBP", "High"),
            event("2024-03-01 13:30:00", "Nonfarm Payrolls", "US", "USD", "Medium"),
        ];
        let message = calendar_message(day(), &events);

        assert_eq!(message.matches("📅  DATE: ").count(), 2);
        let gdp = message.find("EVENT: GDP").unwrap();
        let nfp = message.find("EVENT: Nonfarm Payrolls").unwrap();
        assert!(gdp < nfp);
        assert!(message.contains("DATE: 2024-03-01 08:00:00\n"));
        assert!(message.contains("COUNTRY: UK  🇬🇧\n"));
        assert!(message.contains("CURRENCY: USD\n"));
        assert!(message.contains("IMPACT: High  🔴\n"));
        assert!(message.contains("IMPACT: Medium  🟡\n"));
        assert!(!message.contains(NO_RELEVANT_NEWS));
    }

    #[test]
    fn unknown_country_and_impact_have_no_decoration() {
        assert_eq!(country_flag("CH"), "");
        assert_eq!(impact_light("None"), "");
        assert_eq!(impact_light("Low"), "🟢");
    }

    #[test]
    fn xau_message_labels_both_sides() {
        let message = xau_stats_message(Weekday::Tue, 66.666666, 33.333333);
        assert_eq!(
            message,
            "🧈 XAUUSD Tuesday statistics \n\nLONG 66.67% \n\nSHORT 33.33% \n\n"
        );
    }
}
