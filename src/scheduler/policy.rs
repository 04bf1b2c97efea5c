use chrono::{DateTime, Datelike, NaiveTime, TimeDelta, Utc, Weekday};

/// When a recurring task fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// Once a day at a fixed UTC wall-clock time.
    DailyAt(NaiveTime),
    /// Immediately, then every 24 hours after the previous firing.
    Daily,
}

impl Cadence {
    pub fn from_time(at: Option<NaiveTime>) -> Self {
        at.map(Cadence::DailyAt).unwrap_or(Cadence::Daily)
    }

    pub fn next_fire(&self, now: DateTime<Utc>, last: Option<DateTime<Utc>>) -> DateTime<Utc> {
        match self {
            Cadence::Daily => last.map(|l| l + TimeDelta::days(1)).unwrap_or(now),
            Cadence::DailyAt(at) => {
                let mut next = now.date_naive().and_time(*at).and_utc();
                if next <= now {
                    next += TimeDelta::days(1);
                }
                // The sleep clock and the wall clock can disagree; never
                // hand back a slot that has already fired.
                while last.is_some_and(|l| next <= l) {
                    next += TimeDelta::days(1);
                }
                next
            }
        }
    }
}

/// Named guard deciding whether a due firing actually runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulePolicy {
    #[default]
    Always,
    SkipWeekday(Weekday),
}

impl SchedulePolicy {
    /// No market session closes on Saturday, so there is nothing to record on Sunday.
    pub fn skip_sunday() -> Self {
        SchedulePolicy::SkipWeekday(Weekday::Sun)
    }

    pub fn allows(&self, at: DateTime<Utc>) -> bool {
        match self {
            SchedulePolicy::Always => true,
            SchedulePolicy::SkipWeekday(day) => at.weekday() != *day,
        }
    }
}
