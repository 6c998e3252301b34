//! Day-slot selection.
//!
//! One run reports either today or tomorrow. The choice is made once from the
//! local hour at run start and never changes afterwards: from 18:00 the
//! evening forecast issue is in effect and the run reports tomorrow.

use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, TimeZone, Timelike, Utc};

/// Which forecast day-slot a run extracts and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaySlot {
    Today,
    Tomorrow,
}

impl DaySlot {
    /// One-shot mode decision from the local wall clock.
    #[must_use]
    pub fn select<Tz: TimeZone>(local: &DateTime<Tz>) -> Self {
        if local.hour() >= 18 {
            Self::Tomorrow
        } else {
            Self::Today
        }
    }

    /// Segment refID within the forecast document.
    #[must_use]
    pub fn ref_id(self) -> &'static str {
        match self {
            Self::Today => "1",
            Self::Tomorrow => "2",
        }
    }

    /// TimeDefine name locating the low temperature for this slot.
    #[must_use]
    pub fn low_define(self) -> &'static str {
        // The morning low is published under 明日朝 in both issues.
        "明日朝"
    }

    /// TimeDefine name locating the high temperature for this slot.
    #[must_use]
    pub fn high_define(self) -> &'static str {
        match self {
            Self::Today => "今日日中",
            Self::Tomorrow => "明日日中",
        }
    }

    /// Feed window for this run: the matching forecast issue is published
    /// within the six hours before run start.
    #[must_use]
    pub fn feed_window(self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        (now - Duration::hours(6), now)
    }

    /// The calendar day this slot reports on, given the local run date.
    #[must_use]
    pub fn reported_day(self, local_date: NaiveDate) -> NaiveDate {
        match self {
            Self::Today => local_date,
            Self::Tomorrow => local_date + Days::new(1),
        }
    }

    /// Day label substituted into the report template, e.g. 今日(3月1日).
    #[must_use]
    pub fn day_label(self, local_date: NaiveDate) -> String {
        let day = self.reported_day(local_date);
        let prefix = match self {
            Self::Today => "今日",
            Self::Tomorrow => "明日",
        };
        format!("{prefix}({}月{}日)", day.month(), day.day())
    }
}
