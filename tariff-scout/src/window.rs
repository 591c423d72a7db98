use std::fmt::{Debug, Formatter};

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::error::{Error, Result};

/// Labelled half-open interval `[start, end)`.
#[must_use]
#[derive(Clone, Eq, PartialEq)]
pub struct AnalysisWindow {
    label: String,

    /// Inclusive.
    start: NaiveDateTime,

    /// Exclusive.
    end: NaiveDateTime,
}

impl Debug for AnalysisWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:?}..{:?}", self.label, self.start, self.end)
    }
}

impl AnalysisWindow {
    pub fn try_new(
        label: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self> {
        let label = label.into();
        if start < end {
            Ok(Self { label, start, end })
        } else {
            Err(Error::EmptyWindow { label, start, end })
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> NaiveDateTime {
        self.end
    }

    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    #[must_use]
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        (self.start <= timestamp) && (timestamp < self.end)
    }
}

/// Calendar periods relative to the given moment, the ongoing ones end with the current day.
pub struct CalendarPeriods;

impl CalendarPeriods {
    pub fn at(now: NaiveDateTime) -> Vec<AnalysisWindow> {
        let today = now.date();
        let tomorrow = today + Days::new(1);
        let yesterday = today - Days::new(1);
        let this_week = today - Days::new(u64::from(today.weekday().num_days_from_monday()));
        let last_week = this_week - Days::new(7);
        let this_month = start_of_month(today);
        let last_month = start_of_month(this_month - Days::new(1));
        let this_year = today - Days::new(u64::from(today.ordinal0()));

        [
            ("today", today, tomorrow),
            ("yesterday", yesterday, today),
            ("this week", this_week, tomorrow),
            ("last week", last_week, this_week),
            ("this month", this_month, tomorrow),
            ("last month", last_month, this_month),
            ("this year", this_year, tomorrow),
        ]
        .into_iter()
        .filter_map(|(label, start, end)| {
            AnalysisWindow::try_new(label, midnight(start), midnight(end)).ok()
        })
        .collect()
    }
}

fn start_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

const fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day).unwrap().and_time(NaiveTime::MIN)
    }

    #[test]
    fn test_empty_window() {
        let result = AnalysisWindow::try_new("nope", on(2025, 1, 2), on(2025, 1, 2));
        assert!(matches!(result, Err(Error::EmptyWindow { .. })));
    }

    #[test]
    fn test_contains_is_half_open() {
        let window = AnalysisWindow::try_new("day", on(2025, 1, 2), on(2025, 1, 3)).unwrap();
        assert!(window.contains(on(2025, 1, 2)));
        assert!(!window.contains(on(2025, 1, 3)));
        assert_eq!(window.duration(), TimeDelta::days(1));
    }

    #[test]
    fn test_calendar_periods() {
        // Wednesday.
        let now = on(2025, 3, 5) + TimeDelta::hours(15);
        let periods = CalendarPeriods::at(now);
        let find = |label: &str| periods.iter().find(|window| window.label() == label).unwrap();

        assert_eq!(find("today").start(), on(2025, 3, 5));
        assert_eq!(find("today").end(), on(2025, 3, 6));
        assert_eq!(find("yesterday").start(), on(2025, 3, 4));
        assert_eq!(find("this week").start(), on(2025, 3, 3));
        assert_eq!(find("last week").start(), on(2025, 2, 24));
        assert_eq!(find("last week").end(), on(2025, 3, 3));
        assert_eq!(find("this month").start(), on(2025, 3, 1));
        assert_eq!(find("last month").start(), on(2025, 2, 1));
        assert_eq!(find("last month").end(), on(2025, 3, 1));
        assert_eq!(find("this year").start(), on(2025, 1, 1));
        assert_eq!(periods.len(), 7);
    }
}
