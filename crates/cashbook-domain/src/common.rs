//! Shared date helpers and the inclusive [`DateRange`] used by filters and summaries.

use std::fmt;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// Inclusive calendar range; both `start` and `end` belong to the range.
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if end < start {
            return Err(DateRangeError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Range covering a single day.
    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// The window that starts the day after `today` and ends on the last day of the
    /// calendar month following `today`'s month. `None` only at the end of the
    /// representable calendar.
    pub fn upcoming_after(today: NaiveDate) -> Option<Self> {
        let start = next_day(today)?;
        let end = last_day_of_following_month(today)?;
        Some(Self { start, end })
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Errors that can occur when constructing [`DateRange`] values.
pub enum DateRangeError {
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for DateRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateRangeError::InvertedRange { start, end } => {
                write!(f, "date range end {end} is before start {start}")
            }
        }
    }
}

impl std::error::Error for DateRangeError {}

pub fn next_day(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(1))
}

/// Last day of the month after `date`'s month, wrapping the year in December.
pub fn last_day_of_following_month(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)?
        .checked_add_months(Months::new(2))?
        .pred_opt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn following_month_end_handles_leap_february() {
        assert_eq!(
            last_day_of_following_month(date(2024, 1, 15)),
            Some(date(2024, 2, 29))
        );
        assert_eq!(
            last_day_of_following_month(date(2023, 1, 31)),
            Some(date(2023, 2, 28))
        );
    }

    #[test]
    fn following_month_end_wraps_december() {
        assert_eq!(
            last_day_of_following_month(date(2024, 12, 5)),
            Some(date(2025, 1, 31))
        );
        assert_eq!(
            last_day_of_following_month(date(2024, 11, 30)),
            Some(date(2024, 12, 31))
        );
    }

    #[test]
    fn upcoming_window_starts_tomorrow() {
        let window = DateRange::upcoming_after(date(2024, 1, 15)).unwrap();
        assert_eq!(window.start, date(2024, 1, 16));
        assert_eq!(window.end, date(2024, 2, 29));
        assert!(!window.contains(date(2024, 1, 15)));
        assert!(window.contains(date(2024, 2, 29)));
        assert!(!window.contains(date(2024, 3, 1)));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = DateRange::new(date(2024, 2, 1), date(2024, 1, 1)).unwrap_err();
        assert!(err.to_string().contains("before start"));
        assert!(DateRange::new(date(2024, 1, 1), date(2024, 1, 1)).is_ok());
    }
}
