//! Calendar helpers for ledger primitives.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A calendar month, the unit every chart and summary is bucketed by.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// Returns `None` unless the month's first day is a representable date.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// The month a date or timestamp falls in.
    pub fn of<D: Datelike>(date: &D) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Months elapsed since January of year 0.
    pub fn ordinal(self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    /// Signed number of months from `earlier` to `self`.
    pub fn months_since(self, earlier: YearMonth) -> i64 {
        self.ordinal() - earlier.ordinal()
    }

    /// Moves `months` calendar months forward (negative values move back).
    /// Saturates at the `i32` year range.
    pub fn shift(self, months: i32) -> Self {
        let index = self.ordinal() + i64::from(months);
        let year = index
            .div_euclid(12)
            .clamp(i64::from(i32::MIN), i64::from(i32::MAX));
        Self {
            year: year as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn previous(self) -> Self {
        self.shift(-1)
    }

    pub fn next(self) -> Self {
        self.shift(1)
    }

    pub fn contains(&self, timestamp: &NaiveDateTime) -> bool {
        timestamp.year() == self.year && timestamp.month() == self.month
    }

    /// Chart label, e.g. `2024.1`.
    pub fn label(&self) -> String {
        format!("{}.{}", self.year, self.month)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Raised when a month string is neither `YYYY-MM` nor `YYYY.M`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseYearMonthError(String);

impl fmt::Display for ParseYearMonthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid month `{}` (expected YYYY-MM)", self.0)
    }
}

impl std::error::Error for ParseYearMonthError {}

impl FromStr for YearMonth {
    type Err = ParseYearMonthError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let invalid = || ParseYearMonthError(trimmed.to_string());
        let (year, month) = trimmed
            .split_once(['-', '.', '/'])
            .ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        YearMonth::new(year, month).ok_or_else(invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_wraps_across_years() {
        let january = YearMonth::new(2024, 1).unwrap();
        assert_eq!(january.shift(-2), YearMonth::new(2023, 11).unwrap());
        assert_eq!(january.shift(13), YearMonth::new(2025, 2).unwrap());
        assert_eq!(january.previous().next(), january);
    }

    #[test]
    fn parses_dash_and_dot_forms() {
        assert_eq!(
            "2024-03".parse::<YearMonth>().unwrap(),
            YearMonth::new(2024, 3).unwrap()
        );
        assert_eq!(
            "2023.12".parse::<YearMonth>().unwrap(),
            YearMonth::new(2023, 12).unwrap()
        );
        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("march".parse::<YearMonth>().is_err());
    }

    #[test]
    fn years_outside_the_calendar_are_rejected() {
        assert!("999999999-01".parse::<YearMonth>().is_err());
        assert!(YearMonth::new(i32::MAX, 12).is_none());
        assert!(YearMonth::new(-999_999_999, 1).is_none());
    }

    #[test]
    fn shifting_extreme_months_does_not_overflow() {
        let far = YearMonth {
            year: i32::MAX,
            month: 12,
        };
        assert_eq!(far.next().year, i32::MAX);
        assert_eq!(far.previous(), YearMonth { year: i32::MAX, month: 11 });
        let first = YearMonth::new(2023, 11).unwrap();
        assert_eq!(YearMonth::new(2024, 2).unwrap().months_since(first), 3);
    }

    #[test]
    fn label_matches_chart_format() {
        let month = YearMonth::new(2013, 1).unwrap();
        assert_eq!(month.label(), "2013.1");
        assert_eq!(month.to_string(), "2013-01");
    }
}
