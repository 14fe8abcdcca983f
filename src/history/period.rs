//! Calendar buckets
//!
//! A bucket is the calendar period an entry's date falls into. Buckets are
//! ordered chronologically by their start, never by their display label.

use crate::history::error::MonthKeyError;
use chrono::{Datelike, Duration, NaiveDate};
use std::str::FromStr;

/// A calendar grouping key
pub trait Bucket: Copy + Ord {
    /// The bucket containing a date
    fn containing(date: NaiveDate) -> Self;

    /// First day of the bucket
    fn start(&self) -> NaiveDate;

    /// Label shown on the chart axis
    fn label(&self) -> String;
}

/// A week running Monday to Sunday, keyed by its Monday
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekStart(NaiveDate);

impl Bucket for WeekStart {
    fn containing(date: NaiveDate) -> Self {
        let days_since_monday = date.weekday().num_days_from_monday() as i64;
        Self(date - Duration::days(days_since_monday))
    }

    fn start(&self) -> NaiveDate {
        self.0
    }

    /// e.g. "Jan 1 2024"
    fn label(&self) -> String {
        self.0.format("%b %-d %Y").to_string()
    }
}

/// A calendar month
///
/// Field order matters: the derived ordering compares year first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl Bucket for MonthKey {
    fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    fn start(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    fn label(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for MonthKey {
    /// `M/YYYY`, month not zero-padded
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}

impl FromStr for MonthKey {
    type Err = MonthKeyError;

    /// Parse an `M/YYYY` label back into its numeric parts
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || MonthKeyError::Malformed(s.to_string());

        let (month, year) = s.trim().split_once('/').ok_or_else(malformed)?;
        let month: u32 = month.parse().map_err(|_| malformed())?;
        let year: i32 = year.parse().map_err(|_| malformed())?;

        if !(1..=12).contains(&month) {
            return Err(MonthKeyError::MonthOutOfRange(s.to_string()));
        }

        Ok(Self { year, month })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_starts_on_monday() {
        // 2024-01-01 is a Monday
        let monday = date(2024, 1, 1);
        for day in 1..=7 {
            assert_eq!(WeekStart::containing(date(2024, 1, day)).start(), monday);
        }

        // Sunday closes its week rather than opening the next one
        assert_eq!(WeekStart::containing(date(2024, 1, 7)).start(), monday);
        assert_eq!(
            WeekStart::containing(date(2024, 1, 8)).start(),
            date(2024, 1, 8)
        );
    }

    #[test]
    fn test_week_crosses_year_boundary() {
        // Wednesday 2025-01-01 belongs to the week of Monday 2024-12-30
        let week = WeekStart::containing(date(2025, 1, 1));
        assert_eq!(week.start(), date(2024, 12, 30));
        assert_eq!(week.label(), "Dec 30 2024");
    }

    #[test]
    fn test_week_label() {
        assert_eq!(WeekStart::containing(date(2024, 1, 3)).label(), "Jan 1 2024");
        assert_eq!(WeekStart::containing(date(2024, 2, 15)).label(), "Feb 12 2024");
    }

    #[test]
    fn test_month_label_round_trip() {
        let key = MonthKey::containing(date(2024, 10, 31));
        assert_eq!(key.label(), "10/2024");
        assert_eq!("10/2024".parse::<MonthKey>().unwrap(), key);
        assert_eq!(key.start(), date(2024, 10, 1));

        assert_eq!(MonthKey::containing(date(2024, 2, 1)).label(), "2/2024");
    }

    #[test]
    fn test_month_ordering_is_numeric() {
        let october: MonthKey = "10/2024".parse().unwrap();
        let february: MonthKey = "2/2024".parse().unwrap();
        let december_before: MonthKey = "12/2023".parse().unwrap();

        // Label strings sort the other way round
        assert!("10/2024" < "2/2024");
        assert!(february < october);
        assert!(december_before < february);
    }

    #[test]
    fn test_month_parse_errors() {
        assert_eq!(
            "2024".parse::<MonthKey>(),
            Err(MonthKeyError::Malformed("2024".to_string()))
        );
        assert_eq!(
            "13/2024".parse::<MonthKey>(),
            Err(MonthKeyError::MonthOutOfRange("13/2024".to_string()))
        );
        assert!(matches!(
            "x/2024".parse::<MonthKey>(),
            Err(MonthKeyError::Malformed(_))
        ));
    }
}
