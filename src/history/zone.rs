//! Display calendar
//!
//! Week and month buckets, as well as the date-bound comparison, are computed
//! on wall-clock dates in the calendar the history is displayed in.

use crate::history::error::ZoneError;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Utc};
use std::str::FromStr;

/// The calendar used to turn instants into wall-clock dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayZone {
    /// Coordinated Universal Time
    Utc,
    /// The host's local timezone (DST-aware)
    #[default]
    Local,
    /// A fixed UTC offset
    Fixed(FixedOffset),
}

impl DisplayZone {
    /// Wall-clock date-time of an instant in this calendar
    pub fn wall_clock(&self, instant: &DateTime<FixedOffset>) -> NaiveDateTime {
        match self {
            Self::Utc => instant.with_timezone(&Utc).naive_utc(),
            Self::Local => instant.with_timezone(&Local).naive_local(),
            Self::Fixed(offset) => instant.with_timezone(offset).naive_local(),
        }
    }

    /// Parse a raw entry timestamp into a wall-clock date-time
    ///
    /// Accepted forms, in order:
    /// - RFC 3339 with an offset (`2024-01-01T10:00:00Z`): converted to this calendar
    /// - naive ISO 8601 (`2024-01-01T10:00:00.123456`): already wall-clock time
    /// - a bare date (`2024-01-01`): midnight of that day
    pub fn parse_timestamp(&self, raw: &str) -> Option<NaiveDateTime> {
        let raw = raw.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(self.wall_clock(&dt));
        }

        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(naive);
            }
        }

        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }
}

impl FromStr for DisplayZone {
    type Err = ZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();

        match normalized.as_str() {
            "local" | "" => return Ok(Self::Local),
            "utc" | "z" => return Ok(Self::Utc),
            _ => {}
        }

        let (sign, rest) = if let Some(rest) = normalized.strip_prefix('+') {
            (1, rest)
        } else if let Some(rest) = normalized.strip_prefix('-') {
            (-1, rest)
        } else {
            return Err(ZoneError::Unrecognized(s.to_string()));
        };

        let (hours, minutes) = rest.split_once(':').unwrap_or((rest, "0"));
        let hours: i32 = hours
            .parse()
            .map_err(|_| ZoneError::Unrecognized(s.to_string()))?;
        let minutes: i32 = minutes
            .parse()
            .map_err(|_| ZoneError::Unrecognized(s.to_string()))?;

        if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
            return Err(ZoneError::OutOfRange(s.to_string()));
        }

        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .map(Self::Fixed)
            .ok_or_else(|| ZoneError::OutOfRange(s.to_string()))
    }
}

impl std::fmt::Display for DisplayZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Utc => write!(f, "utc"),
            Self::Local => write!(f, "local"),
            Self::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_zone() {
        assert_eq!("utc".parse::<DisplayZone>().unwrap(), DisplayZone::Utc);
        assert_eq!("Local".parse::<DisplayZone>().unwrap(), DisplayZone::Local);

        let zone: DisplayZone = "+05:30".parse().unwrap();
        assert_eq!(
            zone,
            DisplayZone::Fixed(FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap())
        );

        let zone: DisplayZone = "-08".parse().unwrap();
        assert_eq!(zone, DisplayZone::Fixed(FixedOffset::west_opt(8 * 3600).unwrap()));

        assert!(matches!(
            "Europe/Paris".parse::<DisplayZone>(),
            Err(ZoneError::Unrecognized(_))
        ));
        assert!(matches!(
            "+24:00".parse::<DisplayZone>(),
            Err(ZoneError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_parse_rfc3339_in_fixed_zone() {
        let zone: DisplayZone = "-05:00".parse().unwrap();

        // 03:00 UTC on a Monday is still Sunday evening five hours west
        let dt = zone.parse_timestamp("2024-01-08T03:00:00Z").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 1, 7).unwrap());
        assert_eq!(dt.hour(), 22);
    }

    #[test]
    fn test_parse_naive_timestamps() {
        let zone = DisplayZone::Utc;

        let dt = zone.parse_timestamp("2024-03-15T08:30:00.123456").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 3, 15));
        assert_eq!(dt.minute(), 30);

        let dt = zone.parse_timestamp("2024-03-15 23:59:59").unwrap();
        assert_eq!(dt.hour(), 23);

        let dt = zone.parse_timestamp("2024-03-15").unwrap();
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn test_parse_garbage_timestamp() {
        let zone = DisplayZone::Utc;
        assert!(zone.parse_timestamp("").is_none());
        assert!(zone.parse_timestamp("not a date").is_none());
        assert!(zone.parse_timestamp("2024-13-40").is_none());
    }
}
