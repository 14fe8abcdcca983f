//! Range filter
//!
//! Narrows the entry list to an inclusive window of calendar dates. Bounds
//! are whole days: any time on the end day is inside the window.

use crate::history::error::BoundError;
use crate::history::types::{Entry, FilteredEntry};
use crate::history::zone::DisplayZone;
use chrono::NaiveDate;

/// One side of the date window, as typed into a date field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DateBound {
    /// No constraint on this side
    #[default]
    Open,
    /// Inclusive calendar date
    On(NaiveDate),
    /// Text that is not a date; matches nothing
    Invalid(BoundError),
}

impl DateBound {
    /// Parse the text of a date field. Blank text means no bound.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            return Self::Open;
        }

        match NaiveDate::parse_from_str(input, "%Y-%m-%d") {
            Ok(date) => Self::On(date),
            Err(_) => Self::Invalid(BoundError::Malformed(input.to_string())),
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::On(date) => Some(*date),
            _ => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

impl From<Option<NaiveDate>> for DateBound {
    fn from(date: Option<NaiveDate>) -> Self {
        date.map(Self::On).unwrap_or(Self::Open)
    }
}

/// The two independent bounds of the date window
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DateBounds {
    pub start: DateBound,
    pub end: DateBound,
}

impl DateBounds {
    /// No constraint on either side
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Parse both date fields
    pub fn parse(start: &str, end: &str) -> Self {
        Self {
            start: DateBound::parse(start),
            end: DateBound::parse(end),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_open() && self.end.is_open()
    }

    /// Why the window matches nothing, if it does
    pub fn rejection(&self) -> Option<String> {
        for bound in [&self.start, &self.end] {
            if let DateBound::Invalid(e) = bound {
                return Some(e.to_string());
            }
        }

        match (self.start.date(), self.end.date()) {
            (Some(start), Some(end)) if start > end => {
                Some(format!("start {} is after end {}", start, end))
            }
            _ => None,
        }
    }

    /// Whether a calendar date lies inside the window
    pub fn contains(&self, date: NaiveDate) -> bool {
        if self.rejection().is_some() {
            return false;
        }
        if let Some(start) = self.start.date() {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end.date() {
            if date > end {
                return false;
            }
        }
        true
    }
}

/// Attach wall-clock dates to entries without filtering
pub fn annotate<'a>(entries: &'a [Entry], zone: &DisplayZone) -> Vec<FilteredEntry<'a>> {
    entries
        .iter()
        .map(|entry| FilteredEntry {
            entry,
            date: entry
                .timestamp
                .as_deref()
                .and_then(|raw| zone.parse_timestamp(raw)),
        })
        .collect()
}

/// Keep the entries whose date lies inside `bounds`, preserving order
///
/// An unbounded window keeps everything, including entries whose timestamp
/// could not be parsed. Any bound excludes such entries.
pub fn filter_entries<'a>(
    entries: &'a [Entry],
    bounds: &DateBounds,
    zone: &DisplayZone,
) -> Vec<FilteredEntry<'a>> {
    if let Some(reason) = bounds.rejection() {
        tracing::debug!(%reason, "Date window matches no entries");
        return Vec::new();
    }

    let annotated = annotate(entries, zone);
    if bounds.is_unbounded() {
        return annotated;
    }

    annotated
        .into_iter()
        .filter(|e| e.date.map(|d| bounds.contains(d.date())).unwrap_or(false))
        .collect()
}
