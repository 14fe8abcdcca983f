//! Core data types for the history pipeline
//!
//! - `Entry`: one journal submission as returned by `GET /entries`
//! - `FilteredEntry`: an entry with its derived wall-clock date
//! - Row types handed to the renderer: `SeriesPoint`, `DistributionRow`,
//!   `WeeklyRow`, `MonthlyRow`

use crate::history::period::{MonthKey, WeekStart};
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// A journal entry with its sentiment scores
///
/// Every field is optional and decoded leniently: a missing, `null` or
/// wrongly-typed value becomes `None` instead of rejecting the record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    #[serde(default, deserialize_with = "lenient::int")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default, deserialize_with = "lenient::string")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// ISO 8601 timestamp, as sent by the API
    #[serde(default, deserialize_with = "lenient::string")]
    pub timestamp: Option<String>,

    /// Mood label ("happy", "neutral", "sad", ...)
    #[serde(default, deserialize_with = "lenient::string")]
    pub mood: Option<String>,

    /// Net sentiment in [-1, 1]
    #[serde(default, deserialize_with = "lenient::number")]
    pub compound: Option<f64>,

    #[serde(default, deserialize_with = "lenient::number")]
    pub neg: Option<f64>,

    #[serde(default, deserialize_with = "lenient::number")]
    pub neu: Option<f64>,

    #[serde(default, deserialize_with = "lenient::number")]
    pub pos: Option<f64>,
}

impl Entry {
    /// Create an entry with the fields the aggregation uses
    pub fn new(timestamp: impl Into<String>, mood: impl Into<String>, compound: f64) -> Self {
        Self {
            timestamp: Some(timestamp.into()),
            mood: Some(mood.into()),
            compound: Some(compound),
            ..Default::default()
        }
    }

    /// Builder method: set the component proportions
    pub fn proportions(mut self, neg: f64, neu: f64, pos: f64) -> Self {
        self.neg = Some(neg);
        self.neu = Some(neu);
        self.pos = Some(pos);
        self
    }

    /// Builder method: set the journal text
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Compound score, if present and finite
    pub fn score(&self) -> Option<f64> {
        self.compound.filter(|c| c.is_finite())
    }

    /// Decode the body of `GET /entries`
    ///
    /// Elements that are not JSON objects are skipped. Returns `None` when
    /// the body is not an array at all.
    pub fn decode_list(body: serde_json::Value) -> Option<Vec<Entry>> {
        let items = match body {
            serde_json::Value::Array(items) => items,
            _ => return None,
        };

        let total = items.len();
        let entries: Vec<Entry> = items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(index, error = %e, "Skipping undecodable entry");
                    None
                }
            })
            .collect();

        if entries.len() < total {
            tracing::debug!(decoded = entries.len(), total, "Decoded entry list");
        }

        Some(entries)
    }
}

/// An entry together with its wall-clock date in the display calendar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilteredEntry<'a> {
    pub entry: &'a Entry,
    /// `None` when the timestamp is missing or unparseable
    pub date: Option<NaiveDateTime>,
}

impl FilteredEntry<'_> {
    pub fn mood(&self) -> Option<&str> {
        self.entry.mood.as_deref()
    }

    pub fn score(&self) -> Option<f64> {
        self.entry.score()
    }
}

/// A point of the mood-over-time line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub date: NaiveDateTime,
    pub compound: f64,
}

/// Number of entries for one mood label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionRow {
    pub name: String,
    pub value: usize,
}

/// Average compound score of one Monday-anchored week
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyRow {
    #[serde(rename = "weekStart")]
    pub week_start: String,
    pub average: f64,
    #[serde(skip)]
    pub key: WeekStart,
}

/// Average compound score of one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRow {
    /// `M/YYYY`
    pub month: String,
    pub average: f64,
    #[serde(skip)]
    pub key: MonthKey,
}

mod lenient {
    use super::*;
    use serde_json::Value;

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => Some(s),
            _ => None,
        })
    }

    pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    pub fn int<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }
}
