//! Period averager
//!
//! Groups entries into calendar buckets and computes the mean compound score
//! of each bucket.
//!
//! ```text
//! entries → bucket(date) → {sum, count} → round(sum / count, 3) → sort by bucket start
//! ```

use crate::history::period::{Bucket, MonthKey, WeekStart};
use crate::history::types::{FilteredEntry, MonthlyRow, WeeklyRow};
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    /// Never called on an empty accumulator: buckets are created by their first value
    fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

/// Round the stored value to 3 decimal places, halves away from zero
///
/// Scaling by 1000 first would round twice: `0.4995` is stored as
/// 0.49949999..., which must give 0.499, not 0.5. The fixed-precision
/// formatter rounds the exact binary value instead.
pub fn round3(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let scaled = value * 1000.0;
    // The FMA residual is zero only when `scaled` is exact, i.e. a true tie
    let exact_tie = scaled.fract().abs() == 0.5 && value.mul_add(1000.0, -scaled) == 0.0;

    let rounded = if exact_tie {
        scaled.round() / 1000.0
    } else {
        format!("{:.3}", value).parse().unwrap_or(value)
    };

    // Adding 0.0 turns -0.0 into 0.0
    rounded + 0.0
}

/// Mean compound score per bucket, in chronological order
///
/// Entries without a date or without a finite compound score do not
/// contribute to any bucket.
pub fn period_averages<B: Bucket>(entries: &[FilteredEntry<'_>]) -> Vec<(B, f64)> {
    let mut buckets: BTreeMap<B, Accumulator> = BTreeMap::new();

    for entry in entries {
        let (Some(date), Some(score)) = (entry.date, entry.score()) else {
            tracing::debug!(
                timestamp = ?entry.entry.timestamp,
                compound = ?entry.entry.compound,
                "Entry left out of period averages"
            );
            continue;
        };

        buckets.entry(B::containing(date.date())).or_default().add(score);
    }

    buckets
        .into_iter()
        .map(|(bucket, acc)| (bucket, round3(acc.mean())))
        .collect()
}

/// Average compound score per Monday-anchored week
pub fn weekly_averages(entries: &[FilteredEntry<'_>]) -> Vec<WeeklyRow> {
    period_averages::<WeekStart>(entries)
        .into_iter()
        .map(|(key, average)| WeeklyRow {
            week_start: key.label(),
            average,
            key,
        })
        .collect()
}

/// Average compound score per calendar month
pub fn monthly_averages(entries: &[FilteredEntry<'_>]) -> Vec<MonthlyRow> {
    period_averages::<MonthKey>(entries)
        .into_iter()
        .map(|(key, average)| MonthlyRow {
            month: key.label(),
            average,
            key,
        })
        .collect()
}
