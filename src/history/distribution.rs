//! Distribution reducer
//!
//! Counts entries per mood label. The label set is open: every label seen in
//! the data becomes a row, in order of first occurrence.

use crate::history::types::{DistributionRow, FilteredEntry};
use std::collections::HashMap;

/// Count entries per mood label, in first-seen order
///
/// Entries without a mood are skipped.
pub fn distribution(entries: &[FilteredEntry<'_>]) -> Vec<DistributionRow> {
    let mut rows: Vec<DistributionRow> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for entry in entries {
        let Some(mood) = entry.mood() else {
            tracing::debug!(timestamp = ?entry.entry.timestamp, "Entry without mood left out of distribution");
            continue;
        };

        match positions.get(mood) {
            Some(&index) => rows[index].value += 1,
            None => {
                positions.insert(mood, rows.len());
                rows.push(DistributionRow {
                    name: mood.to_string(),
                    value: 1,
                });
            }
        }
    }

    rows
}
