//! History view
//!
//! Runs the whole pipeline over one snapshot of entries:
//!
//! ```text
//! entries → filter → { series, distribution, weekly, monthly }
//! ```
//!
//! Every series is recomputed from the filtered set on each call; nothing is
//! cached or patched incrementally.

use crate::history::averages::{monthly_averages, weekly_averages};
use crate::history::distribution::distribution;
use crate::history::filter::{filter_entries, DateBounds};
use crate::history::types::{DistributionRow, Entry, MonthlyRow, SeriesPoint, WeeklyRow};
use crate::history::zone::DisplayZone;
use serde::Serialize;

/// Everything the history displays need
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistoryView {
    /// Number of entries inside the date window
    pub entry_count: usize,
    /// Mood over time, in input order
    pub series: Vec<SeriesPoint>,
    pub distribution: Vec<DistributionRow>,
    pub weekly: Vec<WeeklyRow>,
    pub monthly: Vec<MonthlyRow>,
}

impl HistoryView {
    /// Compute the view for a snapshot of entries and a date window
    pub fn compute(entries: &[Entry], bounds: &DateBounds, zone: &DisplayZone) -> Self {
        let filtered = filter_entries(entries, bounds, zone);

        let series = filtered
            .iter()
            .filter_map(|e| {
                Some(SeriesPoint {
                    date: e.date?,
                    compound: e.score()?,
                })
            })
            .collect();

        let view = Self {
            entry_count: filtered.len(),
            series,
            distribution: distribution(&filtered),
            weekly: weekly_averages(&filtered),
            monthly: monthly_averages(&filtered),
        };

        tracing::debug!(
            total = entries.len(),
            filtered = view.entry_count,
            weeks = view.weekly.len(),
            months = view.monthly.len(),
            "Computed history view"
        );

        view
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn scenario() -> Vec<Entry> {
        vec![
            Entry::new("2024-01-01T10:00:00Z", "happy", 0.8),
            Entry::new("2024-01-02T09:00:00Z", "sad", -0.6),
            Entry::new("2024-01-08T09:00:00Z", "neutral", 0.0),
        ]
    }

    fn counts(view: &HistoryView) -> Vec<(&str, usize)> {
        view.distribution
            .iter()
            .map(|r| (r.name.as_str(), r.value))
            .collect()
    }

    #[test]
    fn test_unbounded_scenario() {
        let view = HistoryView::compute(&scenario(), &DateBounds::unbounded(), &DisplayZone::Utc);

        assert_eq!(view.entry_count, 3);
        assert_eq!(view.series.len(), 3);
        assert_eq!(counts(&view), vec![("happy", 1), ("sad", 1), ("neutral", 1)]);

        let weekly: Vec<(&str, f64)> = view
            .weekly
            .iter()
            .map(|r| (r.week_start.as_str(), r.average))
            .collect();
        assert_eq!(weekly, vec![("Jan 1 2024", 0.1), ("Jan 8 2024", 0.0)]);

        assert_eq!(view.monthly.len(), 1);
        assert_eq!(view.monthly[0].month, "1/2024");
        assert_eq!(view.monthly[0].average, 0.067);
    }

    #[test]
    fn test_single_day_scenario() {
        let bounds = DateBounds::parse("2024-01-02", "2024-01-02");
        let view = HistoryView::compute(&scenario(), &bounds, &DisplayZone::Utc);

        assert_eq!(view.entry_count, 1);
        assert_eq!(view.series[0].compound, -0.6);
        assert_eq!(
            view.series[0].date.date(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
        assert_eq!(counts(&view), vec![("sad", 1)]);
        assert_eq!(view.weekly.len(), 1);
        assert_eq!(view.weekly[0].week_start, "Jan 1 2024");
        assert_eq!(view.weekly[0].average, -0.6);
    }

    #[test]
    fn test_empty_window() {
        let bounds = DateBounds::parse("2025-01-01", "2025-12-31");
        let view = HistoryView::compute(&scenario(), &bounds, &DisplayZone::Utc);

        assert!(view.is_empty());
        assert!(view.series.is_empty());
        assert!(view.distribution.is_empty());
        assert!(view.weekly.is_empty());
        assert!(view.monthly.is_empty());
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let entries = scenario();
        let bounds = DateBounds::parse("2024-01-01", "");

        let first = HistoryView::compute(&entries, &bounds, &DisplayZone::Utc);
        let second = HistoryView::compute(&entries, &bounds, &DisplayZone::Utc);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_series_skips_unplottable_entries() {
        let mut entries = scenario();
        entries.push(Entry::new("unknown", "happy", 0.5));
        entries.push(Entry {
            timestamp: Some("2024-01-03T08:00:00Z".to_string()),
            mood: Some("happy".to_string()),
            ..Default::default()
        });

        let view = HistoryView::compute(&entries, &DateBounds::unbounded(), &DisplayZone::Utc);

        assert_eq!(view.entry_count, 5);
        assert_eq!(view.series.len(), 3);
        assert_eq!(counts(&view), vec![("happy", 3), ("sad", 1), ("neutral", 1)]);
    }

    #[test]
    fn test_serialized_shape() {
        let bounds = DateBounds::parse("2024-01-02", "2024-01-02");
        let view = HistoryView::compute(&scenario(), &bounds, &DisplayZone::Utc);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["distribution"][0]["name"], "sad");
        assert_eq!(json["distribution"][0]["value"], 1);
        assert_eq!(json["weekly"][0]["weekStart"], "Jan 1 2024");
        assert_eq!(json["monthly"][0]["month"], "1/2024");
        assert_eq!(json["series"][0]["date"], "2024-01-02T09:00:00");
    }
}
