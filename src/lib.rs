//! # Moodscope
//!
//! History views for a mood journal: loads sentiment-scored journal entries
//! from the journal API and derives the series the history displays show.
//!
//! ## Modules
//!
//! - [`history`]: date filter, mood distribution, weekly/monthly averages
//! - [`loader`]: `GET /entries` client and the history session
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use moodscope::history::{DateBounds, DisplayZone, Entry, HistoryView};
//!
//! let entries = vec![
//!     Entry::new("2024-01-01T10:00:00Z", "happy", 0.8),
//!     Entry::new("2024-01-02T09:00:00Z", "sad", -0.6),
//! ];
//!
//! let view = HistoryView::compute(
//!     &entries,
//!     &DateBounds::parse("2024-01-01", ""),
//!     &DisplayZone::Utc,
//! );
//!
//! for week in &view.weekly {
//!     println!("{}: {:.3}", week.week_start, week.average);
//! }
//! ```

pub mod config;
pub mod history;
pub mod loader;

pub use history::{
    DateBounds, DisplayZone, DistributionRow, Entry, HistoryView, MonthlyRow, SeriesPoint,
    WeeklyRow,
};

pub use loader::{
    ClientConfig, ClientError, EntriesClient, EntrySource, HistorySession, RefreshOutcome,
};

pub use config::{ApiConfig, Config, ConfigError, DisplayConfig, LoggingConfig};
