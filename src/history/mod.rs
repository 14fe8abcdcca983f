//! History aggregation
//!
//! Turns the raw list of journal entries into the series shown by the
//! history displays. Everything here is pure and synchronous.
//!
//! ## Pipeline
//!
//! ```text
//! entries → Range Filter → { Distribution, Weekly averages, Monthly averages }
//! ```
//!
//! - [`filter`]: inclusive calendar-date window
//! - [`distribution`]: entry count per mood label, first-seen order
//! - [`averages`]: mean compound score per week / month bucket
//! - [`view`]: the whole pipeline in one call

pub mod averages;
pub mod distribution;
mod error;
pub mod filter;
pub mod period;
mod types;
pub mod view;
mod zone;

pub use averages::{monthly_averages, period_averages, round3, weekly_averages};
pub use distribution::distribution;
pub use error::{BoundError, MonthKeyError, ZoneError};
pub use filter::{annotate, filter_entries, DateBound, DateBounds};
pub use period::{Bucket, MonthKey, WeekStart};
pub use types::{
    DistributionRow, Entry, FilteredEntry, MonthlyRow, SeriesPoint, WeeklyRow,
};
pub use view::HistoryView;
pub use zone::DisplayZone;
