//! Entry Loading
//!
//! Obtains the raw entry list and holds the state the history view is
//! computed from.
//!
//! - **EntriesClient**: `GET /entries` over HTTP
//! - **HistorySession**: latest entry snapshot plus the date-bound inputs

mod client;
mod session;

pub use client::{ClientConfig, ClientError, EntriesClient};
pub use session::{HistorySession, RefreshOutcome};

use crate::history::Entry;
use async_trait::async_trait;

/// Anything that can produce the full entry history
#[async_trait]
pub trait EntrySource: Send + Sync {
    /// Short description for logs
    fn name(&self) -> &str;

    /// Fetch every entry, in the order the source returns them
    async fn fetch_entries(&self) -> Result<Vec<Entry>, ClientError>;
}
