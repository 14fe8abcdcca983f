//! History Session
//!
//! Holds the latest entry snapshot and the two date-bound inputs. The view
//! is recomputed from scratch from these on every request.
//!
//! A refresh replaces the snapshot atomically. When refreshes overlap, only
//! the most recently started one may apply its result: each refresh takes a
//! ticket, and a result whose ticket is no longer the newest is dropped.

use crate::history::{DateBounds, DisplayZone, Entry, HistoryView};
use crate::loader::EntrySource;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// What happened to a refresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The snapshot now holds `count` entries
    Loaded { count: usize },
    /// The fetch failed; the snapshot is now empty
    Failed { error: String },
    /// A newer refresh was started meanwhile; this result was discarded
    Superseded,
}

#[derive(Debug, Default)]
struct SessionState {
    entries: Arc<Vec<Entry>>,
    start: String,
    end: String,
}

/// View state of the history page
pub struct HistorySession {
    source: Arc<dyn EntrySource>,
    zone: DisplayZone,
    latest_ticket: AtomicU64,
    state: RwLock<SessionState>,
}

impl HistorySession {
    /// Create an empty session reading from `source`
    pub fn new(source: Arc<dyn EntrySource>, zone: DisplayZone) -> Self {
        Self {
            source,
            zone,
            latest_ticket: AtomicU64::new(0),
            state: RwLock::new(SessionState::default()),
        }
    }

    pub fn zone(&self) -> DisplayZone {
        self.zone
    }

    /// Reload the entry list from the source
    ///
    /// Never returns an error: a failed fetch leaves an empty snapshot.
    pub async fn refresh(&self) -> RefreshOutcome {
        let ticket = self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(ticket, source = self.source.name(), "Refreshing entries");

        let result = self.source.fetch_entries().await;

        let mut state = self.state.write().await;
        if self.latest_ticket.load(Ordering::SeqCst) != ticket {
            tracing::debug!(ticket, "Discarding result of superseded refresh");
            return RefreshOutcome::Superseded;
        }

        match result {
            Ok(entries) => {
                let count = entries.len();
                state.entries = Arc::new(entries);
                tracing::info!(count, "Loaded journal entries");
                RefreshOutcome::Loaded { count }
            }
            Err(e) => {
                tracing::warn!(error = %e, source = self.source.name(), "Failed to load journal entries");
                state.entries = Arc::new(Vec::new());
                RefreshOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    /// Current entry snapshot
    pub async fn entries(&self) -> Arc<Vec<Entry>> {
        Arc::clone(&self.state.read().await.entries)
    }

    /// Set the text of the start-date field
    pub async fn set_start(&self, text: impl Into<String>) {
        self.state.write().await.start = text.into();
    }

    /// Set the text of the end-date field
    pub async fn set_end(&self, text: impl Into<String>) {
        self.state.write().await.end = text.into();
    }

    /// Reset both date fields
    pub async fn clear_bounds(&self) {
        let mut state = self.state.write().await;
        state.start.clear();
        state.end.clear();
    }

    /// Parsed date window
    pub async fn bounds(&self) -> DateBounds {
        let state = self.state.read().await;
        DateBounds::parse(&state.start, &state.end)
    }

    /// Compute the view over the current snapshot and bounds
    pub async fn view(&self) -> HistoryView {
        let (entries, bounds) = {
            let state = self.state.read().await;
            (
                Arc::clone(&state.entries),
                DateBounds::parse(&state.start, &state.end),
            )
        };

        HistoryView::compute(&entries, &bounds, &self.zone)
    }
}
