//! Debounced search session.
//!
//! Each call waits out the debounce window and then searches, unless a newer
//! call arrived in the meantime. A search that finishes after a newer call
//! started is discarded rather than returned.

use crate::palette::Palette;
use crate::types::SearchResult;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

pub struct SearchSession {
    palette: Arc<Palette>,
    debounce: Duration,
    generation: AtomicU64,
}

impl SearchSession {
    /// A session using the palette's configured debounce.
    pub fn new(palette: Arc<Palette>) -> Self {
        let debounce = Duration::from_millis(palette.config().search.debounce_ms);
        Self::with_debounce(palette, debounce)
    }

    pub fn with_debounce(palette: Arc<Palette>, debounce: Duration) -> Self {
        Self {
            palette,
            debounce,
            generation: AtomicU64::new(0),
        }
    }

    /// Results for `query`, or `None` when a newer query superseded it.
    pub async fn search(&self, query: &str) -> Option<Vec<SearchResult>> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if !self.debounce.is_zero() {
            tokio::time::sleep(self.debounce).await;
        }
        if self.is_stale(generation) {
            debug!(query = %query, "Query superseded during debounce");
            return None;
        }

        let results = self.palette.search(query).await;
        if self.is_stale(generation) {
            debug!(query = %query, results = results.len(), "Discarding stale results");
            return None;
        }
        Some(results)
    }

    /// Drop whatever is in flight; pending calls return `None`.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn palette(&self) -> &Arc<Palette> {
        &self.palette
    }

    fn is_stale(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != generation
    }
}
