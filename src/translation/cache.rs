/*!
 * Translation caching functionality.
 *
 * Entries are keyed by the exact source text and hold a shared handle to
 * the lookup itself rather than its result. A request that arrives while the
 * lookup is still running awaits the same handle instead of starting a
 * second backend round trip.
 */

use std::collections::HashMap;
use std::sync::Arc;
use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use log::debug;

/// Result of one backend lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The backend produced a translation
    Translated(String),
    /// Token or translate call failed; details were logged when it happened
    Failed,
}

/// A lookup that any number of callers can await
pub type SharedLookup = Shared<BoxFuture<'static, LookupOutcome>>;

/// Snapshot of cache counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Requests served by an existing entry, pending or resolved
    pub hits: usize,
    /// Requests that started a new lookup
    pub misses: usize,
    /// Entries currently stored
    pub entries: usize,
    /// Entries whose lookup has not resolved yet
    pub pending: usize,
}

impl CacheStats {
    /// Fraction of requests served from the cache
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 {
            self.hits as f64 / total as f64
        } else {
            0.0
        }
    }
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<String, SharedLookup>,
    hits: usize,
    misses: usize,
}

/// Process-lifetime memo of translation lookups
#[derive(Clone, Default)]
pub struct TranslationCache {
    state: Arc<Mutex<CacheState>>,
}

impl TranslationCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the lookup registered for `source_text`, registering the one
    /// built by `start` if there is none yet.
    ///
    /// The boolean is `true` when an existing entry was reused.
    pub fn get_or_start<F>(&self, source_text: &str, start: F) -> (SharedLookup, bool)
    where
        F: FnOnce() -> BoxFuture<'static, LookupOutcome>,
    {
        let mut state = self.state.lock();

        if let Some(existing) = state.entries.get(source_text) {
            let lookup = existing.clone();
            state.hits += 1;
            debug!("Cache hit for '{}'", truncate_text(source_text, 30));
            return (lookup, true);
        }

        let lookup = start().shared();
        state.entries.insert(source_text.to_string(), lookup.clone());
        state.misses += 1;
        debug!("Cache miss for '{}', lookup registered", truncate_text(source_text, 30));
        (lookup, false)
    }

    /// Resolved outcome for `source_text`, if its lookup has finished
    pub fn peek(&self, source_text: &str) -> Option<LookupOutcome> {
        let state = self.state.lock();
        state.entries.get(source_text).and_then(|lookup| lookup.peek().cloned())
    }

    /// Remove the entry for `source_text` only if it is still `lookup`
    pub fn remove_if_same(&self, source_text: &str, lookup: &SharedLookup) -> bool {
        let mut state = self.state.lock();
        let same = state.entries
            .get(source_text)
            .is_some_and(|current| Shared::ptr_eq(current, lookup));

        if same {
            state.entries.remove(source_text);
            debug!("Dropped cache entry for '{}'", truncate_text(source_text, 30));
        }
        same
    }

    /// Whether any entry, pending or resolved, exists for `source_text`
    pub fn contains(&self, source_text: &str) -> bool {
        self.state.lock().entries.contains_key(source_text)
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let state = self.state.lock();
        CacheStats {
            hits: state.hits,
            misses: state.misses,
            entries: state.entries.len(),
            pending: state.entries.values().filter(|lookup| lookup.peek().is_none()).count(),
        }
    }

    /// Get the number of entries in the cache
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }
}

/// Truncate text to at most `max_chars` characters with an ellipsis
pub(crate) fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
