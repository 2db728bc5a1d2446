//! The bounded, ordered lookup history.
//!
//! The store owns the in-memory list (most recent first) and mirrors every
//! mutation into durable storage under a single key. Persistence is
//! best-effort: a storage failure is logged and the in-memory state stays
//! authoritative for the rest of the process lifetime. Loading fails open,
//! so missing or corrupt stored data yields an empty history rather than an
//! error.

use super::models::{HistoryEntry, HistoryError};
use crate::models::GeoLocation;
use crate::storage::KeyValueStore;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;

/// Maximum number of lookups retained. Older entries beyond this cap are
/// dropped as new ones are prepended.
pub const MAX_HISTORY_ENTRIES: usize = 10;

/// Storage key holding the serialized history list.
pub const HISTORY_KEY: &str = "location_history";

/// Ordered collection of past lookups, most recent first.
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
    last_id: i64,
    storage: Arc<dyn KeyValueStore>,
}

impl HistoryStore {
    /// Loads the persisted history from `storage`.
    ///
    /// A missing key yields an empty store. Malformed stored data is treated
    /// the same way, with a warning logged: history is a cache of past
    /// lookups, losing it is never worth failing startup over.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let entries = match storage.get(HISTORY_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
                Ok(mut entries) => {
                    // The cap holds on load too, in case a previous process
                    // persisted with a larger limit.
                    entries.truncate(MAX_HISTORY_ENTRIES);
                    entries
                }
                Err(err) => {
                    log::warn!("Discarding malformed history data: {}", err);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                log::warn!("Could not read history from storage: {}", err);
                Vec::new()
            }
        };

        let last_id = entries.iter().map(|e| e.id).max().unwrap_or(0);
        Self {
            entries,
            last_id,
            storage,
        }
    }

    /// Records a successful lookup.
    ///
    /// Assigns a fresh monotonic id, stamps the current time, prepends the
    /// entry, truncates to [`MAX_HISTORY_ENTRIES`] and persists the result.
    /// Returns a copy of the entry that was stored.
    pub fn append(&mut self, ip: &str, location: GeoLocation) -> HistoryEntry {
        let id = self.next_id();
        let entry = HistoryEntry::new(id, ip, location);

        self.entries.insert(0, entry.clone());
        self.entries.truncate(MAX_HISTORY_ENTRIES);
        self.persist_best_effort();

        entry
    }

    /// Removes every entry whose id is in `ids`.
    ///
    /// Ids that match nothing are ignored; the relative order of surviving
    /// entries is unchanged. Returns the number of entries removed.
    pub fn delete_by_ids(&mut self, ids: &HashSet<i64>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| !ids.contains(&entry.id));
        let removed = before - self.entries.len();

        if removed > 0 {
            self.persist_best_effort();
        }
        removed
    }

    /// The entries, most recent first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Looks up a single entry by id.
    pub fn get(&self, id: i64) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes the current list into storage.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError` if serialization or the storage write fails.
    pub fn persist(&self) -> Result<(), HistoryError> {
        let serialized = serde_json::to_string(&self.entries)?;
        self.storage.set(HISTORY_KEY, &serialized)?;
        Ok(())
    }

    fn persist_best_effort(&self) {
        if let Err(err) = self.persist() {
            log::warn!("Could not persist history: {}", err);
        }
    }

    /// Next unique id: the current time in milliseconds, bumped past the
    /// previously issued id when two appends land in the same millisecond.
    fn next_id(&mut self) -> i64 {
        let candidate = Utc::now().timestamp_millis();
        let id = candidate.max(self.last_id + 1);
        self.last_id = id;
        id
    }
}
