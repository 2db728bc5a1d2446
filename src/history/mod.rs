//! Bounded, ordered history of past IP lookups.
//!
//! The history is a small client-side cache: every successful lookup is
//! prepended, the list never grows past ten entries, and the whole list is
//! mirrored into durable storage after each mutation. Entries are selected
//! and deleted by id only.

pub mod models;
pub mod selection;
pub mod store;

pub use models::{HistoryEntry, HistoryError};
pub use selection::SelectionSet;
pub use store::{HistoryStore, HISTORY_KEY, MAX_HISTORY_ENTRIES};
