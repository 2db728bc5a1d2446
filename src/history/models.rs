//! Data models for the lookup history.

use crate::models::GeoLocation;
use crate::storage::StorageError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single past IP lookup.
///
/// Entries are immutable once created; the only way one changes is by being
/// removed wholesale, either explicitly or by falling off the end of the
/// capped list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unique identity, monotonically assigned at creation time.
    ///
    /// Derived from the creation timestamp in milliseconds and bumped past
    /// the previously issued id on collision, so id order and insertion
    /// order always coincide. This is the sole identity used for selection
    /// and deletion.
    pub id: i64,

    /// The queried address, exactly as the user entered it.
    pub ip: String,

    /// The geolocation result, passed through unmodified.
    pub location: GeoLocation,

    /// Creation time, serialized as ISO-8601.
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Creates an entry stamped with the current time.
    pub fn new(id: i64, ip: impl Into<String>, location: GeoLocation) -> Self {
        Self {
            id,
            ip: ip.into(),
            location,
            timestamp: Utc::now(),
        }
    }
}

/// Errors that can occur during history persistence.
#[derive(Debug)]
pub enum HistoryError {
    /// The underlying storage operation failed.
    Storage(StorageError),

    /// The history list could not be serialized or deserialized.
    Serialization(serde_json::Error),
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::Storage(err) => write!(f, "History storage error: {}", err),
            HistoryError::Serialization(err) => {
                write!(f, "History serialization error: {}", err)
            }
        }
    }
}

impl std::error::Error for HistoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HistoryError::Storage(err) => Some(err),
            HistoryError::Serialization(err) => Some(err),
        }
    }
}

impl From<StorageError> for HistoryError {
    fn from(err: StorageError) -> Self {
        HistoryError::Storage(err)
    }
}

impl From<serde_json::Error> for HistoryError {
    fn from(err: serde_json::Error) -> Self {
        HistoryError::Serialization(err)
    }
}
