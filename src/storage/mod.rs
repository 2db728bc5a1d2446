//! Durable key-value storage for session and history data.
//!
//! The core never talks to a concrete storage technology. Everything that
//! must survive a restart (the credential token, the serialized user
//! profile, the serialized lookup history) goes through the [`KeyValueStore`]
//! trait, which models a handful of independent string-keyed slots.
//!
//! Two implementations are provided:
//!
//! - [`FileStore`]: one file per key under a data directory, with atomic
//!   replacement on write so a crash never leaves a half-written value.
//! - [`MemoryStore`]: a process-local map, used in tests and when running
//!   without a data directory.
//!
//! Absence of a key is a normal, non-error condition everywhere.

use std::collections::HashMap;
use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

/// Errors that can occur during storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// Underlying file I/O failed.
    ///
    /// Contains the originating I/O error for diagnostics.
    Io(std::io::Error),

    /// No usable data directory could be determined.
    ///
    /// Raised when neither `HOME` nor `USERPROFILE` is set and no explicit
    /// directory was configured.
    NoDataDir,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(err) => write!(f, "Storage I/O error: {}", err),
            StorageError::NoDataDir => write!(f, "Could not determine a data directory"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(err) => Some(err),
            StorageError::NoDataDir => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err)
    }
}

/// A string-keyed slot store with independent keys.
///
/// Values are opaque strings; serialization of structured data is the
/// caller's concern. Implementations must treat a missing key as `Ok(None)`
/// on `get` and as success on `remove`.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes the value stored under `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// File-backed store: one file per key under a data directory.
///
/// Writes go to a temporary file first and are renamed into place, so a
/// value is always either the old or the new content, never a torn write.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
        Ok(Self { dir })
    }

    /// Creates a store under the platform default data directory.
    ///
    /// Resolves to `~/.config/iptrack` on Unix-like systems, or the
    /// equivalent under `%USERPROFILE%\AppData\Roaming` on Windows.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NoDataDir` if no home directory can be
    /// determined, or `StorageError::Io` if the directory cannot be created.
    pub fn open_default() -> Result<Self, StorageError> {
        let config_dir = if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home).join(".config")
        } else if let Some(user_profile) = std::env::var_os("USERPROFILE") {
            PathBuf::from(user_profile).join("AppData").join("Roaming")
        } else {
            return Err(StorageError::NoDataDir);
        };

        Self::new(config_dir.join("iptrack"))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&path)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);

        // Write to a temporary file first, then atomically replace.
        let temp_path = path.with_extension("tmp");
        let mut temp_file = File::create(&temp_path)?;
        temp_file.write_all(value.as_bytes())?;
        temp_file.flush()?;
        drop(temp_file);

        fs::rename(&temp_path, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

/// In-memory store for tests and storage-less runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.remove(key);
        Ok(())
    }
}
