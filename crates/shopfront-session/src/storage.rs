//! Persisted key-value storage for app-side state.
//!
//! Values are plain strings. The theme is stored as `"light"`/`"dark"`, the
//! auth token verbatim, and the user profile as a JSON document.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::SessionError;

pub const THEME_KEY: &str = "theme";
pub const AUTH_TOKEN_KEY: &str = "authToken";
pub const USER_DATA_KEY: &str = "userData";

/// String key-value store shared by the theme store and auth provider.
pub trait LocalStore: Send + Sync {
    /// Returns the stored value, or `None` if the key was never set.
    ///
    /// # Errors
    ///
    /// Implementations backed by I/O may fail to read.
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;

    /// # Errors
    ///
    /// Implementations backed by I/O may fail to persist.
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;

    /// Removes `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Implementations backed by I/O may fail to persist.
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// Ephemeral store; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(lock(&self.entries).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        lock(&self.entries).insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        lock(&self.entries).remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// Store persisted as a flat JSON object of strings.
///
/// The file is read once on [`FileStore::open`] and rewritten in full on
/// every change. It and its parent directories are created on first write.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Opens the store at `path`; a missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Io`] if the file exists but cannot be read, or
    /// [`SessionError::Corrupt`] if it is not a JSON object of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text).map_err(|source| SessionError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(SessionError::Io { path, source }),
        };

        tracing::debug!(path = %path.display(), keys = entries.len(), "opened local store");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| SessionError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let body = serde_json::to_string_pretty(entries).map_err(|source| SessionError::Encode {
            context: "local store",
            source,
        })?;
        std::fs::write(&self.path, body).map_err(|source| SessionError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl LocalStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(lock(&self.entries).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut entries = lock(&self.entries);
        let mut next = entries.clone();
        next.insert(key.to_owned(), value.to_owned());
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        let mut entries = lock(&self.entries);
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}
