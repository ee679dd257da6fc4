//! File-backed stores.
//!
//! Each store is a single JSON object on disk, loaded once when opened and
//! rewritten in full on every mutation. A missing file is an empty store.
//! A file that cannot be parsed is logged and treated as empty; the next
//! write replaces it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cookie::{CookieJar, CookieOptions, StoredCookie};
use crate::error::StorageError;
use crate::local::LocalStorage;

/// File name of the cookie jar inside a data directory.
pub const COOKIE_FILE: &str = "cookies.json";

/// File name of local storage inside a data directory.
pub const LOCAL_STORAGE_FILE: &str = "local_storage.json";

/// A string-keyed map mirrored to a JSON file.
#[derive(Debug)]
struct JsonDocument<V> {
    path: PathBuf,
    entries: BTreeMap<String, V>,
}

impl<V: Serialize + DeserializeOwned> JsonDocument<V> {
    fn open(path: PathBuf) -> Result<Self, StorageError> {
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Discarding unreadable store file");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };
        Ok(Self { path, entries })
    }

    fn flush(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, json).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn insert(&mut self, key: &str, value: V) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Cookie jar
// ---------------------------------------------------------------------------

/// Cookie jar persisted as `cookies.json`.
#[derive(Debug)]
pub struct FileCookieJar {
    doc: JsonDocument<StoredCookie>,
}

impl FileCookieJar {
    /// Open the jar stored in `data_dir`, creating nothing until the first
    /// write.
    pub fn open(data_dir: &Path) -> Result<Self, StorageError> {
        Ok(Self {
            doc: JsonDocument::open(data_dir.join(COOKIE_FILE))?,
        })
    }
}

impl CookieJar for FileCookieJar {
    fn get_entry(&self, name: &str) -> Option<StoredCookie> {
        self.doc.entries.get(name).cloned()
    }

    fn set(
        &mut self,
        name: &str,
        value: &str,
        options: &CookieOptions,
    ) -> Result<(), StorageError> {
        self.doc.insert(name, StoredCookie::new(value, options))
    }

    fn remove(&mut self, name: &str) -> Result<(), StorageError> {
        self.doc.remove(name)
    }
}

// ---------------------------------------------------------------------------
// Local storage
// ---------------------------------------------------------------------------

/// Local storage persisted as `local_storage.json`.
#[derive(Debug)]
pub struct FileLocalStorage {
    doc: JsonDocument<String>,
}

impl FileLocalStorage {
    pub fn open(data_dir: &Path) -> Result<Self, StorageError> {
        Ok(Self {
            doc: JsonDocument::open(data_dir.join(LOCAL_STORAGE_FILE))?,
        })
    }
}

impl LocalStorage for FileLocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.doc.entries.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.doc.insert(key, value.to_string())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.doc.remove(key)
    }
}
