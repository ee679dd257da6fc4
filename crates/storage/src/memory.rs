use std::collections::HashMap;

use crate::cookie::{CookieJar, CookieOptions, StoredCookie};
use crate::error::StorageError;
use crate::local::LocalStorage;

/// Volatile storage backing both a cookie jar and local storage.
///
/// Nothing survives the process; used in tests and for sessions that
/// should not touch the disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    cookies: HashMap<String, StoredCookie>,
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CookieJar for MemoryStorage {
    fn get_entry(&self, name: &str) -> Option<StoredCookie> {
        self.cookies.get(name).cloned()
    }

    fn set(
        &mut self,
        name: &str,
        value: &str,
        options: &CookieOptions,
    ) -> Result<(), StorageError> {
        self.cookies
            .insert(name.to_string(), StoredCookie::new(value, options));
        Ok(())
    }

    fn remove(&mut self, name: &str) -> Result<(), StorageError> {
        self.cookies.remove(name);
        Ok(())
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}
