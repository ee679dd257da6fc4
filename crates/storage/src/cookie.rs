//! Expiring cookie-style entries.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crm_core::types::Timestamp;

use crate::error::StorageError;

/// Attributes applied when writing a cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookieOptions {
    /// Absolute expiry; the entry reads as absent from this instant on.
    pub expires_at: Timestamp,
    /// Only send the cookie over secure transport.
    pub secure: bool,
}

/// A cookie as held by a jar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCookie {
    pub value: String,
    pub expires_at: Timestamp,
    pub secure: bool,
}

impl StoredCookie {
    pub fn new(value: impl Into<String>, options: &CookieOptions) -> Self {
        Self {
            value: value.into(),
            expires_at: options.expires_at,
            secure: options.secure,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// A persistent cookie jar.
///
/// Implementors only need to provide [`get_entry`](CookieJar::get_entry),
/// [`set`](CookieJar::set) and [`remove`](CookieJar::remove); expiry is
/// handled by [`get`](CookieJar::get).
pub trait CookieJar: Send + Sync {
    /// Raw entry lookup, including expired entries.
    fn get_entry(&self, name: &str) -> Option<StoredCookie>;

    fn set(&mut self, name: &str, value: &str, options: &CookieOptions)
        -> Result<(), StorageError>;

    /// Removing a missing cookie is not an error.
    fn remove(&mut self, name: &str) -> Result<(), StorageError>;

    /// Value of a live cookie. Expired entries read as absent.
    fn get(&self, name: &str) -> Option<String> {
        self.get_entry(name)
            .filter(|cookie| !cookie.is_expired())
            .map(|cookie| cookie.value)
    }
}
