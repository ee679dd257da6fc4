//! Integration tests for the file-backed cookie jar and local storage.
//!
//! Verifies that entries survive reopening (a process restart), that
//! removals are persisted, and that corrupt files degrade to empty stores.

use chrono::{Duration, Utc};
use crm_storage::file::{COOKIE_FILE, LOCAL_STORAGE_FILE};
use crm_storage::{CookieJar, CookieOptions, FileCookieJar, FileLocalStorage, LocalStorage};

fn week() -> CookieOptions {
    CookieOptions {
        expires_at: Utc::now() + Duration::days(7),
        secure: true,
    }
}

// ---------------------------------------------------------------------------
// Cookie jar
// ---------------------------------------------------------------------------

/// A cookie written by one jar is visible to a jar opened later on the
/// same directory, with its attributes intact.
#[test]
fn cookie_survives_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");

    let mut jar = FileCookieJar::open(dir.path()).expect("open should succeed");
    jar.set("token", "abc123", &week()).expect("set should succeed");
    drop(jar);

    let jar = FileCookieJar::open(dir.path()).expect("reopen should succeed");
    assert_eq!(jar.get("token").as_deref(), Some("abc123"));
    let entry = jar.get_entry("token").expect("entry present");
    assert!(entry.secure, "secure flag must be persisted");
}

/// Removing a cookie is persisted.
#[test]
fn cookie_removal_survives_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");

    let mut jar = FileCookieJar::open(dir.path()).expect("open");
    jar.set("token", "abc123", &week()).expect("set");
    jar.remove("token").expect("remove");
    drop(jar);

    let jar = FileCookieJar::open(dir.path()).expect("reopen");
    assert_eq!(jar.get("token"), None);
}

/// Expired cookies read as absent after a reopen.
#[test]
fn expired_cookie_is_absent_after_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");

    let mut jar = FileCookieJar::open(dir.path()).expect("open");
    let expired = CookieOptions {
        expires_at: Utc::now() - Duration::hours(1),
        secure: false,
    };
    jar.set("token", "old", &expired).expect("set");
    drop(jar);

    let jar = FileCookieJar::open(dir.path()).expect("reopen");
    assert_eq!(jar.get("token"), None);
}

/// A corrupt cookie file opens as an empty jar instead of failing.
#[test]
fn corrupt_cookie_file_opens_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join(COOKIE_FILE), "{{ definitely not json").expect("write");

    let mut jar = FileCookieJar::open(dir.path()).expect("corrupt file must not fail open");
    assert_eq!(jar.get("token"), None);

    jar.set("token", "fresh", &week()).expect("set replaces corrupt file");
    let jar = FileCookieJar::open(dir.path()).expect("reopen");
    assert_eq!(jar.get("token").as_deref(), Some("fresh"));
}

/// The data directory is created on first write.
#[test]
fn first_write_creates_data_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("profile").join("crm");

    let mut jar = FileCookieJar::open(&nested).expect("open on missing dir");
    jar.set("token", "abc", &week()).expect("set");

    assert!(nested.join(COOKIE_FILE).exists());
}

// ---------------------------------------------------------------------------
// Local storage
// ---------------------------------------------------------------------------

/// Items survive reopening, and removals persist.
#[test]
fn local_items_survive_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");

    let mut storage = FileLocalStorage::open(dir.path()).expect("open");
    storage
        .set_item("user", r#"{"id":"1"}"#)
        .expect("set_item");
    storage.set_item("theme", "dark").expect("set_item");
    storage.remove_item("theme").expect("remove_item");
    drop(storage);

    let storage = FileLocalStorage::open(dir.path()).expect("reopen");
    assert_eq!(storage.get_item("user").as_deref(), Some(r#"{"id":"1"}"#));
    assert_eq!(storage.get_item("theme"), None);
}

/// Removing a missing item is a no-op and writes nothing.
#[test]
fn removing_missing_item_writes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");

    let mut storage = FileLocalStorage::open(dir.path()).expect("open");
    storage.remove_item("user").expect("remove_item");

    assert!(!dir.path().join(LOCAL_STORAGE_FILE).exists());
}
