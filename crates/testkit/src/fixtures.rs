//! Known identities and storage seeded the way a previous run left it.

use chrono::{Duration, Utc};

use crm_core::{Role, User};
use crm_storage::{CookieJar, CookieOptions, LocalStorage, MemoryStorage};

/// Cookie and local-storage keys the session persists under.
pub const TOKEN_COOKIE: &str = "token";
pub const USER_STORAGE_KEY: &str = "user";

pub const ANN_JSON: &str = r#"{"id":"1","name":"Ann","email":"a@x.com","role":"admin"}"#;

pub fn ann() -> User {
    User {
        id: "1".into(),
        name: "Ann".into(),
        email: "a@x.com".into(),
        role: Role::Admin,
    }
}

pub fn bo() -> User {
    User {
        id: "2".into(),
        name: "Bo".into(),
        email: "bo@x.com".into(),
        role: Role::User,
    }
}

/// Storage holding an optional unexpired token cookie and an optional raw
/// `user` item.
pub fn seeded(token: Option<&str>, user_blob: Option<&str>) -> MemoryStorage {
    let mut storage = MemoryStorage::new();
    if let Some(token) = token {
        let options = CookieOptions {
            expires_at: Utc::now() + Duration::days(1),
            secure: false,
        };
        storage.set(TOKEN_COOKIE, token, &options).unwrap();
    }
    if let Some(blob) = user_blob {
        storage.set_item(USER_STORAGE_KEY, blob).unwrap();
    }
    storage
}
