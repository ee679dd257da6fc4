//! Client-side persisted state.
//!
//! Two stores survive process restarts:
//!
//! - a [`CookieJar`] holding expiring, optionally secure-only entries
//!   (the authentication token lives here);
//! - a [`LocalStorage`] holding plain string items (the cached identity).
//!
//! [`MemoryStorage`] implements both for tests and throwaway sessions;
//! [`FileCookieJar`] and [`FileLocalStorage`] write JSON documents under a
//! data directory.

pub mod cookie;
pub mod error;
pub mod file;
pub mod local;
pub mod memory;

pub use cookie::{CookieJar, CookieOptions, StoredCookie};
pub use error::StorageError;
pub use file::{FileCookieJar, FileLocalStorage};
pub use local::LocalStorage;
pub use memory::MemoryStorage;
