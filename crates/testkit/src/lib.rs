//! Shared test fixtures for the CRM client crates.
//!
//! Dev-only. Add it under `[dev-dependencies]`:
//!
//! ```toml
//! [dev-dependencies]
//! crm-testkit = { workspace = true }
//! ```
//!
//! - [`backend`] -- an in-process stand-in for the CRM backend.
//! - [`fixtures`] -- known identities and pre-seeded storage.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

pub mod backend;
pub mod fixtures;

pub use backend::{client, observed_authorization, spawn_backend, test_config, PASSWORD};
