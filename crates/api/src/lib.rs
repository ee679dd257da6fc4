//! Outbound request layer for the CRM backend.
//!
//! - [`ApiClient`] -- cloneable HTTP client; every request carries the
//!   current default `Authorization` header.
//! - [`CredentialWriter`] -- the single writer of that header.
//! - [`auth`] -- typed wrappers around the `/auth` endpoints.
//! - [`ClientConfig`] -- environment-driven configuration.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;

pub use client::{ApiClient, CredentialWriter};
pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
