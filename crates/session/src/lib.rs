//! Client session lifecycle and access control.
//!
//! This crate owns the single source of truth for "who is logged in, with
//! what privilege":
//!
//! - [`TokenStore`] -- persists the bearer token and keeps the request
//!   layer's default `Authorization` header in step with it.
//! - [`SessionStore`] -- the in-memory session, hydrated once at startup
//!   and replaced wholesale on login and logout. Observers subscribe to
//!   whole [`SessionState`](crm_core::SessionState) snapshots.
//! - [`flow`] -- sign-in and sign-up: call the backend, then start the
//!   session only on success.
//! - [`Navigator`] -- history-keeping router glue that applies guard
//!   decisions.

pub mod flow;
pub mod navigator;
pub mod session;
pub mod token_store;

pub use flow::AuthFlowError;
pub use navigator::{Navigator, View};
pub use session::SessionStore;
pub use token_store::TokenStore;
