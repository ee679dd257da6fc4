//! Domain types and pure access-control logic for the CRM client.
//!
//! Nothing in this crate performs I/O. Persistence lives in `crm-storage`,
//! the request layer in `crm-api`, and the stateful session in
//! `crm-session`; all of them build on the types defined here.
//!
//! - [`session::SessionState`] -- the snapshot every guard reads.
//! - [`guard`] -- the `Authenticated` and `Admin` gates.
//! - [`routes`] -- the navigable view table and the gates each view needs.
//! - [`auth`] -- request/response bodies exchanged with the auth endpoints.

pub mod auth;
pub mod error;
pub mod guard;
pub mod roles;
pub mod routes;
pub mod session;
pub mod types;
pub mod user;

pub use guard::{Gate, GuardDecision, Redirect};
pub use roles::Role;
pub use routes::Route;
pub use session::SessionState;
pub use user::User;
