//! Bodies exchanged with the backend's `/auth` endpoints.
//!
//! The session core does not care how these are transported; it only
//! needs [`LoginResponse::credentials`] / [`RegisterResponse::credentials`]
//! to produce a token and an identity, or nothing.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::roles::Role;
use crate::types::UserId;
use crate::user::User;

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request body for `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// New accounts are regular users unless stated otherwise.
    pub role: Role,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Response body of `POST /auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

impl LoginResponse {
    /// The token to start a session with and the identity that came with
    /// it, if the backend reported success and issued a token.
    ///
    /// A token without a `user` is still a login; the session then runs
    /// without a profile.
    pub fn credentials(&self) -> Option<(String, Option<User>)> {
        let token = issued_token(self.success, self.token.as_deref())?;
        Some((token, self.user.clone()))
    }
}

/// Response body of `POST /auth/register`.
///
/// Unlike login, the identity fields are flattened into the body. They are
/// absent when the backend declines to create a session, so every one of
/// them is optional on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, rename = "_id")]
    pub id: Option<UserId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub token: Option<String>,
}

impl RegisterResponse {
    /// Token and identity of the new account. Requires success, a token,
    /// and the complete identity.
    pub fn credentials(&self) -> Option<(String, User)> {
        let token = issued_token(self.success, self.token.as_deref())?;
        let user = User {
            id: self.id.clone()?,
            name: self.name.clone()?,
            email: self.email.clone()?,
            role: self.role?,
        };
        Some((token, user))
    }
}

fn issued_token(success: bool, token: Option<&str>) -> Option<String> {
    match token {
        Some(token) if success && !token.is_empty() => Some(token.to_string()),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A single field-level complaint from the backend's request validator.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub param: String,
    #[serde(default)]
    pub location: String,
}

/// Error body returned by the backend on non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

impl ErrorBody {
    /// Human-readable message: the top-level `message` when present,
    /// otherwise the field messages joined by `", "`.
    pub fn display_message(&self) -> Option<String> {
        if let Some(message) = self.message.as_deref().filter(|m| !m.is_empty()) {
            return Some(message.to_string());
        }
        if self.errors.is_empty() {
            return None;
        }
        Some(
            self.errors
                .iter()
                .map(|e| e.msg.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}
