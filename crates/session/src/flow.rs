//! Sign-in and sign-up flows.
//!
//! Each flow calls the backend and starts the session only when the
//! response carries credentials. On any failure the session is left
//! untouched and the caller gets an [`AuthFlowError`] with a message it
//! can show next to the form.

use crm_api::{auth, ApiClient, ApiError};
use crm_core::auth::{LoginRequest, RegisterRequest};
use crm_core::Route;

use crate::session::SessionStore;

pub const LOGIN_WITHOUT_TOKEN: &str = "Login succeeded but no token returned.";

pub const REGISTER_WITHOUT_TOKEN: &str =
    "Registration successful but login failed. Please try logging in.";

#[derive(Debug, thiserror::Error)]
pub enum AuthFlowError {
    /// The call failed or was rejected by the backend.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The backend answered without issuing a token.
    #[error("{message}")]
    MissingCredentials {
        message: &'static str,
        /// Where to send the user instead, if anywhere.
        redirect: Option<Route>,
    },
}

impl AuthFlowError {
    pub fn display_message(&self) -> String {
        match self {
            AuthFlowError::Api(e) => e.display_message(),
            AuthFlowError::MissingCredentials { message, .. } => (*message).to_string(),
        }
    }

    pub fn redirect(&self) -> Option<&Route> {
        match self {
            AuthFlowError::MissingCredentials { redirect, .. } => redirect.as_ref(),
            AuthFlowError::Api(_) => None,
        }
    }
}

/// Log in and start the session. Returns the route to show next.
///
/// A token issued without a user record starts a session without a
/// profile.
pub async fn sign_in(
    api: &ApiClient,
    session: &mut SessionStore,
    request: &LoginRequest,
) -> Result<Route, AuthFlowError> {
    let response = auth::login(api, request).await.map_err(|e| {
        tracing::warn!(error = %e, "Login failed");
        e
    })?;

    let (token, user) = response
        .credentials()
        .ok_or(AuthFlowError::MissingCredentials {
            message: LOGIN_WITHOUT_TOKEN,
            redirect: None,
        })?;

    match user {
        Some(user) => session.login(token, user),
        None => session.login_without_profile(token),
    }
    Ok(Route::Home)
}

/// Register an account and start the session with it. Returns the route
/// to show next.
///
/// A registration reply without a token, or without the new account's
/// identity, sends the user to the login view rather than leaving them on
/// the form.
pub async fn sign_up(
    api: &ApiClient,
    session: &mut SessionStore,
    request: &RegisterRequest,
) -> Result<Route, AuthFlowError> {
    let response = auth::register(api, request).await.map_err(|e| {
        tracing::warn!(error = %e, "Registration failed");
        e
    })?;

    let (token, user) = response
        .credentials()
        .ok_or(AuthFlowError::MissingCredentials {
            message: REGISTER_WITHOUT_TOKEN,
            redirect: Some(Route::Login),
        })?;

    session.login(token, user);
    Ok(Route::Home)
}
