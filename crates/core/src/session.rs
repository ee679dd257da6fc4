//! The session snapshot read by guards and views.
//!
//! A [`SessionState`] is an immutable value. The owning session store
//! replaces it wholesale on every change, so observers only ever see a
//! complete "before" or "after" state.

use crate::user::User;

/// Who is logged in, with what privilege, and whether startup hydration
/// is still running.
///
/// Invariant: `user` is never `Some` while `token` is `None`. The fields
/// are private so that only the constructors below can build a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    token: Option<String>,
    user: Option<User>,
    is_loading: bool,
}

impl SessionState {
    /// Initial state at process start, before hydration.
    pub fn loading() -> Self {
        Self {
            token: None,
            user: None,
            is_loading: true,
        }
    }

    /// Hydrated state with no credentials.
    pub fn anonymous() -> Self {
        Self {
            token: None,
            user: None,
            is_loading: false,
        }
    }

    /// Hydrated state with a token and a known identity.
    pub fn authenticated(token: impl Into<String>, user: User) -> Self {
        Self {
            token: Some(token.into()),
            user: Some(user),
            is_loading: false,
        }
    }

    /// Hydrated state with a token whose identity could not be recovered.
    pub fn token_only(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            user: None,
            is_loading: false,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// A session is authenticated whenever a token is present, even if the
    /// identity is unknown.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Absent user reads as not admin.
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::loading()
    }
}
