//! The session store: single owner of the current [`SessionState`].
//!
//! Lifecycle: created loading at startup, hydrated exactly once from
//! persisted storage, replaced wholesale by [`SessionStore::login`] and
//! [`SessionStore::logout`]. Every change is published as one complete
//! snapshot on a `tokio::sync::watch` channel, so an observer can never
//! see a token from one session paired with the user of another.
//!
//! Mutators take `&mut self`; the store has exactly one writer at a time.
//! Nothing here returns an error for expected conditions: storage and
//! parse failures are logged and degrade to an empty or partial session.

use tokio::sync::watch;

use crm_core::{SessionState, User};
use crm_storage::LocalStorage;

use crate::token_store::TokenStore;

/// Local-storage key holding the JSON-encoded identity.
pub const USER_STORAGE_KEY: &str = "user";

pub struct SessionStore {
    state: watch::Sender<SessionState>,
    tokens: TokenStore,
    storage: Box<dyn LocalStorage>,
}

impl SessionStore {
    /// Create the store in the loading state. Call [`hydrate`](Self::hydrate)
    /// once at startup.
    pub fn new(tokens: TokenStore, storage: impl LocalStorage + 'static) -> Self {
        let (state, _) = watch::channel(SessionState::loading());
        Self {
            state,
            tokens,
            storage: Box::new(storage),
        }
    }

    /// Restore the session from persisted storage.
    ///
    /// Runs at most once; later calls are no-ops. Whatever happens, the
    /// session leaves the loading state.
    ///
    /// - Stored token: re-applied (header and a fresh cookie window), and
    ///   the stored identity parsed. An unreadable identity is dropped and
    ///   the session continues authenticated without a profile.
    /// - No stored token: the session is anonymous and any stale stored
    ///   identity is removed.
    pub fn hydrate(&mut self) {
        if !self.state.borrow().is_loading() {
            tracing::debug!("Session already hydrated; ignoring");
            return;
        }

        let next = match self.tokens.stored_token() {
            Some(token) => {
                self.tokens.set_token(Some(&token));
                match self.storage.get_item(USER_STORAGE_KEY).map(|raw| User::from_json(&raw)) {
                    Some(Ok(user)) => {
                        tracing::info!(user_id = %user.id, role = %user.role, "Session restored");
                        SessionState::authenticated(token, user)
                    }
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "Failed to parse stored user; continuing without profile");
                        SessionState::token_only(token)
                    }
                    None => {
                        tracing::info!("Session restored without a stored profile");
                        SessionState::token_only(token)
                    }
                }
            }
            None => {
                if let Err(e) = self.storage.remove_item(USER_STORAGE_KEY) {
                    tracing::warn!(error = %e, "Failed to remove stale stored user");
                }
                tracing::debug!("No stored token; session is anonymous");
                SessionState::anonymous()
            }
        };

        self.publish(next);
    }

    /// Start a session with credentials the backend just issued.
    ///
    /// Afterwards the session is authenticated, `is_admin` reflects
    /// `user.role`, and outbound requests carry `Bearer <token>`.
    pub fn login(&mut self, token: impl Into<String>, user: User) {
        let token = token.into();
        self.tokens.set_token(Some(&token));

        match user.to_json() {
            Ok(json) => {
                if let Err(e) = self.storage.set_item(USER_STORAGE_KEY, &json) {
                    tracing::warn!(error = %e, "Failed to persist user");
                }
            }
            Err(e) => tracing::warn!(error = %e, "Failed to encode user"),
        }

        tracing::info!(user_id = %user.id, role = %user.role, "Logged in");
        self.publish(SessionState::authenticated(token, user));
    }

    /// Start a session from a token the backend issued without a user
    /// record. The session is authenticated but not admin, and any
    /// previously stored identity is removed so it cannot resurface on
    /// the next hydration.
    pub fn login_without_profile(&mut self, token: impl Into<String>) {
        let token = token.into();
        self.tokens.set_token(Some(&token));
        if let Err(e) = self.storage.remove_item(USER_STORAGE_KEY) {
            tracing::warn!(error = %e, "Failed to remove stored user");
        }

        tracing::info!("Logged in without a profile");
        self.publish(SessionState::token_only(token));
    }

    /// End the session and forget every persisted credential. Idempotent.
    pub fn logout(&mut self) {
        self.tokens.set_token(None);
        if let Err(e) = self.storage.remove_item(USER_STORAGE_KEY) {
            tracing::warn!(error = %e, "Failed to remove stored user");
        }

        tracing::info!("Logged out");
        self.publish(SessionState::anonymous());
    }

    /// Replace the snapshot, notifying observers only on an actual change.
    fn publish(&self, next: SessionState) {
        self.state.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
    }

    // ---- read access ----

    /// Copy of the current snapshot.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Observe every future snapshot.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.state.borrow().is_admin()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().token().map(str::to_string)
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user().cloned()
    }

    pub fn token_store(&self) -> &TokenStore {
        &self.tokens
    }

    pub fn local_storage(&self) -> &dyn LocalStorage {
        self.storage.as_ref()
    }
}
