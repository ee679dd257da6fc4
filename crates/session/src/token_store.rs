//! Persisted bearer token, mirrored into the outbound default header.

use chrono::{Duration, Utc};

use crm_api::CredentialWriter;
use crm_storage::{CookieJar, CookieOptions};

/// Cookie holding the bearer token.
pub const TOKEN_COOKIE: &str = "token";

/// Lifetime of the token cookie from its last write.
pub const TOKEN_TTL_DAYS: i64 = 7;

/// Keeps the persisted token and the request layer's default
/// `Authorization` header consistent.
///
/// Owns the [`CredentialWriter`], so nothing else can change the header.
/// The token is opaque: nothing here inspects or validates it.
pub struct TokenStore {
    jar: Box<dyn CookieJar>,
    writer: CredentialWriter,
    secure: bool,
}

impl TokenStore {
    /// `secure` marks the cookie secure-only; pass
    /// [`ClientConfig::secure_origin`](crm_api::ClientConfig::secure_origin).
    pub fn new(jar: impl CookieJar + 'static, writer: CredentialWriter, secure: bool) -> Self {
        Self {
            jar: Box::new(jar),
            writer,
            secure,
        }
    }

    /// The persisted token, if one exists and has not expired.
    pub fn stored_token(&self) -> Option<String> {
        self.jar.get(TOKEN_COOKIE)
    }

    pub fn cookie_jar(&self) -> &dyn CookieJar {
        self.jar.as_ref()
    }

    /// Persist `token` and make outbound requests carry it, or with `None`
    /// forget it everywhere.
    ///
    /// Persistence failures are logged and otherwise ignored.
    pub fn set_token(&mut self, token: Option<&str>) {
        match token {
            Some(token) => {
                if let Err(e) = self.writer.set_bearer(token) {
                    // Never leave an older credential on the wire.
                    tracing::warn!(error = %e, "Token cannot be sent as a header; clearing it");
                    self.writer.clear();
                }

                let options = CookieOptions {
                    expires_at: Utc::now() + Duration::days(TOKEN_TTL_DAYS),
                    secure: self.secure,
                };
                if let Err(e) = self.jar.set(TOKEN_COOKIE, token, &options) {
                    tracing::warn!(error = %e, "Failed to persist token");
                }
            }
            None => {
                self.writer.clear();
                if let Err(e) = self.jar.remove(TOKEN_COOKIE) {
                    tracing::warn!(error = %e, "Failed to remove persisted token");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crm_api::{ApiClient, ClientConfig};
    use crm_storage::MemoryStorage;

    use super::*;

    fn store(secure: bool) -> (TokenStore, ApiClient) {
        let (api, writer) = ApiClient::new(&ClientConfig::default()).unwrap();
        (TokenStore::new(MemoryStorage::new(), writer, secure), api)
    }

    #[test]
    fn set_token_persists_and_sets_header() {
        let (mut tokens, api) = store(false);

        tokens.set_token(Some("abc123"));

        assert_eq!(tokens.stored_token().as_deref(), Some("abc123"));
        assert_eq!(api.authorization_header().as_deref(), Some("Bearer abc123"));
    }

    #[test]
    fn cookie_expires_after_seven_days() {
        let (mut tokens, _api) = store(false);
        let before = Utc::now();

        tokens.set_token(Some("abc123"));

        let entry = tokens.cookie_jar().get_entry(TOKEN_COOKIE).unwrap();
        let ttl = entry.expires_at - before;
        assert!(ttl >= Duration::days(TOKEN_TTL_DAYS));
        assert!(ttl < Duration::days(TOKEN_TTL_DAYS) + Duration::minutes(1));
    }

    #[test]
    fn secure_flag_follows_origin() {
        let (mut insecure, _a) = store(false);
        insecure.set_token(Some("t"));
        assert!(!insecure.cookie_jar().get_entry(TOKEN_COOKIE).unwrap().secure);

        let (mut secure, _b) = store(true);
        secure.set_token(Some("t"));
        assert!(secure.cookie_jar().get_entry(TOKEN_COOKIE).unwrap().secure);
    }

    #[test]
    fn clearing_removes_cookie_and_header() {
        let (mut tokens, api) = store(false);
        tokens.set_token(Some("abc123"));

        tokens.set_token(None);

        assert_eq!(tokens.stored_token(), None);
        assert_eq!(api.authorization_header(), None);
    }

    #[test]
    fn unsendable_token_clears_previous_header() {
        let (mut tokens, api) = store(false);
        tokens.set_token(Some("old"));

        tokens.set_token(Some("bad\r\ntoken"));

        assert_eq!(api.authorization_header(), None);
        assert_eq!(tokens.stored_token().as_deref(), Some("bad\r\ntoken"));
    }
}
