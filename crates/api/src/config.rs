use std::path::PathBuf;
use std::time::Duration;

/// Default backend base URL.
pub const DEFAULT_API_URL: &str = "https://crm-backend-ebpg.onrender.com/api";

/// Default origin the client is served from (Vite dev server).
pub const DEFAULT_APP_ORIGIN: &str = "http://localhost:5173";

/// Default directory for persisted client state.
pub const DEFAULT_DATA_DIR: &str = ".crm";

/// Default HTTP request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every API path is appended to, without a trailing slash.
    pub api_url: String,
    /// Origin the client itself is served from. Decides whether persisted
    /// credentials are marked secure-only.
    pub app_origin: String,
    /// Directory holding the cookie jar and local storage files.
    pub data_dir: PathBuf,
    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                     |
    /// |------------------------|---------------------------------------------|
    /// | `CRM_API_URL`          | `https://crm-backend-ebpg.onrender.com/api` |
    /// | `CRM_APP_ORIGIN`       | `http://localhost:5173`                     |
    /// | `CRM_DATA_DIR`         | `.crm`                                      |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                        |
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = std::env::var("CRM_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        let app_origin =
            std::env::var("CRM_APP_ORIGIN").unwrap_or_else(|_| DEFAULT_APP_ORIGIN.into());
        let data_dir = std::env::var("CRM_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.into());

        let request_timeout_secs = match std::env::var("REQUEST_TIMEOUT_SECS") {
            Ok(value) => value.parse().map_err(|_| ConfigError::Invalid {
                var: "REQUEST_TIMEOUT_SECS",
                expected: "u64",
                value,
            })?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self::new(api_url, app_origin, data_dir, request_timeout_secs))
    }

    pub fn new(
        api_url: impl Into<String>,
        app_origin: impl Into<String>,
        data_dir: impl Into<PathBuf>,
        request_timeout_secs: u64,
    ) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            app_origin: app_origin.into(),
            data_dir: data_dir.into(),
            request_timeout_secs,
        }
    }

    /// Whether the client origin uses secure transport.
    pub fn secure_origin(&self) -> bool {
        self.app_origin
            .get(..8)
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case("https://"))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_API_URL,
            DEFAULT_APP_ORIGIN,
            DEFAULT_DATA_DIR,
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )
    }
}
