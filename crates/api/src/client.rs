//! HTTP client for the CRM backend.
//!
//! The default `Authorization` header is process-wide state shared by
//! every clone of [`ApiClient`]. It lives in a `tokio::sync::watch`
//! channel: the clients hold receivers and read the current value when
//! they build a request, and the single [`CredentialWriter`] holds the
//! sender. Whoever owns the writer (the token store) is therefore the
//! only code able to change the credentials outbound calls carry.

use reqwest::header::{HeaderMap, HeaderValue, InvalidHeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::watch;

use crm_core::auth::ErrorBody;

use crate::config::ClientConfig;
use crate::error::ApiError;

/// Cloneable HTTP client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    api_url: String,
    authorization: watch::Receiver<Option<HeaderValue>>,
}

/// Sole writer of the default `Authorization` header.
///
/// Not `Clone`: exactly one exists per [`ApiClient`] family.
#[derive(Debug)]
pub struct CredentialWriter {
    authorization: watch::Sender<Option<HeaderValue>>,
}

impl CredentialWriter {
    /// Make every subsequent request carry `Authorization: Bearer <token>`.
    ///
    /// Fails without touching the current header if the token contains
    /// bytes that cannot appear in an HTTP header.
    pub fn set_bearer(&self, token: &str) -> Result<(), InvalidHeaderValue> {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
        value.set_sensitive(true);
        self.authorization.send_replace(Some(value));
        Ok(())
    }

    /// Remove the default header; subsequent requests are anonymous.
    pub fn clear(&self) {
        self.authorization.send_replace(None);
    }
}

impl ApiClient {
    /// Build a client and the writer for its default credentials.
    pub fn new(config: &ClientConfig) -> Result<(Self, CredentialWriter), ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout())
            .build()?;

        let (sender, receiver) = watch::channel(None);

        let api = Self {
            client,
            api_url: config.api_url.clone(),
            authorization: receiver,
        };
        Ok((api, CredentialWriter { authorization: sender }))
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Current value of the default `Authorization` header.
    pub fn authorization_header(&self) -> Option<String> {
        self.authorization
            .borrow()
            .as_ref()
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    }

    /// Start a request to `path` (relative to the base URL) carrying the
    /// current default credentials.
    pub fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.api_url, path.trim_start_matches('/'));
        let builder = self.client.request(method, url);

        // Clone out of the watch guard; it must not be held across an await.
        let authorization = self.authorization.borrow().clone();
        match authorization {
            Some(value) => builder.header(AUTHORIZATION, value),
            None => builder,
        }
    }

    /// `GET` a JSON resource.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.request(Method::GET, path).send().await?;
        Self::parse_response(response).await
    }

    /// `POST` a JSON body and decode a JSON response.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.request(Method::POST, path).json(body).send().await?;
        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. On failure the body
    /// is kept raw and, when it parses, as an [`ErrorBody`].
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let raw = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            let body = serde_json::from_str::<ErrorBody>(&raw).ok();
            tracing::debug!(status = status.as_u16(), "CRM API returned an error status");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
                raw,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
