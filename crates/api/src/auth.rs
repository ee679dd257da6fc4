//! Wrappers for the `/auth` endpoints.
//!
//! Both calls validate the request locally first, so obviously incomplete
//! forms never reach the network.

use validator::Validate;

use crm_core::auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

use crate::client::ApiClient;
use crate::error::ApiError;

/// POST /auth/login
pub async fn login(api: &ApiClient, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
    request.validate()?;
    tracing::debug!(email = %request.email, "Submitting login");
    api.post_json("/auth/login", request).await
}

/// POST /auth/register
pub async fn register(
    api: &ApiClient,
    request: &RegisterRequest,
) -> Result<RegisterResponse, ApiError> {
    request.validate()?;
    tracing::debug!(email = %request.email, role = %request.role, "Submitting registration");
    api.post_json("/auth/register", request).await
}
