use crm_core::auth::ErrorBody;

/// Message shown when a failure carries nothing more specific.
pub const FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";

/// Errors from the request layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, body decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("CRM API error ({status}): {raw}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Parsed error body, when the backend sent one.
        body: Option<ErrorBody>,
        /// Raw response body for debugging.
        raw: String,
    },

    /// The request was rejected before it was sent.
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

impl ApiError {
    /// HTTP status of the failed call, if the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Request(e) => e.status().map(|s| s.as_u16()),
            ApiError::Validation(_) => None,
        }
    }

    /// Message suitable for display next to the form that triggered the call.
    pub fn display_message(&self) -> String {
        match self {
            ApiError::Status { body, .. } => body
                .as_ref()
                .and_then(ErrorBody::display_message)
                .unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
            ApiError::Validation(errors) => {
                // Map order is unspecified; pick by field name.
                let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
                fields.sort_by(|a, b| a.0.cmp(&b.0));
                fields
                    .into_iter()
                    .flat_map(|(_, errs)| errs.iter())
                    .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
            }
            ApiError::Request(_) => FALLBACK_MESSAGE.to_string(),
        }
    }
}
