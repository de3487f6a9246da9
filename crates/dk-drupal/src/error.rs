//! Error types for Drupal integration.

/// Error from Drupal API operations.
#[derive(Debug, thiserror::Error)]
pub enum DrupalError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    /// Response was valid JSON but not the expected document shape.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// No store is registered for the requested locale.
    #[error("no store registered for locale '{0}'")]
    UnknownLocale(String),

    /// OAuth token request failed or credentials are missing.
    #[error("OAuth error: {0}")]
    OAuth(String),
}

impl DrupalError {
    /// Whether the backend reported that the resource does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::HttpResponse { status: 404, .. })
    }
}
