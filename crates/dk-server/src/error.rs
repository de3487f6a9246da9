//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Content could not be loaded; carries the rendered not-found page.
    #[error("Page not found: {path}")]
    NotFound {
        /// Requested path.
        path: String,
        /// Rendered not-found page.
        html: String,
    },

    /// The blocking render task panicked or was cancelled.
    #[error("Render task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound { html, .. } => (StatusCode::NOT_FOUND, Html(html)).into_response(),
            Self::Join(e) => {
                tracing::error!(error = %e, "Render task failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
