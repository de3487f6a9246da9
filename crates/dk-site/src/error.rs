//! Error types for page loading.

use dk_drupal::DrupalError;

/// Error raised while resolving, fetching or decoding content.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Backend call failed.
    #[error(transparent)]
    Drupal(#[from] DrupalError),

    /// Backend answered with data that does not match the expected shape.
    #[error("invalid {kind} payload: {source}")]
    Decode {
        /// What was being decoded (e.g. `node--recipe`).
        kind: String,
        /// Underlying deserialization error.
        source: serde_json::Error,
    },

    /// Backend answered without data.
    #[error("empty response for {0}")]
    Empty(String),
}

impl SiteError {
    /// Whether the error means the requested content does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Drupal(err) => err.is_not_found(),
            Self::Empty(_) => true,
            Self::Decode { .. } => false,
        }
    }

    pub(crate) fn decode(kind: &str, source: serde_json::Error) -> Self {
        Self::Decode {
            kind: kind.to_owned(),
            source,
        }
    }
}
