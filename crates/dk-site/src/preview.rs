//! Preview mode.
//!
//! Preview requests read unpublished revisions: they use the preview
//! language's store, authenticated access, and ask JSON:API for a specific
//! resource version.

/// Preview request data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewContext {
    /// Locale whose store serves the preview.
    pub lang: String,
    /// Revision to show (`resourceVersion=id:<rev>`); latest revision when `None`.
    pub resource_version: Option<String>,
}

impl PreviewContext {
    /// Create a preview context for `lang`.
    #[must_use]
    pub fn new(lang: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            resource_version: None,
        }
    }

    /// Pin the preview to a revision.
    #[must_use]
    pub fn with_resource_version(mut self, revision: impl Into<String>) -> Self {
        self.resource_version = Some(revision.into());
        self
    }

    /// Fetch parameters for the preview read, derived from the regular ones.
    #[must_use]
    pub fn params(&self, params: &str) -> String {
        let version = match &self.resource_version {
            Some(revision) => format!("resourceVersion=id:{revision}"),
            None => "resourceVersion=rel:latest-version".to_owned(),
        };
        if params.is_empty() {
            version
        } else {
            format!("{params}&{version}")
        }
    }
}
