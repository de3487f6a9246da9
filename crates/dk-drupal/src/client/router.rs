//! Decoupled router operations.

use tracing::debug;

use super::DrupalClient;
use crate::error::DrupalError;
use crate::types::{ResolvedPath, TranslatePathResponse};

impl DrupalClient {
    /// Translate a path alias into the resource it points at.
    ///
    /// `endpoint` is the full translate-path URL of a locale store, e.g.
    /// `https://cms.example.com/es/router/translate-path`.
    pub fn translate_path(&self, endpoint: &str, path: &str) -> Result<ResolvedPath, DrupalError> {
        let path = normalize_path(path);
        let document = self.get_json(endpoint, &[("path", &path), ("_format", "json")], None)?;
        let response: TranslatePathResponse = serde_json::from_value(document)?;
        let resolved = ResolvedPath::try_from(response)?;

        debug!(
            path = %path,
            resource = %resolved.resource_name,
            uuid = %resolved.uuid,
            "Translated path"
        );
        Ok(resolved)
    }
}

/// Aliases are looked up with a leading slash.
fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("recipes/quiche"), "/recipes/quiche");
        assert_eq!(normalize_path("/about"), "/about");
    }
}
