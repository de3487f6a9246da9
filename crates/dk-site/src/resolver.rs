//! Path alias resolution.

use dk_drupal::{ContentStore, ResolvedPath};

use crate::error::SiteError;

/// Route of the decoupled router translate endpoint, relative to a store's API base.
pub const TRANSLATE_PATH_ROUTE: &str = "router/translate-path";

/// Join URL path segments into an alias.
#[must_use]
pub fn join_segments<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|segment| segment.as_ref())
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Resolve a path alias to the resource type and id it points at.
///
/// # Errors
///
/// Propagates any translate-path failure from the store.
pub fn resolve_path(store: &dyn ContentStore, path: &str) -> Result<ResolvedPath, SiteError> {
    let endpoint = format!("{}/{TRANSLATE_PATH_ROUTE}", store.api_base());
    Ok(store.translate_path(&endpoint, path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dk_drupal::MockStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_join_segments() {
        assert_eq!(join_segments(&["recipes", "quiche"]), "recipes/quiche");
        assert_eq!(join_segments(&["", "about", ""]), "about");
        assert_eq!(join_segments::<&str>(&[]), "");
    }

    #[test]
    fn test_resolve_known_alias() {
        let store = MockStore::new("en")
            .with_path("recipes/quiche", ResolvedPath::new("node--recipe", "r1"));

        let resolved = resolve_path(&store, "recipes/quiche").unwrap();

        assert_eq!(resolved, ResolvedPath::new("node--recipe", "r1"));
        assert_eq!(
            store.translate_endpoints(),
            vec!["https://cms.test/en/router/translate-path".to_owned()]
        );
    }

    #[test]
    fn test_resolve_unknown_alias() {
        let store = MockStore::new("en");
        let err = resolve_path(&store, "missing").unwrap_err();
        assert!(err.is_not_found());
    }
}
