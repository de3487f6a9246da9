//! Application state.
//!
//! Shared state for all request handlers.

use dk_site::Site;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Page loader over the per-locale stores.
    pub(crate) site: Site,
    /// Supported locales, in configuration order.
    pub(crate) locales: Vec<String>,
    /// Locale served without URL prefix.
    pub(crate) default_locale: String,
    /// Secret that unlocks preview mode (`None` disables preview).
    pub(crate) preview_secret: Option<String>,
}

impl AppState {
    /// Whether `secret` unlocks preview mode.
    pub(crate) fn preview_allowed(&self, secret: Option<&str>) -> bool {
        match (self.preview_secret.as_deref(), secret) {
            (Some(expected), Some(given)) => !expected.is_empty() && expected == given,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dk_drupal::LocaleStores;
    use dk_site::SiteSettings;

    fn state(secret: Option<&str>) -> AppState {
        AppState {
            site: Site::new(
                LocaleStores::new("en"),
                SiteSettings {
                    frontend_origin: String::new(),
                    image_base: String::new(),
                    title: String::new(),
                    description: String::new(),
                },
            ),
            locales: vec!["en".to_owned()],
            default_locale: "en".to_owned(),
            preview_secret: secret.map(str::to_owned),
        }
    }

    #[test]
    fn test_preview_allowed() {
        let state = state(Some("s3cret"));
        assert!(state.preview_allowed(Some("s3cret")));
        assert!(!state.preview_allowed(Some("wrong")));
        assert!(!state.preview_allowed(None));
    }

    #[test]
    fn test_preview_disabled_without_secret() {
        assert!(!state(None).preview_allowed(Some("")));
        assert!(!state(Some("")).preview_allowed(Some("")));
    }
}
