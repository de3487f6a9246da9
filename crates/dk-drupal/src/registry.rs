//! Process-wide locale to store mapping.

use std::collections::HashMap;
use std::sync::Arc;

use crate::client::DrupalClient;
use crate::error::DrupalError;
use crate::store::{ContentStore, DrupalStore};

/// Read-only registry of one content store per supported locale.
pub struct LocaleStores {
    default_locale: String,
    stores: HashMap<String, Arc<dyn ContentStore>>,
}

impl LocaleStores {
    /// Create an empty registry.
    #[must_use]
    pub fn new(default_locale: impl Into<String>) -> Self {
        Self {
            default_locale: default_locale.into(),
            stores: HashMap::new(),
        }
    }

    /// Build HTTP stores for every supported locale sharing one client.
    #[must_use]
    pub fn from_client(
        client: &Arc<DrupalClient>,
        default_locale: &str,
        supported: &[String],
    ) -> Self {
        supported.iter().fold(Self::new(default_locale), |stores, locale| {
            let api_base = locale_api_base(client.base_url(), locale, default_locale);
            let store = DrupalStore::new(Arc::clone(client), locale.as_str(), api_base);
            stores.with_store(locale.as_str(), Arc::new(store))
        })
    }

    /// Register a store for `locale`.
    #[must_use]
    pub fn with_store(mut self, locale: impl Into<String>, store: Arc<dyn ContentStore>) -> Self {
        self.stores.insert(locale.into(), store);
        self
    }

    /// Locale served without a URL prefix.
    #[must_use]
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Look up the store for `locale`.
    ///
    /// # Errors
    ///
    /// Returns [`DrupalError::UnknownLocale`] when no store is registered.
    pub fn get(&self, locale: &str) -> Result<&dyn ContentStore, DrupalError> {
        self.stores
            .get(locale)
            .map(|store| &**store)
            .ok_or_else(|| DrupalError::UnknownLocale(locale.to_owned()))
    }
}

/// API base for a locale: the default locale is served at the backend root,
/// every other locale under `/{locale}`.
#[must_use]
pub fn locale_api_base(base_url: &str, locale: &str, default_locale: &str) -> String {
    let base_url = base_url.trim_end_matches('/');
    if locale == default_locale {
        base_url.to_owned()
    } else {
        format!("{base_url}/{locale}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dk_config::DrupalConfig;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_locale_api_base_default() {
        assert_eq!(
            locale_api_base("https://cms.example.com/", "en", "en"),
            "https://cms.example.com"
        );
    }

    #[test]
    fn test_locale_api_base_prefixed() {
        assert_eq!(
            locale_api_base("https://cms.example.com", "es", "en"),
            "https://cms.example.com/es"
        );
    }

    #[test]
    fn test_from_client_registers_every_locale() {
        let client = Arc::new(DrupalClient::from_config(&DrupalConfig::new(
            "https://cms.example.com",
        )));
        let stores = LocaleStores::from_client(
            &client,
            "en",
            &["en".to_owned(), "es".to_owned()],
        );

        assert_eq!(stores.default_locale(), "en");
        assert_eq!(stores.get("en").unwrap().api_base(), "https://cms.example.com");
        assert_eq!(stores.get("es").unwrap().api_base(), "https://cms.example.com/es");
        assert_eq!(stores.get("es").unwrap().locale(), "es");
    }

    #[test]
    fn test_unknown_locale() {
        let stores = LocaleStores::new("en");
        let err = stores.get("fr").err().unwrap();
        assert!(matches!(err, DrupalError::UnknownLocale(ref locale) if locale == "fr"));
    }
}
