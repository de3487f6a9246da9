//! Request locale handling.

use serde::Serialize;

/// Locale information of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleContext {
    /// Requested locale.
    pub locale: String,
    /// All supported locales.
    pub locales: Vec<String>,
    /// Locale served without URL prefix.
    pub default_locale: String,
}

/// Alternate-language link for search engines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HrefLang {
    /// Language code.
    #[serde(rename = "hrefLang")]
    pub href_lang: String,
    /// Absolute URL of the alternate.
    pub href: String,
}

impl LocaleContext {
    /// Create a locale context.
    #[must_use]
    pub fn new(locale: impl Into<String>, locales: Vec<String>, default_locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            locales,
            default_locale: default_locale.into(),
        }
    }

    /// Whether more than one language is served.
    #[must_use]
    pub fn is_multi_language(&self) -> bool {
        is_multi_language(&self.locales)
    }

    /// One alternate link per supported locale, rooted at `origin`.
    #[must_use]
    pub fn href_lang(&self, origin: &str) -> Vec<HrefLang> {
        self.locales
            .iter()
            .map(|locale| HrefLang {
                href_lang: locale.clone(),
                href: format!("{origin}/{locale}"),
            })
            .collect()
    }

    /// URL prefix for links in the current locale (`""` for the default locale).
    #[must_use]
    pub fn prefix(&self) -> String {
        if self.locale == self.default_locale {
            String::new()
        } else {
            format!("/{}", self.locale)
        }
    }

    /// Split a request path into its locale and the remaining alias.
    ///
    /// The first segment is taken as locale when it names a supported locale;
    /// otherwise the default locale applies and the whole path is the alias.
    /// Leading and trailing slashes are dropped from the alias.
    #[must_use]
    pub fn from_path(path: &str, locales: &[String], default_locale: &str) -> (Self, String) {
        let trimmed = path.trim_matches('/');
        let (first, rest) = trimmed.split_once('/').unwrap_or((trimmed, ""));

        let (locale, alias) = if locales.iter().any(|locale| locale == first) {
            (first, rest)
        } else {
            (default_locale, trimmed)
        };

        (
            Self::new(locale, locales.to_vec(), default_locale),
            alias.trim_matches('/').to_owned(),
        )
    }
}

/// Multi-language is assumed when more than one locale is configured.
#[must_use]
pub fn is_multi_language(locales: &[String]) -> bool {
    locales.len() > 1
}
