//! Route loaders.
//!
//! A loader gathers everything one page needs from the backend. Loaders never
//! fail: every error is logged and turned into [`PageOutcome::NotFound`].

use dk_drupal::{ContentStore, LocaleStores, ObjectRequest};

use crate::dispatch::{ContentProps, dispatch};
use crate::error::SiteError;
use crate::fetcher::{fetch_footer_menu, fetch_resource};
use crate::listing::{PAGE_LIST_PARAMS, PageSummary, parse_pages, sort_by_changed};
use crate::locale::{HrefLang, LocaleContext};
use crate::menu::MenuItem;
use crate::preview::PreviewContext;
use crate::resolver::{join_segments, resolve_path};
use crate::resource::PAGE;

/// Site-wide rendering settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSettings {
    /// Public origin used for alternate-language links (no trailing slash).
    pub frontend_origin: String,
    /// Prefix for image URLs.
    pub image_base: String,
    /// Document title.
    pub title: String,
    /// Meta description.
    pub description: String,
}

/// Result of a route loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome<T> {
    /// Data for rendering the page.
    Found(Box<T>),
    /// Respond with "not found".
    NotFound,
}

impl<T> PageOutcome<T> {
    /// The loaded data, if any.
    #[must_use]
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(data) => Some(*data),
            Self::NotFound => None,
        }
    }

    /// Whether the loader failed.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// Data of a page reached through a path alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasPage {
    /// Resource type the alias resolved to.
    pub resource_name: String,
    /// Template props.
    pub props: ContentProps,
    /// Alternate-language links.
    pub href_lang: Vec<HrefLang>,
    /// Footer menu.
    pub footer_menu: Vec<MenuItem>,
    /// Whether the page was loaded in preview mode.
    pub preview: bool,
    /// Locale of the request.
    pub locale: LocaleContext,
}

/// Data of the page listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageList {
    /// Pages, oldest change first.
    pub pages: Vec<PageSummary>,
    /// Footer menu.
    pub footer_menu: Vec<MenuItem>,
    /// Alternate-language links.
    pub href_lang: Vec<HrefLang>,
    /// Whether links carry a language prefix.
    pub multi_language: bool,
    /// Locale of the request.
    pub locale: LocaleContext,
}

/// Entry point for loading pages.
pub struct Site {
    stores: LocaleStores,
    settings: SiteSettings,
}

impl Site {
    /// Create a site over the given locale stores.
    #[must_use]
    pub fn new(stores: LocaleStores, settings: SiteSettings) -> Self {
        Self { stores, settings }
    }

    /// Rendering settings.
    #[must_use]
    pub fn settings(&self) -> &SiteSettings {
        &self.settings
    }

    /// Locale stores.
    #[must_use]
    pub fn stores(&self) -> &LocaleStores {
        &self.stores
    }

    /// Load the page behind a path alias.
    ///
    /// In preview mode the preview language's store is used instead of the
    /// request locale's.
    pub fn load_alias_page<S: AsRef<str>>(
        &self,
        locale: &LocaleContext,
        segments: &[S],
        preview: Option<&PreviewContext>,
    ) -> PageOutcome<AliasPage> {
        let path = join_segments(segments);
        match self.try_load_alias_page(locale, &path, preview) {
            Ok(page) => PageOutcome::Found(Box::new(page)),
            Err(err) => {
                log_failure(&err, &path);
                PageOutcome::NotFound
            }
        }
    }

    fn try_load_alias_page(
        &self,
        locale: &LocaleContext,
        path: &str,
        preview: Option<&PreviewContext>,
    ) -> Result<AliasPage, SiteError> {
        let lang = preview.map_or(locale.locale.as_str(), |preview| preview.lang.as_str());
        let store = self.stores.get(lang)?;

        let resolved = resolve_path(store, path)?;
        tracing::debug!(
            path,
            resource = %resolved.resource_name,
            uuid = %resolved.uuid,
            "Resolved path"
        );

        let resource = fetch_resource(store, &resolved, preview)?;
        let footer_menu = fetch_footer_menu(store)?;

        Ok(AliasPage {
            props: dispatch(&resource, &self.settings.image_base),
            resource_name: resolved.resource_name,
            href_lang: locale.href_lang(&self.settings.frontend_origin),
            footer_menu,
            preview: preview.is_some(),
            locale: locale.clone(),
        })
    }

    /// Load the page listing for a locale.
    pub fn load_page_list(&self, locale: &LocaleContext) -> PageOutcome<PageList> {
        match self.try_load_page_list(locale) {
            Ok(list) => PageOutcome::Found(Box::new(list)),
            Err(err) => {
                log_failure(&err, "pages");
                PageOutcome::NotFound
            }
        }
    }

    fn try_load_page_list(&self, locale: &LocaleContext) -> Result<PageList, SiteError> {
        let store = self.stores.get(&locale.locale)?;

        let mut pages = fetch_pages(store)?;
        sort_by_changed(&mut pages);
        let footer_menu = fetch_footer_menu(store)?;

        Ok(PageList {
            pages,
            footer_menu,
            href_lang: locale.href_lang(&self.settings.frontend_origin),
            multi_language: locale.is_multi_language(),
            locale: locale.clone(),
        })
    }
}

fn fetch_pages(store: &dyn ContentStore) -> Result<Vec<PageSummary>, SiteError> {
    let request = ObjectRequest::collection(PAGE, PAGE_LIST_PARAMS).with_refresh(true);
    parse_pages(store.get_object(&request)?)
}

fn log_failure(err: &SiteError, path: &str) {
    if err.is_not_found() {
        tracing::warn!(path, error = %err, "Content not found");
    } else {
        tracing::error!(path, error = %err, "Failed to fetch content");
    }
}
