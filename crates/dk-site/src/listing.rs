//! Page listing.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SiteError;
use crate::resource::{PAGE, TextField};

/// Path alias of the page listing route.
pub const PAGE_LIST_ALIAS: &str = "pages";

/// Sparse fieldset requested for the page listing.
pub const PAGE_LIST_PARAMS: &str = "fields[node--page]=id,title,body,path,changed";

/// One entry of the page listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    /// UUID.
    pub id: String,
    /// Title.
    pub title: String,
    /// Body summary HTML.
    pub summary: Option<String>,
    /// Path alias, including the leading slash.
    pub alias: Option<String>,
    /// Language of the alias.
    pub langcode: Option<String>,
    /// Last change; `None` when absent or unparseable.
    pub changed: Option<DateTime<FixedOffset>>,
}

#[derive(Deserialize)]
struct RawPage {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    body: Option<TextField>,
    #[serde(default)]
    path: Option<RawPath>,
    #[serde(default)]
    changed: Option<String>,
}

#[derive(Deserialize)]
struct RawPath {
    #[serde(default)]
    alias: Option<String>,
    #[serde(default)]
    langcode: Option<String>,
}

impl From<RawPage> for PageSummary {
    fn from(raw: RawPage) -> Self {
        let (alias, langcode) = raw
            .path
            .map(|path| (path.alias, path.langcode))
            .unwrap_or_default();
        Self {
            id: raw.id,
            title: raw.title,
            summary: raw
                .body
                .and_then(|body| body.summary)
                .filter(|summary| !summary.is_empty()),
            alias,
            langcode,
            changed: raw
                .changed
                .as_deref()
                .and_then(|changed| DateTime::parse_from_rfc3339(changed).ok()),
        }
    }
}

/// Decode a flattened `node--page` collection; `null` decodes to an empty list.
///
/// # Errors
///
/// Returns [`SiteError::Decode`] if the payload is not a list of pages.
pub fn parse_pages(value: Value) -> Result<Vec<PageSummary>, SiteError> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    let raw: Vec<RawPage> = serde_json::from_value(value).map_err(|e| SiteError::decode(PAGE, e))?;
    Ok(raw.into_iter().map(PageSummary::from).collect())
}

/// Sort pages by `changed`, oldest first.
///
/// The sort is stable. Pages without a usable timestamp come first.
pub fn sort_by_changed(pages: &mut [PageSummary]) {
    pages.sort_by_key(|page| page.changed);
}

/// Link to a listed page, or `None` when the page has no alias.
///
/// Multi-language sites prefix the alias with the page language, falling back
/// to the request locale.
#[must_use]
pub fn summary_href(page: &PageSummary, multi_language: bool, locale: &str) -> Option<String> {
    let alias = page.alias.as_deref()?;
    if multi_language {
        let lang = page.langcode.as_deref().unwrap_or(locale);
        Some(format!("/{lang}{alias}"))
    } else {
        Some(alias.to_owned())
    }
}
