//! JSON:API resource operations.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::Value;
use tracing::warn;

use super::DrupalClient;
use crate::error::DrupalError;
use crate::jsonapi::{flatten_document, next_link};
use crate::store::ObjectRequest;

/// JSON:API path prefix.
const API_PREFIX: &str = "jsonapi";

/// Upper bound on `links.next` pages followed for one collection read.
const MAX_COLLECTION_PAGES: usize = 20;

/// Characters left unescaped in query keys and values.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b',');

impl DrupalClient {
    /// Fetch a resource (when `request.id` is set) or a whole collection.
    ///
    /// The JSON:API document is flattened before it is returned. Collection
    /// reads follow `links.next` so the result holds every page.
    pub fn get_object(
        &self,
        api_base: &str,
        request: &ObjectRequest<'_>,
    ) -> Result<Value, DrupalError> {
        let bearer = self.bearer_token(request.anon)?;

        let mut url = resource_url(api_base, request.object_name, request.id);
        let query = encode_params(request.params);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }

        let document = self.get_json(&url, &[], bearer.as_deref())?;
        if request.id.is_some() {
            return flatten_document(&document);
        }
        collect_pages(
            request.object_name,
            &document,
            MAX_COLLECTION_PAGES,
            |href| self.get_json(href, &[], bearer.as_deref()),
        )
    }
}

/// Flatten a collection document, appending the resources of every
/// `links.next` page returned by `fetch_page`.
///
/// At most `max_pages` documents are read, the first one included.
pub(crate) fn collect_pages(
    object_name: &str,
    first: &Value,
    max_pages: usize,
    mut fetch_page: impl FnMut(&str) -> Result<Value, DrupalError>,
) -> Result<Value, DrupalError> {
    let mut data = flatten_document(first)?;
    let mut next = next_link(first).map(str::to_owned);
    let mut fetched = 1;

    while let (Some(href), Value::Array(items)) = (next.take(), &mut data) {
        if fetched >= max_pages {
            warn!(object = object_name, pages = fetched, "Collection truncated");
            break;
        }
        let page = fetch_page(&href)?;
        if let Value::Array(more) = flatten_document(&page)? {
            items.extend(more);
        }
        next = next_link(&page).map(str::to_owned);
        fetched += 1;
    }

    Ok(data)
}

/// Build the JSON:API URL for a resource type, and optionally one resource.
///
/// Resource names follow the `{entity}--{bundle}` convention and map to
/// `{api_base}/jsonapi/{entity}/{bundle}`.
pub(crate) fn resource_url(api_base: &str, object_name: &str, id: Option<&str>) -> String {
    let api_base = api_base.trim_end_matches('/');
    let route = match object_name.split_once("--") {
        Some((entity, bundle)) => format!("{entity}/{bundle}"),
        None => object_name.to_owned(),
    };
    match id {
        Some(id) => format!("{api_base}/{API_PREFIX}/{route}/{id}"),
        None => format!("{api_base}/{API_PREFIX}/{route}"),
    }
}

/// Percent-encode a raw `key=value&key=value` parameter string.
pub(crate) fn encode_params(params: &str) -> String {
    params
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            format!(
                "{}={}",
                utf8_percent_encode(key, QUERY_COMPONENT),
                utf8_percent_encode(value, QUERY_COMPONENT)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}
