//! Content store trait and the HTTP-backed implementation.
//!
//! A store is a per-locale view of the Drupal backend: it knows the locale's
//! API base and answers path translations and object reads against it.

use std::sync::Arc;

use serde_json::Value;

use crate::client::DrupalClient;
use crate::error::DrupalError;
use crate::types::ResolvedPath;

/// Parameters of a single object read.
#[derive(Debug, Clone, Copy)]
pub struct ObjectRequest<'a> {
    /// JSON:API resource name (e.g. `node--page`, `menu_items--main`).
    pub object_name: &'a str,
    /// Resource UUID; `None` reads the whole collection.
    pub id: Option<&'a str>,
    /// Raw query string (e.g. `include=field_media_image`).
    pub params: &'a str,
    /// Read without credentials.
    pub anon: bool,
    /// Bypass cached copies. [`DrupalStore`] never caches, so its reads are
    /// always fresh.
    pub refresh: bool,
}

impl<'a> ObjectRequest<'a> {
    /// Anonymous read of a whole collection.
    #[must_use]
    pub fn collection(object_name: &'a str, params: &'a str) -> Self {
        Self {
            object_name,
            id: None,
            params,
            anon: true,
            refresh: false,
        }
    }

    /// Anonymous read of one resource.
    #[must_use]
    pub fn resource(object_name: &'a str, id: &'a str, params: &'a str) -> Self {
        Self {
            object_name,
            id: Some(id),
            params,
            anon: true,
            refresh: false,
        }
    }

    /// Switch between anonymous and authenticated access.
    #[must_use]
    pub fn with_anon(mut self, anon: bool) -> Self {
        self.anon = anon;
        self
    }

    /// Ask for a fresh read.
    #[must_use]
    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }
}

/// Read access to one locale of the Drupal backend.
///
/// Every call performs a fresh backend read; nothing is cached.
pub trait ContentStore: Send + Sync {
    /// Locale this store serves.
    fn locale(&self) -> &str;

    /// API base URL for this locale (no trailing slash).
    fn api_base(&self) -> &str;

    /// Translate a path alias using the router endpoint at `endpoint`.
    fn translate_path(&self, endpoint: &str, path: &str) -> Result<ResolvedPath, DrupalError>;

    /// Read a flattened resource or collection.
    ///
    /// Returns `Value::Null` when the backend reports no data.
    fn get_object(&self, request: &ObjectRequest<'_>) -> Result<Value, DrupalError>;
}

/// Store backed by the Drupal HTTP API.
pub struct DrupalStore {
    client: Arc<DrupalClient>,
    locale: String,
    api_base: String,
}

impl DrupalStore {
    /// Create a store for `locale` rooted at `api_base`.
    #[must_use]
    pub fn new(client: Arc<DrupalClient>, locale: impl Into<String>, api_base: String) -> Self {
        Self {
            client,
            locale: locale.into(),
            api_base: api_base.trim_end_matches('/').to_owned(),
        }
    }
}

impl ContentStore for DrupalStore {
    fn locale(&self) -> &str {
        &self.locale
    }

    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn translate_path(&self, endpoint: &str, path: &str) -> Result<ResolvedPath, DrupalError> {
        self.client.translate_path(endpoint, path)
    }

    fn get_object(&self, request: &ObjectRequest<'_>) -> Result<Value, DrupalError> {
        self.client.get_object(&self.api_base, request)
    }
}
