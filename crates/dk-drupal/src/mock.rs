//! Mock content store for testing.
//!
//! Provides [`MockStore`] for unit testing without a Drupal backend.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use crate::error::DrupalError;
use crate::store::{ContentStore, ObjectRequest};
use crate::types::ResolvedPath;

/// An object read recorded by [`MockStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// Resource name that was requested.
    pub object_name: String,
    /// Resource UUID, `None` for collection reads.
    pub id: Option<String>,
    /// Raw query string.
    pub params: String,
    /// Whether the read was anonymous.
    pub anon: bool,
    /// Whether a fresh read was requested.
    pub refresh: bool,
}

/// In-memory content store.
///
/// Use the builder methods to configure path translations and objects.
///
/// # Example
///
/// ```ignore
/// use dk_drupal::{MockStore, ResolvedPath};
///
/// let store = MockStore::new("en")
///     .with_path("about", ResolvedPath::new("node--page", "p1"))
///     .with_object("node--page", Some("p1"), serde_json::json!({"type": "node--page"}));
/// ```
#[derive(Debug)]
pub struct MockStore {
    locale: String,
    api_base: String,
    paths: HashMap<String, ResolvedPath>,
    objects: HashMap<(String, Option<String>), Value>,
    failing: bool,
    requests: RwLock<Vec<RecordedRequest>>,
    endpoints: RwLock<Vec<String>>,
}

impl MockStore {
    /// Create an empty mock store for `locale`.
    #[must_use]
    pub fn new(locale: impl Into<String>) -> Self {
        let locale = locale.into();
        Self {
            api_base: format!("https://cms.test/{locale}"),
            locale,
            paths: HashMap::new(),
            objects: HashMap::new(),
            failing: false,
            requests: RwLock::new(Vec::new()),
            endpoints: RwLock::new(Vec::new()),
        }
    }

    /// Register a path alias translation (leading slash optional).
    #[must_use]
    pub fn with_path(mut self, alias: &str, resolved: ResolvedPath) -> Self {
        self.paths
            .insert(alias.trim_start_matches('/').to_owned(), resolved);
        self
    }

    /// Register an already flattened object.
    #[must_use]
    pub fn with_object(mut self, object_name: &str, id: Option<&str>, value: Value) -> Self {
        self.objects
            .insert((object_name.to_owned(), id.map(str::to_owned)), value);
        self
    }

    /// Make every call fail with a server error.
    #[must_use]
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Object reads performed so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().unwrap().clone()
    }

    /// Translate-path endpoints called so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn translate_endpoints(&self) -> Vec<String> {
        self.endpoints.read().unwrap().clone()
    }

    fn server_error() -> DrupalError {
        DrupalError::HttpResponse {
            status: 500,
            body: "mock failure".to_owned(),
        }
    }

    fn not_found(what: &str) -> DrupalError {
        DrupalError::HttpResponse {
            status: 404,
            body: format!("{what} not found"),
        }
    }
}

impl ContentStore for MockStore {
    fn locale(&self) -> &str {
        &self.locale
    }

    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn translate_path(&self, endpoint: &str, path: &str) -> Result<ResolvedPath, DrupalError> {
        self.endpoints.write().unwrap().push(endpoint.to_owned());
        if self.failing {
            return Err(Self::server_error());
        }
        self.paths
            .get(path.trim_start_matches('/'))
            .cloned()
            .ok_or_else(|| Self::not_found(path))
    }

    fn get_object(&self, request: &ObjectRequest<'_>) -> Result<Value, DrupalError> {
        self.requests.write().unwrap().push(RecordedRequest {
            object_name: request.object_name.to_owned(),
            id: request.id.map(str::to_owned),
            params: request.params.to_owned(),
            anon: request.anon,
            refresh: request.refresh,
        });
        if self.failing {
            return Err(Self::server_error());
        }
        self.objects
            .get(&(request.object_name.to_owned(), request.id.map(str::to_owned)))
            .cloned()
            .ok_or_else(|| Self::not_found(request.object_name))
    }
}
