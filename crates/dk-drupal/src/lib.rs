//! Drupal integration for dk.
//!
//! This crate provides:
//! - [`DrupalClient`]: sync HTTP client for the decoupled router and JSON:API
//! - [`ContentStore`]: per-locale read access, implemented by [`DrupalStore`]
//! - [`LocaleStores`]: the process-wide locale to store registry
//! - [`jsonapi`]: flattening of JSON:API documents into plain objects
//! - [`MockStore`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use dk_config::DrupalConfig;
//! use dk_drupal::{DrupalClient, LocaleStores, ObjectRequest};
//!
//! let client = Arc::new(DrupalClient::from_config(&DrupalConfig::new("https://cms.example.com")));
//! let stores = LocaleStores::from_client(&client, "en", &["en".to_owned()]);
//! let store = stores.get("en")?;
//! let pages = store.get_object(&ObjectRequest::collection("node--page", ""))?;
//! ```

mod client;
mod error;
pub mod jsonapi;
#[cfg(feature = "mock")]
mod mock;
mod registry;
mod store;
mod types;

pub use client::DrupalClient;
pub use error::DrupalError;
#[cfg(feature = "mock")]
pub use mock::{MockStore, RecordedRequest};
pub use registry::{LocaleStores, locale_api_base};
pub use store::{ContentStore, DrupalStore, ObjectRequest};
pub use types::ResolvedPath;
