//! Drupal HTTP client.
//!
//! Provides a sync HTTP client for the decoupled router and JSON:API
//! endpoints of a Drupal backend. Anonymous reads carry no credentials;
//! authenticated reads use an OAuth2 client-credentials bearer token.

mod auth;
mod objects;
mod router;

use std::time::Duration;

use dk_config::DrupalConfig;
use serde_json::Value;
use tracing::debug;
use ureq::Agent;

use crate::error::DrupalError;

/// OAuth client credentials.
struct Credentials {
    client_id: String,
    client_secret: String,
}

/// Drupal REST client shared by all locale stores.
pub struct DrupalClient {
    agent: Agent,
    base_url: String,
    credentials: Option<Credentials>,
}

impl DrupalClient {
    /// Create client from config values.
    #[must_use]
    pub fn from_config(config: &DrupalConfig) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .http_status_as_error(false)
            .build()
            .into();

        let credentials = config
            .credentials()
            .map(|(client_id, client_secret)| Credentials {
                client_id: client_id.to_owned(),
                client_secret: client_secret.to_owned(),
            });

        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            credentials,
        }
    }

    /// Backend base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Perform a GET request and parse the JSON response.
    ///
    /// Error statuses are returned as [`DrupalError::HttpResponse`] with the body attached.
    fn get_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
        bearer: Option<&str>,
    ) -> Result<Value, DrupalError> {
        debug!(url, "Drupal GET");

        let mut request = self
            .agent
            .get(url)
            .header("Accept", "application/vnd.api+json, application/json");
        for (key, value) in query {
            request = request.query(*key, *value);
        }
        if let Some(token) = bearer {
            request = request.header("Authorization", &format!("Bearer {token}"));
        }

        let response = request.call()?;
        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(DrupalError::HttpResponse {
                status,
                body: error_body,
            });
        }

        Ok(body_reader.read_json()?)
    }
}
