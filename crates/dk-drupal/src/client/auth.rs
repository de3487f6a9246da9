//! OAuth2 client-credentials token retrieval.

use serde::Deserialize;
use tracing::debug;

use super::DrupalClient;
use crate::error::DrupalError;

/// Token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl DrupalClient {
    /// Bearer token for a read; anonymous reads carry none.
    pub(crate) fn bearer_token(&self, anon: bool) -> Result<Option<String>, DrupalError> {
        if anon {
            Ok(None)
        } else {
            self.access_token().map(Some)
        }
    }

    /// Request a fresh access token using the configured client credentials.
    pub(crate) fn access_token(&self) -> Result<String, DrupalError> {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            DrupalError::OAuth(
                "authenticated request needs drupal.client_id and drupal.client_secret".into(),
            )
        })?;

        let url = format!("{}/oauth/token", self.base_url);
        debug!(url = %url, "Requesting access token");

        let response = self
            .agent
            .post(&url)
            .header("Accept", "application/json")
            .send_form([
                ("grant_type", "client_credentials"),
                ("client_id", credentials.client_id.as_str()),
                ("client_secret", credentials.client_secret.as_str()),
            ])?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(DrupalError::OAuth(format!(
                "token request failed: {status} - {error_body}"
            )));
        }

        let token: TokenResponse = body_reader.read_json()?;
        Ok(token.access_token)
    }
}
