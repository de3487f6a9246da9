//! HTTP server for dk.
//!
//! This crate provides an axum server that renders backend content as HTML:
//! - `GET /pages`, `GET /{locale}/pages`: page listing
//! - `GET /{*alias}`, `GET /{locale}/{*alias}`: content behind a path alias
//!
//! Anything that cannot be loaded is answered with a 404 page.
//!
//! # Quick Start
//!
//! ```ignore
//! use dk_config::DrupalConfig;
//! use dk_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig::new(DrupalConfig::new("https://cms.example.com"));
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (dk-server)
//!                        │
//!                        └─► spawn_blocking ──► Site (dk-site)
//!                                                  │
//!                                                  └─► LocaleStores ──► Drupal (dk-drupal)
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use dk_config::{Config, ConfigError, DrupalConfig};
use dk_drupal::{DrupalClient, LocaleStores};
use dk_site::{Site, SiteSettings};
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Drupal backend.
    pub drupal: DrupalConfig,
    /// Locale served without URL prefix.
    pub default_locale: String,
    /// Supported locales.
    pub locales: Vec<String>,
    /// Public origin for alternate-language links.
    pub frontend_origin: String,
    /// Document title.
    pub title: String,
    /// Meta description.
    pub description: String,
    /// Secret that unlocks preview mode.
    pub preview_secret: Option<String>,
}

impl ServerConfig {
    /// Create a single-language configuration for `drupal` with defaults elsewhere.
    #[must_use]
    pub fn new(drupal: DrupalConfig) -> Self {
        let defaults = Config::default();
        Self {
            host: defaults.server.host,
            port: defaults.server.port,
            drupal,
            default_locale: defaults.locales.default,
            locales: defaults.locales.supported,
            frontend_origin: String::new(),
            title: defaults.site.title,
            description: defaults.site.description,
            preview_secret: None,
        }
    }
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    let state = Arc::new(build_state(config));
    let app = app::create_router(state);

    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Build the page loader: one HTTP client shared by one store per locale.
#[must_use]
pub fn build_site(config: &ServerConfig) -> Site {
    let client = Arc::new(DrupalClient::from_config(&config.drupal));
    let stores = LocaleStores::from_client(&client, &config.default_locale, &config.locales);
    let settings = SiteSettings {
        frontend_origin: config.frontend_origin.clone(),
        image_base: config.drupal.image_base().to_owned(),
        title: config.title.clone(),
        description: config.description.clone(),
    };
    Site::new(stores, settings)
}

fn build_state(config: ServerConfig) -> AppState {
    AppState {
        site: build_site(&config),
        locales: config.locales,
        default_locale: config.default_locale,
        preview_secret: config.preview_secret,
    }
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from dk config.
///
/// # Errors
///
/// Returns an error if the `[drupal]` section is missing or invalid.
pub fn server_config_from_dk_config(config: &Config) -> Result<ServerConfig, ConfigError> {
    let drupal = config.require_drupal()?;
    Ok(ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        drupal: drupal.clone(),
        default_locale: config.locales.default.clone(),
        locales: config.locales.supported.clone(),
        frontend_origin: config.frontend_origin().to_owned(),
        title: config.site.title.clone(),
        description: config.site.description.clone(),
        preview_secret: config.preview.secret().map(str::to_owned),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_server_config_requires_drupal() {
        let err = server_config_from_dk_config(&Config::default()).unwrap_err();
        assert!(err.to_string().contains("[drupal]"));
    }

    #[test]
    fn test_server_config_from_dk_config() {
        let mut config = Config::default();
        config.drupal = Some(DrupalConfig::new("https://cms.example.com"));
        config.site.frontend_url = Some("https://www.example.com/".to_owned());
        config.locales.supported = vec!["en".to_owned(), "es".to_owned()];

        let server = server_config_from_dk_config(&config).unwrap();

        assert_eq!(server.port, 3000);
        assert_eq!(server.frontend_origin, "https://www.example.com");
        assert_eq!(server.locales, vec!["en", "es"]);
        assert_eq!(server.preview_secret, None);
    }

    #[test]
    fn test_build_state_registers_every_locale() {
        let mut config = ServerConfig::new(DrupalConfig::new("https://cms.example.com/"));
        config.locales = vec!["en".to_owned(), "es".to_owned()];

        let state = build_state(config);

        let stores = state.site.stores();
        assert_eq!(stores.get("en").unwrap().api_base(), "https://cms.example.com");
        assert_eq!(stores.get("es").unwrap().api_base(), "https://cms.example.com/es");
        assert!(stores.get("fr").is_err());
        assert_eq!(state.site.settings().image_base, "https://cms.example.com");
    }
}
