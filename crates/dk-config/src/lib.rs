//! Configuration management for dk.
//!
//! Parses `dk.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `drupal.base_url`
//! - `drupal.image_url`
//! - `drupal.client_id`
//! - `drupal.client_secret`
//! - `site.frontend_url`
//! - `preview.secret`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override Drupal backend base URL.
    pub backend_url: Option<String>,
    /// Override public frontend origin used for alternate-language links.
    pub frontend_url: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "dk.toml";

/// Default HTTP timeout for backend requests, in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Drupal backend configuration.
    pub drupal: Option<DrupalConfig>,
    /// Supported locales.
    pub locales: LocalesConfig,
    /// Site presentation settings.
    pub site: SiteConfig,
    /// Preview mode settings.
    pub preview: PreviewConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        }
    }
}

/// Drupal backend configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DrupalConfig {
    /// Drupal base URL (the default locale's API base).
    pub base_url: String,
    /// Base URL prepended to media file paths (defaults to `base_url`).
    #[serde(default)]
    pub image_url: Option<String>,
    /// OAuth client ID for authenticated (preview) reads.
    #[serde(default)]
    pub client_id: Option<String>,
    /// OAuth client secret for authenticated (preview) reads.
    #[serde(default)]
    pub client_secret: Option<String>,
    /// HTTP timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl DrupalConfig {
    /// Create a config pointing at `base_url` with all other fields defaulted.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            image_url: None,
            client_id: None,
            client_secret: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Base URL for media files, without trailing slash.
    #[must_use]
    pub fn image_base(&self) -> &str {
        self.image_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(&self.base_url)
            .trim_end_matches('/')
    }

    /// OAuth client credentials, if both halves are configured.
    #[must_use]
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let id = self.client_id.as_deref().filter(|s| !s.is_empty())?;
        let secret = self.client_secret.as_deref().filter(|s| !s.is_empty())?;
        Some((id, secret))
    }

    /// Validate that all required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty or has invalid format.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.base_url, "drupal.base_url")?;
        require_http_url(&self.base_url, "drupal.base_url")?;
        if let Some(image_url) = self.image_url.as_deref().filter(|s| !s.is_empty()) {
            require_http_url(image_url, "drupal.image_url")?;
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "drupal.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Locale configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LocalesConfig {
    /// Locale served without a URL prefix.
    pub default: String,
    /// All locales the site serves, including the default.
    pub supported: Vec<String>,
}

impl Default for LocalesConfig {
    fn default() -> Self {
        Self {
            default: "en".to_owned(),
            supported: vec!["en".to_owned()],
        }
    }
}

/// Site presentation settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Public origin of this frontend (used for `hreflang` alternates).
    pub frontend_url: Option<String>,
    /// Document title.
    pub title: String,
    /// Meta description.
    pub description: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            frontend_url: None,
            title: "Decoupled Next Drupal Demo".to_owned(),
            description: "Generated by create-pantheon-decoupled-kit.".to_owned(),
        }
    }
}

/// Preview mode settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Shared secret that preview requests must present.
    pub secret: Option<String>,
}

impl PreviewConfig {
    /// Configured secret, treating an empty string as unset.
    #[must_use]
    pub fn secret(&self) -> Option<&str> {
        self.secret.as_deref().filter(|s| !s.is_empty())
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`drupal.base_url`").
        field: String,
        /// Error message (e.g., "${`BACKEND_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `dk.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(backend_url) = &settings.backend_url {
            match self.drupal.as_mut() {
                Some(drupal) => drupal.base_url.clone_from(backend_url),
                None => self.drupal = Some(DrupalConfig::new(backend_url.clone())),
            }
        }
        if let Some(frontend_url) = &settings.frontend_url {
            self.site.frontend_url = Some(frontend_url.clone());
        }
    }

    /// Get validated Drupal configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the `[drupal]` section is missing or invalid.
    pub fn require_drupal(&self) -> Result<&DrupalConfig, ConfigError> {
        let drupal = self.drupal.as_ref().ok_or_else(|| {
            ConfigError::Validation(
                "[drupal] section (or --backend-url) required in config".into(),
            )
        })?;
        drupal.validate()?;
        Ok(drupal)
    }

    /// Public frontend origin without trailing slash (empty when unset).
    #[must_use]
    pub fn frontend_origin(&self) -> &str {
        self.site
            .frontend_url
            .as_deref()
            .unwrap_or_default()
            .trim_end_matches('/')
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        Self::discover_config_from(std::env::current_dir().ok()?)
    }

    /// Search for config file in `start` and its parents.
    fn discover_config_from(mut current: PathBuf) -> Option<PathBuf> {
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// The `[drupal]` section is validated lazily by [`Config::require_drupal`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_locales()?;
        self.validate_site()?;
        Ok(())
    }

    /// Validate server configuration.
    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate locale configuration.
    fn validate_locales(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.locales.default, "locales.default")?;

        if self.locales.supported.is_empty() {
            return Err(ConfigError::Validation(
                "locales.supported cannot be empty".to_owned(),
            ));
        }
        if !self.locales.supported.contains(&self.locales.default) {
            return Err(ConfigError::Validation(format!(
                "locales.supported must contain the default locale '{}'",
                self.locales.default
            )));
        }

        Ok(())
    }

    /// Validate site configuration.
    fn validate_site(&self) -> Result<(), ConfigError> {
        if let Some(url) = self.site.frontend_url.as_deref().filter(|s| !s.is_empty()) {
            require_http_url(url, "site.frontend_url")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        if let Some(ref mut drupal) = self.drupal {
            drupal.base_url = expand::expand_env(&drupal.base_url, "drupal.base_url")?;
            expand::expand_opt(&mut drupal.image_url, "drupal.image_url")?;
            expand::expand_opt(&mut drupal.client_id, "drupal.client_id")?;
            expand::expand_opt(&mut drupal.client_secret, "drupal.client_secret")?;
        }

        expand::expand_opt(&mut self.site.frontend_url, "site.frontend_url")?;
        expand::expand_opt(&mut self.preview.secret, "preview.secret")?;

        Ok(())
    }
}
