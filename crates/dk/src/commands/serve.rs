//! `dk serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use dk_config::{CliSettings, Config};
use dk_server::{run_server, server_config_from_dk_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover dk.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Drupal base URL (overrides config).
    #[arg(long, env = "BACKEND_URL")]
    backend_url: Option<String>,

    /// Public site origin used for alternate-language links (overrides config).
    #[arg(long, env = "FRONTEND_URL")]
    frontend_url: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            backend_url: self.backend_url,
            frontend_url: self.frontend_url,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(path = ?config.config_path, "Loaded configuration");
        let server_config = server_config_from_dk_config(&config)?;

        output.highlight(&format!(
            "Starting server on {}:{}",
            server_config.host, server_config.port
        ));
        output.info(&format!("Backend: {}", server_config.drupal.base_url));
        output.info(&format!("Locales: {}", server_config.locales.join(", ")));
        if server_config.preview_secret.is_some() {
            output.info("Preview: enabled");
        } else {
            output.info("Preview: disabled (no [preview] secret in config)");
        }

        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
