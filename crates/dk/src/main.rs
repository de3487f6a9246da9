//! dk CLI - server-side renderer for headless Drupal content.
//!
//! Provides commands for:
//! - `serve`: Start the page server
//! - `resolve`: Load one path and print what the server would render

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ResolveArgs, ServeArgs};
use output::Output;

/// dk - render headless Drupal content.
#[derive(Parser)]
#[command(name = "dk", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the page server.
    Serve(ServeArgs),
    /// Resolve a path and print the loaded page data as JSON.
    Resolve(ResolveArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Serve(args) => args.verbose,
        Commands::Resolve(args) => args.verbose,
    };

    let filter = EnvFilter::new(filter_directive(
        verbose,
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
    ));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Serve(args) => match tokio::runtime::Runtime::new() {
            Ok(rt) => rt.block_on(args.execute()),
            Err(e) => Err(e.into()),
        },
        Commands::Resolve(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// Log filter: `info` with --verbose, otherwise `RUST_LOG`, falling back to `warn`.
fn filter_directive(verbose: bool, rust_log: Option<String>) -> String {
    if verbose {
        return "info".to_owned();
    }
    rust_log
        .filter(|directive| !directive.trim().is_empty())
        .unwrap_or_else(|| "warn".to_owned())
}
