//! # citegraph
//!
//! Explore a static bibliographic corpus from the command line.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                 apps/citegraph (THE BINARY)               │
//! │                                                           │
//! │  ┌─────────────┐   ┌─────────────┐   ┌────────────────┐  │
//! │  │   Config    │   │   Loader    │   │  CLI / browse  │  │
//! │  │   (toml)    │   │  (tokio)    │   │    (clap)      │  │
//! │  └──────┬──────┘   └──────┬──────┘   └───────┬────────┘  │
//! │         └─────────────────┼──────────────────┘           │
//! │                           ▼                              │
//! │                  ┌────────────────┐                      │
//! │                  │ citegraph-core │                      │
//! │                  │  (THE LOGIC)   │                      │
//! │                  └────────────────┘                      │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! citegraph --data corpus.json search --title "deep learning" --state CA
//! citegraph graph https://openalex.org/W123 --depth 2 --export
//! citegraph facets
//! citegraph browse
//! ```

use citegraph::cli;
use citegraph::config::{AppConfig, LogConfig};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    init_tracing(&config.log, cli.verbose, cli.quiet);

    if let Err(e) = cli::execute(cli, config).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing. `RUST_LOG` wins over the configured filter;
/// `CITEGRAPH_LOG_FORMAT=json` (or `[log] format`) enables JSON output.
fn init_tracing(log: &LogConfig, verbose: bool, quiet: bool) {
    let fallback = log.effective_filter(verbose, quiet);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| fallback.into());

    // stdout carries results and JSON; logs go to stderr.
    match log.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
