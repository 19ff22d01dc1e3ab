//! papers-api - Exam paper catalog browsing service
//!
//! Loads the scraped paper catalog on first request, caches the derived view
//! for a fixed TTL, and serves listing and filter-option queries.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use papers_api::api::buildinfo::build_id;
use papers_api::{build_router, AppState, PaperStore};
use papers_common::config::{ConfigOverrides, ServiceConfig};
use tracing::info;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "papers-api", version, about = "Exam paper catalog browsing service")]
struct Args {
    /// Scraped catalog JSON file
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Listen address, e.g. 127.0.0.1:5730
    #[arg(long)]
    bind: Option<String>,

    /// Catalog cache lifetime in seconds
    #[arg(long)]
    cache_ttl_secs: Option<u64>,

    /// Config file (default: platform config dir, then /etc/papers/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting {}", build_id());

    let args = Args::parse();
    let config = ServiceConfig::resolve(ConfigOverrides {
        data_file: args.data_file,
        bind: args.bind,
        cache_ttl_secs: args.cache_ttl_secs,
        config_file: args.config,
    });

    let store = PaperStore::new(config.data_file, config.cache_ttl);
    info!("Catalog file: {}", store.data_file().display());
    info!("Cache TTL: {}s", store.ttl().as_secs());

    let app = build_router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("papers-api listening on http://{}", config.bind_addr);
    info!("Health check: http://{}/health", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
