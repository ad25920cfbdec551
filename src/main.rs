use clap::Parser;
use laureate_index::config::{DataSource, ServiceConfig, YearBounds};
use laureate_index::ingestion::source::load_store;
use laureate_index::service::local::LocalService;
use laureate_index::service::server::{AppState, serve, spawn_refresh};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Laureate query server
#[derive(Parser, Debug)]
#[command(name = "laureate-server")]
#[command(about = "Serves laureate counts and lookups over HTTP")]
struct Args {
    /// Listen address
    #[arg(long, default_value = "127.0.0.1:50051", env = "LAUREATE_BIND")]
    bind: SocketAddr,

    /// Read the prize feed from this file instead of downloading it
    #[arg(long, env = "LAUREATE_DATA_FILE")]
    data_file: Option<PathBuf>,

    /// Prize feed URL
    #[arg(long, env = "LAUREATE_FEED_URL", default_value = laureate_index::config::DEFAULT_FEED_URL)]
    feed_url: String,

    /// First year kept from the feed and accepted in queries
    #[arg(long, default_value_t = 2013, env = "LAUREATE_MIN_YEAR")]
    min_year: i32,

    /// Last year kept from the feed and accepted in queries
    #[arg(long, default_value_t = 2023, env = "LAUREATE_MAX_YEAR")]
    max_year: i32,

    /// Maximum number of queries executing concurrently
    #[arg(long, default_value_t = 10, env = "LAUREATE_MAX_CONCURRENT")]
    max_concurrent: usize,

    /// Deadline for calls that do not carry one, in milliseconds
    #[arg(long, default_value_t = 5_000, env = "LAUREATE_DEFAULT_TIMEOUT_MS")]
    default_timeout_ms: u64,

    /// Cap on caller-supplied deadlines, in milliseconds
    #[arg(long, default_value_t = 30_000, env = "LAUREATE_MAX_TIMEOUT_MS")]
    max_timeout_ms: u64,

    /// Re-ingest the feed every N seconds (disabled when absent or 0)
    #[arg(long, env = "LAUREATE_REFRESH_SECS")]
    refresh_secs: Option<u64>,
}

impl Args {
    fn into_config(self) -> anyhow::Result<ServiceConfig> {
        let source = match self.data_file {
            Some(path) => DataSource::File(path),
            None => DataSource::Url(self.feed_url),
        };

        Ok(ServiceConfig {
            bind_addr: self.bind,
            year_bounds: YearBounds::new(self.min_year, self.max_year)?,
            max_concurrent_requests: self.max_concurrent,
            default_timeout_ms: self.default_timeout_ms,
            max_timeout_ms: self.max_timeout_ms,
            source,
            refresh_interval_secs: self.refresh_secs,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Args::parse().into_config()?;
    tracing::info!("Starting laureate service with {:?}", config.source);

    // 1. Ingest and build the first snapshot:
    let store = load_store(&config.source, &config.year_bounds).await?;
    let service = LocalService::from_store(store, config.year_bounds);

    // 2. Shared handler state:
    let state = AppState::new(service, config);

    // 3. Optional periodic refresh:
    if spawn_refresh(state.clone()).is_some() {
        tracing::info!(
            "Snapshot refresh every {:?}",
            state.config.refresh_interval()
        );
    }

    // 4. Start HTTP server:
    let listener = tokio::net::TcpListener::bind(state.config.bind_addr).await?;
    tracing::info!("Press Ctrl+C to shutdown");
    serve(listener, state, shutdown_signal()).await?;

    tracing::info!("Laureate service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
