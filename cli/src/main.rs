//! Command-line front end for the laureate service.
//!
//! `menu` is the interactive text menu, `bench` the latency harness. Both talk
//! to a `LaureateService`, either a running server or an in-process one built
//! from a local copy of the prize feed.

mod bench;
mod menu;

use clap::{Parser, Subcommand};
use laureate_index::config::{ClientConfig, DataSource, YearBounds};
use laureate_index::ingestion::source::load_store;
use laureate_index::service::api::LaureateService;
use laureate_index::service::local::LocalService;
use laureate_index::service::remote::RemoteService;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "laureate-cli")]
#[command(about = "Query laureates from a laureate service")]
struct Args {
    /// Server base URL
    #[arg(long, default_value = "http://127.0.0.1:50051", env = "LAUREATE_SERVER")]
    server: String,

    /// Answer queries in-process from this prize feed file instead of a server
    #[arg(long, env = "LAUREATE_DATA_FILE")]
    data_file: Option<PathBuf>,

    /// Per-call timeout in milliseconds
    #[arg(long, default_value_t = 5_000, env = "LAUREATE_TIMEOUT_MS")]
    timeout_ms: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive query menu
    Menu,
    /// Call each query repeatedly and record per-call latency
    Bench {
        /// Calls per query
        #[arg(long, default_value_t = 100)]
        runs: usize,
        /// Directory receiving one CSV per query
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let bounds = YearBounds::default();
    let service = connect(&args, bounds).await?;

    match args.command {
        Command::Menu => menu::run(service.as_ref(), &bounds).await,
        Command::Bench { runs, out_dir } => {
            let report = bench::run(service.as_ref(), runs).await;
            report.write_csv(&out_dir)?;
            println!("{}", report.summary());
            Ok(())
        }
    }
}

async fn connect(args: &Args, bounds: YearBounds) -> anyhow::Result<Box<dyn LaureateService>> {
    match &args.data_file {
        Some(path) => {
            let store = load_store(&DataSource::File(path.clone()), &bounds).await?;
            Ok(Box::new(LocalService::from_store(store, bounds)))
        }
        None => {
            let config = ClientConfig::new(args.server.clone())
                .with_timeout(Duration::from_millis(args.timeout_ms));
            tracing::info!("Using server {}", config.base_url);
            Ok(Box::new(RemoteService::new(config)))
        }
    }
}
