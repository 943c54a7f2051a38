use std::{net::SocketAddr, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use tracker_core::Config;
use tracker_server::{open_tracker, routes};

#[derive(Debug, Parser)]
#[command(name = "tracker-server", version, about = "HTTP service for the local weather tracker")]
struct Args {
    /// Use this config file instead of the platform default.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to listen on, e.g. 127.0.0.1:8000.
    #[arg(long)]
    bind: Option<String>,

    /// SQLite database file.
    #[arg(long)]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(database) = args.database {
        config.storage.database_path = Some(database);
    }

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address '{}'", config.server.bind))?;

    let tracker = open_tracker(&config)?;

    info!("Starting tracker-server on {}", addr);
    info!("Database: {}", config.database_path()?.display());

    warp::serve(routes(tracker)).run(addr).await;
    Ok(())
}
