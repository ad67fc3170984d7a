//! World-state node.
//!
//! Runs the periodic decay, compile and run-log tasks over a fresh world
//! until interrupted.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use swarm_world_state::{setup_logging, SharedWorld, WorldConfig, WorldService};

#[derive(Parser)]
#[command(name = "world-state")]
#[command(version)]
#[command(about = "Shared pheromone/obstacle/target map for a robot swarm")]
struct Cli {
    /// JSON config file; missing keys use defaults
    #[arg(long, env = "WORLD_STATE_CONFIG")]
    config: Option<PathBuf>,

    /// Directory for run log CSV files (overrides the config file)
    #[arg(long = "log-dir", env = "WORLD_STATE_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Tracing filter, e.g. "info" or "swarm_world_state=debug"
    #[arg(long = "log-level", env = "WORLD_STATE_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(Some(cli.log_level.clone()));

    let mut config = match &cli.config {
        Some(path) => WorldConfig::from_json_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => WorldConfig::default(),
    };
    if let Some(dir) = cli.log_dir {
        config.log_dir = dir;
    }

    let world = SharedWorld::new(&config);
    let service = WorldService::start(world, &config);
    info!("🌐 [WorldState] Ready; Ctrl-C to stop");

    tokio::signal::ctrl_c()
        .await
        .context("waiting for shutdown signal")?;

    info!("[WorldState] Shutting down");
    service.shutdown().await;
    Ok(())
}
