mod cli;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Cli, Runner};
use weather_app::app::AppDependencies;
use weather_app::config::Config;
use weather_app::logging::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;

    let deps = AppDependencies::from_config(&config).context("failed to set up collaborators")?;
    let timeout = Duration::from_secs(
        u64::from(config.api.timeout_seconds) + u64::from(config.api.connect_timeout_seconds),
    );
    let runner = Runner::new(deps, timeout)?;

    tokio::select! {
        result = runner.run(cli.command) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted");
            Ok(())
        }
    }
}
