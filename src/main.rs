use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use solswap::application::{Cli, CommandExecutor};
use solswap::{Config, DashboardService};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // --log-level wins over RUST_LOG, which wins over "info"
    let filter = match &cli.log_level {
        Some(level) => EnvFilter::try_new(level).with_context(|| format!("invalid log filter '{}'", level))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Priority: CLI args > config file > defaults
    let mut config = Config::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    let service = DashboardService::from_config(config).context("build dashboard")?;
    CommandExecutor::execute(cli.command, &service, cli.json)?;
    Ok(())
}
