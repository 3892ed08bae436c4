use clap::Parser;
use rota_core::RotaConfig;
use tracing::{debug, warn};

mod commands;
mod output;

use commands::Cli;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rota=info,rota_schedule=info".into()),
        )
        .init();

    let cli = Cli::parse();

    // load config: --config > ROTA_CONFIG env > ~/.rota/rota.toml
    let config_path = cli
        .config
        .clone()
        .or_else(|| std::env::var("ROTA_CONFIG").ok());
    let config = RotaConfig::load(config_path.as_deref()).unwrap_or_else(|e| {
        warn!(code = e.code(), "Config load failed ({}), using defaults", e);
        RotaConfig::default()
    });
    debug!(?config, "config resolved");

    let today = cli
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let out = commands::run(&cli.command, &config, today)?;
    println!("{out}");
    Ok(())
}
