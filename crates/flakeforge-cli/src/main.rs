#![doc = include_str!("../README.md")]

mod cli;

use clap::Parser;
use cli::batch::forge_batch;
use cli::config::{CliArgs, GenerateConfig};
use cli::output::write_batch;
use cli::telemetry::init_telemetry;
use std::io::{self, Write};

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    init_telemetry()?;
    let config = GenerateConfig::try_from(args)?;

    log_startup_info(&config);

    let tokens = forge_batch(&config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_batch(&mut out, &config, &tokens)?;
    out.flush()?;

    tracing::info!(
        forged = tokens.len(),
        mfa = tokens.iter().filter(|t| t.is_mfa()).count(),
        "Batch complete"
    );
    Ok(())
}

fn log_startup_info(config: &GenerateConfig) {
    if cfg!(debug_assertions) {
        tracing::info!("Forging tokens with full config: {:#?}", config);
    } else {
        tracing::info!(
            "Forging {} tokens with {} workers",
            config.count,
            config.workers
        );
    }
}
