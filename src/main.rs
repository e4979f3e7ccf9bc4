//! Startup command that blocks until the database is ready.
//!
//! Intended to run ahead of the application proper, under an external
//! supervisor. With the default unbounded retry policy the process never
//! fails on its own; it exits 0 once a probe succeeds. A bounded policy
//! (config or `--max-attempts`) exits nonzero on exhaustion.

use std::path::PathBuf;

use clap::Parser;

use db_gate::config::loader::{self, ConfigError};
use db_gate::config::validation::validate_config;
use db_gate::gate::{ReadinessGate, TokioDelay};
use db_gate::observability::logging;
use db_gate::probe::postgres::PostgresProbe;

#[derive(Parser)]
#[command(name = "db-gate")]
#[command(about = "Block until the configured database accepts connections", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Falls back to DATABASE_URL.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Logical connection to probe (overrides the configured target).
    #[arg(long)]
    connection: Option<String>,

    /// Give up after this many attempts (overrides the configured policy).
    #[arg(long)]
    max_attempts: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => loader::load_config(path)?,
        None => loader::config_from_env()
            .ok_or("no --config given and DATABASE_URL is not set")?,
    };

    if let Some(connection) = cli.connection {
        config.gate.connection = connection;
    }
    if let Some(max_attempts) = cli.max_attempts {
        config.gate.max_attempts = Some(max_attempts);
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init(&config.observability);

    tracing::info!(
        connection = %config.gate.connection,
        interval_ms = config.gate.interval_ms,
        max_attempts = ?config.gate.max_attempts,
        "Configuration loaded"
    );

    let probe = PostgresProbe::new(config.connections.clone());
    let gate = ReadinessGate::new(probe, TokioDelay, &config.gate);
    gate.wait().await?;

    Ok(())
}
