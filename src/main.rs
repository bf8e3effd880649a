//! `pantry`: run one recipe store operation from the command line.

mod cli;
mod commands;
mod error;

use crate::cli::Cli;
use crate::error::{ErrorKind, Result};
use clap::Parser;
use exn::ResultExt;
use pantry_config::{Config, DatabaseConfig};
use pantry_store::Database;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            if err.is_retryable() {
                eprintln!("This may succeed if retried.");
            }
            ExitCode::FAILURE
        },
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    if let Some(path) = cli.database {
        config.database.path = path;
    }
    init_tracing(&config.log.level)?;
    tracing::debug!(
        file = ?config.source,
        database = %config.database.path.display(),
        match_mode = %config.search.match_mode,
        "Configuration loaded"
    );

    let db = open(&config.database).await?;
    let repo = db.repository().with_match_mode(config.search.match_mode);
    let mut stdout = std::io::stdout().lock();
    let outcome = commands::execute(&repo, cli.command, &mut stdout).await;
    db.close().await;
    outcome
}

/// `RUST_LOG` wins; otherwise the configured level applies.
fn init_tracing(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level).or_raise(|| ErrorKind::Config)?,
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    Ok(())
}

async fn open(config: &DatabaseConfig) -> Result<Database> {
    if let Some(parent) = config.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).or_raise(|| ErrorKind::Io)?;
    }
    Database::connect_with(&config.path, config.max_connections)
        .await
        .map_err(ErrorKind::store)
}
