//! campcheck CLI entry point.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use campcheck::cli::Cli;
use campcheck::commands::{self, Context};
use campcheck::{Config, Repository};
use campcheck_core::storage::StorageError;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campcheck=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<StorageError>() {
                Some(storage) if !storage.is_validation() => {
                    tracing::error!(error = %storage, "storage failure")
                }
                _ => tracing::debug!(error = ?err, "command failed"),
            }
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env().with_db_path(cli.db);

    let repository = Repository::new(commands::open_engine(&config));
    repository.init().await?;

    let ctx = Context {
        repository,
        config,
        format: cli.format,
        quiet: cli.quiet,
    };

    if let Some(output) = commands::execute(cli.command, &ctx).await? {
        println!("{output}");
    }
    Ok(())
}
