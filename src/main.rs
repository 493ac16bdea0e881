//! Envsync - Declarative environment variables for hosted deployments.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use envsync::cli::output;
use envsync::cli::{execute, Cli};
use envsync::core::constants;
use envsync::error::{ConfigError, Error, ReconcileError, StoreError};

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("envsync=debug")
        } else {
            EnvFilter::new("envsync=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli.command, cli.config) {
        let suggestion = match &e {
            Error::Config(ConfigError::NotInitialized(_)) => Some("run: envsync init"),
            Error::Store(StoreError::SubjectMismatch { .. }) => {
                Some("the state file belongs to another project; check [project] or [paths]")
            }
            Error::Reconcile(ReconcileError::Cancelled("confirmation")) => {
                Some("rerun with --yes to apply without a prompt")
            }
            Error::Reconcile(ReconcileError::DeleteFailed { .. })
            | Error::Reconcile(ReconcileError::CreateFailed { .. }) => {
                Some("run: envsync refresh, then envsync plan")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
