mod cli;
mod commands;
mod config;

use std::process;

use anyhow::Result;
use clap::Parser;
use logifly::Logifly;
use tracing::{debug, error};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    cli::Args,
    commands::{CommandExecutor, Outcome},
};

/// Default log filter directive.
const DEFAULT_LOG_FILTER: &str = "logifly=info";

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    match run(args).await {
        Ok(Outcome::Ok) => {}
        Ok(Outcome::PartialFailure) => process::exit(2),
        Err(e) => {
            error!("Application error: {:#}", e);
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

async fn run(args: Args) -> Result<Outcome> {
    let config = config::load(args.config.as_deref())?;
    let registry = Logifly::from_config(&config)?;
    debug!(
        "logifly {} ready with groups: {:?}",
        registry.version(),
        registry.list_groups()
    );

    let outcome = CommandExecutor::new(registry).execute(args.command).await?;
    if outcome == Outcome::PartialFailure && !args.fail_on_error {
        return Ok(Outcome::Ok);
    }
    Ok(outcome)
}

/// Log to stderr so JSON on stdout stays machine-readable. `RUST_LOG` wins over flags.
fn init_logging(verbose: bool, quiet: bool) {
    let default_directive = if verbose {
        "logifly=debug"
    } else if quiet {
        "logifly=warn"
    } else {
        DEFAULT_LOG_FILTER
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive.into()),
        )
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
