//! stack-rotate CLI
//!
//! Usage: stack-rotate --stack <STACK> [OPTIONS]
//!
//! Exit status is 0 when the stack was deployed, when `--output` printed the
//! rewritten file, and when the deploy command itself failed (the failure is
//! logged). Any other error exits with status 1.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use stack_rotate::infrastructure::Environment;
use stack_rotate::presentation::{create_redeploy_use_case, Cli};
use stack_rotate::{logging, RedeployOutcome};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = logging::init(cli.verbose, cli.json) {
        eprintln!("Error: {err:#}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // A filter excluding this crate drops the event, so fall back to stderr
            if tracing::enabled!(tracing::Level::ERROR) {
                tracing::error!("{err:#}");
            } else {
                eprintln!("Error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.to_config()?;
    let env = Environment::from_process().context("reading process environment")?;

    let stdout = std::io::stdout();
    let outcome = create_redeploy_use_case().execute(&config, &env, &mut stdout.lock())?;

    match outcome {
        RedeployOutcome::Printed { .. } => {}
        RedeployOutcome::Deployed { prefix } => {
            tracing::info!(%prefix, "stack {} deployed", config.stack);
        }
        RedeployOutcome::CommandFailed { prefix, error } => {
            tracing::warn!(
                %prefix,
                error = %error,
                "deploy command failed for stack {}; exiting with status 0",
                config.stack
            );
        }
    }

    Ok(())
}
