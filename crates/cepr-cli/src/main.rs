mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;

use cepr_core::RaceOutcome;

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("error: {error}");
        std::process::exit(error.exit_code());
    }
}

async fn run() -> Result<(), CliError> {
    let cli = Cli::parse();

    let (envelope, report) = commands::run(&cli).await?;
    output::render(&envelope, &report, cli.format, cli.pretty)?;

    match report.outcome {
        RaceOutcome::Resolved { .. } => Ok(()),
        RaceOutcome::Exhausted => Err(CliError::AllSourcesFailed {
            postal_code: cli.cep.clone(),
        }),
        RaceOutcome::TimedOut => Err(CliError::TimedOut {
            budget_ms: cli.timeout_ms,
        }),
    }
}
