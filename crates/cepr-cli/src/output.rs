use serde_json::Value;

use cepr_core::{Envelope, RaceOutcome, RaceReport};

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(
    envelope: &Envelope<Value>,
    report: &RaceReport,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            println!("{payload}");
        }
        OutputFormat::Ndjson => {
            let payload = serde_json::to_string(envelope)?;
            println!("{payload}");
        }
        OutputFormat::Table => render_table(report),
    }

    Ok(())
}

fn render_table(report: &RaceReport) {
    match &report.outcome {
        RaceOutcome::Resolved { address, source } => {
            println!("API: {source}");
            println!("CEP: {}", address.postal_code);
            println!("Logradouro: {}", address.street);
            println!("Bairro: {}", address.neighborhood);
            println!("Cidade: {}", address.city);
            println!("UF: {}", address.state);
        }
        RaceOutcome::Exhausted => {
            println!("No address data could be obtained from any source.");
            for error in &report.errors {
                if let Some(source) = error.source {
                    println!("  {source}: {}", error.message);
                }
            }
        }
        RaceOutcome::TimedOut => {
            println!("Timeout: no response received within the time budget.");
        }
    }
}
