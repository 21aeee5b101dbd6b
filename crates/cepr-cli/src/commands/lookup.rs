use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use uuid::Uuid;

use cepr_core::{
    AddressSource, BrasilApiAdapter, Envelope, EnvelopeMeta, PostalCode, RaceConfig, RaceOutcome,
    RaceReport, SourceRace, ViaCepAdapter,
};

use crate::cli::{Cli, SourceSelector};
use crate::error::CliError;

const SCHEMA_VERSION: &str = "v1.0.0";

pub async fn run(cli: &Cli) -> Result<(Envelope<Value>, RaceReport), CliError> {
    let postal_code = PostalCode::parse(&cli.cep)?;
    let config = RaceConfig::new(Duration::from_millis(cli.timeout_ms))?;
    let race = build_race(cli.source, config)?;

    let report = race.run(&postal_code).await;

    let data = match &report.outcome {
        RaceOutcome::Resolved { address, source } => json!({
            "source": source,
            "address": address,
        }),
        RaceOutcome::Exhausted | RaceOutcome::TimedOut => Value::Null,
    };

    let meta = EnvelopeMeta::new(
        Uuid::new_v4().to_string(),
        SCHEMA_VERSION,
        report.source_chain.clone(),
        report.latency_ms,
    )?;

    let envelope = Envelope::with_errors(meta, data, report.errors.clone())?;

    Ok((envelope, report))
}

fn build_race(selector: SourceSelector, config: RaceConfig) -> Result<SourceRace, CliError> {
    let race = match selector {
        SourceSelector::Race => SourceRace::over_http(config),
        SourceSelector::Brasilapi => {
            let sources: Vec<Arc<dyn AddressSource>> = vec![Arc::new(BrasilApiAdapter::new())];
            SourceRace::new(sources, config)?
        }
        SourceSelector::Viacep => {
            let sources: Vec<Arc<dyn AddressSource>> = vec![Arc::new(ViaCepAdapter::new())];
            SourceRace::new(sources, config)?
        }
    };

    Ok(race)
}
