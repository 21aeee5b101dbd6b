//! Race coordination: fan out one lookup per source, first success wins.
//!
//! Every race reaches exactly one terminal state:
//!
//! | State | Condition |
//! |-------|-----------|
//! | `Resolved` | A source returned a usable address before the deadline |
//! | `Exhausted` | Every source failed before any succeeded |
//! | `TimedOut` | The budget elapsed with no success |
//!
//! A failure from one source never ends the race while other sources are
//! still pending; the coordinator keeps listening until a success arrives,
//! all sources have reported, or the deadline fires. When two sources
//! succeed at effectively the same instant, channel arrival order decides
//! the winner; that order is nondeterministic.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::adapters::{BrasilApiAdapter, ViaCepAdapter};
use crate::data_source::{AddressSource, LookupRequest, SourceError, SourceOutcome};
use crate::envelope::EnvelopeError;
use crate::{Address, PostalCode, ProviderId, ValidationError};

/// Race-level configuration, externalized rather than hardcoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaceConfig {
    /// Global wall-clock budget for the whole race, not per source.
    pub budget: Duration,
}

impl RaceConfig {
    pub const DEFAULT_BUDGET: Duration = Duration::from_millis(1_000);

    pub fn new(budget: Duration) -> Result<Self, ValidationError> {
        if budget.is_zero() {
            return Err(ValidationError::ZeroBudget);
        }
        Ok(Self { budget })
    }
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            budget: Self::DEFAULT_BUDGET,
        }
    }
}

/// Terminal state of one race.
#[derive(Debug, Clone, PartialEq)]
pub enum RaceOutcome {
    /// First usable address, tagged with the source that produced it.
    Resolved { address: Address, source: ProviderId },
    /// Every source reported a failure before any succeeded.
    Exhausted,
    /// The budget elapsed before any source succeeded.
    TimedOut,
}

impl RaceOutcome {
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}

/// Full result of one race: the terminal state plus diagnostics.
#[derive(Debug, Clone)]
pub struct RaceReport {
    pub outcome: RaceOutcome,
    /// Sources that entered the race, in registration order.
    pub source_chain: Vec<ProviderId>,
    /// Per-source failure diagnostics observed before finalization.
    pub errors: Vec<EnvelopeError>,
    pub latency_ms: u64,
}

/// Coordinator racing N address sources against one postal code.
pub struct SourceRace {
    sources: Vec<Arc<dyn AddressSource>>,
    config: RaceConfig,
}

impl std::fmt::Debug for SourceRace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceRace")
            .field("sources", &self.source_chain())
            .field("config", &self.config)
            .finish()
    }
}

impl SourceRace {
    pub fn new(
        sources: Vec<Arc<dyn AddressSource>>,
        config: RaceConfig,
    ) -> Result<Self, ValidationError> {
        if sources.is_empty() {
            return Err(ValidationError::EmptySourceList);
        }
        Ok(Self { sources, config })
    }

    /// Production set: BrasilAPI and ViaCEP over reqwest.
    pub fn over_http(config: RaceConfig) -> Self {
        Self {
            sources: vec![
                Arc::new(BrasilApiAdapter::new()),
                Arc::new(ViaCepAdapter::new()),
            ],
            config,
        }
    }

    pub fn source_chain(&self) -> Vec<ProviderId> {
        self.sources.iter().map(|source| source.id()).collect()
    }

    /// Runs one race to its single terminal state.
    ///
    /// Each source gets exactly one lookup attempt on its own task; outcomes
    /// fan into one channel read only here. Tasks still in flight after
    /// finalization are abandoned: their network call carries the budget as
    /// its own timeout, so nothing outlives one in-flight call per source.
    pub async fn run(&self, postal_code: &PostalCode) -> RaceReport {
        let started = Instant::now();
        let deadline = started + self.config.budget;
        let budget_ms = budget_ms(self.config.budget);
        let source_chain = self.source_chain();

        let (tx, mut rx) = mpsc::channel::<SourceOutcome>(self.sources.len());

        for source in &self.sources {
            let source = Arc::clone(source);
            let tx = tx.clone();
            let req = LookupRequest::new(postal_code.clone(), budget_ms);

            tokio::spawn(async move {
                let outcome = SourceOutcome {
                    source: source.id(),
                    result: source.lookup(req).await,
                };
                // The receiver is gone once the race is decided; a late
                // outcome is simply discarded.
                let _ = tx.send(outcome).await;
            });
        }
        drop(tx);

        let mut pending = self.sources.len();
        let mut errors = Vec::new();

        let outcome = loop {
            match tokio::time::timeout_at(deadline, rx.recv()).await {
                Ok(Some(outcome)) => match outcome.result {
                    Ok(address) => {
                        break RaceOutcome::Resolved {
                            address,
                            source: outcome.source,
                        };
                    }
                    Err(error) => {
                        errors.push(to_envelope_error(outcome.source, &error));
                        pending -= 1;
                        if pending == 0 {
                            break RaceOutcome::Exhausted;
                        }
                    }
                },
                // All senders dropped without a success; only reachable once
                // every failure has already been consumed above.
                Ok(None) => break RaceOutcome::Exhausted,
                Err(_) => break RaceOutcome::TimedOut,
            }
        };

        match outcome {
            RaceOutcome::TimedOut => errors.push(race_timeout_error(budget_ms)),
            RaceOutcome::Exhausted => errors.push(race_exhausted_error(&source_chain)),
            RaceOutcome::Resolved { .. } => {}
        }

        RaceReport {
            outcome,
            source_chain,
            errors,
            latency_ms: elapsed_ms(started),
        }
    }
}

fn to_envelope_error(provider: ProviderId, error: &SourceError) -> EnvelopeError {
    EnvelopeError::new(error.code(), error.message())
        .expect("code/message are non-empty")
        .with_source(provider)
        .with_retryable(error.retryable())
}

fn race_exhausted_error(source_chain: &[ProviderId]) -> EnvelopeError {
    let sources = source_chain
        .iter()
        .map(|provider| provider.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    EnvelopeError::new(
        "race.exhausted",
        format!("no usable address data from any source ({sources})"),
    )
    .expect("code/message are non-empty")
    .with_retryable(true)
}

fn race_timeout_error(budget_ms: u64) -> EnvelopeError {
    EnvelopeError::new(
        "race.timeout",
        format!("no source responded within the {budget_ms}ms budget"),
    )
    .expect("code/message are non-empty")
    .with_retryable(true)
}

fn budget_ms(budget: Duration) -> u64 {
    budget.as_millis().min(u128::from(u64::MAX)) as u64
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis().min(u128::from(u64::MAX)) as u64
}
