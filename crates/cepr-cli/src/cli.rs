//! CLI argument definitions for cepr.

use clap::{Parser, ValueEnum};

/// cepr - first-response postal-code lookup
///
/// Races multiple Brazilian CEP lookup services (BrasilAPI, ViaCEP)
/// concurrently and prints whichever answers first with a usable address,
/// within a configurable time budget.
#[derive(Debug, Parser)]
#[command(
    name = "cepr",
    author,
    version,
    about = "Resolve a Brazilian CEP by racing multiple lookup services"
)]
pub struct Cli {
    /// Postal code to resolve (e.g. 01153000 or 01153-000).
    pub cep: String,

    /// Race budget in milliseconds.
    #[arg(long, default_value_t = 1_000)]
    pub timeout_ms: u64,

    /// Source selection strategy.
    #[arg(long, value_enum, default_value_t = SourceSelector::Race)]
    pub source: SourceSelector,

    /// Output format for results.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain-text lines for terminal display.
    Table,
    /// Single JSON envelope.
    Json,
    /// Newline-delimited JSON (one envelope per line).
    Ndjson,
}

/// Source selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceSelector {
    /// Race all registered sources, first success wins.
    Race,
    /// Query BrasilAPI only.
    Brasilapi,
    /// Query ViaCEP only.
    Viacep,
}
