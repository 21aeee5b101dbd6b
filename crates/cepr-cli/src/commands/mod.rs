mod lookup;

use serde_json::Value;

use cepr_core::{Envelope, RaceReport};

use crate::cli::Cli;
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<(Envelope<Value>, RaceReport), CliError> {
    lookup::run(cli).await
}
