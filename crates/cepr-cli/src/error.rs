use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] cepr_core::ValidationError),

    #[error("no address data could be obtained for {postal_code} from any source")]
    AllSourcesFailed { postal_code: String },

    #[error("lookup timed out: no source responded within {budget_ms}ms")]
    TimedOut { budget_ms: u64 },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::AllSourcesFailed { .. } => 4,
            Self::TimedOut { .. } => 6,
            Self::Serialization(_) | Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_failure_kinds_map_to_distinct_exit_codes() {
        let exhausted = CliError::AllSourcesFailed {
            postal_code: String::from("01153000"),
        };
        let timed_out = CliError::TimedOut { budget_ms: 1_000 };

        assert_eq!(exhausted.exit_code(), 4);
        assert_eq!(timed_out.exit_code(), 6);
        assert_ne!(exhausted.exit_code(), timed_out.exit_code());
    }

    #[test]
    fn validation_maps_to_usage_exit_code() {
        let error = CliError::Validation(cepr_core::ValidationError::EmptyPostalCode);
        assert_eq!(error.exit_code(), 2);
    }
}
