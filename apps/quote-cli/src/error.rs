//! Error types for the quote CLI.

use std::path::PathBuf;

use cabfare_core::{CoreError, ValidationError};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Everything that can stop a quote from being printed.
///
/// The calculator itself never fails; these all come from config files,
/// input files, or boundary validation.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid fare schedule: {0}")]
    InvalidSchedule(ValidationError),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Failed to write output: {0}")]
    Output(#[from] serde_json::Error),
}
