//! Error types for the zabbix-dna CLI.
//!
//! CliError wraps CoreError from the shared library and adds CLI-specific variants.

use thiserror::Error;
use zabbix_dna_core::error::CoreError;

// Re-export core error types so command modules can use them via crate::error
pub use zabbix_dna_core::error::{ApiError, ConfigError, SaltError, StorageError, TelemetryError};

/// Exit codes for the CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
}

/// Main error type for the CLI
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Core(#[from] CoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Partial failure: {succeeded} succeeded, {failed} failed")]
    PartialFailure { succeeded: usize, failed: usize },

    #[error("{0}")]
    Other(String),
}

impl CliError {
    /// Every handled error exits with the same status.
    pub fn exit_code(&self) -> i32 {
        exit_codes::GENERAL_ERROR
    }
}

// Conversions from core error subtypes to CliError
impl From<ApiError> for CliError {
    fn from(e: ApiError) -> Self {
        CliError::Core(CoreError::Api(e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Core(CoreError::Config(e))
    }
}

impl From<StorageError> for CliError {
    fn from(e: StorageError) -> Self {
        CliError::Core(CoreError::Storage(e))
    }
}

impl From<SaltError> for CliError {
    fn from(e: SaltError) -> Self {
        CliError::Core(CoreError::Salt(e))
    }
}

impl From<TelemetryError> for CliError {
    fn from(e: TelemetryError) -> Self {
        CliError::Core(CoreError::Telemetry(e))
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpc_error_message_keeps_code_and_text() {
        let err: CliError = ApiError::Rpc {
            code: -32602,
            message: "Invalid params.".to_string(),
            data: "No permissions to referred object or it does not exist!".to_string(),
        }
        .into();

        let text = err.to_string();
        assert!(text.contains("-32602"));
        assert!(text.contains("Invalid params."));
        assert_eq!(err.exit_code(), exit_codes::GENERAL_ERROR);
    }

    #[test]
    fn test_partial_failure_exit_code() {
        let err = CliError::PartialFailure {
            succeeded: 2,
            failed: 1,
        };
        assert_eq!(err.exit_code(), 1);
    }
}
