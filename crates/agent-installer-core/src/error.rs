//! Common error types for the agent installer.
//!
//! This module provides the error type returned by the core crate.

use thiserror::Error;

/// A result type using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur while reading an install configuration.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The install configuration is not valid YAML for the schema.
    #[error("failed to parse install config: {0}")]
    InstallConfigParse(#[from] serde_yaml::Error),

    /// A required field is missing from the install configuration.
    #[error("install config is missing required field {0}")]
    MissingField(&'static str),
}
