use thiserror::Error;

/// Errors that can occur while resolving settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A path option could not be expanded (e.g. unset variable).
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },
    /// A path option was given but empty.
    #[error("Empty value for {0}")]
    EmptyValue(&'static str),
}
