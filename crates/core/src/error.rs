//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// The derivation pipeline itself never fails; these cover the edges around it
/// (identifier parsing, timestamps, record sources, settings, group targeting).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. empty).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A timestamp could not be parsed.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// A requested record was not found.
    #[error("not found")]
    NotFound,

    /// The inventory data source failed to supply records.
    #[error("record source failed: {0}")]
    Source(String),

    /// A configuration value was rejected.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn invalid_timestamp(msg: impl Into<String>) -> Self {
        Self::InvalidTimestamp(msg.into())
    }

    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
