//! Domain error types.

use thiserror::Error;

/// Errors raised by derived metric calculations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricsError {
    /// The denominator of a ratio metric is zero.
    #[error("{metric} is undefined: denominator is zero")]
    DivisionUndefined {
        /// Name of the metric being computed.
        metric: &'static str,
    },
}

/// Errors raised when building lookup tables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two entries share the same key.
    #[error("duplicate registry key: {0}")]
    DuplicateKey(String),
    /// An entry has an empty key.
    #[error("registry entry has an empty id")]
    EmptyKey,
}
