//! Error types for backend reads and writes.

use thiserror::Error;

/// Failure of a single backend call.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Transport failure, including timeouts.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("{path} returned HTTP {status}")]
    Status {
        /// Request path.
        path: String,
        /// HTTP status code.
        status: u16,
    },

    /// The response body could not be decoded.
    #[error("failed to decode {path}: {message}")]
    Decode {
        /// Request path.
        path: String,
        /// Decoder message.
        message: String,
    },

    /// A record failed validation on ingestion.
    #[error("invalid {kind} record {id}: {reason}")]
    InvalidRecord {
        /// Record kind.
        kind: &'static str,
        /// Record id, if known.
        id: String,
        /// Validation failure.
        reason: String,
    },

    /// The source is not configured or otherwise unavailable.
    #[error("source unavailable: {0}")]
    Unavailable(String),
}

impl SourceError {
    pub(crate) fn invalid(kind: &'static str, id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            kind,
            id: id.into(),
            reason: reason.into(),
        }
    }
}
