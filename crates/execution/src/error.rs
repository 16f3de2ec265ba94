//! Error types for wallet and transfer operations.

use omniyield_data::SourceError;
use thiserror::Error;
use uuid::Uuid;

/// Wallet connection failures.
#[derive(Debug, Error)]
pub enum WalletError {
    /// The requested connector is not present in the host environment.
    #[error("wallet connector {0} is not available")]
    ConnectorUnavailable(String),

    /// The user or the provider declined the connection.
    #[error("connection rejected: {0}")]
    ConnectionRejected(String),

    /// Another connection attempt has not finished yet.
    #[error("a connection attempt is already in progress")]
    ConnectionInProgress,

    /// The operation needs a connected wallet.
    #[error("no wallet is connected")]
    NotConnected,

    /// Provider-side failure outside the connection handshake.
    #[error("wallet provider error: {0}")]
    Provider(String),
}

/// Cross-chain transfer failures.
#[derive(Debug, Error)]
pub enum TxError {
    /// Rejected locally before any network call.
    #[error("invalid transfer request: {0}")]
    InvalidRequest(String),

    #[error("unknown transfer {0}")]
    UnknownTransfer(Uuid),

    /// The status lookup failed; the stored record is unchanged.
    #[error("status lookup failed: {0}")]
    Gateway(#[from] SourceError),
}
