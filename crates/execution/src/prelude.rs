//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```rust
//! use omniyield_execution::prelude::*;
//! ```

// Errors
pub use crate::error::{TxError, WalletError};

// Transfers
pub use crate::transfer::{CrossChainTxTracker, TrackedTransfer, TrackerConfig};

// Wallet
pub use crate::wallet::{
    CONNECTOR_PRIORITY, ConnectOutcome, ConnectionState, Connector, ConnectorSelector,
    ProviderEvent, ProviderSession, WalletProvider, select_best_connector,
};
