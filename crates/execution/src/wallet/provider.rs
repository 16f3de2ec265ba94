//! Wallet provider boundary.

use super::Connector;
use crate::error::WalletError;
use async_trait::async_trait;
use omniyield_domain::value_objects::ChainId;
use tokio::sync::mpsc;

/// Notification pushed by the provider while a session is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    /// The exposed account list changed. An empty list means the wallet
    /// no longer grants access.
    AccountsChanged(Vec<String>),
    ChainChanged(ChainId),
    /// The provider ended the session.
    Disconnected,
}

/// An open provider session.
///
/// Dropping `events` unsubscribes from the provider's notifications.
#[derive(Debug)]
pub struct ProviderSession {
    pub accounts: Vec<String>,
    pub chain_id: Option<ChainId>,
    pub events: mpsc::Receiver<ProviderEvent>,
}

/// Host-side wallet integration (browser extension, relay, exchange wallet).
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Connectors usable right now, in host order.
    async fn available_connectors(&self) -> Vec<Connector>;

    /// Opens a session through `connector`.
    async fn connect(&self, connector: &Connector) -> Result<ProviderSession, WalletError>;

    /// Closes the current session.
    async fn disconnect(&self) -> Result<(), WalletError>;
}
