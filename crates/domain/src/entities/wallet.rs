use crate::value_objects::ChainId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeBalance {
    pub amount: f64,
    pub symbol: String,
}

/// Live wallet state. Replaced as a whole on every update.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WalletConnection {
    pub is_connected: bool,
    pub address: Option<String>,
    pub active_chain_id: Option<ChainId>,
    pub native_balance: Option<NativeBalance>,
}

impl WalletConnection {
    pub fn connected(address: impl Into<String>, chain_id: Option<ChainId>) -> Self {
        Self {
            is_connected: true,
            address: Some(address.into()),
            active_chain_id: chain_id,
            native_balance: None,
        }
    }

    #[must_use]
    pub fn with_address(&self, address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            native_balance: None,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_chain(&self, chain_id: ChainId) -> Self {
        Self {
            active_chain_id: Some(chain_id),
            native_balance: None,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_balance(&self, balance: NativeBalance) -> Self {
        Self {
            native_balance: Some(balance),
            ..self.clone()
        }
    }
}
