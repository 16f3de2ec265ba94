use crate::enums::TxState;
use crate::value_objects::ChainId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A request to move `amount` of `token` from one chain to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossChainTxRequest {
    pub from_chain: ChainId,
    pub to_chain: ChainId,
    pub amount: Decimal,
    pub token: String,
}

impl CrossChainTxRequest {
    pub fn new(
        from_chain: impl Into<ChainId>,
        to_chain: impl Into<ChainId>,
        amount: Decimal,
        token: impl Into<String>,
    ) -> Self {
        Self {
            from_chain: from_chain.into(),
            to_chain: to_chain.into(),
            amount,
            token: token.into(),
        }
    }
}

/// Status record of a submitted transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossChainTxStatus {
    /// Absent when the submission never reached the backend.
    pub tx_hash: Option<String>,
    pub state: TxState,
    pub cross_chain_fee: Decimal,
    pub processing_time_seconds: u64,
    pub error: Option<String>,
}

impl CrossChainTxStatus {
    /// A failed status produced locally when submission did not succeed.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            tx_hash: None,
            state: TxState::Failed,
            cross_chain_fee: Decimal::ZERO,
            processing_time_seconds: 0,
            error: Some(reason.into()),
        }
    }
}
