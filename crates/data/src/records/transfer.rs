//! Cross-chain transfer and strategy optimisation payloads.

use omniyield_domain::entities::{CrossChainTxRequest, CrossChainTxStatus};
use omniyield_domain::enums::TxState;
use omniyield_domain::value_objects::ChainId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body of `POST /zetachain/cross-chain-tx`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferBody {
    pub from_chain: ChainId,
    pub to_chain: ChainId,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub token: String,
}

impl From<&CrossChainTxRequest> for TransferBody {
    fn from(request: &CrossChainTxRequest) -> Self {
        Self {
            from_chain: request.from_chain.clone(),
            to_chain: request.to_chain.clone(),
            amount: request.amount,
            token: request.token.clone(),
        }
    }
}

/// Transfer status returned by submission and status lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferStatusRecord {
    #[serde(default)]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub cross_chain_fee: Decimal,
    #[serde(default, alias = "processing_time_seconds")]
    pub processing_time: u64,
    #[serde(default)]
    pub error: Option<String>,
}

impl From<TransferStatusRecord> for CrossChainTxStatus {
    fn from(record: TransferStatusRecord) -> Self {
        let state = if record.error.is_some() {
            TxState::Failed
        } else {
            TxState::from_label(&record.status)
        };
        Self {
            tx_hash: record.tx_hash.filter(|h| !h.is_empty()),
            state,
            cross_chain_fee: record.cross_chain_fee,
            processing_time_seconds: record.processing_time,
            error: record.error,
        }
    }
}

/// Inputs of `POST /strategy/optimize`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyPreferences {
    pub risk_tolerance: String,
    pub preferred_chains: Vec<ChainId>,
    pub min_apy: f64,
    pub max_il_risk: String,
    pub auto_compound: bool,
}

impl Default for StrategyPreferences {
    fn default() -> Self {
        Self {
            risk_tolerance: "Medium".to_string(),
            preferred_chains: Vec::new(),
            min_apy: 5.0,
            max_il_risk: "Medium".to_string(),
            auto_compound: true,
        }
    }
}

/// Allocation suggested by the backend optimiser.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StrategyRecommendation {
    #[serde(default)]
    pub optimized_allocation: BTreeMap<String, f64>,
    #[serde(default)]
    pub expected_apy: f64,
    #[serde(default)]
    pub risk_score: f64,
    #[serde(default)]
    pub gas_optimization_savings: f64,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_transfer_body_wire_shape() {
        let request = CrossChainTxRequest::new(7001u64, 137u64, dec!(1.5), "USDC");
        let value = serde_json::to_value(TransferBody::from(&request)).unwrap();
        assert_eq!(
            value,
            json!({ "from_chain": "7001", "to_chain": "137", "amount": 1.5, "token": "USDC" })
        );
    }

    #[test]
    fn test_status_record_conversion() {
        let record: TransferStatusRecord = serde_json::from_value(json!({
            "tx_hash": "0xabc",
            "status": "pending",
            "cross_chain_fee": 0.01,
            "processing_time": 45
        }))
        .unwrap();
        let status = CrossChainTxStatus::from(record);

        assert_eq!(status.tx_hash.as_deref(), Some("0xabc"));
        assert_eq!(status.state, TxState::Pending);
        assert_eq!(status.cross_chain_fee, dec!(0.01));
        assert_eq!(status.processing_time_seconds, 45);
    }

    #[test]
    fn test_status_record_with_error_is_failed() {
        let record: TransferStatusRecord =
            serde_json::from_value(json!({ "status": "pending", "error": "bridge paused" }))
                .unwrap();
        assert_eq!(CrossChainTxStatus::from(record).state, TxState::Failed);
    }
}
