//! Wire records mirroring the backend's JSON, and their ingestion into domain types.
//!
//! Each record type validates and coerces its fields in `into_domain`. Invalid
//! records are dropped individually by [`ingest_all`]; the remaining records of
//! the collection are kept.

mod arbitrage;
mod market;
mod portfolio;
mod status;
mod transfer;

pub use arbitrage::ArbitrageRecord;
pub use market::{ChainRecord, PoolRecord, ProtocolRecord};
pub use portfolio::{AnalyticsRecord, PositionRecord, YieldPointRecord};
pub use status::{ApiStatusRecord, BalanceRecord, ChainStatusRecord, SupportedChainsRecord};
pub use transfer::{
    StrategyPreferences, StrategyRecommendation, TransferBody, TransferStatusRecord,
};

use crate::error::SourceError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Decodes one raw collection element into its record type.
///
/// The element's `id`, when present, is carried into the error for logging.
pub fn decode_record<R: DeserializeOwned>(kind: &'static str, value: Value) -> Result<R, SourceError> {
    let id = match value.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    serde_json::from_value(value).map_err(|e| SourceError::invalid(kind, id, e.to_string()))
}

/// Converts a batch of records, dropping and logging the ones that fail validation.
pub fn ingest_all<R, T>(
    kind: &'static str,
    records: Vec<R>,
    convert: impl Fn(R) -> Result<T, SourceError>,
) -> Vec<T> {
    let total = records.len();
    let accepted: Vec<T> = records
        .into_iter()
        .filter_map(|record| match convert(record) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(kind = kind, error = %e, "Dropping invalid record");
                None
            }
        })
        .collect();

    if accepted.len() < total {
        warn!(
            kind = kind,
            accepted = accepted.len(),
            dropped = total - accepted.len(),
            "Partially ingested collection"
        );
    }
    accepted
}

/// Rejects negative or non-finite amounts.
pub(crate) fn non_negative(
    kind: &'static str,
    id: &str,
    field: &str,
    value: f64,
) -> Result<f64, SourceError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(SourceError::invalid(
            kind,
            id,
            format!("{field} must be a non-negative number, got {value}"),
        ))
    }
}

/// Rejects non-finite amounts.
pub(crate) fn finite(
    kind: &'static str,
    id: &str,
    field: &str,
    value: f64,
) -> Result<f64, SourceError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SourceError::invalid(kind, id, format!("{field} is not finite")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingest_all_drops_invalid() {
        let values = vec![1.0, -2.0, 3.0, f64::NAN];
        let accepted = ingest_all("amount", values, |v| non_negative("amount", "x", "value", v));
        assert_eq!(accepted, vec![1.0, 3.0]);
    }

    #[test]
    fn test_decode_record_isolates_malformed_elements() {
        let values = vec![
            serde_json::json!({
                "id": "good", "protocol_id": "uniswap", "chain_id": 1,
                "token0": "ETH", "token1": "USDC", "apy": 4.2, "tvl_usd": 1000.0,
                "risk_score": 2.0
            }),
            serde_json::json!({
                "id": "bad", "protocol_id": "uniswap", "chain_id": 1,
                "token0": "ETH", "token1": "USDC", "apy": null, "tvl_usd": 1000.0,
                "risk_score": 2.0
            }),
        ];

        let pools = ingest_all("pool", values, |value| {
            decode_record::<PoolRecord>("pool", value).and_then(PoolRecord::into_domain)
        });
        assert_eq!(pools.len(), 1);
        assert_eq!(pools[0].id, "good");

        let err = decode_record::<PoolRecord>("pool", serde_json::json!({"id": 9})).unwrap_err();
        assert!(matches!(err, SourceError::InvalidRecord { ref id, .. } if id == "9"));
    }
}
