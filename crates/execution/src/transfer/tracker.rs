//! Transfer tracker.

use crate::error::TxError;
use chrono::{DateTime, Utc};
use omniyield_data::CrossChainGateway;
use omniyield_data::records::TransferBody;
use omniyield_domain::entities::{CrossChainTxRequest, CrossChainTxStatus};
use omniyield_domain::value_objects::ChainId;
use rust_decimal::Decimal;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Configuration for the transfer tracker.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Maximum number of transfers kept; the oldest is evicted first.
    pub history_limit: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self { history_limit: 20 }
    }
}

/// A submitted transfer and its latest known status.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedTransfer {
    /// Local identifier, assigned at submission.
    pub id: Uuid,
    pub request: CrossChainTxRequest,
    pub status: CrossChainTxStatus,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Submits cross-chain transfers and keeps their status records.
pub struct CrossChainTxTracker {
    gateway: Arc<dyn CrossChainGateway>,
    config: TrackerConfig,
    history: Arc<RwLock<VecDeque<TrackedTransfer>>>,
}

impl CrossChainTxTracker {
    #[must_use]
    pub fn new(gateway: Arc<dyn CrossChainGateway>, config: TrackerConfig) -> Self {
        Self {
            gateway,
            config,
            history: Arc::new(RwLock::new(VecDeque::new())),
        }
    }

    /// Builds and submits a transfer request.
    ///
    /// # Errors
    /// Returns [`TxError::InvalidRequest`] without contacting the backend when the
    /// parameters are malformed.
    pub async fn submit(
        &self,
        from_chain: impl Into<ChainId>,
        to_chain: impl Into<ChainId>,
        amount: Decimal,
        token: impl Into<String>,
    ) -> Result<TrackedTransfer, TxError> {
        self.submit_request(CrossChainTxRequest::new(from_chain, to_chain, amount, token))
            .await
    }

    /// Submits a prepared request.
    ///
    /// The backend is called exactly once. A backend failure does not surface
    /// as an error: it is recorded and returned as a `Failed` status.
    ///
    /// # Errors
    /// Returns [`TxError::InvalidRequest`] for malformed parameters.
    pub async fn submit_request(
        &self,
        request: CrossChainTxRequest,
    ) -> Result<TrackedTransfer, TxError> {
        validate(&request)?;

        let status = match self.gateway.submit(&TransferBody::from(&request)).await {
            Ok(record) => CrossChainTxStatus::from(record),
            Err(e) => {
                warn!(
                    from_chain = %request.from_chain,
                    to_chain = %request.to_chain,
                    error = %e,
                    "Transfer submission failed"
                );
                CrossChainTxStatus::failed(e.to_string())
            }
        };

        let now = Utc::now();
        let transfer = TrackedTransfer {
            id: Uuid::new_v4(),
            request,
            status,
            submitted_at: now,
            updated_at: now,
        };

        info!(
            id = %transfer.id,
            tx_hash = ?transfer.status.tx_hash,
            state = %transfer.status.state,
            "Transfer recorded"
        );

        let mut history = self.history.write().await;
        history.push_front(transfer.clone());
        while history.len() > self.config.history_limit {
            if let Some(evicted) = history.pop_back() {
                debug!(id = %evicted.id, "Evicted transfer from history");
            }
        }

        Ok(transfer)
    }

    /// Re-reads the status of a transfer and replaces its record.
    ///
    /// Transfers that never obtained a transaction hash are returned unchanged.
    ///
    /// # Errors
    /// Returns [`TxError::UnknownTransfer`] for an id not in the history, or
    /// [`TxError::Gateway`] when the lookup fails.
    pub async fn refresh_status(&self, id: Uuid) -> Result<TrackedTransfer, TxError> {
        let current = self.get(id).await.ok_or(TxError::UnknownTransfer(id))?;
        let Some(tx_hash) = current.status.tx_hash.clone() else {
            return Ok(current);
        };

        let status = CrossChainTxStatus::from(self.gateway.status(&tx_hash).await?);

        let mut history = self.history.write().await;
        let entry = history
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(TxError::UnknownTransfer(id))?;
        *entry = TrackedTransfer {
            status,
            updated_at: Utc::now(),
            ..entry.clone()
        };

        info!(id = %id, tx_hash = %tx_hash, state = %entry.status.state, "Transfer status refreshed");
        Ok(entry.clone())
    }

    pub async fn get(&self, id: Uuid) -> Option<TrackedTransfer> {
        self.history.read().await.iter().find(|t| t.id == id).cloned()
    }

    /// All tracked transfers, newest first.
    pub async fn history(&self) -> Vec<TrackedTransfer> {
        self.history.read().await.iter().cloned().collect()
    }

    pub async fn latest(&self) -> Option<TrackedTransfer> {
        self.history.read().await.front().cloned()
    }
}

fn validate(request: &CrossChainTxRequest) -> Result<(), TxError> {
    if request.amount <= Decimal::ZERO {
        return Err(TxError::InvalidRequest(format!(
            "amount must be positive, got {}",
            request.amount
        )));
    }
    if request.from_chain.is_empty() || request.to_chain.is_empty() {
        return Err(TxError::InvalidRequest("source and destination chain are required".to_string()));
    }
    if request.from_chain == request.to_chain {
        return Err(TxError::InvalidRequest(format!(
            "source and destination chain are both {}",
            request.from_chain
        )));
    }
    if request.token.trim().is_empty() {
        return Err(TxError::InvalidRequest("token is required".to_string()));
    }
    Ok(())
}
