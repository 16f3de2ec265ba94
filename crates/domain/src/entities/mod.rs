pub mod analytics;
pub mod arbitrage;
pub mod chain;
pub mod network;
pub mod pool;
pub mod position;
pub mod protocol;
pub mod transfer;
pub mod wallet;

// Re-export for easier access
pub use analytics::{AnalyticsSummary, YieldPoint};
pub use arbitrage::ArbitrageOpportunity;
pub use chain::Chain;
pub use network::{NetworkStatus, SourceStatus};
pub use pool::Pool;
pub use position::Position;
pub use protocol::Protocol;
pub use transfer::{CrossChainTxRequest, CrossChainTxStatus};
pub use wallet::{NativeBalance, WalletConnection};
