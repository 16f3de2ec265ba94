//! Wallet connection management.
//!
//! Covers:
//! - Connector discovery and priority ranking
//! - The wallet provider boundary and its event stream
//! - The connection state machine

mod connector;
mod provider;
mod selector;

pub use connector::*;
pub use provider::*;
pub use selector::*;
