pub mod chain_id;
pub mod timestamp;

pub use chain_id::{ChainFilter, ChainId};
