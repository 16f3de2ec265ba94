//! Read-only lookup tables.
//!
//! Registries are built once (at startup or from a fetched snapshot) and never
//! mutated afterwards; a refresh builds a new registry.

mod chain_registry;
mod protocol_registry;
mod token_logo;

pub use chain_registry::*;
pub use protocol_registry::*;
pub use token_logo::*;

/// Base URL of the icon set used for chains and tokens.
pub const ICON_BASE_URL: &str =
    "https://raw.githubusercontent.com/spothq/cryptocurrency-icons/master/32/icon";

/// Builds the icon URL for a symbol under [`ICON_BASE_URL`].
pub fn icon_url_for(symbol: &str) -> String {
    format!("{}/{}.png", ICON_BASE_URL, symbol.trim().to_ascii_lowercase())
}
