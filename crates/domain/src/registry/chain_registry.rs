//! Chain metadata lookup.

use super::icon_url_for;
use crate::entities::Chain;
use crate::error::RegistryError;
use crate::value_objects::ChainId;
use std::collections::BTreeMap;

/// Icon used for chains with no known metadata.
pub const GENERIC_CHAIN_ICON: &str = "https://raw.githubusercontent.com/spothq/cryptocurrency-icons/master/32/icon/generic.png";

/// Mapping from chain id to display metadata.
#[derive(Debug, Clone, Default)]
pub struct ChainRegistry {
    chains: BTreeMap<ChainId, Chain>,
}

impl ChainRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry from a list of chains, rejecting duplicate ids.
    ///
    /// # Errors
    /// Returns [`RegistryError`] on an empty or duplicate id.
    pub fn from_chains(chains: impl IntoIterator<Item = Chain>) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for chain in chains {
            if chain.id.is_empty() {
                return Err(RegistryError::EmptyKey);
            }
            if registry.chains.contains_key(&chain.id) {
                return Err(RegistryError::DuplicateKey(chain.id.to_string()));
            }
            registry.chains.insert(chain.id.clone(), chain);
        }
        Ok(registry)
    }

    /// The wallet networks known without contacting the backend.
    #[must_use]
    pub fn builtin() -> Self {
        let chains = [
            Chain::new(7000u64, "ZetaChain Mainnet", "ZETA", icon_url_for("zeta"))
                .with_explorer("https://explorer.zetachain.com")
                .with_rpc("https://zetachain-evm.blockpi.network/v1/rpc/public"),
            Chain::new(7001u64, "ZetaChain Athens Testnet", "ZETA", icon_url_for("zeta"))
                .testnet()
                .with_explorer("https://explorer.zetachain.com")
                .with_rpc("https://zetachain-athens-evm.blockpi.network/v1/rpc/public"),
            Chain::new(1u64, "Ethereum", "ETH", icon_url_for("eth"))
                .with_explorer("https://etherscan.io")
                .with_rpc("https://eth.llamarpc.com"),
            Chain::new(56u64, "BNB Smart Chain", "BNB", icon_url_for("bnb"))
                .with_explorer("https://bscscan.com")
                .with_rpc("https://bsc-dataseed1.binance.org"),
            Chain::new(137u64, "Polygon", "MATIC", icon_url_for("matic"))
                .with_explorer("https://polygonscan.com")
                .with_rpc("https://polygon-rpc.com"),
            Chain::new(43114u64, "Avalanche", "AVAX", icon_url_for("avax"))
                .with_explorer("https://snowtrace.io")
                .with_rpc("https://api.avax.network/ext/bc/C/rpc"),
            Chain::new(42161u64, "Arbitrum", "ETH", icon_url_for("arb"))
                .with_explorer("https://arbiscan.io")
                .with_rpc("https://arb1.arbitrum.io/rpc"),
        ];

        let mut registry = Self::new();
        for chain in chains {
            registry.chains.insert(chain.id.clone(), chain);
        }
        registry
    }

    /// Returns a new registry with `fetched` chains layered over this one.
    /// Fetched entries replace existing entries with the same id.
    #[must_use]
    pub fn merged_with(&self, fetched: &[Chain]) -> Self {
        let mut chains = self.chains.clone();
        for chain in fetched {
            chains.insert(chain.id.clone(), chain.clone());
        }
        Self { chains }
    }

    /// Looks up a chain.
    #[must_use]
    pub fn get(&self, id: &ChainId) -> Option<&Chain> {
        self.chains.get(id)
    }

    /// Display name, falling back to `"Chain {id}"` for unknown ids.
    #[must_use]
    pub fn display_name(&self, id: &ChainId) -> String {
        self.get(id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| format!("Chain {}", id))
    }

    /// Icon URL, falling back to [`GENERIC_CHAIN_ICON`].
    #[must_use]
    pub fn icon(&self, id: &ChainId) -> &str {
        self.get(id).map_or(GENERIC_CHAIN_ICON, |c| c.icon_url.as_str())
    }

    /// Native currency symbol, if the chain is known.
    #[must_use]
    pub fn native_symbol(&self, id: &ChainId) -> Option<&str> {
        self.get(id).map(|c| c.native_symbol.as_str())
    }

    /// All chain ids in registry order.
    pub fn ids(&self) -> impl Iterator<Item = &ChainId> {
        self.chains.keys()
    }

    /// All chains in registry order.
    pub fn chains(&self) -> impl Iterator<Item = &Chain> {
        self.chains.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}
