//! Token symbol to icon resolution.

use super::icon_url_for;
use std::collections::HashMap;

/// Resolves a token symbol to an icon URL.
///
/// Known symbols come from a swappable table; anything else falls back to a URL
/// built from the lower-cased symbol, so resolution never fails.
#[derive(Debug, Clone)]
pub struct TokenLogoResolver {
    table: HashMap<String, String>,
    fallback: fn(&str) -> String,
}

impl TokenLogoResolver {
    /// Creates a resolver over `table` (keys are matched case-insensitively).
    pub fn new<K, V>(table: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            table: table
                .into_iter()
                .map(|(k, v)| (normalize(k.as_ref()), v.into()))
                .collect(),
            fallback: icon_url_for,
        }
    }

    /// Replaces the fallback rule used for unknown symbols.
    #[must_use]
    pub fn with_fallback(mut self, fallback: fn(&str) -> String) -> Self {
        self.fallback = fallback;
        self
    }

    /// Returns the icon for `symbol`.
    #[must_use]
    pub fn resolve(&self, symbol: &str) -> String {
        self.table
            .get(&normalize(symbol))
            .cloned()
            .unwrap_or_else(|| (self.fallback)(symbol))
    }

    /// Whether `symbol` has an explicit table entry.
    #[must_use]
    pub fn is_known(&self, symbol: &str) -> bool {
        self.table.contains_key(&normalize(symbol))
    }
}

impl Default for TokenLogoResolver {
    /// Table covering the symbols that do not follow the fallback naming.
    fn default() -> Self {
        Self::new([
            ("WBTC", icon_url_for("btc")),
            ("WETH", icon_url_for("eth")),
            ("BTC.b", icon_url_for("btc")),
            ("USDC.e", icon_url_for("usdc")),
            ("MATIC", icon_url_for("matic")),
            ("POL", icon_url_for("matic")),
            ("ARB", icon_url_for("arb")),
            ("ZETA", icon_url_for("zeta")),
        ])
    }
}

fn normalize(symbol: &str) -> String {
    symbol.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lookup_is_case_insensitive() {
        let resolver = TokenLogoResolver::default();
        assert_eq!(resolver.resolve("wbtc"), icon_url_for("btc"));
        assert!(resolver.is_known("Weth"));
    }

    #[test]
    fn test_unknown_symbol_uses_fallback_pattern() {
        let resolver = TokenLogoResolver::default();
        assert_eq!(
            resolver.resolve("CAKE"),
            "https://raw.githubusercontent.com/spothq/cryptocurrency-icons/master/32/icon/cake.png"
        );
        assert!(!resolver.is_known("CAKE"));
    }

    #[test]
    fn test_custom_fallback() {
        fn local(symbol: &str) -> String {
            format!("/icons/{symbol}.svg")
        }
        let resolver = TokenLogoResolver::new(Vec::<(&str, String)>::new()).with_fallback(local);
        assert_eq!(resolver.resolve("UNI"), "/icons/UNI.svg");
    }
}
