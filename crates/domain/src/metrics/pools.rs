use crate::entities::Pool;
use crate::enums::PoolSort;
use crate::value_objects::ChainFilter;
use std::cmp::Ordering;

/// Returns the pools on the selected chain.
///
/// [`ChainFilter::All`] returns the input unchanged; an unknown chain yields an
/// empty list.
pub fn filter_pools_by_chain(pools: &[Pool], filter: &ChainFilter) -> Vec<Pool> {
    match filter {
        ChainFilter::All => pools.to_vec(),
        ChainFilter::Chain(_) => pools
            .iter()
            .filter(|pool| filter.matches(&pool.chain_id))
            .cloned()
            .collect(),
    }
}

/// Returns the pools belonging to `protocol_id`.
pub fn filter_pools_by_protocol(pools: &[Pool], protocol_id: &str) -> Vec<Pool> {
    pools
        .iter()
        .filter(|pool| pool.protocol_id == protocol_id)
        .cloned()
        .collect()
}

/// Sorts pools in place. APY and TVL sort descending, risk ascending.
pub fn sort_pools(pools: &mut [Pool], by: PoolSort) {
    pools.sort_by(|a, b| compare(a, b, by));
}

/// Returns at most `limit` pools in the given order.
pub fn top_pools(pools: &[Pool], by: PoolSort, limit: usize) -> Vec<Pool> {
    let mut sorted = pools.to_vec();
    sort_pools(&mut sorted, by);
    sorted.truncate(limit);
    sorted
}

fn compare(a: &Pool, b: &Pool, by: PoolSort) -> Ordering {
    match by {
        PoolSort::Apy => b.apy.total_cmp(&a.apy),
        PoolSort::Tvl => b.tvl_usd.total_cmp(&a.tvl_usd),
        PoolSort::Risk => a.risk_score.total_cmp(&b.risk_score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::RiskLevel;
    use crate::value_objects::ChainId;

    fn pool(id: &str, chain: &str, protocol: &str, apy: f64, tvl: f64, risk: f64) -> Pool {
        Pool {
            id: id.to_string(),
            chain_id: ChainId::from(chain),
            protocol_id: protocol.to_string(),
            name: format!("{id} Pool"),
            symbol: "ETH/USDC".to_string(),
            token0: "ETH".to_string(),
            token1: "USDC".to_string(),
            apy,
            apy_7d: None,
            apy_30d: None,
            tvl_usd: tvl,
            daily_volume_usd: 0.0,
            risk_score: risk,
            il_risk: RiskLevel::Low,
            auto_compound: false,
            reward_tokens: vec!["UNI".to_string()],
        }
    }

    fn sample() -> Vec<Pool> {
        vec![
            pool("a", "ethereum", "uniswap", 5.2, 3_000_000.0, 2.0),
            pool("b", "polygon", "aave", 12.4, 1_000_000.0, 5.0),
            pool("c", "ethereum", "aave", 8.1, 9_000_000.0, 8.5),
        ]
    }

    #[test]
    fn test_filter_all_is_identity() {
        let pools = sample();
        assert_eq!(filter_pools_by_chain(&pools, &ChainFilter::All), pools);
        assert_eq!(filter_pools_by_chain(&pools, &ChainFilter::parse("all")), pools);
    }

    #[test]
    fn test_filter_unknown_chain_is_empty() {
        let pools = sample();
        assert!(filter_pools_by_chain(&pools, &ChainFilter::parse("nonexistent")).is_empty());
    }

    #[test]
    fn test_filter_by_chain() {
        let filtered = filter_pools_by_chain(&sample(), &ChainFilter::parse("ethereum"));
        let ids: Vec<&str> = filtered.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_filter_by_protocol() {
        let filtered = filter_pools_by_protocol(&sample(), "aave");
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|p| p.protocol_id == "aave"));
    }

    #[test]
    fn test_sort_orders() {
        let ids = |pools: Vec<Pool>| pools.into_iter().map(|p| p.id).collect::<Vec<_>>();

        assert_eq!(ids(top_pools(&sample(), PoolSort::Apy, 10)), vec!["b", "c", "a"]);
        assert_eq!(ids(top_pools(&sample(), PoolSort::Tvl, 10)), vec!["c", "a", "b"]);
        assert_eq!(ids(top_pools(&sample(), PoolSort::Risk, 10)), vec!["a", "b", "c"]);
        assert_eq!(ids(top_pools(&sample(), PoolSort::Apy, 1)), vec!["b"]);
    }
}
