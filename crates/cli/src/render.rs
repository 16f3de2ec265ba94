//! Terminal rendering of snapshots and results.

use chrono::Utc;
use omniyield_data::{Snapshot, SourceKind, StrategyRecommendation};
use omniyield_domain::entities::{Pool, Position};
use omniyield_domain::metrics::{
    AddressStyle, ExpiryStatus, expiry_status, filter_pools_by_chain, format_usd_compact,
    portfolio_totals, position_performance_pct, risk_bucket, top_pools,
};
use omniyield_domain::enums::PoolSort;
use omniyield_domain::registry::TokenLogoResolver;
use omniyield_domain::value_objects::ChainFilter;
use omniyield_execution::transfer::TrackedTransfer;
use prettytable::{Cell, Row, Table};

/// Pools shown on the dashboard.
const DASHBOARD_POOL_LIMIT: usize = 20;

fn header(names: &[&str]) -> Row {
    Row::new(names.iter().map(|n| Cell::new(n).style_spec("Fb")).collect())
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

pub fn dashboard(snapshot: &Snapshot, filter: &ChainFilter) {
    println!(
        "OmniYield dashboard (generation {}, fetched {})",
        snapshot.generation,
        snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    let network = &snapshot.network;
    let mut table = Table::new();
    table.add_row(header(&["Network", "Status"]));
    table.add_row(Row::new(vec![
        Cell::new("Backend"),
        Cell::new(yes_no(network.backend_reachable)),
    ]));
    table.add_row(Row::new(vec![
        Cell::new("Chain backend"),
        Cell::new(yes_no(network.chain_backend_connected)),
    ]));
    table.add_row(Row::new(vec![
        Cell::new("Database"),
        Cell::new(yes_no(network.database_connected)),
    ]));
    if let Some(block) = snapshot.chain_status.block_number {
        table.add_row(Row::new(vec![
            Cell::new("Latest block"),
            Cell::new(&block.to_string()),
        ]));
    }
    let supported: Vec<String> = network
        .supported_chain_ids
        .iter()
        .map(|id| snapshot.chain_registry.display_name(id))
        .collect();
    table.add_row(Row::new(vec![
        Cell::new("Supported chains"),
        Cell::new(&supported.join(", ")),
    ]));
    table.printstd();

    if let Some(analytics) = &snapshot.analytics {
        let mut table = Table::new();
        table.add_row(header(&["Metric", "Value"]));
        for (metric, value) in [
            ("Total value locked", format_usd_compact(analytics.total_value_locked_usd)),
            ("Rewards earned", format_usd_compact(analytics.total_rewards_earned_usd)),
            ("Average APY", format!("{:.2}%", analytics.average_apy)),
            ("Active positions", analytics.active_positions.to_string()),
            ("Chains", analytics.chains_count.to_string()),
        ] {
            table.add_row(Row::new(vec![Cell::new(metric), Cell::new(&value)]));
        }
        table.printstd();
    }

    let pools = top_pools(
        &filter_pools_by_chain(&snapshot.pools, filter),
        PoolSort::Apy,
        DASHBOARD_POOL_LIMIT,
    );
    pools_table(&pools, snapshot);
    arbitrage(snapshot);
    unavailable(snapshot);
}

pub fn pools(pools: &[Pool], snapshot: &Snapshot) {
    pools_table(pools, snapshot);
}

fn pools_table(pools: &[Pool], snapshot: &Snapshot) {
    if pools.is_empty() {
        println!("No pools match the current filter.");
        return;
    }

    let logos = TokenLogoResolver::default();
    let mut table = Table::new();
    table.add_row(header(&[
        "Pool", "Chain", "Protocol", "APY", "TVL", "Risk", "IL", "Rewards", "Logo",
    ]));
    for pool in pools {
        let rewards: Vec<String> = pool
            .reward_tokens
            .iter()
            .map(|t| AddressStyle::RewardToken.format(t))
            .collect();
        table.add_row(Row::new(vec![
            Cell::new(&pool.symbol),
            Cell::new(&snapshot.chain_registry.display_name(&pool.chain_id)),
            Cell::new(snapshot.protocol_registry.display_name(&pool.protocol_id)),
            Cell::new(&format!("{:.2}%", pool.apy)),
            Cell::new(&format_usd_compact(pool.tvl_usd)),
            Cell::new(&format!("{:.1} ({})", pool.risk_score, risk_bucket(pool.risk_score))),
            Cell::new(pool.il_risk.as_str()),
            Cell::new(&rewards.join(", ")),
            Cell::new(&logos.resolve(&pool.token0)),
        ]));
    }
    table.printstd();
}

fn arbitrage(snapshot: &Snapshot) {
    if snapshot.arbitrage.is_empty() {
        return;
    }

    let now = Utc::now();
    let mut table = Table::new();
    table.add_row(header(&["Token", "Route", "Net profit", "Profit %", "Expires"]));
    for opp in &snapshot.arbitrage {
        let expires = match expiry_status(opp.expires_at, now) {
            ExpiryStatus::Active(minutes) => format!("in {minutes} min"),
            ExpiryStatus::Expired(minutes) => format!("expired {minutes} min ago"),
        };
        let route = format!(
            "{} -> {}",
            snapshot.chain_registry.display_name(&opp.source_chain),
            snapshot.chain_registry.display_name(&opp.dest_chain)
        );
        table.add_row(Row::new(vec![
            Cell::new(&opp.token_symbol),
            Cell::new(&route),
            Cell::new(&format_usd_compact(opp.net_profit_usd)),
            Cell::new(&format!("{:.2}%", opp.profit_percentage)),
            Cell::new(&expires),
        ]));
    }
    table.printstd();
}

/// Lists the sections that fell back to defaults.
pub fn unavailable(snapshot: &Snapshot) {
    if !snapshot.is_degraded() {
        return;
    }
    let sections: Vec<&str> = SourceKind::ALL
        .iter()
        .filter(|kind| !snapshot.is_available(**kind))
        .map(SourceKind::as_str)
        .collect();
    println!("Unavailable: {}", sections.join(", "));
}

pub fn portfolio(positions: &[&Position], snapshot: &Snapshot) {
    if positions.is_empty() {
        println!("No positions.");
        return;
    }

    let mut table = Table::new();
    table.add_row(header(&[
        "Position", "Chain", "Deposited", "Value", "Rewards", "P&L", "Performance", "APY",
    ]));
    for position in positions {
        let performance = position_performance_pct(position)
            .map_or_else(|_| "n/a".to_string(), |pct| format!("{pct:+.2}%"));
        table.add_row(Row::new(vec![
            Cell::new(&position.symbol),
            Cell::new(&snapshot.chain_registry.display_name(&position.chain_id)),
            Cell::new(&format_usd_compact(position.deposited_amount_usd)),
            Cell::new(&format_usd_compact(position.current_value_usd)),
            Cell::new(&format_usd_compact(position.rewards_earned_usd)),
            Cell::new(&format_usd_compact(position.profit_loss_usd())),
            Cell::new(&performance),
            Cell::new(&format!("{:.2}%", position.apy_earned)),
        ]));
    }
    table.printstd();

    let totals = portfolio_totals(positions.iter().copied());
    let performance = totals
        .performance_pct()
        .map_or_else(|_| "n/a".to_string(), |pct| format!("{pct:+.2}%"));
    println!(
        "{} positions on {} chains: {} deposited, {} current, {} P&L ({performance}), average APY {:.2}%",
        totals.positions,
        totals.chains_count,
        format_usd_compact(totals.deposited_usd),
        format_usd_compact(totals.current_value_usd),
        format_usd_compact(totals.profit_loss_usd),
        totals.average_apy
    );
}

pub fn transfer(transfer: &TrackedTransfer) {
    let status = &transfer.status;
    let mut table = Table::new();
    table.add_row(header(&["Field", "Value"]));
    for (field, value) in [
        ("Transfer", transfer.id.to_string()),
        (
            "Route",
            format!("{} -> {}", transfer.request.from_chain, transfer.request.to_chain),
        ),
        (
            "Amount",
            format!("{} {}", transfer.request.amount, transfer.request.token),
        ),
        (
            "Tx hash",
            status
                .tx_hash
                .as_deref()
                .map_or_else(|| "-".to_string(), |h| AddressStyle::Wide.format(h)),
        ),
        ("State", status.state.to_string()),
        ("Cross-chain fee", status.cross_chain_fee.to_string()),
        ("Processing time", format!("{}s", status.processing_time_seconds)),
    ] {
        table.add_row(Row::new(vec![Cell::new(field), Cell::new(&value)]));
    }
    if let Some(error) = &status.error {
        table.add_row(Row::new(vec![Cell::new("Error"), Cell::new(error)]));
    }
    table.printstd();
}

pub fn recommendation(recommendation: &StrategyRecommendation) {
    let mut table = Table::new();
    table.add_row(header(&["Chain", "Allocation"]));
    for (chain, share) in &recommendation.optimized_allocation {
        table.add_row(Row::new(vec![
            Cell::new(chain),
            Cell::new(&format!("{:.1}%", share)),
        ]));
    }
    table.printstd();

    println!(
        "Expected APY {:.2}%, risk score {:.1}, gas savings {}",
        recommendation.expected_apy,
        recommendation.risk_score,
        format_usd_compact(recommendation.gas_optimization_savings)
    );
    for line in &recommendation.recommendations {
        println!("- {line}");
    }
}
