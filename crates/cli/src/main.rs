//! Command line front end for the OmniYield dashboard.
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use omniyield_data::{
    AggregatorConfig, BackendConfig, DataAggregator, HttpBackend, StrategyAdvisor,
    StrategyPreferences,
};
use omniyield_domain::enums::PoolSort;
use omniyield_domain::metrics::{
    filter_pools_by_chain, filter_pools_by_protocol, positions_owned_by, top_pools,
};
use omniyield_domain::value_objects::{ChainFilter, ChainId};
use omniyield_execution::transfer::{CrossChainTxTracker, TrackerConfig};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

mod render;

/// Interval between dashboard refreshes in watch mode.
const REFRESH_INTERVAL: Duration = Duration::from_secs(30);
/// Default number of pools listed.
const DEFAULT_POOL_LIMIT: usize = 20;

#[derive(Parser)]
#[command(name = "omniyield")]
#[command(about = "Cross-chain yield dashboard", long_about = None)]
struct Cli {
    /// Backend base URL (overrides OMNIYIELD_BACKEND_URL)
    #[arg(long, global = true)]
    backend_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show network status, analytics, top pools and arbitrage
    Dashboard {
        /// Chain id to filter pools by, or "all"
        #[arg(short, long, default_value = "all")]
        chain: String,

        /// Refresh every 30 seconds until interrupted
        #[arg(short, long)]
        watch: bool,
    },
    /// List yield pools
    Pools {
        /// Chain id to filter by, or "all"
        #[arg(short, long, default_value = "all")]
        chain: String,

        /// Protocol id to filter by
        #[arg(short, long)]
        protocol: Option<String>,

        /// Sort order: apy, tvl or risk
        #[arg(short, long, default_value = "apy")]
        sort: String,

        /// Maximum number of pools shown
        #[arg(short, long, default_value_t = DEFAULT_POOL_LIMIT)]
        limit: usize,
    },
    /// Show portfolio positions
    Portfolio {
        /// Only show positions owned by this address
        #[arg(short, long)]
        owner: Option<String>,
    },
    /// Submit a cross-chain transfer
    Transfer {
        /// Source chain id
        #[arg(long)]
        from: String,

        /// Destination chain id
        #[arg(long)]
        to: String,

        /// Amount to transfer
        #[arg(long)]
        amount: Decimal,

        /// Token symbol
        #[arg(long)]
        token: String,
    },
    /// Ask the backend for an optimised allocation
    Optimize {
        /// Risk tolerance: Low, Medium or High
        #[arg(long, default_value = "Medium")]
        risk: String,

        /// Preferred chain ids
        #[arg(long = "chain")]
        chains: Vec<String>,

        /// Minimum acceptable APY
        #[arg(long, default_value_t = 5.0)]
        min_apy: f64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut config = BackendConfig::from_env();
    if let Some(url) = &cli.backend_url {
        config = config.with_base_url(url.clone());
    }
    info!(backend = %config.api_base(), "Using backend");
    let backend = Arc::new(HttpBackend::new(&config).context("failed to build HTTP client")?);

    match cli.command {
        Commands::Dashboard { chain, watch } => {
            let aggregator = DataAggregator::new(backend.clone(), AggregatorConfig::default());
            let filter = ChainFilter::parse(&chain);
            loop {
                let snapshot = aggregator.refresh().await;
                render::dashboard(&snapshot, &filter);
                if !watch {
                    break;
                }
                tokio::time::sleep(REFRESH_INTERVAL).await;
            }
        }
        Commands::Pools {
            chain,
            protocol,
            sort,
            limit,
        } => {
            let Some(sort) = PoolSort::parse(&sort) else {
                bail!("unknown sort order {sort:?}, expected apy, tvl or risk");
            };
            let aggregator = DataAggregator::new(backend.clone(), AggregatorConfig::default());
            let snapshot = aggregator.refresh().await;

            let mut pools = snapshot.pools.clone();
            pools.extend(snapshot.zetachain_pools.iter().cloned());
            let mut pools = filter_pools_by_chain(&pools, &ChainFilter::parse(&chain));
            if let Some(protocol) = &protocol {
                pools = filter_pools_by_protocol(&pools, protocol);
            }
            let pools = top_pools(&pools, sort, limit);
            render::pools(&pools, &snapshot);
            render::unavailable(&snapshot);
        }
        Commands::Portfolio { owner } => {
            let aggregator = DataAggregator::new(backend.clone(), AggregatorConfig::default());
            let snapshot = aggregator.refresh().await;

            let positions = match &owner {
                Some(address) => positions_owned_by(&snapshot.positions, address),
                None => snapshot.positions.iter().collect(),
            };
            render::portfolio(&positions, &snapshot);
            render::unavailable(&snapshot);
        }
        Commands::Transfer {
            from,
            to,
            amount,
            token,
        } => {
            let tracker = CrossChainTxTracker::new(backend.clone(), TrackerConfig::default());
            let transfer = tracker
                .submit(from, to, amount, token)
                .await
                .context("transfer rejected")?;
            render::transfer(&transfer);
        }
        Commands::Optimize {
            risk,
            chains,
            min_apy,
        } => {
            let preferences = StrategyPreferences {
                risk_tolerance: risk,
                preferred_chains: chains.into_iter().map(ChainId::from).collect(),
                min_apy,
                ..StrategyPreferences::default()
            };
            let recommendation = backend
                .optimize_strategy(&preferences)
                .await
                .context("strategy optimisation failed")?;
            render::recommendation(&recommendation);
        }
    }

    Ok(())
}
