#![allow(clippy::collapsible_if)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod pipeline;
pub mod report;
pub mod utils;

// Re-export commonly used types outside of crate
pub use analysis::{FetchLimits, calculate_limits, combine};
pub use data::{BinanceFuturesProvider, MarketDataProvider, SeriesFetch};
pub use domain::{AlignedDataset, AlignedRow, TimeSeries, TimeSeriesPoint};
pub use pipeline::{CombinedDataRequest, fetch_combined_data};

use anyhow::Result;
use clap::Parser;

use crate::{
    config::{BinanceApiConfig, DEFAULTS},
    data::snapshot,
    report::{render_summary, render_table},
    utils::TimeUtils,
};

// CLI argument parsing
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Perpetual futures symbol, e.g. ETHUSDT
    #[arg(long, default_value_t = DEFAULTS.symbol.to_string())]
    pub symbol: String,

    /// Sampling interval (Binance code such as 1h, 4h, 8h)
    #[arg(long, default_value_t = DEFAULTS.interval.to_string())]
    pub interval: String,

    #[arg(long, default_value_t = DEFAULTS.funding_limit)]
    pub funding_limit: u32,

    #[arg(long, default_value_t = DEFAULTS.oi_limit)]
    pub oi_limit: u32,

    #[arg(long, default_value_t = DEFAULTS.price_volume_limit)]
    pub price_volume_limit: u32,

    /// Print the current open interest before fetching history
    #[arg(long, default_value_t = false)]
    pub snapshot: bool,

    /// Only show the most recent N rows in the table
    #[arg(long)]
    pub tail: Option<usize>,

    /// Print the aligned dataset as JSON instead of a table
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Override the REST base URL (e.g. the futures testnet)
    #[arg(long)]
    pub base_url: Option<String>,
}

impl Cli {
    pub fn to_request(&self) -> CombinedDataRequest {
        CombinedDataRequest {
            symbol: self.symbol.to_uppercase(),
            interval: self.interval.clone(),
            funding_limit: self.funding_limit,
            oi_limit: self.oi_limit,
            price_volume_limit: self.price_volume_limit,
        }
    }

    fn api_config(&self) -> BinanceApiConfig {
        let mut config = BinanceApiConfig::default();
        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }
        config
    }
}

/// Entry point for the binary: one fetch-and-align pass, printed to stdout.
pub async fn run(args: Cli) -> Result<()> {
    if TimeUtils::interval_code_to_ms(&args.interval).is_none() {
        log::warn!(
            "Unrecognised interval {:?}; the exchange may reject it and limits pass through unchanged.",
            args.interval
        );
    }

    let provider = BinanceFuturesProvider::new(args.api_config())?;
    let request = args.to_request();

    if args.snapshot {
        match snapshot::fetch_open_interest(&provider, &request.symbol).await {
            Some(value) => println!("Current open interest for {}: {:.3}", request.symbol, value),
            None => eprintln!("Current open interest for {} unavailable.", request.symbol),
        }
    }

    let dataset = fetch_combined_data(&provider, &request).await;

    if dataset.is_empty() {
        println!("No data was retrieved.");
        return Ok(());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&dataset)?);
        return Ok(());
    }

    println!("{}", render_table(&dataset, args.tail));
    if let Some(summary) = dataset.summary() {
        println!(
            "{}",
            render_summary(&request.symbol, &request.interval, &summary)
        );
    }
    Ok(())
}
