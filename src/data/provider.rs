use anyhow::Result;
use async_trait::async_trait;

use crate::domain::{CandleRecord, FundingRecord, OpenInterestRecord};

/// Abstract interface for fetching perpetual-futures market data.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Current open interest for `symbol`.
    async fn snapshot_open_interest(&self, symbol: &str) -> Result<f64>;

    /// Most recent `limit` candles, oldest first. `limit` must be within the single-call cap.
    async fn candle_history(
        &self,
        symbol: &str,
        interval: &str,
        limit: u32,
    ) -> Result<Vec<CandleRecord>>;

    /// Most recent `limit` funding observations, oldest first.
    async fn funding_history(
        &self,
        symbol: &str,
        interval: &str,
        limit: u32,
    ) -> Result<Vec<FundingRecord>>;

    /// One page of open interest history, newest first.
    ///
    /// `end_before` is an exclusive bound in epoch ms: only records strictly older are
    /// returned. `None` means "up to now". An empty page means the history is exhausted.
    async fn open_interest_page(
        &self,
        symbol: &str,
        interval: &str,
        limit: u32,
        end_before: Option<i64>,
    ) -> Result<Vec<OpenInterestRecord>>;
}
