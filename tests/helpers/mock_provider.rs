#![allow(dead_code)]

use std::sync::Mutex;

use anyhow::{Result, bail};
use async_trait::async_trait;
use perp_metrics::{
    MarketDataProvider,
    domain::{CandleRecord, FundingRecord, OpenInterestRecord},
};

pub const HOUR_MS: i64 = 3_600_000;

/// One recorded `open_interest_page` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCall {
    pub limit: u32,
    pub end_before: Option<i64>,
}

/// Simple in-memory provider used by integration tests.
/// `None` for a stream means every call for it fails.
pub struct MockProvider {
    pub snapshot: Option<f64>,
    pub candles: Option<Vec<CandleRecord>>,
    pub funding: Option<Vec<FundingRecord>>,
    /// Full open interest history, oldest first.
    pub open_interest: Vec<OpenInterestRecord>,
    /// Serve at most this many records per page, whatever was asked.
    pub oi_serve_cap: Option<u32>,
    /// Fail the n-th (1-based) open interest page request.
    pub oi_fail_on_page: Option<usize>,

    pub page_calls: Mutex<Vec<PageCall>>,
    pub candle_limits: Mutex<Vec<u32>>,
    pub funding_limits: Mutex<Vec<u32>>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self {
            snapshot: None,
            candles: Some(Vec::new()),
            funding: Some(Vec::new()),
            open_interest: Vec::new(),
            oi_serve_cap: None,
            oi_fail_on_page: None,
            page_calls: Mutex::new(Vec::new()),
            candle_limits: Mutex::new(Vec::new()),
            funding_limits: Mutex::new(Vec::new()),
        }
    }
}

pub fn candles_at(times: &[i64]) -> Vec<CandleRecord> {
    times
        .iter()
        .map(|&t| CandleRecord {
            open_time_ms: t,
            close: 2000.0 + t as f64,
            volume: 10.0,
        })
        .collect()
}

pub fn funding_at(times: &[i64]) -> Vec<FundingRecord> {
    times
        .iter()
        .map(|&t| FundingRecord {
            funding_time_ms: t,
            funding_rate: 0.0001,
        })
        .collect()
}

pub fn open_interest_at(times: &[i64]) -> Vec<OpenInterestRecord> {
    times
        .iter()
        .map(|&t| OpenInterestRecord {
            timestamp_ms: t,
            sum_open_interest: Some(500.0 + t as f64),
            sum_open_interest_value: Some(1_000_000.0),
        })
        .collect()
}

/// `n` hourly timestamps ending at `n * HOUR_MS`.
pub fn hourly(n: i64) -> Vec<i64> {
    (1..=n).map(|i| i * HOUR_MS).collect()
}

impl MockProvider {
    pub fn with_history(times: &[i64]) -> Self {
        Self {
            open_interest: open_interest_at(times),
            ..Default::default()
        }
    }

    pub fn aligned(pv: &[i64], funding: &[i64], oi: &[i64]) -> Self {
        Self {
            candles: Some(candles_at(pv)),
            funding: Some(funding_at(funding)),
            open_interest: open_interest_at(oi),
            ..Default::default()
        }
    }

    pub fn page_calls(&self) -> Vec<PageCall> {
        self.page_calls.lock().unwrap().clone()
    }

    pub fn candle_limits(&self) -> Vec<u32> {
        self.candle_limits.lock().unwrap().clone()
    }

    pub fn funding_limits(&self) -> Vec<u32> {
        self.funding_limits.lock().unwrap().clone()
    }
}

#[async_trait]
impl MarketDataProvider for MockProvider {
    async fn snapshot_open_interest(&self, symbol: &str) -> Result<f64> {
        match self.snapshot {
            Some(value) => Ok(value),
            None => bail!("snapshot unavailable for {}", symbol),
        }
    }

    async fn candle_history(
        &self,
        symbol: &str,
        _interval: &str,
        limit: u32,
    ) -> Result<Vec<CandleRecord>> {
        self.candle_limits.lock().unwrap().push(limit);
        match &self.candles {
            Some(candles) => {
                let skip = candles.len().saturating_sub(limit as usize);
                Ok(candles[skip..].to_vec())
            }
            None => bail!("klines request for {} failed", symbol),
        }
    }

    async fn funding_history(
        &self,
        symbol: &str,
        _interval: &str,
        limit: u32,
    ) -> Result<Vec<FundingRecord>> {
        self.funding_limits.lock().unwrap().push(limit);
        match &self.funding {
            Some(funding) => {
                let skip = funding.len().saturating_sub(limit as usize);
                Ok(funding[skip..].to_vec())
            }
            None => bail!("funding request for {} failed", symbol),
        }
    }

    async fn open_interest_page(
        &self,
        symbol: &str,
        _interval: &str,
        limit: u32,
        end_before: Option<i64>,
    ) -> Result<Vec<OpenInterestRecord>> {
        let call_no = {
            let mut calls = self.page_calls.lock().unwrap();
            calls.push(PageCall { limit, end_before });
            calls.len()
        };
        if self.oi_fail_on_page == Some(call_no) {
            bail!("open interest page {} for {} failed", call_no, symbol);
        }

        let served = self.oi_serve_cap.map_or(limit, |cap| cap.min(limit)) as usize;
        Ok(self
            .open_interest
            .iter()
            .rev()
            .filter(|r| end_before.is_none_or(|cursor| r.timestamp_ms < cursor))
            .take(served)
            .cloned()
            .collect())
    }
}
