use {
    anyhow::{Context, Result},
    async_trait::async_trait,
    reqwest::{Client, StatusCode},
    serde::{Deserialize, de::DeserializeOwned},
    serde_json::Value,
    std::{error::Error, fmt, time::Duration},
};

use crate::{
    config::{BINANCE, BinanceApiConfig},
    data::MarketDataProvider,
    domain::{CandleRecord, FundingRecord, OpenInterestRecord},
};

#[derive(Debug)]
pub enum FuturesApiError {
    ConnectionFailed(String),
    HttpStatus { status: u16, body: String },
    InvalidPayload(String),
    InvalidNumber { field: &'static str, raw: String },
}

impl fmt::Display for FuturesApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FuturesApiError::ConnectionFailed(msg) => {
                write!(f, "Binance futures API connection failed: {}.", msg)
            }
            FuturesApiError::HttpStatus { status, body } => {
                write!(f, "Binance futures API returned HTTP {}: {}", status, body)
            }
            FuturesApiError::InvalidPayload(msg) => write!(f, "Invalid payload: {}", msg),
            FuturesApiError::InvalidNumber { field, raw } => {
                write!(f, "Invalid number for {}: {:?}", field, raw)
            }
        }
    }
}

impl Error for FuturesApiError {}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOpenInterest {
    open_interest: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFundingRate {
    funding_time: i64,
    funding_rate: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOpenInterestHist {
    timestamp: i64,
    #[serde(default)]
    sum_open_interest: Option<String>,
    #[serde(default)]
    sum_open_interest_value: Option<String>,
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64, FuturesApiError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| FuturesApiError::InvalidNumber {
            field,
            raw: raw.to_string(),
        })
}

// Kline cells hold prices and volumes as strings, but accept plain numbers too
fn kline_cell_to_f64(cell: Option<&Value>, field: &'static str) -> Result<f64, FuturesApiError> {
    match cell {
        Some(Value::String(s)) => parse_number(field, s),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| FuturesApiError::InvalidNumber {
            field,
            raw: n.to_string(),
        }),
        Some(other) => Err(FuturesApiError::InvalidNumber {
            field,
            raw: other.to_string(),
        }),
        None => Err(FuturesApiError::InvalidPayload(format!(
            "kline row is missing {}",
            field
        ))),
    }
}

/// `[openTime, open, high, low, close, volume, closeTime, ...]`
impl TryFrom<Vec<Value>> for CandleRecord {
    type Error = FuturesApiError;

    fn try_from(row: Vec<Value>) -> Result<Self, Self::Error> {
        let open_time_ms = row
            .first()
            .and_then(Value::as_i64)
            .ok_or_else(|| FuturesApiError::InvalidPayload("kline open_time".to_string()))?;

        Ok(CandleRecord {
            open_time_ms,
            close: kline_cell_to_f64(row.get(4), "close")?,
            volume: kline_cell_to_f64(row.get(5), "volume")?,
        })
    }
}

impl TryFrom<RawFundingRate> for FundingRecord {
    type Error = FuturesApiError;

    fn try_from(raw: RawFundingRate) -> Result<Self, Self::Error> {
        Ok(FundingRecord {
            funding_time_ms: raw.funding_time,
            funding_rate: parse_number("fundingRate", &raw.funding_rate)?,
        })
    }
}

impl TryFrom<RawOpenInterestHist> for OpenInterestRecord {
    type Error = FuturesApiError;

    fn try_from(raw: RawOpenInterestHist) -> Result<Self, Self::Error> {
        let optional = |field, value: Option<String>| {
            value.map(|s| parse_number(field, &s)).transpose()
        };
        Ok(OpenInterestRecord {
            timestamp_ms: raw.timestamp,
            sum_open_interest: optional("sumOpenInterest", raw.sum_open_interest)?,
            sum_open_interest_value: optional(
                "sumOpenInterestValue",
                raw.sum_open_interest_value,
            )?,
        })
    }
}

fn log_rejection(path: &str, status: StatusCode, body: &str) {
    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            log::warn!("{} Rate limit exceeded. Please wait and try again. {}", path, body);
        }
        StatusCode::IM_A_TEAPOT => {
            log::error!("{} IP address banned due to excessive rate limits. {}", path, body);
        }
        s if s.is_client_error() => {
            log::warn!("{} Bad request: Verify your input parameters. {}", path, body);
        }
        s => {
            log::error!("{} Server error: {} (status code: {})", path, body, s);
        }
    }
}

/// REST client for Binance USDⓈ-M perpetual futures. Public market data only, so no keys.
pub struct BinanceFuturesProvider {
    client: Client,
    base_url: String,
}

impl BinanceFuturesProvider {
    pub fn new(config: BinanceApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &'static str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                log::error!("{} Network error: Check your internet connection. {}", path, e);
                FuturesApiError::ConnectionFailed(e.to_string())
            })
            .with_context(|| format!("GET {} failed", path))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log_rejection(path, status, &body);
            return Err(anyhow::Error::new(FuturesApiError::HttpStatus {
                status: status.as_u16(),
                body,
            })
            .context(format!("GET {} rejected", path)));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FuturesApiError::InvalidPayload(e.to_string()))
            .with_context(|| format!("Could not decode response of GET {}", path))
    }
}

#[async_trait]
impl MarketDataProvider for BinanceFuturesProvider {
    async fn snapshot_open_interest(&self, symbol: &str) -> Result<f64> {
        let query = [("symbol", symbol.to_string())];
        let raw: RawOpenInterest = self.get_json(BINANCE.rest.open_interest, &query).await?;
        Ok(parse_number("openInterest", &raw.open_interest)?)
    }

    async fn candle_history(
        &self,
        symbol: &str,
        interval: &str,
        limit: u32,
    ) -> Result<Vec<CandleRecord>> {
        if limit > BINANCE.limits.klines_limit {
            log::warn!(
                "{} klines limit {} exceeds the single-call cap of {}.",
                symbol,
                limit,
                BINANCE.limits.klines_limit
            );
        }
        let query = [
            ("symbol", symbol.to_string()),
            ("interval", interval.to_string()),
            ("limit", limit.to_string()),
        ];
        let rows: Vec<Vec<Value>> = self.get_json(BINANCE.rest.klines, &query).await?;
        let candles = rows
            .into_iter()
            .map(CandleRecord::try_from)
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("{} {} klines conversion failed", symbol, interval))?;
        Ok(candles)
    }

    async fn funding_history(
        &self,
        symbol: &str,
        interval: &str,
        limit: u32,
    ) -> Result<Vec<FundingRecord>> {
        // Funding settles on the exchange's own schedule; the interval does not filter anything here
        log::debug!("{} funding history requested for interval {}", symbol, interval);
        if limit > BINANCE.limits.funding_limit {
            log::warn!(
                "{} funding limit {} exceeds the single-call cap of {}.",
                symbol,
                limit,
                BINANCE.limits.funding_limit
            );
        }
        let query = [("symbol", symbol.to_string()), ("limit", limit.to_string())];
        let raw: Vec<RawFundingRate> = self.get_json(BINANCE.rest.funding_rate, &query).await?;
        let records = raw
            .into_iter()
            .map(FundingRecord::try_from)
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("{} funding conversion failed", symbol))?;
        Ok(records)
    }

    async fn open_interest_page(
        &self,
        symbol: &str,
        interval: &str,
        limit: u32,
        end_before: Option<i64>,
    ) -> Result<Vec<OpenInterestRecord>> {
        let mut query = vec![
            ("symbol", symbol.to_string()),
            ("period", interval.to_string()),
            ("limit", limit.to_string()),
        ];
        // endTime is inclusive on the exchange side
        if let Some(cursor) = end_before {
            query.push(("endTime", (cursor - 1).to_string()));
        }

        let raw: Vec<RawOpenInterestHist> = self
            .get_json(BINANCE.rest.open_interest_hist, &query)
            .await?;
        let mut records = raw
            .into_iter()
            .map(OpenInterestRecord::try_from)
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("{} {} open interest conversion failed", symbol, interval))?;

        // Exchange answers oldest first
        records.sort_by(|a, b| b.timestamp_ms.cmp(&a.timestamp_ms));
        Ok(records)
    }
}
