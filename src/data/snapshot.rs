use crate::data::MarketDataProvider;

/// Point-in-time open interest. Errors are logged and reported as `None`.
pub async fn fetch_open_interest(provider: &dyn MarketDataProvider, symbol: &str) -> Option<f64> {
    match provider.snapshot_open_interest(symbol).await {
        Ok(value) => Some(value),
        Err(e) => {
            log::error!("Failed to fetch open interest snapshot for {}: {:#}", symbol, e);
            None
        }
    }
}
