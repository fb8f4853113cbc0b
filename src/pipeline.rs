//! The single fetch-and-align pass handed to renderers and the CLI.

use crate::{
    analysis::{calculate_limits, combine},
    config::DEFAULTS,
    data::{MarketDataProvider, candles, funding, history_pager},
    domain::AlignedDataset,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedDataRequest {
    pub symbol: String,
    pub interval: String,
    pub funding_limit: u32,
    pub oi_limit: u32,
    pub price_volume_limit: u32,
}

impl Default for CombinedDataRequest {
    fn default() -> Self {
        Self {
            symbol: DEFAULTS.symbol.to_string(),
            interval: DEFAULTS.interval.to_string(),
            funding_limit: DEFAULTS.funding_limit,
            oi_limit: DEFAULTS.oi_limit,
            price_volume_limit: DEFAULTS.price_volume_limit,
        }
    }
}

/// Fetch candles, funding rates and open interest history one after another, then inner-join
/// them on timestamp.
///
/// Never fails: a stream whose fetch failed contributes an empty series, which empties the
/// result. Callers should check [`AlignedDataset::is_empty`].
pub async fn fetch_combined_data(
    provider: &dyn MarketDataProvider,
    request: &CombinedDataRequest,
) -> AlignedDataset {
    let CombinedDataRequest {
        symbol,
        interval,
        funding_limit,
        oi_limit,
        price_volume_limit,
    } = request;

    let limits = calculate_limits(interval, *funding_limit, *oi_limit, *price_volume_limit);
    log::info!(
        "{} {}: requesting {} candles, {} funding rates, {} open interest records.",
        symbol,
        interval,
        limits.price_volume,
        funding_limit,
        limits.open_interest
    );

    let price_volume =
        candles::fetch_price_volume(provider, symbol, interval, limits.price_volume).await;
    let funding = funding::fetch_funding_rates(provider, symbol, interval, *funding_limit).await;
    let open_interest =
        history_pager::fetch_history(provider, symbol, interval, limits.open_interest).await;

    combine(
        &price_volume.into_series(),
        &funding.into_series(),
        &open_interest.into_series(),
    )
}
