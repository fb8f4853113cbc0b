mod binance_futures;
mod outcome;
mod provider;

pub mod candles;
pub mod funding;
pub mod history_pager;
pub mod snapshot;

pub use {
    binance_futures::{BinanceFuturesProvider, FuturesApiError},
    outcome::{SeriesFetch, Stream},
    provider::MarketDataProvider,
};
