use crate::{
    data::{
        MarketDataProvider,
        outcome::{SeriesFetch, Stream, keep_valid_points},
    },
    domain::CandleRecord,
};

/// One capped klines call projected to `close` and `volume`.
pub async fn fetch_price_volume(
    provider: &dyn MarketDataProvider,
    symbol: &str,
    interval: &str,
    limit: u32,
) -> SeriesFetch {
    if limit == 0 {
        return SeriesFetch::NoData;
    }

    match provider.candle_history(symbol, interval, limit).await {
        Ok(records) => {
            log::info!("{} {}: received {} candles.", symbol, interval, records.len());
            let points = keep_valid_points(
                Stream::PriceVolume,
                records.iter().map(CandleRecord::to_point),
            );
            SeriesFetch::from_points(points)
        }
        Err(e) => SeriesFetch::failed(Stream::PriceVolume, &e),
    }
}
