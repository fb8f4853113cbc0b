use crate::{
    data::{
        MarketDataProvider,
        outcome::{SeriesFetch, Stream, keep_valid_points},
    },
    domain::FundingRecord,
};

pub async fn fetch_funding_rates(
    provider: &dyn MarketDataProvider,
    symbol: &str,
    interval: &str,
    limit: u32,
) -> SeriesFetch {
    if limit == 0 {
        return SeriesFetch::NoData;
    }

    match provider.funding_history(symbol, interval, limit).await {
        Ok(records) => {
            log::info!("{}: received {} funding observations.", symbol, records.len());
            let points = keep_valid_points(
                Stream::Funding,
                records.iter().map(FundingRecord::to_point),
            );
            SeriesFetch::from_points(points)
        }
        Err(e) => SeriesFetch::failed(Stream::Funding, &e),
    }
}
