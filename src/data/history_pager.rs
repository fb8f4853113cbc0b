use crate::{
    config::BINANCE,
    data::{
        MarketDataProvider,
        outcome::{SeriesFetch, Stream, keep_valid_points},
    },
    domain::OpenInterestRecord,
};

/// Open interest history of up to `total_limit` records, walked backward in exchange-capped pages.
pub async fn fetch_history(
    provider: &dyn MarketDataProvider,
    symbol: &str,
    interval: &str,
    total_limit: u32,
) -> SeriesFetch {
    fetch_history_paged(
        provider,
        symbol,
        interval,
        total_limit,
        BINANCE.limits.oi_hist_page_cap,
    )
    .await
}

/// Pages are requested newest first. Each page ends just before the oldest record of the
/// previous one. Stops when `total_limit` records have arrived or the provider returns an
/// empty page. A short page is not treated as the end.
pub async fn fetch_history_paged(
    provider: &dyn MarketDataProvider,
    symbol: &str,
    interval: &str,
    total_limit: u32,
    page_cap: u32,
) -> SeriesFetch {
    debug_assert!(page_cap > 0);

    let mut remaining = i64::from(total_limit);
    let mut cursor: Option<i64> = None;
    let mut all_records: Vec<OpenInterestRecord> = Vec::new();
    let mut pages = 0usize;

    while remaining > 0 {
        let page_size = u32::try_from(remaining).map_or(page_cap, |r| r.min(page_cap));

        let page = match provider
            .open_interest_page(symbol, interval, page_size, cursor)
            .await
        {
            Ok(page) => page,
            Err(e) => return SeriesFetch::failed(Stream::OpenInterest, &e),
        };
        pages += 1;

        let Some(oldest) = page.last() else {
            log::info!(
                "{} {}: no more open interest history after {} page(s).",
                symbol,
                interval,
                pages
            );
            break;
        };

        let next_cursor = oldest.timestamp_ms;
        if let Some(prev) = cursor {
            if next_cursor >= prev {
                log::warn!(
                    "{} {}: open interest page did not move backward (cursor {} -> {}).",
                    symbol,
                    interval,
                    prev,
                    next_cursor
                );
            }
        }

        log::debug!(
            "{} {}: page {} asked {} got {} (cursor -> {}).",
            symbol,
            interval,
            pages,
            page_size,
            page.len(),
            next_cursor
        );

        remaining -= page.len() as i64;
        cursor = Some(next_cursor);
        all_records.extend(page);
    }

    if all_records.is_empty() {
        log::warn!("{} {}: no open interest history retrieved.", symbol, interval);
    }

    let points = keep_valid_points(
        Stream::OpenInterest,
        all_records.iter().map(OpenInterestRecord::to_point),
    );
    SeriesFetch::from_points(points)
}
