use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

use crate::domain::{AlignedDataset, AlignedRow, TimeSeries};

fn timestamp_keys(series: &TimeSeries) -> BTreeSet<DateTime<Utc>> {
    series.timestamps().collect()
}

/// Strict inner join on timestamp: (price/volume ⋈ funding) ⋈ open interest.
///
/// Only timestamps present verbatim in all three series survive. Nothing is interpolated or
/// filled, so any empty input gives an empty dataset.
pub fn combine(
    price_volume: &TimeSeries,
    funding: &TimeSeries,
    open_interest: &TimeSeries,
) -> AlignedDataset {
    if price_volume.is_empty() || funding.is_empty() || open_interest.is_empty() {
        log::warn!(
            "Cannot align: price/volume {} rows, funding {} rows, open interest {} rows.",
            price_volume.len(),
            funding.len(),
            open_interest.len()
        );
        return AlignedDataset::default();
    }

    let price_funding: BTreeSet<_> = timestamp_keys(price_volume)
        .intersection(&timestamp_keys(funding))
        .copied()
        .collect();
    let shared: Vec<_> = price_funding
        .intersection(&timestamp_keys(open_interest))
        .copied()
        .collect();

    let rows: Vec<AlignedRow> = shared
        .iter()
        .filter_map(|time| {
            let row = AlignedRow::from_points(
                price_volume.get(time)?,
                funding.get(time)?,
                open_interest.get(time)?,
            );
            if row.is_none() {
                log::warn!("Dropping incomplete row at {}.", time);
            }
            row
        })
        .collect();

    log::info!(
        "Aligned {} rows from {} price/volume, {} funding and {} open interest points.",
        rows.len(),
        price_volume.len(),
        funding.len(),
        open_interest.len()
    );
    AlignedDataset::from_rows(rows)
}
