use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::series::{TimeSeriesPoint, fields};

/// One joined observation: every field from all three sources at a shared timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedRow {
    pub time: DateTime<Utc>,
    pub close: f64,
    pub volume: f64,
    #[serde(rename = "fundingRate")]
    pub funding_rate: f64,
    pub open_interest: f64,
    pub notional_value: f64,
}

impl AlignedRow {
    /// Assemble a row from the three matching points. `None` if any source lacks one of its fields.
    pub(crate) fn from_points(
        price_volume: &TimeSeriesPoint,
        funding: &TimeSeriesPoint,
        open_interest: &TimeSeriesPoint,
    ) -> Option<Self> {
        debug_assert_eq!(price_volume.time, funding.time);
        debug_assert_eq!(price_volume.time, open_interest.time);

        Some(Self {
            time: price_volume.time,
            close: price_volume.get(fields::CLOSE)?,
            volume: price_volume.get(fields::VOLUME)?,
            funding_rate: funding.get(fields::FUNDING_RATE)?,
            open_interest: open_interest.get(fields::OPEN_INTEREST)?,
            notional_value: open_interest.get(fields::NOTIONAL_VALUE)?,
        })
    }
}

/// Result of the inner join. Empty means the sources had no timestamp in common.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AlignedDataset {
    rows: Vec<AlignedRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub rows: usize,
    pub first: DateTime<Utc>,
    pub last: DateTime<Utc>,
    pub close_range: (f64, f64),
    pub open_interest_range: (f64, f64),
}

impl AlignedDataset {
    pub(crate) fn from_rows(rows: Vec<AlignedRow>) -> Self {
        debug_assert!(rows.windows(2).all(|w| w[0].time < w[1].time));
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[AlignedRow] {
        &self.rows
    }

    pub fn timestamps(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.rows.iter().map(|r| r.time)
    }

    /// The most recent `n` rows, still in ascending order.
    pub fn tail(&self, n: usize) -> &[AlignedRow] {
        let start = self.rows.len().saturating_sub(n);
        &self.rows[start..]
    }

    pub fn summary(&self) -> Option<DatasetSummary> {
        let first = self.rows.first()?;
        let last = self.rows.last()?;

        let range = |pick: fn(&AlignedRow) -> f64| {
            self.rows
                .iter()
                .map(pick)
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                    (lo.min(v), hi.max(v))
                })
        };

        Some(DatasetSummary {
            rows: self.rows.len(),
            first: first.time,
            last: last.time,
            close_range: range(|r| r.close),
            open_interest_range: range(|r| r.open_interest),
        })
    }
}
