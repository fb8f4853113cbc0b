use std::fmt;

use crate::domain::{TimeSeries, TimeSeriesPoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    PriceVolume,
    Funding,
    OpenInterest,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Stream::PriceVolume => write!(f, "price/volume"),
            Stream::Funding => write!(f, "funding rate"),
            Stream::OpenInterest => write!(f, "open interest"),
        }
    }
}

/// What a fetch step produced. Provider errors stop here as `Failed`; they are never returned as `Err`.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesFetch {
    Data(TimeSeries),
    NoData,
    Failed { stream: Stream, reason: String },
}

impl SeriesFetch {
    pub(crate) fn from_points(points: Vec<TimeSeriesPoint>) -> Self {
        if points.is_empty() {
            SeriesFetch::NoData
        } else {
            SeriesFetch::Data(TimeSeries::from_points(points))
        }
    }

    pub(crate) fn failed(stream: Stream, err: &anyhow::Error) -> Self {
        log::error!("Failed to fetch {} data: {:#}", stream, err);
        SeriesFetch::Failed {
            stream,
            reason: format!("{:#}", err),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SeriesFetch::Failed { .. })
    }

    pub fn series(&self) -> Option<&TimeSeries> {
        match self {
            SeriesFetch::Data(series) => Some(series),
            _ => None,
        }
    }

    /// Collapse to a series; `NoData` and `Failed` both become empty.
    pub fn into_series(self) -> TimeSeries {
        match self {
            SeriesFetch::Data(series) => series,
            SeriesFetch::NoData | SeriesFetch::Failed { .. } => TimeSeries::empty(),
        }
    }
}

/// Drops records whose timestamp could not be converted, logging how many.
pub(crate) fn keep_valid_points<I>(stream: Stream, points: I) -> Vec<TimeSeriesPoint>
where
    I: IntoIterator<Item = Option<TimeSeriesPoint>>,
{
    let mut skipped = 0usize;
    let kept: Vec<TimeSeriesPoint> = points
        .into_iter()
        .filter_map(|p| {
            if p.is_none() {
                skipped += 1;
            }
            p
        })
        .collect();

    if skipped > 0 {
        log::warn!(
            "Skipped {} {} record(s) with out-of-range timestamps.",
            skipped,
            stream
        );
    }
    kept
}
