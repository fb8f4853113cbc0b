use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Canonical field names carried by the per-stream series.
pub mod fields {
    pub const CLOSE: &str = "close";
    pub const VOLUME: &str = "volume";
    pub const FUNDING_RATE: &str = "fundingRate";
    pub const OPEN_INTEREST: &str = "open_interest";
    pub const NOTIONAL_VALUE: &str = "notional_value";
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesPoint {
    pub time: DateTime<Utc>,
    pub fields: BTreeMap<&'static str, f64>,
}

impl TimeSeriesPoint {
    pub fn new<I>(time: DateTime<Utc>, fields: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, f64)>,
    {
        Self {
            time,
            fields: fields.into_iter().collect(),
        }
    }

    pub fn get(&self, field: &str) -> Option<f64> {
        self.fields.get(field).copied()
    }
}

/// Ordered points of a single stream. Timestamps are unique and strictly increasing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    points: Vec<TimeSeriesPoint>,
}

impl TimeSeries {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sorts by timestamp and keeps the first point seen for any repeated timestamp.
    pub fn from_points(mut points: Vec<TimeSeriesPoint>) -> Self {
        let received = points.len();
        // Stable sort so "first seen" survives the dedup below
        points.sort_by_key(|p| p.time);
        points.dedup_by_key(|p| p.time);

        let dropped = received - points.len();
        if dropped > 0 {
            log::warn!("Dropped {} point(s) with duplicate timestamps.", dropped);
        }
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    pub fn timestamps(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.points.iter().map(|p| p.time)
    }

    pub fn get(&self, time: &DateTime<Utc>) -> Option<&TimeSeriesPoint> {
        self.points
            .binary_search_by_key(time, |p| p.time)
            .ok()
            .map(|idx| &self.points[idx])
    }

    pub fn first_time(&self) -> Option<DateTime<Utc>> {
        self.points.first().map(|p| p.time)
    }

    pub fn last_time(&self) -> Option<DateTime<Utc>> {
        self.points.last().map(|p| p.time)
    }
}
