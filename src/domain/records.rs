// Raw provider records, before projection onto canonical series points.

use crate::{
    domain::series::{TimeSeriesPoint, fields},
    utils::epoch_ms_to_utc,
};

#[derive(Debug, Clone, PartialEq)]
pub struct CandleRecord {
    pub open_time_ms: i64,
    pub close: f64,
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FundingRecord {
    pub funding_time_ms: i64,
    pub funding_rate: f64,
}

/// One open interest history entry. The exchange may omit either sum.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenInterestRecord {
    pub timestamp_ms: i64,
    pub sum_open_interest: Option<f64>,
    pub sum_open_interest_value: Option<f64>,
}

impl CandleRecord {
    pub fn to_point(&self) -> Option<TimeSeriesPoint> {
        let time = epoch_ms_to_utc(self.open_time_ms)?;
        Some(TimeSeriesPoint::new(
            time,
            [(fields::CLOSE, self.close), (fields::VOLUME, self.volume)],
        ))
    }
}

impl FundingRecord {
    pub fn to_point(&self) -> Option<TimeSeriesPoint> {
        let time = epoch_ms_to_utc(self.funding_time_ms)?;
        Some(TimeSeriesPoint::new(
            time,
            [(fields::FUNDING_RATE, self.funding_rate)],
        ))
    }
}

impl OpenInterestRecord {
    pub fn to_point(&self) -> Option<TimeSeriesPoint> {
        let time = epoch_ms_to_utc(self.timestamp_ms)?;
        Some(TimeSeriesPoint::new(
            time,
            [
                (
                    fields::OPEN_INTEREST,
                    self.sum_open_interest.unwrap_or_default(),
                ),
                (
                    fields::NOTIONAL_VALUE,
                    self.sum_open_interest_value.unwrap_or_default(),
                ),
            ],
        ))
    }
}
