// Domain types and value objects
mod aligned;
mod records;
mod series;

// Re-export commonly used types to the world
pub use aligned::{AlignedDataset, AlignedRow, DatasetSummary};
pub use records::{CandleRecord, FundingRecord, OpenInterestRecord};
pub use series::{TimeSeries, TimeSeriesPoint, fields};
