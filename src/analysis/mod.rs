pub mod aligner;
pub mod limits;

pub use aligner::combine;
pub use limits::{FetchLimits, IntervalClass, calculate_limits};
