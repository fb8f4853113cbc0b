#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalClass {
    /// `1h`, `2h`, `4h`: open interest and candles are capped by each other and by funding depth.
    ShortPeriod,
    /// `8h`
    LongPeriod,
    /// Anything else. Limits pass through exactly as for `8h`.
    Other,
}

impl IntervalClass {
    pub fn of(interval: &str) -> Self {
        match interval {
            "1h" | "2h" | "4h" => IntervalClass::ShortPeriod,
            "8h" => IntervalClass::LongPeriod,
            _ => IntervalClass::Other,
        }
    }
}

/// Records to request per stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchLimits {
    pub open_interest: u32,
    pub price_volume: u32,
}

impl From<FetchLimits> for (u32, u32) {
    fn from(limits: FetchLimits) -> Self {
        (limits.open_interest, limits.price_volume)
    }
}

pub fn calculate_limits(
    interval: &str,
    funding_limit: u32,
    oi_limit: u32,
    price_volume_limit: u32,
) -> FetchLimits {
    match IntervalClass::of(interval) {
        IntervalClass::ShortPeriod => FetchLimits {
            open_interest: oi_limit.min(price_volume_limit),
            price_volume: price_volume_limit.min(funding_limit),
        },
        IntervalClass::LongPeriod | IntervalClass::Other => FetchLimits {
            open_interest: oi_limit,
            price_volume: price_volume_limit,
        },
    }
}
