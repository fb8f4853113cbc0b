/// What a run fetches when the command line doesn't say otherwise.
pub struct RunDefaults {
    pub symbol: &'static str,
    pub interval: &'static str,
    pub funding_limit: u32,
    pub oi_limit: u32,
    pub price_volume_limit: u32,
}

pub const DEFAULTS: RunDefaults = RunDefaults {
    symbol: "ETHUSDT",
    interval: "1h",
    funding_limit: 1000, // funding history is always requested at this depth
    oi_limit: 500,
    price_volume_limit: 1000,
};
