pub struct BinanceApiConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for BinanceApiConfig {
    fn default() -> Self {
        Self {
            base_url: BINANCE.rest.base_url.to_string(),
            timeout_ms: BINANCE.client.timeout_ms,
        }
    }
}

/// USDⓈ-M futures REST endpoints.
pub struct RestEndpoints {
    pub base_url: &'static str,
    pub open_interest: &'static str,
    pub klines: &'static str,
    pub funding_rate: &'static str,
    pub open_interest_hist: &'static str,
}

/// Single-call caps imposed by the exchange.
pub struct RestLimits {
    pub klines_limit: u32,
    pub funding_limit: u32,
    pub oi_hist_page_cap: u32,
}

pub struct ClientDefaults {
    pub timeout_ms: u64,
}

pub struct BinanceConfig {
    pub rest: RestEndpoints,
    pub limits: RestLimits,
    pub client: ClientDefaults,
}

pub const BINANCE: BinanceConfig = BinanceConfig {
    rest: RestEndpoints {
        base_url: "https://fapi.binance.com",
        open_interest: "/fapi/v1/openInterest",
        klines: "/fapi/v1/klines",
        funding_rate: "/fapi/v1/fundingRate",
        open_interest_hist: "/futures/data/openInterestHist",
    },
    limits: RestLimits {
        klines_limit: 1500,
        funding_limit: 1000,
        oi_hist_page_cap: 500,
    },
    client: ClientDefaults { timeout_ms: 10_000 },
};
