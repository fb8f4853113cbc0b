//! Configuration module for perp-metrics.

// Can all be private now because we have a public re-export.
mod binance;
mod defaults;

// Re-export commonly used items
pub use binance::{BINANCE, BinanceApiConfig};
pub use defaults::DEFAULTS;
