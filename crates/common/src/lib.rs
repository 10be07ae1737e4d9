//! Shared building blocks for the Binance trader crates.
//!
//! - [`BinanceEnvironment`]: production or testnet REST host selection
//! - [`RequestParams`]: insertion-ordered request parameters with form encoding
//! - [`init_logging`]: `tracing` subscriber setup for binaries

mod environment;
mod params;

pub use environment::{BinanceEnvironment, ParseEnvironmentError};
pub use params::{ParamValue, RequestParams};

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// The filter is read from `RUST_LOG` and falls back to `info`. Calling this
/// more than once is harmless; later calls are ignored.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
