//! Binance REST trading client.
//!
//! [`BinanceTrader`] covers a small, fixed set of endpoints:
//!
//! - **Market data** (public): order book, historical trades
//! - **Account** (signed): free balances, single-asset balance lookup
//! - **Orders** (signed): place market/limit orders, query status, cancel
//!
//! Signed calls carry `timestamp`, `recvWindow` and an HMAC-SHA256
//! `signature`; exchange errors (`msg` in the payload) surface as
//! [`BinanceRestError::Api`].
//!
//! # Example
//!
//! ```rust,ignore
//! use binance_rest::{BinanceTrader, OrderRequest, OrderSide, TraderConfig};
//! use rust_decimal_macros::dec;
//!
//! let trader = BinanceTrader::new(TraderConfig::from_file("settings.ini")?)?;
//!
//! let book = trader.order_book("ETH", "BTC").await?;
//! let eth = trader.balance("ETH").await?;
//!
//! let order = OrderRequest::limit(OrderSide::Buy, "ETH", dec!(1.55), dec!(0.04));
//! let placed = trader.place_order(&order).await?;
//! ```

mod client;
mod config;
mod error;
mod order;
mod responses;

#[cfg(test)]
mod testing;

pub use client::{BinanceTrader, DEFAULT_TRADES_LIMIT, MAX_TRADES_LIMIT};
pub use config::TraderConfig;
pub use error::BinanceRestError;
pub use order::{market_symbol, OrderKind, OrderRequest, OrderSide, DEFAULT_QUOTE_ASSET};
pub use responses::{Balance, Balances};

pub use auth::{ApiCredentials, RecvWindow};
pub use common::BinanceEnvironment;
pub use rest_client::ApiResponse;
