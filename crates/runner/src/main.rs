//! Walks through every trader operation against the live API.
//!
//! Usage: `binance-trader [settings-file] [--place-orders]`
//!
//! Public endpoints always run. Account endpoints run when the settings file
//! holds `apiKey` and `secretKey`. Orders are only sent with `--place-orders`.

use binance_rest::{
    BinanceRestError, BinanceTrader, OrderRequest, OrderSide, TraderConfig, DEFAULT_TRADES_LIMIT,
};
use rust_decimal_macros::dec;
use tracing::{error, info, warn};

const DEFAULT_SETTINGS_PATH: &str = "settings.ini";

/// Order id used by the status and cancel walkthrough.
const EXAMPLE_ORDER_ID: u64 = 123_456;

#[tokio::main]
async fn main() {
    common::init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let place_orders = args.iter().any(|arg| arg == "--place-orders");
    let settings_path = args
        .iter()
        .find(|arg| !arg.starts_with("--"))
        .map(String::as_str)
        .unwrap_or(DEFAULT_SETTINGS_PATH);

    if let Err(e) = run(settings_path, place_orders).await {
        error!(error = %e, "Walkthrough failed");
        std::process::exit(1);
    }
}

async fn run(settings_path: &str, place_orders: bool) -> Result<(), BinanceRestError> {
    let config = TraderConfig::from_file(settings_path)?;
    let authenticated = config.credentials.is_some();
    let trader = BinanceTrader::new(config)?;

    info!(trader = ?trader, "Trader ready");

    // Public endpoints
    let order_book = trader.order_book("ETH", "BTC").await?;
    println!("ETHBTC order book: {}", order_book);

    let trades = trader
        .historical_trades("ETH", "BTC", DEFAULT_TRADES_LIMIT)
        .await?;
    println!(
        "ETHBTC historical trades: {}",
        trades.as_array().map_or(0, Vec::len)
    );

    if !authenticated {
        warn!(path = %settings_path, "No API keys in settings, skipping account endpoints");
        return Ok(());
    }

    // Account endpoints
    println!("Free ETH: {}", trader.balance("ETH").await?);

    for balance in trader.balances().await? {
        println!("{:>8} {}", balance.asset, balance.balance);
    }

    if !place_orders {
        info!("Pass --place-orders to place, query and cancel orders");
        return Ok(());
    }

    // Order endpoints
    let order = OrderRequest::limit(OrderSide::Buy, "ETH", dec!(1.55), dec!(0.04));
    let placed = trader.place_order(&order).await?;
    println!("Placed: {}", placed);

    let status = trader.order_status(EXAMPLE_ORDER_ID, "XRP", "ETH").await?;
    println!("Status: {}", status);

    let canceled = trader.cancel_order(EXAMPLE_ORDER_ID, "XRP", "ETH").await?;
    println!("Canceled: {}", canceled);

    Ok(())
}
