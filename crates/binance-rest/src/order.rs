//! Order parameters for `POST /api/v3/order`.

use crate::error::BinanceRestError;
use common::RequestParams;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::str::FromStr;

/// Quote asset used when the caller does not name one.
pub const DEFAULT_QUOTE_ASSET: &str = "BTC";

/// Decimal places sent for limit prices.
const PRICE_DECIMALS: u32 = 8;

/// Exchange symbol for a pair: base followed by quote, e.g. `ETHBTC`.
pub fn market_symbol(base: &str, quote: &str) -> String {
    format!("{}{}", base, quote)
}

/// Fixed-point price text with exactly eight decimals, rounding half away from zero.
fn format_price(price: Decimal) -> String {
    let mut fixed =
        price.round_dp_with_strategy(PRICE_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
    fixed.rescale(PRICE_DECIMALS);
    fixed.to_string()
}

/// Order side (buy or sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// Convert to Binance string representation.
    pub fn as_binance_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_binance_str())
    }
}

impl FromStr for OrderSide {
    type Err = BinanceRestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(Self::Buy),
            "SELL" => Ok(Self::Sell),
            _ => Err(BinanceRestError::InvalidConfig(format!(
                "invalid order side '{}', the accepted order sides are: BUY, SELL",
                s
            ))),
        }
    }
}

/// How the order is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKind {
    /// Fill at the current market price.
    Market,
    /// Good-till-cancelled limit order at the given price.
    Limit(Decimal),
}

/// A new order for [`crate::BinanceTrader::place_order`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    pub side: OrderSide,
    pub base: String,
    pub quote: String,
    pub quantity: Decimal,
    pub kind: OrderKind,
}

impl OrderRequest {
    /// Market order against the default quote asset.
    pub fn market(side: OrderSide, base: impl Into<String>, quantity: Decimal) -> Self {
        Self {
            side,
            base: base.into(),
            quote: DEFAULT_QUOTE_ASSET.to_string(),
            quantity,
            kind: OrderKind::Market,
        }
    }

    /// Limit order against the default quote asset.
    pub fn limit(
        side: OrderSide,
        base: impl Into<String>,
        quantity: Decimal,
        price: Decimal,
    ) -> Self {
        Self {
            kind: OrderKind::Limit(price),
            ..Self::market(side, base, quantity)
        }
    }

    /// Trade against another quote asset.
    pub fn with_quote(mut self, quote: impl Into<String>) -> Self {
        self.quote = quote.into();
        self
    }

    pub fn symbol(&self) -> String {
        market_symbol(&self.base, &self.quote)
    }

    /// Reject non-positive quantities and prices.
    pub fn validate(&self) -> Result<(), BinanceRestError> {
        if self.quantity <= Decimal::ZERO {
            return Err(BinanceRestError::InvalidConfig(format!(
                "order quantity must be positive, got {}",
                self.quantity
            )));
        }
        if let OrderKind::Limit(price) = self.kind {
            if price <= Decimal::ZERO {
                return Err(BinanceRestError::InvalidConfig(format!(
                    "limit price must be positive, got {}",
                    price
                )));
            }
        }
        Ok(())
    }

    /// Unsigned request parameters, in the order they are signed and sent.
    pub fn order_params(&self) -> RequestParams {
        let params = RequestParams::new()
            .with("symbol", self.symbol())
            .with("side", self.side.as_binance_str());

        match self.kind {
            OrderKind::Market => params
                .with("type", "MARKET")
                .with("quantity", self.quantity),
            OrderKind::Limit(price) => params
                .with("type", "LIMIT")
                .with("quantity", self.quantity)
                .with("price", format_price(price))
                .with("timeInForce", "GTC"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::ParamValue;
    use rust_decimal_macros::dec;

    #[test]
    fn test_side_parsing() {
        assert_eq!("BUY".parse::<OrderSide>().unwrap(), OrderSide::Buy);
        assert_eq!("SELL".parse::<OrderSide>().unwrap(), OrderSide::Sell);

        for side in ["HOLD", "buy", "Sell", ""] {
            let err = side.parse::<OrderSide>().unwrap_err();
            assert!(err.is_config_error(), "side {:?}", side);
        }
        assert!("HOLD".parse::<OrderSide>().unwrap_err().to_string().contains("HOLD"));
    }

    #[test]
    fn test_market_order_params() {
        let order = OrderRequest::market(OrderSide::Sell, "ETH", dec!(2));
        let params = order.order_params();

        assert_eq!(
            params.keys().collect::<Vec<_>>(),
            ["symbol", "side", "type", "quantity"]
        );
        assert_eq!(params.get("symbol"), Some(&ParamValue::Str("ETHBTC".into())));
        assert_eq!(params.get("side"), Some(&ParamValue::Str("SELL".into())));
        assert_eq!(params.get("type"), Some(&ParamValue::Str("MARKET".into())));
        assert!(!params.contains_key("price"));
        assert!(!params.contains_key("timeInForce"));
    }

    #[test]
    fn test_limit_order_params() {
        let order = OrderRequest::limit(OrderSide::Buy, "ETH", dec!(1.55), dec!(0.04));
        let params = order.order_params();

        assert_eq!(
            params.to_query_string(),
            "symbol=ETHBTC&side=BUY&type=LIMIT&quantity=1.55&price=0.04000000&timeInForce=GTC"
        );
    }

    #[test]
    fn test_limit_price_has_exactly_eight_decimals() {
        let cases = [
            (dec!(1), "1.00000000"),
            (dec!(0.123456789), "0.12345679"),
            (dec!(25000.5), "25000.50000000"),
            (dec!(0.000000005), "0.00000001"),
        ];

        for (price, expected) in cases {
            let order =
                OrderRequest::limit(OrderSide::Buy, "BTC", dec!(1), price).with_quote("USDT");
            assert_eq!(
                order.order_params().get("price"),
                Some(&ParamValue::Str(expected.into())),
                "price {}",
                price
            );
        }
    }

    #[test]
    fn test_with_quote() {
        let order = OrderRequest::market(OrderSide::Buy, "XRP", dec!(10)).with_quote("ETH");
        assert_eq!(order.symbol(), "XRPETH");
    }

    #[test]
    fn test_validate() {
        assert!(OrderRequest::market(OrderSide::Buy, "ETH", dec!(1)).validate().is_ok());
        assert!(OrderRequest::market(OrderSide::Buy, "ETH", dec!(0))
            .validate()
            .is_err());
        assert!(OrderRequest::limit(OrderSide::Buy, "ETH", dec!(1), dec!(-1))
            .validate()
            .is_err());
    }
}
