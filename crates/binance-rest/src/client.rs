//! Binance trading client.

use crate::config::TraderConfig;
use crate::error::BinanceRestError;
use crate::order::{market_symbol, OrderRequest};
use crate::responses::Balances;
use auth::{ApiCredentials, RecvWindow, RequestSigner};
use common::{BinanceEnvironment, RequestParams};
use rest_client::{ApiResponse, HttpMethod, HttpTransport, RestClient};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;

/// Request timeout for Binance API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Conventional `limit` for [`BinanceTrader::historical_trades`].
pub const DEFAULT_TRADES_LIMIT: u32 = 500;

/// Largest `limit` accepted by the historical trades endpoint.
pub const MAX_TRADES_LIMIT: u32 = 1000;

const DEPTH_PATH: &str = "/api/v1/depth";
const HISTORICAL_TRADES_PATH: &str = "/api/v1/historicalTrades";
const ACCOUNT_PATH: &str = "/api/v3/account";
const ORDER_PATH: &str = "/api/v3/order";

/// Binance REST client: public market data plus signed account and order calls.
///
/// Every operation performs at most one HTTP round-trip. Inputs that can be
/// checked locally are rejected before the network is touched.
pub struct BinanceTrader {
    client: RestClient,
    credentials: Option<ApiCredentials>,
    recv_window: RecvWindow,
    environment: BinanceEnvironment,
}

impl BinanceTrader {
    /// Create a trader over HTTPS for the configured environment.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: TraderConfig) -> Result<Self, BinanceRestError> {
        let client = RestClient::new(config.environment.rest_base_url(), REQUEST_TIMEOUT)?;
        Ok(Self::with_client(client, config))
    }

    /// Trader for public endpoints only (order book, historical trades).
    pub fn public() -> Result<Self, BinanceRestError> {
        Self::new(TraderConfig::public())
    }

    /// Create a trader over a custom transport.
    pub fn with_transport(config: TraderConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let client = RestClient::with_transport(config.environment.rest_base_url(), transport);
        Self::with_client(client, config)
    }

    fn with_client(client: RestClient, config: TraderConfig) -> Self {
        Self {
            client,
            credentials: config.credentials,
            recv_window: config.recv_window,
            environment: config.environment,
        }
    }

    /// Get the environment this trader talks to.
    pub fn environment(&self) -> BinanceEnvironment {
        self.environment
    }

    pub fn recv_window(&self) -> RecvWindow {
        self.recv_window
    }

    /// Get the API key, if the trader is authenticated.
    pub fn api_key(&self) -> Option<&str> {
        self.credentials.as_ref().map(ApiCredentials::api_key)
    }

    // ========================================================================
    // Market Data
    // ========================================================================

    /// Get the order book for a pair.
    ///
    /// GET /api/v1/depth
    pub async fn order_book(
        &self,
        base: &str,
        quote: &str,
    ) -> Result<ApiResponse, BinanceRestError> {
        let symbol = market_symbol(base, quote);
        tracing::debug!(symbol = %symbol, "Fetching order book");

        let params = RequestParams::new().with("symbol", symbol);
        self.public_get(DEPTH_PATH, &params).await
    }

    /// Get recent historical trades for a pair.
    ///
    /// GET /api/v1/historicalTrades
    ///
    /// # Errors
    /// `InvalidConfig` if `limit` is outside 1..=1000.
    pub async fn historical_trades(
        &self,
        base: &str,
        quote: &str,
        limit: u32,
    ) -> Result<ApiResponse, BinanceRestError> {
        if !(1..=MAX_TRADES_LIMIT).contains(&limit) {
            return Err(BinanceRestError::InvalidConfig(format!(
                "the acceptable limit range is from 1 to {}, got {}",
                MAX_TRADES_LIMIT, limit
            )));
        }

        let symbol = market_symbol(base, quote);
        tracing::debug!(symbol = %symbol, limit = limit, "Fetching historical trades");

        let params = RequestParams::new()
            .with("symbol", symbol)
            .with("limit", limit);
        self.public_get(HISTORICAL_TRADES_PATH, &params).await
    }

    // ========================================================================
    // Account
    // ========================================================================

    /// Get the free balance of every asset in the account.
    ///
    /// GET /api/v3/account
    pub async fn balances(&self) -> Result<Balances, BinanceRestError> {
        let account = self
            .signed(HttpMethod::Get, ACCOUNT_PATH, RequestParams::new())
            .await?;

        Balances::from_account(account)
    }

    /// Get the free balance of one asset.
    ///
    /// # Errors
    /// `AssetNotFound` if the account does not list the asset.
    pub async fn balance(&self, asset: &str) -> Result<Decimal, BinanceRestError> {
        self.balances()
            .await?
            .find(|entry| entry.asset == asset)
            .map(|entry| entry.balance)
            .ok_or_else(|| BinanceRestError::AssetNotFound(asset.to_string()))
    }

    // ========================================================================
    // Order Management
    // ========================================================================

    /// Place a new order.
    ///
    /// POST /api/v3/order
    pub async fn place_order(
        &self,
        order: &OrderRequest,
    ) -> Result<ApiResponse, BinanceRestError> {
        order.validate()?;

        tracing::info!(
            symbol = %order.symbol(),
            side = %order.side,
            kind = ?order.kind,
            quantity = %order.quantity,
            "Placing order"
        );

        let response = self
            .signed(HttpMethod::Post, ORDER_PATH, order.order_params())
            .await?;

        tracing::info!(order_id = ?response.get("orderId"), "Order placed");

        Ok(response)
    }

    /// Query an order by exchange order ID.
    ///
    /// GET /api/v3/order
    pub async fn order_status(
        &self,
        order_id: u64,
        base: &str,
        quote: &str,
    ) -> Result<ApiResponse, BinanceRestError> {
        self.manage_order(order_id, base, quote, HttpMethod::Get).await
    }

    /// Cancel an order by exchange order ID.
    ///
    /// DELETE /api/v3/order
    pub async fn cancel_order(
        &self,
        order_id: u64,
        base: &str,
        quote: &str,
    ) -> Result<ApiResponse, BinanceRestError> {
        tracing::info!(
            order_id = order_id,
            symbol = %market_symbol(base, quote),
            "Canceling order"
        );

        let response = self
            .manage_order(order_id, base, quote, HttpMethod::Delete)
            .await?;

        tracing::info!(
            order_id = order_id,
            status = ?response.get("status"),
            "Order canceled"
        );

        Ok(response)
    }

    /// Shared assembly for order status and cancellation.
    async fn manage_order(
        &self,
        order_id: u64,
        base: &str,
        quote: &str,
        method: HttpMethod,
    ) -> Result<ApiResponse, BinanceRestError> {
        let params = RequestParams::new()
            .with("symbol", market_symbol(base, quote))
            .with("orderId", order_id);

        self.signed(method, ORDER_PATH, params).await
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    async fn public_get(
        &self,
        path: &str,
        params: &RequestParams,
    ) -> Result<ApiResponse, BinanceRestError> {
        let url = self.client.url(path, Some(&params.to_query_string()));
        let response = self
            .client
            .dispatch(HttpMethod::Get, &url, &RequestParams::new(), None)
            .await?;
        Ok(response)
    }

    /// Timestamp, sign and send. POST parameters travel in the body, GET and
    /// DELETE parameters in the query string.
    async fn signed(
        &self,
        method: HttpMethod,
        path: &str,
        params: RequestParams,
    ) -> Result<ApiResponse, BinanceRestError> {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            BinanceRestError::InvalidConfig(
                "API credentials are required for this operation".to_string(),
            )
        })?;

        let signer = RequestSigner::new(credentials, self.recv_window);
        let signed = signer.sign_timed(params);
        let api_key = Some(credentials.api_key());

        let response = match method {
            HttpMethod::Post => {
                let url = self.client.url(path, None);
                self.client.dispatch(method, &url, &signed, api_key).await?
            }
            HttpMethod::Get | HttpMethod::Delete => {
                let url = self.client.url(path, Some(&signed.to_query_string()));
                self.client
                    .dispatch(method, &url, &RequestParams::new(), api_key)
                    .await?
            }
        };

        Ok(response)
    }
}

impl std::fmt::Debug for BinanceTrader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinanceTrader")
            .field("environment", &self.environment)
            .field("base_url", &self.client.base_url())
            .field("api_key", &self.api_key())
            .field("recv_window", &self.recv_window)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::OrderSide;
    use crate::testing::MockTransport;
    use rest_client::{RestError, API_KEY_HEADER};
    use rust_decimal_macros::dec;
    use serde_json::json;

    const API_KEY: &str = "test-api-key";
    const SECRET_KEY: &str = "test-secret-key";

    fn credentials() -> ApiCredentials {
        ApiCredentials::new(API_KEY.into(), SECRET_KEY.into())
    }

    fn trader(transport: Arc<MockTransport>) -> BinanceTrader {
        BinanceTrader::with_transport(TraderConfig::new(credentials()), transport)
    }

    fn public_trader(transport: Arc<MockTransport>) -> BinanceTrader {
        BinanceTrader::with_transport(TraderConfig::public(), transport)
    }

    /// Split `<unsigned>&signature=<hex>` and check the signature matches.
    fn assert_signed(query: &str) -> &str {
        let (unsigned, signature) = query
            .rsplit_once("&signature=")
            .expect("query should carry a signature");

        let creds = credentials();
        let expected = RequestSigner::new(&creds, RecvWindow::default()).sign(unsigned);
        assert_eq!(signature, expected, "signature does not match {}", unsigned);

        unsigned
    }

    fn query_of(url: &str) -> &str {
        url.split_once('?').map(|(_, q)| q).unwrap_or("")
    }

    async fn place_with_side(
        trader: &BinanceTrader,
        side: &str,
    ) -> Result<ApiResponse, BinanceRestError> {
        let side: OrderSide = side.parse()?;
        trader
            .place_order(&OrderRequest::market(side, "ETH", dec!(1)))
            .await
    }

    #[tokio::test]
    async fn test_order_book_is_public_get() {
        let transport = MockTransport::ok(r#"{"lastUpdateId":1,"bids":[],"asks":[]}"#);
        let trader = public_trader(transport.clone());

        let book = trader.order_book("ETH", "BTC").await.unwrap();

        assert_eq!(book["lastUpdateId"], 1);
        let request = transport.only_request();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url, "https://api.binance.com/api/v1/depth?symbol=ETHBTC");
        assert_eq!(request.header(API_KEY_HEADER), None);
        assert_eq!(request.body, None);
    }

    #[tokio::test]
    async fn test_historical_trades_limit_bounds() {
        let transport = MockTransport::ok("[]");
        let trader = public_trader(transport.clone());

        for limit in [0, 1001] {
            let err = trader.historical_trades("ETH", "BTC", limit).await.unwrap_err();
            assert!(
                matches!(err, BinanceRestError::InvalidConfig(_)),
                "limit {}",
                limit
            );
        }
        assert!(transport.requests().is_empty());

        for limit in [1, 1000] {
            trader.historical_trades("ETH", "BTC", limit).await.unwrap();
        }

        let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            [
                "https://api.binance.com/api/v1/historicalTrades?symbol=ETHBTC&limit=1",
                "https://api.binance.com/api/v1/historicalTrades?symbol=ETHBTC&limit=1000",
            ]
        );
    }

    #[tokio::test]
    async fn test_historical_trades_returns_array() {
        let transport =
            MockTransport::ok(r#"[{"id":28457,"price":"4.00000100","qty":"12.00000000"}]"#);
        let trader = public_trader(transport);

        let trades = trader
            .historical_trades("ETH", "BTC", DEFAULT_TRADES_LIMIT)
            .await
            .unwrap();

        assert_eq!(trades[0]["id"], 28457);
    }

    #[tokio::test]
    async fn test_balance_lookup() {
        let transport = MockTransport::ok(r#"{"balances":[{"asset":"BTC","free":"1.5"}]}"#);
        let trader = trader(transport.clone());

        assert_eq!(trader.balance("BTC").await.unwrap(), dec!(1.5));

        let err = trader.balance("ETH").await.unwrap_err();
        assert!(matches!(err, BinanceRestError::AssetNotFound(ref asset) if asset == "ETH"));

        assert_eq!(transport.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_balances_request_is_signed() {
        let transport = MockTransport::ok(
            r#"{"balances":[{"asset":"BTC","free":"1.5"},{"asset":"ETH","free":"0.25"}]}"#,
        );
        let trader = trader(transport.clone());

        let balances: Vec<_> = trader.balances().await.unwrap().collect();
        assert_eq!(balances.len(), 2);
        assert_eq!(balances[1].asset, "ETH");
        assert_eq!(balances[1].balance, dec!(0.25));

        let request = transport.only_request();
        assert_eq!(request.method, HttpMethod::Get);
        assert!(request
            .url
            .starts_with("https://api.binance.com/api/v3/account?timestamp="));
        assert_eq!(request.header(API_KEY_HEADER), Some(API_KEY));
        assert_eq!(request.body, None);

        let unsigned = assert_signed(query_of(&request.url));
        assert!(unsigned.ends_with("&recvWindow=5000"));
        assert!(!request.url.contains(SECRET_KEY));
    }

    #[tokio::test]
    async fn test_place_limit_order_posts_signed_form() {
        let transport = MockTransport::ok(r#"{"symbol":"ETHBTC","orderId":28,"status":"NEW"}"#);
        let trader = trader(transport.clone());

        let order = OrderRequest::limit(OrderSide::Buy, "ETH", dec!(1.55), dec!(0.04));
        let response = trader.place_order(&order).await.unwrap();
        assert_eq!(response["orderId"], 28);

        let request = transport.only_request();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "https://api.binance.com/api/v3/order");
        assert_eq!(request.header(API_KEY_HEADER), Some(API_KEY));

        let body = request.body.expect("POST should carry a body");
        let unsigned = assert_signed(&body);
        assert!(unsigned.starts_with(
            "symbol=ETHBTC&side=BUY&type=LIMIT&quantity=1.55&price=0.04000000&timeInForce=GTC&timestamp="
        ));
        assert!(unsigned.ends_with("&recvWindow=5000"));
    }

    #[tokio::test]
    async fn test_place_market_order_has_no_price() {
        let transport = MockTransport::ok(r#"{"orderId":29}"#);
        let trader = trader(transport.clone());

        let order = OrderRequest::market(OrderSide::Sell, "XRP", dec!(10)).with_quote("ETH");
        trader.place_order(&order).await.unwrap();

        let body = transport.only_request().body.unwrap();
        let unsigned = assert_signed(&body);
        assert!(unsigned
            .starts_with("symbol=XRPETH&side=SELL&type=MARKET&quantity=10&timestamp="));
        assert!(!unsigned.contains("price="));
        assert!(!unsigned.contains("timeInForce="));
    }

    #[tokio::test]
    async fn test_invalid_side_makes_no_request() {
        let transport = MockTransport::ok(r#"{"orderId":1}"#);
        let trader = trader(transport.clone());

        for side in ["HOLD", "buy"] {
            let err = place_with_side(&trader, side).await.unwrap_err();
            assert!(err.is_config_error(), "side {:?}", side);
        }
        assert!(transport.requests().is_empty());

        place_with_side(&trader, "BUY").await.unwrap();
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_quantity_makes_no_request() {
        let transport = MockTransport::ok(r#"{"orderId":1}"#);
        let trader = trader(transport.clone());

        let order = OrderRequest::market(OrderSide::Buy, "ETH", dec!(0));
        assert!(trader.place_order(&order).await.unwrap_err().is_config_error());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_status_and_cancel_differ_only_in_method() {
        let transport = MockTransport::ok(r#"{"orderId":123456,"status":"CANCELED"}"#);
        let trader = trader(transport.clone());

        trader.order_status(123_456, "XRP", "ETH").await.unwrap();
        trader.cancel_order(123_456, "XRP", "ETH").await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(requests[1].method, HttpMethod::Delete);

        for request in &requests {
            assert!(request.url.starts_with(
                "https://api.binance.com/api/v3/order?symbol=XRPETH&orderId=123456&timestamp="
            ));
            assert_eq!(request.header(API_KEY_HEADER), Some(API_KEY));
            assert_eq!(request.body, None);
            assert_signed(query_of(&request.url));
        }
    }

    #[tokio::test]
    async fn test_api_error_from_every_operation() {
        let transport = MockTransport::ok(r#"{"msg":"Invalid API-key"}"#);
        let trader = trader(transport.clone());
        let order = OrderRequest::limit(OrderSide::Buy, "ETH", dec!(1), dec!(0.04));

        let results = vec![
            trader.order_book("ETH", "BTC").await,
            trader.historical_trades("ETH", "BTC", 500).await,
            trader.balances().await.map(|_| json!(null)),
            trader.balance("BTC").await.map(|_| json!(null)),
            trader.place_order(&order).await,
            trader.order_status(1, "ETH", "BTC").await,
            trader.cancel_order(1, "ETH", "BTC").await,
        ];

        for result in results {
            let err = result.unwrap_err();
            assert_eq!(err.api_message(), Some("Invalid API-key"), "{:?}", err);
        }
        assert_eq!(transport.requests().len(), 7);
    }

    #[tokio::test]
    async fn test_api_error_keeps_exchange_code() {
        let transport =
            MockTransport::with_status(400, r#"{"code":-1121,"msg":"Invalid symbol."}"#);
        let trader = public_trader(transport);

        let err = trader.order_book("FOO", "BAR").await.unwrap_err();

        assert!(matches!(
            err,
            BinanceRestError::Api { code: Some(-1121), ref message } if message == "Invalid symbol."
        ));
    }

    #[tokio::test]
    async fn test_public_trader_rejects_signed_calls() {
        let transport = MockTransport::ok(r#"{"balances":[]}"#);
        let trader = public_trader(transport.clone());

        assert!(trader.balances().await.unwrap_err().is_config_error());
        assert!(trader
            .cancel_order(1, "ETH", "BTC")
            .await
            .unwrap_err()
            .is_config_error());
        assert!(transport.requests().is_empty());
        assert_eq!(trader.api_key(), None);
    }

    #[tokio::test]
    async fn test_non_json_response_is_transport_error() {
        let transport = MockTransport::ok("<html>down for maintenance</html>");
        let trader = trader(transport);

        let err = trader.balances().await.unwrap_err();

        assert!(matches!(err, BinanceRestError::Rest(RestError::Decode(_))));
    }

    #[tokio::test]
    async fn test_custom_recv_window_and_environment() {
        let transport = MockTransport::ok(r#"{"balances":[]}"#);
        let config = TraderConfig::new(credentials())
            .with_recv_window(RecvWindow::new(10_000).unwrap())
            .with_environment(BinanceEnvironment::Testnet);
        let trader = BinanceTrader::with_transport(config, transport.clone());

        trader.balances().await.unwrap();

        let request = transport.only_request();
        assert!(request.url.starts_with("https://testnet.binance.vision/api/v3/account?"));
        assert!(request.url.contains("&recvWindow=10000&signature="));
        assert_eq!(trader.environment(), BinanceEnvironment::Testnet);
    }

    #[test]
    fn test_debug_hides_secret() {
        let trader = trader(MockTransport::ok("{}"));
        let debug = format!("{:?}", trader);

        assert!(debug.contains(API_KEY));
        assert!(!debug.contains(SECRET_KEY));
    }
}
