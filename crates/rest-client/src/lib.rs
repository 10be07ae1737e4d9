//! Request dispatcher for the Binance REST API.
//!
//! This crate wraps `reqwest` with:
//!
//! - GET/POST/DELETE only; anything else is rejected before touching the network
//! - `X-MBX-APIKEY` header injection for authenticated calls
//! - Form-encoded POST bodies
//! - JSON decoding with `msg` detection, so exchange errors surface as `RestError::Api`
//! - An [`HttpTransport`] seam so tests can substitute the network
//!
//! # Example
//!
//! ```rust,ignore
//! use common::RequestParams;
//! use rest_client::{HttpMethod, RestClient};
//!
//! let client = RestClient::with_default_timeout("https://api.binance.com")?;
//! let url = client.url("/api/v1/depth", Some("symbol=ETHBTC"));
//! let book = client.dispatch(HttpMethod::Get, &url, &RequestParams::new(), None).await?;
//! ```

mod client;
mod error;
mod method;
mod transport;

pub use client::{ApiResponse, RestClient, API_KEY_HEADER};
pub use error::RestError;
pub use method::HttpMethod;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
