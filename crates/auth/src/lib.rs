//! Authentication and signing for the Binance REST API.
//!
//! - **Credentials**: the secret key lives in a `SecretString`, is never
//!   printed by `Debug`, and is only read by the signer.
//! - **Receive window**: validated once and attached to every signed request.
//! - **HMAC-SHA256 signing**: `timestamp`/`recvWindow` markers and a
//!   `signature` computed over the ordered, form-encoded parameters.
//!
//! # Example
//!
//! ```rust,ignore
//! use auth::{ApiCredentials, RecvWindow, RequestSigner};
//! use common::RequestParams;
//!
//! let credentials = ApiCredentials::from_env()?;
//! let signer = RequestSigner::new(&credentials, RecvWindow::default());
//!
//! let params = RequestParams::new().with("symbol", "ETHBTC").with("orderId", 42u64);
//! let signed = signer.sign_timed(params);
//! ```

mod credentials;
mod error;
mod recv_window;
mod signer;

pub use credentials::ApiCredentials;
pub use error::AuthError;
pub use recv_window::RecvWindow;
pub use signer::{current_timestamp_ms, RequestSigner};
