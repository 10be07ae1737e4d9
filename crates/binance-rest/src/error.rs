//! Binance trader error types.

use auth::AuthError;
use rest_client::RestError;
use thiserror::Error;

/// Errors surfaced by [`crate::BinanceTrader`] operations.
#[derive(Debug, Error)]
pub enum BinanceRestError {
    /// Rejected locally before any network call: bad method, bad order side,
    /// out-of-range limit, missing credentials, unreadable settings.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The exchange answered with a `msg` field.
    #[error("API response error: {message}")]
    Api {
        /// Exchange error code, when present.
        code: Option<i64>,
        /// The exchange's `msg`, verbatim.
        message: String,
    },

    /// The requested asset is not in the account's balances.
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    /// Transport or decode failure.
    #[error("REST client error: {0}")]
    Rest(RestError),

    /// Credential or receive-window error.
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// A successful payload did not have the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl BinanceRestError {
    /// True for errors raised before any network activity.
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::InvalidConfig(_) | Self::Auth(_))
    }

    /// The exchange's message if this is an API error.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => Some(message),
            _ => None,
        }
    }
}

impl From<RestError> for BinanceRestError {
    fn from(err: RestError) -> Self {
        match err {
            RestError::Api { code, message } => Self::Api { code, message },
            RestError::UnsupportedMethod(_) => Self::InvalidConfig(err.to_string()),
            other => Self::Rest(other),
        }
    }
}
