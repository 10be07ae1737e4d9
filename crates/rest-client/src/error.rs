//! REST dispatcher error types.

use thiserror::Error;

/// Errors that can occur while dispatching a REST call.
#[derive(Debug, Error)]
pub enum RestError {
    /// The HTTP method is not one of GET, POST, DELETE.
    #[error("Unsupported request method '{0}', the accepted request methods are: POST, GET, DELETE")]
    UnsupportedMethod(String),

    /// The exchange answered with a `msg` field.
    #[error("API response error: {message}")]
    Api {
        /// Exchange error code, when the payload carries one.
        code: Option<i64>,
        /// The exchange's `msg`, verbatim.
        message: String,
    },

    /// Non-success HTTP status with a body that is not usable JSON.
    #[error("HTTP error: {status} - {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The response body is not a JSON object or array.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Request timed out.
    #[error("Request timeout")]
    Timeout,

    /// Connection error (network issue).
    #[error("Connection error: {0}")]
    Connection(String),

    /// Failed to build the HTTP client or request.
    #[error("Request build error: {0}")]
    RequestBuild(String),
}

impl RestError {
    /// The exchange's message if this is an API error.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => Some(message),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RestError::Timeout
        } else if err.is_builder() {
            RestError::RequestBuild(err.to_string())
        } else if err.is_decode() {
            RestError::Decode(err.to_string())
        } else {
            RestError::Connection(err.to_string())
        }
    }
}
