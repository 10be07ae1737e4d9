//! HMAC-SHA256 request signing for the Binance API.

use crate::credentials::ApiCredentials;
use crate::recv_window::RecvWindow;
use common::RequestParams;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha256 = Hmac<Sha256>;

/// Milliseconds since the Unix epoch according to the local clock.
pub fn current_timestamp_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// Request signer for authenticated Binance API calls.
///
/// Signing covers the exact form-encoded query string that is sent, so the
/// parameters must not be reordered between [`RequestSigner::sign_params`]
/// and transmission.
pub struct RequestSigner<'a> {
    credentials: &'a ApiCredentials,
    recv_window: RecvWindow,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer with the given credentials and window.
    pub fn new(credentials: &'a ApiCredentials, recv_window: RecvWindow) -> Self {
        Self {
            credentials,
            recv_window,
        }
    }

    /// Sign a message and return the hex-encoded signature.
    ///
    /// This computes HMAC-SHA256 of the message using the secret key
    /// and returns the result as a lowercase hex string.
    pub fn sign(&self, message: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.credentials.expose_secret().as_bytes())
            .expect("HMAC can take key of any size");

        mac.update(message.as_bytes());
        let result = mac.finalize();
        hex::encode(result.into_bytes())
    }

    /// Add `timestamp` (now) and `recvWindow` to the parameters.
    ///
    /// Call this right before signing; the timestamp is read from the clock
    /// on every call.
    pub fn time_markers(&self, params: RequestParams) -> RequestParams {
        self.time_markers_at(params, current_timestamp_ms())
    }

    /// Add `timestamp` and `recvWindow` using an explicit timestamp.
    ///
    /// Existing keys with the same names are overwritten in place, every
    /// other parameter is kept as is.
    pub fn time_markers_at(&self, mut params: RequestParams, timestamp_ms: i64) -> RequestParams {
        params.set("timestamp", timestamp_ms);
        params.set("recvWindow", self.recv_window.as_millis());
        params
    }

    /// Sign the serialized parameters and append `signature`.
    pub fn sign_params(&self, mut params: RequestParams) -> RequestParams {
        let signature = self.sign(&params.to_query_string());
        params.push("signature", signature);
        params
    }

    /// Shorthand for `sign_params(time_markers(params))`.
    pub fn sign_timed(&self, params: RequestParams) -> RequestParams {
        self.sign_params(self.time_markers(params))
    }
}
