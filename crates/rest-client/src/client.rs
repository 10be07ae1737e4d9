//! Request dispatcher: one HTTP round-trip, normalized into JSON or an error.

use crate::error::RestError;
use crate::method::HttpMethod;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use common::RequestParams;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Header carrying the API key on authenticated calls.
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Decoded JSON payload of a successful call.
pub type ApiResponse = Value;

/// REST dispatcher bound to one base URL.
pub struct RestClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
}

impl RestClient {
    /// Create a new REST client with the given base URL.
    ///
    /// # Arguments
    /// * `base_url` - Base URL for all requests (e.g., "https://api.binance.com")
    /// * `timeout` - Request timeout duration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RestError> {
        let transport = ReqwestTransport::new(timeout)?;
        Ok(Self::with_transport(base_url, Arc::new(transport)))
    }

    /// Create a new REST client with default timeout.
    pub fn with_default_timeout(base_url: &str) -> Result<Self, RestError> {
        Self::new(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a REST client over an arbitrary transport.
    pub fn with_transport(base_url: &str, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full URL from path and optional query string.
    pub fn url(&self, path: &str, query: Option<&str>) -> String {
        match query {
            Some(q) if !q.is_empty() => format!("{}{}?{}", self.base_url, path, q),
            _ => format!("{}{}", self.base_url, path),
        }
    }

    /// Send one request and normalize the response.
    ///
    /// # Arguments
    /// * `method` - GET, POST or DELETE
    /// * `url` - Absolute URL; GET and DELETE parameters must already be in it
    /// * `form` - Parameters sent as the form-encoded body of a POST, ignored otherwise
    /// * `api_key` - When set, attached as the `X-MBX-APIKEY` header
    ///
    /// # Errors
    /// `RestError::Api` if the payload carries a non-null `msg`, `Decode` or
    /// `Http` if the body is not a JSON object or array, and transport errors
    /// as they occur.
    pub async fn dispatch(
        &self,
        method: HttpMethod,
        url: &str,
        form: &RequestParams,
        api_key: Option<&str>,
    ) -> Result<ApiResponse, RestError> {
        let mut headers = Vec::new();
        if let Some(key) = api_key {
            headers.push((API_KEY_HEADER.to_string(), key.to_string()));
        }

        let body = match method {
            HttpMethod::Post => Some(form.to_query_string()),
            HttpMethod::Get | HttpMethod::Delete => None,
        };

        // The query string may hold a signature; log the path only.
        let path = url.split('?').next().unwrap_or(url);
        tracing::debug!(
            method = %method,
            path = %path,
            authenticated = api_key.is_some(),
            "Dispatching request"
        );

        let response = self
            .transport
            .execute(HttpRequest {
                method,
                url: url.to_string(),
                headers,
                body,
            })
            .await?;

        Self::decode_response(response)
    }

    /// Decode a raw response body and check it for an exchange error.
    fn decode_response(response: HttpResponse) -> Result<ApiResponse, RestError> {
        let success = response.is_success();

        let json = match serde_json::from_str::<Value>(&response.body) {
            Ok(json) => json,
            Err(e) if success => {
                tracing::warn!(body = %response.body, error = %e, "Failed to parse response");
                return Err(RestError::Decode(e.to_string()));
            }
            Err(_) => {
                return Err(RestError::Http {
                    status: response.status,
                    body: response.body,
                })
            }
        };

        match json {
            Value::Object(_) | Value::Array(_) => Self::verify_response(json),
            _ if success => Err(RestError::Decode(format!(
                "expected a JSON object or array, got {}",
                json
            ))),
            _ => Err(RestError::Http {
                status: response.status,
                body: response.body,
            }),
        }
    }

    /// Fail with `RestError::Api` if the payload has a non-null `msg` field.
    pub fn verify_response(json: ApiResponse) -> Result<ApiResponse, RestError> {
        match json.get("msg") {
            Some(msg) if !msg.is_null() => {
                let message = msg
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| msg.to_string());
                let code = json.get("code").and_then(Value::as_i64);

                tracing::debug!(code = ?code, message = %message, "API returned an error");

                Err(RestError::Api { code, message })
            }
            _ => Ok(json),
        }
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}
