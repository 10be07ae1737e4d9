//! API credential management.
//!
//! The secret key is held in a `SecretString` so it cannot be logged by
//! accident and its memory is zeroed on drop.

use crate::error::AuthError;
use secrecy::{ExposeSecret, SecretString};

/// API credentials for authenticated requests.
///
/// The API key travels as the `X-MBX-APIKEY` header. The secret key is only
/// ever fed to the HMAC signer.
#[derive(Clone)]
pub struct ApiCredentials {
    api_key: String,
    secret_key: SecretString,
}

impl ApiCredentials {
    /// Load credentials from environment variables.
    ///
    /// Looks for `BINANCE_API_KEY` and `BINANCE_SECRET_KEY`, reading a `.env`
    /// file first if one exists.
    ///
    /// # Errors
    /// Returns `AuthError::MissingEnvVar` if either variable is not set.
    pub fn from_env() -> Result<Self, AuthError> {
        dotenvy::dotenv().ok();

        let api_key = std::env::var("BINANCE_API_KEY")
            .map_err(|_| AuthError::MissingEnvVar("BINANCE_API_KEY".into()))?;

        let secret_key = std::env::var("BINANCE_SECRET_KEY")
            .map_err(|_| AuthError::MissingEnvVar("BINANCE_SECRET_KEY".into()))?;

        Self::try_new(api_key, secret_key)
    }

    /// Create credentials from explicit values.
    pub fn new(api_key: String, secret_key: String) -> Self {
        Self {
            api_key,
            secret_key: SecretString::from(secret_key),
        }
    }

    /// Like [`ApiCredentials::new`], but rejects empty keys.
    pub fn try_new(api_key: String, secret_key: String) -> Result<Self, AuthError> {
        if api_key.trim().is_empty() {
            return Err(AuthError::EmptyKey("apiKey"));
        }
        if secret_key.trim().is_empty() {
            return Err(AuthError::EmptyKey("secretKey"));
        }
        Ok(Self::new(api_key, secret_key))
    }

    /// Get the API key (public, safe to log).
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Expose the secret key for signing.
    ///
    /// Only [`crate::RequestSigner`] should call this.
    pub(crate) fn expose_secret(&self) -> &str {
        self.secret_key.expose_secret()
    }
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}
