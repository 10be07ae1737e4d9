//! Trader configuration.
//!
//! Settings come from an INI-style `key=value` file (`settings.ini`)
//! or from environment variables, and are handed to
//! [`crate::BinanceTrader::new`] explicitly.

use crate::error::BinanceRestError;
use auth::{ApiCredentials, RecvWindow};
use common::BinanceEnvironment;
use std::collections::HashMap;
use std::path::Path;

const RECV_WINDOW_KEY: &str = "recvWindow";
const API_KEY_KEY: &str = "apiKey";
const SECRET_KEY_KEY: &str = "secretKey";
const ENVIRONMENT_KEY: &str = "environment";

/// Everything a [`crate::BinanceTrader`] needs besides its transport.
#[derive(Debug, Clone, Default)]
pub struct TraderConfig {
    /// `None` restricts the trader to public endpoints.
    pub credentials: Option<ApiCredentials>,
    pub recv_window: RecvWindow,
    pub environment: BinanceEnvironment,
}

impl TraderConfig {
    /// Authenticated configuration with default window and environment.
    pub fn new(credentials: ApiCredentials) -> Self {
        Self {
            credentials: Some(credentials),
            ..Self::default()
        }
    }

    /// Configuration for public endpoints only.
    pub fn public() -> Self {
        Self::default()
    }

    pub fn with_recv_window(mut self, recv_window: RecvWindow) -> Self {
        self.recv_window = recv_window;
        self
    }

    pub fn with_environment(mut self, environment: BinanceEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Load a settings file.
    ///
    /// Recognized keys: `recvWindow`, `apiKey`, `secretKey`, `environment`.
    /// Values may be quoted. Lines starting with `;` or `#` are comments and
    /// `[section]` headers are ignored, so every key lives in one flat
    /// namespace. `apiKey` and `secretKey` must appear together; without both
    /// the configuration is public.
    ///
    /// # Errors
    /// `InvalidConfig` if the file cannot be read or a value is invalid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BinanceRestError> {
        let path = path.as_ref();
        let read_error = |e: &dyn std::fmt::Display| {
            BinanceRestError::InvalidConfig(format!(
                "failed to read settings file {}: {}",
                path.display(),
                e
            ))
        };

        let contents = std::fs::read_to_string(path).map_err(|e| read_error(&e))?;
        let assignments = strip_ini_markup(&contents);

        let mut settings = HashMap::new();
        for item in dotenvy::from_read_iter(assignments.as_bytes()) {
            let (key, value) = item.map_err(|e| read_error(&e))?;
            settings.insert(key, value);
        }

        let config = Self::from_settings(&settings)?;

        tracing::debug!(
            path = %path.display(),
            environment = %config.environment,
            recv_window = %config.recv_window,
            authenticated = config.credentials.is_some(),
            "Loaded trader settings"
        );

        Ok(config)
    }

    /// Load from `BINANCE_API_KEY`, `BINANCE_SECRET_KEY` and the optional
    /// `BINANCE_RECV_WINDOW` and `BINANCE_ENVIRONMENT`, reading `.env` first.
    pub fn from_env() -> Result<Self, BinanceRestError> {
        let credentials = ApiCredentials::from_env()?;

        let recv_window = match std::env::var("BINANCE_RECV_WINDOW") {
            Ok(value) => parse_recv_window(&value)?,
            Err(_) => RecvWindow::default(),
        };

        Ok(Self {
            credentials: Some(credentials),
            recv_window,
            environment: BinanceEnvironment::from_env(),
        })
    }

    fn from_settings(settings: &HashMap<String, String>) -> Result<Self, BinanceRestError> {
        let credentials = match (settings.get(API_KEY_KEY), settings.get(SECRET_KEY_KEY)) {
            (Some(api_key), Some(secret_key)) => Some(ApiCredentials::try_new(
                api_key.clone(),
                secret_key.clone(),
            )?),
            (None, None) => None,
            (Some(_), None) => return Err(missing(SECRET_KEY_KEY)),
            (None, Some(_)) => return Err(missing(API_KEY_KEY)),
        };

        let recv_window = settings
            .get(RECV_WINDOW_KEY)
            .map(|value| parse_recv_window(value))
            .transpose()?
            .unwrap_or_default();

        let environment = settings
            .get(ENVIRONMENT_KEY)
            .map(|value| {
                value
                    .parse::<BinanceEnvironment>()
                    .map_err(|e| BinanceRestError::InvalidConfig(e.to_string()))
            })
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            credentials,
            recv_window,
            environment,
        })
    }
}

/// Drop `;` comment lines and `[section]` headers, leaving `key=value` lines.
fn strip_ini_markup(contents: &str) -> String {
    contents
        .lines()
        .filter(|line| {
            let line = line.trim();
            !(line.starts_with(';') || (line.starts_with('[') && line.ends_with(']')))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn missing(key: &str) -> BinanceRestError {
    BinanceRestError::InvalidConfig(format!("missing setting '{}'", key))
}

fn parse_recv_window(value: &str) -> Result<RecvWindow, BinanceRestError> {
    let millis = value.trim().parse::<u64>().map_err(|e| {
        BinanceRestError::InvalidConfig(format!("invalid {} '{}': {}", RECV_WINDOW_KEY, value, e))
    })?;
    Ok(RecvWindow::new(millis)?)
}
