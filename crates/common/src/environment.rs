//! Which Binance REST host a trader talks to.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Variable consulted by [`BinanceEnvironment::from_env`].
pub const ENVIRONMENT_VAR: &str = "BINANCE_ENVIRONMENT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinanceEnvironment {
    /// `api.binance.com`, real funds.
    #[default]
    Production,
    /// Spot testnet.
    Testnet,
}

impl BinanceEnvironment {
    pub fn rest_base_url(self) -> &'static str {
        match self {
            Self::Production => "https://api.binance.com",
            Self::Testnet => "https://testnet.binance.vision",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Testnet => "testnet",
        }
    }

    /// Read [`ENVIRONMENT_VAR`]; unset or unrecognized values mean production.
    pub fn from_env() -> Self {
        std::env::var(ENVIRONMENT_VAR)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for BinanceEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown Binance environment '{0}', expected production or testnet")]
pub struct ParseEnvironmentError(String);

impl FromStr for BinanceEnvironment {
    type Err = ParseEnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" | "mainnet" | "main" => Ok(Self::Production),
            "testnet" | "test" | "sandbox" => Ok(Self::Testnet),
            _ => Err(ParseEnvironmentError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_per_environment() {
        assert_eq!(
            BinanceEnvironment::default().rest_base_url(),
            "https://api.binance.com"
        );
        assert_eq!(
            BinanceEnvironment::Testnet.rest_base_url(),
            "https://testnet.binance.vision"
        );
    }

    #[test]
    fn test_settings_values_parse() {
        let cases = [
            ("production", BinanceEnvironment::Production),
            (" main ", BinanceEnvironment::Production),
            ("MAINNET", BinanceEnvironment::Production),
            ("testnet", BinanceEnvironment::Testnet),
            ("Sandbox", BinanceEnvironment::Testnet),
        ];
        for (value, expected) in cases {
            assert_eq!(value.parse::<BinanceEnvironment>(), Ok(expected), "{:?}", value);
        }
    }

    #[test]
    fn test_unknown_value_is_named_in_error() {
        let err = "staging".parse::<BinanceEnvironment>().unwrap_err();
        assert!(err.to_string().contains("'staging'"));
    }

    #[test]
    fn test_display_parses_back() {
        for env in [BinanceEnvironment::Production, BinanceEnvironment::Testnet] {
            assert_eq!(env.to_string().parse::<BinanceEnvironment>(), Ok(env));
        }
    }
}
