//! Typed views over Binance account payloads.

use crate::error::BinanceRestError;
use rest_client::ApiResponse;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::iter::FusedIterator;

/// Free balance of one asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balance {
    pub asset: String,
    pub balance: Decimal,
}

/// Entry of the `balances` array from GET /api/v3/account.
#[derive(Debug, Deserialize)]
struct AccountBalance {
    asset: String,
    #[serde(deserialize_with = "deserialize_decimal_from_str")]
    free: Decimal,
}

/// The part of GET /api/v3/account this crate reads.
#[derive(Debug, Deserialize)]
struct AccountResponse {
    #[serde(default)]
    balances: Vec<AccountBalance>,
}

/// Account balances, yielded once each in exchange order.
///
/// The sequence is finite and cannot be restarted; call
/// [`crate::BinanceTrader::balances`] again for a fresh snapshot.
#[derive(Debug)]
pub struct Balances {
    inner: std::vec::IntoIter<Balance>,
}

impl Balances {
    /// Remap an account payload into `{asset, balance}` entries.
    pub(crate) fn from_account(account: ApiResponse) -> Result<Self, BinanceRestError> {
        let account: AccountResponse = serde_json::from_value(account)
            .map_err(|e| BinanceRestError::Parse(format!("invalid account payload: {}", e)))?;

        let balances: Vec<Balance> = account
            .balances
            .into_iter()
            .map(|entry| Balance {
                asset: entry.asset,
                balance: entry.free,
            })
            .collect();

        Ok(Self {
            inner: balances.into_iter(),
        })
    }
}

impl Iterator for Balances {
    type Item = Balance;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Balances {}

impl FusedIterator for Balances {}

/// Deserialize a Decimal from a string.
fn deserialize_decimal_from_str<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.parse::<Decimal>().map_err(serde::de::Error::custom)
}
