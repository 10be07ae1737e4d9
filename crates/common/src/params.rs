//! Ordered request parameters.
//!
//! Binance verifies the signature against the exact query string it receives,
//! so parameters must serialize in the same order they were signed in.
//! `RequestParams` keeps insertion order and never reorders keys.

use rust_decimal::Decimal;
use std::fmt;

/// A scalar parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    UInt(u64),
    Decimal(Decimal),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{}", i),
            Self::UInt(u) => write!(f, "{}", u),
            Self::Decimal(d) => write!(f, "{}", d),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::UInt(u64::from(value))
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<Decimal> for ParamValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

/// Insertion-ordered mapping from parameter name to scalar value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    pairs: Vec<(String, ParamValue)>,
}

impl RequestParams {
    /// Create an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`RequestParams::push`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.push(key, value);
        self
    }

    /// Append a parameter at the end, even if the key already exists.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Replace the value of an existing key in place, or append it.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();

        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Value of the first parameter with the given name.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Parameter names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Serialize as `application/x-www-form-urlencoded` text.
    ///
    /// Pairs are joined with `&` in insertion order. Reserved characters are
    /// percent-encoded and spaces become `+`.
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, &value.to_string());
        }
        serializer.finish()
    }
}

impl fmt::Display for RequestParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_preserves_insertion_order() {
        let params = RequestParams::new()
            .with("zebra", 1i64)
            .with("alpha", "two")
            .with("middle", dec!(3.5));

        assert_eq!(params.to_query_string(), "zebra=1&alpha=two&middle=3.5");
        assert_eq!(params.keys().collect::<Vec<_>>(), ["zebra", "alpha", "middle"]);
    }

    #[test]
    fn test_percent_encodes_values() {
        let params = RequestParams::new()
            .with("note", "a b&c=d")
            .with("path", "x/y");

        assert_eq!(params.to_query_string(), "note=a+b%26c%3Dd&path=x%2Fy");
    }

    #[test]
    fn test_empty_serializes_to_empty_string() {
        assert_eq!(RequestParams::new().to_query_string(), "");
        assert!(RequestParams::new().is_empty());
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut params = RequestParams::new().with("a", 1i64).with("b", 2i64);
        params.set("a", 10i64);
        params.set("c", 3i64);

        assert_eq!(params.to_query_string(), "a=10&b=2&c=3");
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_serialization_is_stable() {
        let params = RequestParams::new()
            .with("symbol", "ETHBTC")
            .with("orderId", 123_456u64);

        assert_eq!(params.to_query_string(), params.to_query_string());
        assert_eq!(params.to_string(), "symbol=ETHBTC&orderId=123456");
    }

    #[test]
    fn test_get_and_contains() {
        let params = RequestParams::new().with("limit", 500u32);

        assert_eq!(params.get("limit"), Some(&ParamValue::UInt(500)));
        assert!(params.contains_key("limit"));
        assert!(!params.contains_key("price"));
    }
}
