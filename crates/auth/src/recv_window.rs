//! Receive window for signed requests.

use crate::error::AuthError;
use std::fmt;

/// How long, in milliseconds, a signed request stays valid after its
/// `timestamp`. The exchange rejects the request once the window has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecvWindow(u64);

impl RecvWindow {
    /// Exchange default when `recvWindow` is omitted.
    pub const DEFAULT_MS: u64 = 5_000;

    /// Largest window the exchange accepts.
    pub const MAX_MS: u64 = 60_000;

    /// Create a receive window, rejecting 0 and anything above [`Self::MAX_MS`].
    pub fn new(millis: u64) -> Result<Self, AuthError> {
        if millis == 0 || millis > Self::MAX_MS {
            return Err(AuthError::InvalidRecvWindow(millis));
        }
        Ok(Self(millis))
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }
}

impl Default for RecvWindow {
    fn default() -> Self {
        Self(Self::DEFAULT_MS)
    }
}

impl fmt::Display for RecvWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
