use thiserror::Error;

/// Errors that can occur while preparing authenticated requests.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// A key was supplied but is empty.
    #[error("{0} must not be empty")]
    EmptyKey(&'static str),

    /// The receive window is outside what the exchange accepts.
    #[error("Invalid recvWindow {0}ms, expected 1 to 60000")]
    InvalidRecvWindow(u64),
}
