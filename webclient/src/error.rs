//! Error types for the web client facade

use thiserror::Error;

/// Client-side failure classes
///
/// Everything except `Cancelled` is caught at the facade boundary and
/// degraded to an empty result; cancellation is always re-signaled.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request was cancelled")]
    Cancelled,

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status: {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    #[error("malformed payload: {0}")]
    Payload(String),

    #[error("circuit breaker is open")]
    CircuitOpen,
}
