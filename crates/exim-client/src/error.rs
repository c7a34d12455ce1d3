//! # Client Error Types

use thiserror::Error;

/// Errors raised while talking to the upstream API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport-level failure: DNS, connect, timeout, TLS.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx HTTP status from the server.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// 2xx response whose envelope carries `success: false`.
    #[error("api rejected the request: {message}")]
    Rejected { message: String },

    /// Envelope decoded but `data` was absent where required.
    #[error("api response is missing its data payload")]
    MissingData,

    /// The response body was not the expected JSON shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

// =============================================================================
// Unit Tests
// =============================================================================
