//! # Errors
//!
//! Errors surfaced by session and gateway operations. Backend read calls never
//! return these to callers (they fall back to a safe default) but sign-in,
//! passbase linkage and credential import report them explicitly.

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can be returned by the session and gateway.
#[derive(Debug, Error)]
pub enum Error {
    /// The wallet interaction failed or was cancelled by the user.
    #[error("wallet interaction failed: {0}")]
    Wallet(anyhow::Error),

    /// The wallet completed without returning a presentation.
    #[error("wallet returned no presentation")]
    NoPresentation,

    /// The request could not be sent or the response could not be read.
    #[error("backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend responded with a non-success HTTP status.
    #[error("backend returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Canonical reason for the status code.
        message: String,
    },

    /// A bearer token could not be decoded.
    #[error("invalid token: {0}")]
    Token(String),

    /// A DID or DID URL is malformed.
    #[error("invalid DID: {0}")]
    Did(String),

    /// A JSON document could not be serialized or deserialized.
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    /// The token store rejected an operation.
    #[error("token store failed: {0}")]
    Storage(anyhow::Error),

    /// Configuration is missing or invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Build a [`Error::Status`] from a non-success response status.
    #[must_use]
    pub fn status(status: reqwest::StatusCode) -> Self {
        Self::Status {
            status: status.as_u16(),
            message: status.canonical_reason().unwrap_or("unknown status").to_string(),
        }
    }
}
