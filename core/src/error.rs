//! Error types for the coordinate API client.
//!
//! # Design
//! Callers decide recovery per failure kind, so the three ways a call can go
//! wrong on the wire stay distinct: the request never completed
//! (`Transport`), the backend answered with a non-2xx status (`Remote`), or a
//! 2xx body could not be decoded (`Parse`).

use thiserror::Error;

/// Errors returned by `CoordinateApi` and `CoordinateClient`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// DNS failure, refused connection, timeout or an unusable URL.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend returned a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Remote { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Parse(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// Client configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Status code of a `Remote` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}
