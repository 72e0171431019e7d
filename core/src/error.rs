//! Error types for the host.io client.
//!
//! # Design
//! Every failure in the request pipeline lands in exactly one variant of
//! `Error`. Nothing is retried or recovered here; each variant carries what a
//! caller needs to diagnose the failure without re-issuing the request (the
//! status and raw body of a rejected call, the underlying transport cause, or
//! the offending body snippet and target type of a failed decode).

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by `HostIoClient` and its building blocks.
#[derive(Debug, Error)]
pub enum Error {
    /// The client configuration is unusable (malformed base URL, bad token, zero timeout).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A path segment or field value supplied by the caller was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The request failed before a response was obtained (DNS, connect, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with something other than 200.
    #[error("HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// A 200 body did not fit the requested type.
    #[error("failed to decode {type_name} from response body {snippet:?}: {source}")]
    Decode {
        type_name: &'static str,
        snippet: String,
        #[source]
        source: serde_json::Error,
    },

    /// The caller's cancellation token fired before the call completed.
    #[error("request cancelled")]
    Cancelled,

    /// The caller's deadline elapsed before the call completed.
    #[error("request deadline exceeded")]
    DeadlineExceeded,
}

impl Error {
    /// HTTP status of an `Api` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// True when the transport-level timeout expired.
    ///
    /// A caller-supplied deadline reports `DeadlineExceeded` instead.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Transport(err) if err.is_timeout())
    }
}
