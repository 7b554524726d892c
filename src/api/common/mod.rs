//
//  bitbucket-client
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types
//!
//! Error and result types shared by the dispatcher, the OAuth handshake and every
//! resource client, plus the pagination helpers.
//!
//! # Result Model
//!
//! Every network-performing operation returns a [`DispatchResult`]. An `Ok` value
//! is the decoded payload; an `Err` carries an [`ApiError`] whose `Display` output
//! is the user-facing error message. Callers that prefer the flat
//! `(success, payload, error)` view can use [`ResultTupleExt::into_tuple`].
//!
//! # Example
//!
//! ```rust
//! use bitbucket_client::api::common::{ApiError, DispatchResult, ResultTupleExt};
//!
//! let result: DispatchResult<u32> = Err(ApiError::Timeout);
//! let (success, payload, error) = result.into_tuple();
//! assert!(!success);
//! assert!(payload.is_none());
//! assert_eq!(error.as_deref(), Some("Timeout when contacting BitBucket"));
//! ```

use thiserror::Error;

mod pagination;

pub use pagination::*;

/// Message reported for every request that timed out.
pub const TIMEOUT_MESSAGE: &str = "Timeout when contacting BitBucket";

/// Unified error type for all Bitbucket operations.
///
/// | Variant | Cause |
/// |---------|-------|
/// | `Timeout` | Connect or read timeout |
/// | `Transport` | Any other transport failure (DNS, refused connection, TLS) |
/// | `Status` | Non-2xx HTTP response |
/// | `Rejected` | Non-200 response during the OAuth handshake |
/// | `Decode` | A 2xx response whose body could not be interpreted |
/// | `InvalidInput` | Malformed local usage, detected before any I/O |
/// | `Client` | The HTTP client could not be constructed |
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request timed out.
    #[error("Timeout when contacting BitBucket")]
    Timeout,

    /// A transport-level failure other than a timeout.
    #[error("Exception when contacting BitBucket: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    ///
    /// Displays the reason phrase, or `Error: <code>` when there is none.
    /// The reason is the standard phrase for the code (`404` is always
    /// `Not Found`); a custom phrase sent by the server is not kept.
    #[error("{}", status_message(.status, .reason))]
    Status {
        /// Numeric HTTP status code
        status: u16,
        /// Reason phrase for the status, if known
        reason: Option<String>,
    },

    /// The OAuth handshake was refused; holds the raw response body.
    #[error("{0}")]
    Rejected(String),

    /// The response body could not be decoded.
    #[error("Invalid response from BitBucket: {0}")]
    Decode(String),

    /// Invalid arguments supplied by the caller.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Building the HTTP client failed.
    #[error("Could not create HTTP client: {0}")]
    Client(String),
}

fn status_message(status: &u16, reason: &Option<String>) -> String {
    match reason.as_deref() {
        Some(reason) if !reason.is_empty() => reason.to_string(),
        _ => format!("Error: {status}"),
    }
}

impl ApiError {
    /// Builds a status error from an HTTP status code, using its canonical reason phrase.
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        Self::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().map(str::to_string),
        }
    }

    /// The HTTP status code, for `Status` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// The result of every network-performing operation.
pub type DispatchResult<T = serde_json::Value> = Result<T, ApiError>;

/// Flattens a [`DispatchResult`] into a `(success, payload, error)` triple.
pub trait ResultTupleExt<T> {
    fn into_tuple(self) -> (bool, Option<T>, Option<String>);
}

impl<T> ResultTupleExt<T> for DispatchResult<T> {
    fn into_tuple(self) -> (bool, Option<T>, Option<String>) {
        match self {
            Ok(payload) => (true, Some(payload), None),
            Err(err) => (false, None, Some(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_prefers_reason() {
        let err = ApiError::Status {
            status: 404,
            reason: Some("Not Found".to_string()),
        };
        assert_eq!(err.to_string(), "Not Found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_status_message_falls_back_to_code() {
        let err = ApiError::Status {
            status: 599,
            reason: None,
        };
        assert_eq!(err.to_string(), "Error: 599");

        let err = ApiError::Status {
            status: 520,
            reason: Some(String::new()),
        };
        assert_eq!(err.to_string(), "Error: 520");
    }

    #[test]
    fn test_from_status_uses_canonical_reason() {
        let err = ApiError::from_status(reqwest::StatusCode::FORBIDDEN);
        assert_eq!(err.to_string(), "Forbidden");
    }

    #[test]
    fn test_transport_and_timeout_messages() {
        assert_eq!(ApiError::Timeout.to_string(), TIMEOUT_MESSAGE);
        assert_eq!(
            ApiError::Transport("connection refused".into()).to_string(),
            "Exception when contacting BitBucket: connection refused"
        );
        assert_eq!(ApiError::Rejected("bad consumer".into()).to_string(), "bad consumer");
    }

    #[test]
    fn test_into_tuple() {
        let ok: DispatchResult<i32> = Ok(7);
        assert_eq!(ok.into_tuple(), (true, Some(7), None));

        let err: DispatchResult<i32> = Err(ApiError::InvalidInput("kind".into()));
        let (success, payload, error) = err.into_tuple();
        assert!(!success);
        assert!(payload.is_none());
        assert_eq!(error.unwrap(), "Invalid input: kind");
    }
}
