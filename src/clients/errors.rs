//! HTTP-specific error types for the ARM fluent SDK.
//!
//! This module contains error types for the transport layer: request
//! validation failures, transport failures (no response received) and the
//! unified [`HttpError`] returned by [`HttpClient`](crate::clients::HttpClient).
//!
//! Non-success status codes are *not* errors at this layer. The request
//! pipeline decides which codes are successful for each operation and turns
//! the rest into a [`CloudError`](crate::rest::CloudError).
//!
//! # Example
//!
//! ```rust,ignore
//! use arm_fluent::clients::HttpError;
//!
//! match client.request(request).await {
//!     Ok(response) => println!("Status {}", response.code),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(HttpError::Transport(e)) => println!("No response: {e}"),
//!     Err(HttpError::Credential(e)) => println!("No token: {e}"),
//! }
//! ```

use crate::auth::CredentialError;
use thiserror::Error;

/// Error returned when an HTTP request fails validation before it is sent.
///
/// # Example
///
/// ```rust
/// use arm_fluent::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::MissingBody {
///     method: "PUT".to_string(),
/// };
///
/// assert_eq!(error.to_string(), "Cannot use PUT without specifying data.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A PUT, PATCH or POST request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// The request path could not be turned into a URL.
    #[error("Invalid request URL '{url}'.")]
    InvalidUrl {
        /// The offending URL.
        url: String,
    },
}

/// Error returned when no HTTP response was received.
///
/// Connectivity failures, DNS errors and transport-level timeouts end up
/// here. They are surfaced unmodified and never retried.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The `reqwest` transport failed.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A custom transport failed to produce a response.
    #[error("Connection failed: {message}")]
    Connection {
        /// Description of the failure.
        message: String,
    },
}

impl TransportError {
    /// Creates a [`TransportError::Connection`] from a message.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// The transport did not produce a response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// No bearer token could be obtained for the request.
    #[error(transparent)]
    Credential(#[from] CredentialError),
}

// Verify error types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpError>();
    assert_send_sync::<TransportError>();
};
