//! Collector error types.
//!
//! This module defines the unified error type for all collector calls, used
//! by the `CollectorApi` trait and both the HTTP and mock implementations.

use thiserror::Error;

/// Unified errors from collector operations.
///
/// The collector contract treats any non-200 response as a rejection of the
/// call; rejections carry the endpoint, status code, and response body so
/// callers can classify the failure at their own layer.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// The request never completed (connection, TLS, timeout, ...).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The collector answered with a non-200 status.
    #[error("Collector rejected {endpoint} with status {status}: {body}")]
    Rejected {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// The collector answered 200 but the body did not match the contract.
    #[error("Malformed response from {endpoint}: {reason}")]
    MalformedResponse { endpoint: String, reason: String },
}

impl CollectorError {
    /// Create a rejection error.
    pub fn rejected(endpoint: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::Rejected {
            endpoint: endpoint.into(),
            status,
            body: body.into(),
        }
    }

    /// Create a malformed-response error.
    pub fn malformed(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }
}
