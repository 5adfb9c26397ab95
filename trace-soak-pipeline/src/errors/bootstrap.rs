//! Error types for the session bootstrapper.
//!
//! Each variant maps to one class of bootstrap step; any of them aborts the
//! bootstrap and is fatal to the run.
use collector_client::CollectorError;
use thiserror::Error;

/// Represents errors that can occur while establishing the tracking context.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Account sign-up was rejected (e.g. the identity already exists).
    #[error("Registration failed for {username}: {source}")]
    Registration {
        username: String,
        #[source]
        source: CollectorError,
    },

    /// Log-in was rejected (bad credentials).
    #[error("Authentication failed for {username}: {source}")]
    Auth {
        username: String,
        #[source]
        source: CollectorError,
    },

    /// Creation or configuration of a remote resource failed.
    #[error("Failed to create {resource}: {source}")]
    ResourceCreation {
        resource: &'static str,
        #[source]
        source: CollectorError,
    },
}

impl BootstrapError {
    /// Create a registration error.
    pub fn registration(username: impl Into<String>, source: CollectorError) -> Self {
        Self::Registration {
            username: username.into(),
            source,
        }
    }

    /// Create an authentication error.
    pub fn auth(username: impl Into<String>, source: CollectorError) -> Self {
        Self::Auth {
            username: username.into(),
            source,
        }
    }

    /// Create a resource-creation error.
    pub fn resource(resource: &'static str, source: CollectorError) -> Self {
        Self::ResourceCreation { resource, source }
    }
}
