//! Error types for the batch delivery client.
use collector_client::CollectorError;
use thiserror::Error;

/// Represents a failed delivery attempt. Covers both steps of the collector
/// protocol; neither is retried.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The collection-start call for an actor was rejected or never
    /// completed.
    #[error("Start call failed for actor {actor}: {source}")]
    Start {
        actor: String,
        #[source]
        source: CollectorError,
    },

    /// The track call was rejected or never completed.
    #[error("Track call failed for actor {actor}: {source}")]
    Track {
        actor: String,
        #[source]
        source: CollectorError,
    },
}

impl DeliveryError {
    /// Create a start-step error.
    pub fn start(actor: impl Into<String>, source: CollectorError) -> Self {
        Self::Start {
            actor: actor.into(),
            source,
        }
    }

    /// Create a track-step error.
    pub fn track(actor: impl Into<String>, source: CollectorError) -> Self {
        Self::Track {
            actor: actor.into(),
            source,
        }
    }
}
