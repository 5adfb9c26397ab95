//! Error types for the round driver.
use thiserror::Error;

use crate::errors::{DeliveryError, SourceError};

/// Represents errors that end a run.
///
/// Individual delivery failures are normally absorbed by the driver's
/// failure policy; they only surface here under fail-fast, or when every
/// send in every round failed.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// A delivery failure aborted the run (fail-fast policy).
    #[error("Delivery aborted the run: {0}")]
    Delivery(#[from] DeliveryError),

    /// Best-effort run in which not a single send succeeded.
    #[error("All {failed} sends failed across {rounds} rounds")]
    AllSendsFailed { failed: usize, rounds: u32 },
}
