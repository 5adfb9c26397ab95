//! Error types for the trace-soak binary.

use thiserror::Error;

use collector_client::CollectorError;
use trace_soak_pipeline::errors::{BootstrapError, DriverError};

/// Errors that can occur during initialization or execution of a run.
#[derive(Error, Debug)]
pub enum RunError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Collector client setup error.
    #[error("Collector client error: {0}")]
    Collector(#[from] CollectorError),

    /// Bootstrap failed; fatal to the run.
    #[error("Bootstrap error: {0}")]
    Bootstrap(#[from] BootstrapError),

    /// The delivery rounds failed.
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),
}

impl RunError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
