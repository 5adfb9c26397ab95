//! # Trace Soak
//!
//! Soak-test client for an xAPI statement collector: bootstraps a tracking
//! session against the collector service (or reuses an externally supplied
//! tracking code) and streams statement batches to it across rounds.
//!
//! ## Architecture
//!
//! The run follows the source-processor-deliverer pattern:
//!
//! 1. **Source**: reads statement batches from a directory
//! 2. **Processor**: normalizes statements for the collector
//! 3. **Deliverer**: performs the start/track collector protocol
//! 4. **Driver**: repeats delivery across rounds with a fixed throttle
//!
//! ## Modules
//!
//! - [`config`]: Configuration and dependency initialization
//! - [`errors`]: Error types for the run

pub mod config;
pub mod errors;

pub use config::{Config, Dependencies};
pub use errors::RunError;

use tracing::{info, warn};

use trace_soak_pipeline::driver::RunSummary;
use trace_soak_shared::types::TrackingContext;

/// Execute a full run: establish the tracking context, then drive all
/// delivery rounds.
///
/// Bootstrap failures are fatal. Individual delivery failures follow the
/// driver's failure policy; a run in which every send failed is an error.
pub async fn run(mut deps: Dependencies) -> Result<RunSummary, RunError> {
    let ctx = match &deps.config.tracking_code {
        Some(code) => {
            info!(tracking_code = %code, "Tracking code supplied, skipping bootstrap");
            TrackingContext::external(code.clone())
        }
        None => deps.bootstrapper.bootstrap().await?,
    };

    let summary = deps.driver.run(&ctx).await?;

    if summary.failed > 0 {
        warn!(
            delivered = summary.delivered,
            failed = summary.failed,
            "Run finished with undelivered statements"
        );
    } else {
        info!(
            delivered = summary.delivered,
            rounds = summary.rounds_completed,
            "Run finished"
        );
    }
    Ok(summary)
}
