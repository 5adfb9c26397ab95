//! Trace Soak Main Entry Point
//!
//! This is the main binary for the collector soak-test client. It bootstraps
//! a tracking session against the collector service and streams statement
//! batches to it across rounds.

use std::env;

use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use trace_soak::{Dependencies, RunError};

/// Initialize tracing/logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("trace_soak=info,trace_soak_pipeline=info,collector_client=info")
    });

    let json_format = env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }

    info!(
        service_name = "trace-soak",
        service_version = env!("CARGO_PKG_VERSION"),
        "Tracing initialized"
    );
}

#[tokio::main]
async fn main() -> Result<(), RunError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing();

    info!("Starting collector soak run");

    let deps = match Dependencies::new() {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    match trace_soak::run(deps).await {
        Ok(_) => Ok(()),
        Err(e) => {
            error!(error = %e, "Soak run failed");
            Err(e)
        }
    }
}
