//! Dependency initialization and wiring for the trace-soak client.

use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::errors::RunError;
use collector_client::{CollectorApi, CollectorConfig, HttpCollector};
use trace_soak_pipeline::bootstrap::Bootstrapper;
use trace_soak_pipeline::deliverer::{Deliverer, DeliveryConfig};
use trace_soak_pipeline::driver::{DriverConfig, RoundDriver};
use trace_soak_pipeline::processor::{ProcessorConfig, StatementProcessor};
use trace_soak_pipeline::source::{StatementInput, StatementSource};

/// Container for all initialized dependencies.
pub struct Dependencies {
    pub config: Config,
    pub bootstrapper: Bootstrapper,
    pub driver: RoundDriver,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables, talking to the
    /// collector over HTTP and reading statements from the configured
    /// directory.
    pub fn new() -> Result<Self, RunError> {
        let config = Config::from_env();

        info!(
            host = %config.host,
            statements_dir = %config.statements_dir.display(),
            rounds = config.rounds,
            variant = ?config.variant,
            send_mode = ?config.send_mode,
            failure_policy = ?config.failure_policy,
            "Initializing dependencies"
        );

        let collector: Arc<dyn CollectorApi> =
            Arc::new(HttpCollector::new(CollectorConfig::new(&config.host))?);
        let source = StatementInput::directory(&config.statements_dir).into_source();

        Ok(Self::from_parts(config, collector, source))
    }

    /// Wire up dependencies around an explicit collector and source.
    ///
    /// This is the injection point tests use to swap in the mock collector
    /// and in-memory batches.
    pub fn from_parts(
        config: Config,
        collector: Arc<dyn CollectorApi>,
        source: Box<dyn StatementSource>,
    ) -> Self {
        let bootstrapper = Bootstrapper::with_variant(
            collector.clone(),
            config.developer.clone(),
            config.teacher.clone(),
            config.variant,
        );

        let processor = StatementProcessor::with_config(ProcessorConfig {
            experiment_extensions: config.experiment_extensions,
        });

        let deliverer = Deliverer::with_config(
            collector,
            DeliveryConfig {
                stamp_canonical_actor: config.stamp_canonical_actor,
            },
        );

        let driver = RoundDriver::with_config(
            source,
            processor,
            deliverer,
            DriverConfig {
                rounds: config.rounds,
                send_mode: config.send_mode,
                send_delay: config.send_delay,
                prefix_actor_names: config.prefix_actor_names,
                failure_policy: config.failure_policy,
            },
        );

        Self {
            config,
            bootstrapper,
            driver,
        }
    }
}
