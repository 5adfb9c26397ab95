//! Round driver.
//!
//! Coordinates the source, processor, and deliverer: re-reads the source
//! each round, rewrites actor names with the round prefix, normalizes, and
//! sends sequentially with a fixed inter-send delay. Delivery failures are
//! absorbed or fatal according to the configured failure policy.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use crate::deliverer::Deliverer;
use crate::errors::DriverError;
use crate::processor::{prefix_round_actor, StatementProcessor};
use crate::source::StatementSource;
use trace_soak_shared::types::{Statement, TrackingContext};

/// Fixed inter-send delay used when none is configured; throttles to roughly
/// one send every 750 ms.
pub const DEFAULT_SEND_DELAY: Duration = Duration::from_millis(750);

/// Granularity of track calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SendMode {
    /// One track call per statement.
    #[default]
    PerStatement,
    /// One track call per source batch.
    PerBatch,
}

/// What a delivery failure does to the rest of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log the failure and continue with the next send (best-effort).
    #[default]
    SkipAndContinue,
    /// Abort the run on the first failure.
    FailFast,
}

/// Configuration for the round driver.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub rounds: u32,
    pub send_mode: SendMode,
    /// Fixed delay after each send; a rate throttle, not backpressure.
    pub send_delay: Duration,
    /// Prefix actor names with the round index so concurrent rounds' data
    /// stays distinguishable on the collector.
    pub prefix_actor_names: bool,
    pub failure_policy: FailurePolicy,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            rounds: 1,
            send_mode: SendMode::default(),
            send_delay: DEFAULT_SEND_DELAY,
            prefix_actor_names: true,
            failure_policy: FailurePolicy::default(),
        }
    }
}

/// Outcome of a completed run. Counts are in statements.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub delivered: usize,
    pub failed: usize,
    pub rounds_completed: u32,
}

impl RunSummary {
    /// True when not a single send succeeded.
    pub fn all_failed(&self) -> bool {
        self.delivered == 0 && self.failed > 0
    }
}

/// Driver that repeats delivery of a statement source across rounds.
pub struct RoundDriver {
    source: Box<dyn StatementSource>,
    processor: StatementProcessor,
    deliverer: Deliverer,
    config: DriverConfig,
}

impl RoundDriver {
    /// Create a driver with default configuration.
    pub fn new(
        source: Box<dyn StatementSource>,
        processor: StatementProcessor,
        deliverer: Deliverer,
    ) -> Self {
        Self::with_config(source, processor, deliverer, DriverConfig::default())
    }

    /// Create a driver with custom configuration.
    pub fn with_config(
        source: Box<dyn StatementSource>,
        processor: StatementProcessor,
        deliverer: Deliverer,
        config: DriverConfig,
    ) -> Self {
        Self {
            source,
            processor,
            deliverer,
            config,
        }
    }

    /// Run all configured rounds against the tracking context.
    ///
    /// Source errors are fatal. Delivery failures follow the failure policy;
    /// even under skip-and-continue the run as a whole fails when every
    /// single send failed.
    pub async fn run(&mut self, ctx: &TrackingContext) -> Result<RunSummary, DriverError> {
        info!(
            rounds = self.config.rounds,
            tracking_code = %ctx.tracking_code,
            "Starting delivery rounds"
        );

        let mut summary = RunSummary::default();
        for round in 1..=self.config.rounds {
            let mut batches = self.source.read_batches().await?;

            for batch in &mut batches {
                for statement in &mut batch.statements {
                    if self.config.prefix_actor_names {
                        prefix_round_actor(statement, round);
                    }
                    self.processor.normalize(statement);
                }

                match self.config.send_mode {
                    SendMode::PerStatement => {
                        for statement in batch.statements.chunks_mut(1) {
                            self.send(ctx, statement, &mut summary).await?;
                        }
                    }
                    SendMode::PerBatch => {
                        self.send(ctx, &mut batch.statements, &mut summary).await?;
                    }
                }
            }

            summary.rounds_completed = round;
            info!(
                round,
                delivered = summary.delivered,
                failed = summary.failed,
                "Round complete"
            );
        }

        if summary.all_failed() {
            return Err(DriverError::AllSendsFailed {
                failed: summary.failed,
                rounds: summary.rounds_completed,
            });
        }
        Ok(summary)
    }

    async fn send(
        &mut self,
        ctx: &TrackingContext,
        statements: &mut [Statement],
        summary: &mut RunSummary,
    ) -> Result<(), DriverError> {
        if statements.is_empty() {
            return Ok(());
        }

        match self.deliverer.deliver(ctx, statements).await {
            Ok(()) => summary.delivered += statements.len(),
            Err(e) => {
                summary.failed += statements.len();
                match self.config.failure_policy {
                    FailurePolicy::SkipAndContinue => {
                        warn!(error = %e, "Delivery failed, continuing")
                    }
                    FailurePolicy::FailFast => return Err(DriverError::Delivery(e)),
                }
            }
        }

        if !self.config.send_delay.is_zero() {
            sleep(self.config.send_delay).await;
        }
        Ok(())
    }
}
