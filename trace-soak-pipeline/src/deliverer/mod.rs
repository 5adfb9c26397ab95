//! Batch delivery client.
//!
//! Submits statement batches to the collector's two-step protocol: a
//! collection-start call that yields a per-actor auth token (cached for the
//! lifetime of the run), then a track call carrying the statements.

use std::sync::Arc;

use tracing::debug;

use crate::errors::DeliveryError;
use crate::token_cache::TokenCache;
use collector_client::CollectorApi;
use trace_soak_shared::types::{Statement, TrackingContext};

/// Cache key for statements whose source supplied no actor name.
const ANONYMOUS_ACTOR: &str = "anonymous";

/// Configuration for the delivery client.
#[derive(Debug, Clone, Default)]
pub struct DeliveryConfig {
    /// Overwrite every statement's actor with the canonical descriptor the
    /// collector returns from the start call.
    pub stamp_canonical_actor: bool,
}

/// Delivery client for statement batches.
///
/// Guarantees at most one collection-start call per distinct actor name per
/// run, and preserves statement order within each track call.
pub struct Deliverer {
    collector: Arc<dyn CollectorApi>,
    tokens: TokenCache,
    config: DeliveryConfig,
}

impl Deliverer {
    /// Create a delivery client with default configuration.
    pub fn new(collector: Arc<dyn CollectorApi>) -> Self {
        Self {
            collector,
            tokens: TokenCache::new(),
            config: DeliveryConfig::default(),
        }
    }

    /// Create a delivery client with custom configuration.
    pub fn with_config(collector: Arc<dyn CollectorApi>, config: DeliveryConfig) -> Self {
        Self {
            collector,
            tokens: TokenCache::new(),
            config,
        }
    }

    /// Tokens cached so far, keyed by actor name.
    pub fn token_cache(&self) -> &TokenCache {
        &self.tokens
    }

    /// Deliver a batch of statements under the actor of its first statement.
    ///
    /// On a cache miss the collection-start call runs first and its token is
    /// cached; a failure at either step fails the whole batch and is not
    /// retried.
    pub async fn deliver(
        &mut self,
        ctx: &TrackingContext,
        statements: &mut [Statement],
    ) -> Result<(), DeliveryError> {
        let actor = statements
            .first()
            .and_then(|s| s.actor_name())
            .unwrap_or(ANONYMOUS_ACTOR)
            .to_string();

        let token = match self.tokens.get(&actor) {
            Some(token) => token.to_string(),
            None => {
                let start = self
                    .collector
                    .collector_start(&ctx.tracking_code)
                    .await
                    .map_err(|e| DeliveryError::start(&actor, e))?;

                if self.config.stamp_canonical_actor {
                    if let Some(canonical) = &start.actor {
                        for statement in statements.iter_mut() {
                            statement.actor = Some(canonical.clone());
                        }
                    }
                }

                self.tokens.insert(actor.clone(), start.auth_token.clone());
                debug!(actor = %actor, "Opened collection session");
                start.auth_token
            }
        };

        self.collector
            .collector_track(&token, statements)
            .await
            .map_err(|e| DeliveryError::track(&actor, e))?;

        debug!(actor = %actor, count = statements.len(), "Statements sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collector_client::mock::endpoints;
    use collector_client::MockCollector;
    use trace_soak_shared::types::Actor;

    fn statement(name: &str) -> Statement {
        Statement {
            actor: Some(Actor::named(name)),
            ..Statement::default()
        }
    }

    fn context() -> TrackingContext {
        TrackingContext::external("code-1")
    }

    #[tokio::test]
    async fn test_start_called_once_per_actor() {
        let collector = Arc::new(MockCollector::new());
        let mut deliverer = Deliverer::new(collector.clone());
        let ctx = context();

        for _ in 0..3 {
            let mut batch = vec![statement("alice")];
            deliverer.deliver(&ctx, &mut batch).await.unwrap();
        }

        assert_eq!(collector.start_call_count(), 1);
        assert_eq!(collector.track_call_count(), 3);
        assert_eq!(deliverer.token_cache().get("alice"), Some("token-1"));
    }

    #[tokio::test]
    async fn test_distinct_actors_get_distinct_sessions() {
        let collector = Arc::new(MockCollector::new());
        let mut deliverer = Deliverer::new(collector.clone());
        let ctx = context();

        deliverer.deliver(&ctx, &mut [statement("alice")]).await.unwrap();
        deliverer.deliver(&ctx, &mut [statement("bob")]).await.unwrap();

        assert_eq!(collector.start_call_count(), 2);
        let tracked = collector.tracked();
        assert_eq!(tracked[0].0, "token-1");
        assert_eq!(tracked[1].0, "token-2");
    }

    #[tokio::test]
    async fn test_cached_token_reused_for_track() {
        let collector = Arc::new(MockCollector::new());
        let mut deliverer = Deliverer::new(collector.clone());
        let ctx = context();

        deliverer.deliver(&ctx, &mut [statement("alice")]).await.unwrap();
        deliverer.deliver(&ctx, &mut [statement("alice")]).await.unwrap();

        let tracked = collector.tracked();
        assert_eq!(tracked[0].0, "token-1");
        assert_eq!(tracked[1].0, "token-1");
    }

    #[tokio::test]
    async fn test_start_failure_is_delivery_error() {
        let collector = Arc::new(MockCollector::new());
        collector.reject(endpoints::START);
        let mut deliverer = Deliverer::new(collector.clone());
        let ctx = context();

        let result = deliverer.deliver(&ctx, &mut [statement("alice")]).await;

        assert!(matches!(result, Err(DeliveryError::Start { .. })));
        assert_eq!(collector.track_call_count(), 0);
        assert!(deliverer.token_cache().is_empty());
    }

    #[tokio::test]
    async fn test_track_failure_is_delivery_error() {
        let collector = Arc::new(MockCollector::new());
        collector.reject(endpoints::TRACK);
        let mut deliverer = Deliverer::new(collector.clone());
        let ctx = context();

        let result = deliverer.deliver(&ctx, &mut [statement("alice")]).await;

        assert!(matches!(result, Err(DeliveryError::Track { .. })));
    }

    #[tokio::test]
    async fn test_statement_order_preserved() {
        let collector = Arc::new(MockCollector::new());
        let mut deliverer = Deliverer::new(collector.clone());
        let ctx = context();

        let mut batch: Vec<Statement> = (0..5)
            .map(|i| {
                let mut s = statement("alice");
                s.extra
                    .insert("seq".to_string(), serde_json::Value::from(i));
                s
            })
            .collect();
        deliverer.deliver(&ctx, &mut batch).await.unwrap();

        let delivered = collector.delivered_statements();
        let sequence: Vec<i64> = delivered
            .iter()
            .map(|s| s.extra.get("seq").and_then(|v| v.as_i64()).unwrap())
            .collect();
        assert_eq!(sequence, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_canonical_actor_stamped_when_enabled() {
        let collector = Arc::new(MockCollector::new());
        collector.set_start_actor(Actor::named("canonical"));
        let mut deliverer = Deliverer::with_config(
            collector.clone(),
            DeliveryConfig {
                stamp_canonical_actor: true,
            },
        );
        let ctx = context();

        deliverer
            .deliver(&ctx, &mut [statement("alice"), statement("alice")])
            .await
            .unwrap();

        let delivered = collector.delivered_statements();
        assert!(delivered.iter().all(|s| s.actor_name() == Some("canonical")));
    }

    #[tokio::test]
    async fn test_canonical_actor_ignored_by_default() {
        let collector = Arc::new(MockCollector::new());
        collector.set_start_actor(Actor::named("canonical"));
        let mut deliverer = Deliverer::new(collector.clone());
        let ctx = context();

        deliverer.deliver(&ctx, &mut [statement("alice")]).await.unwrap();

        let delivered = collector.delivered_statements();
        assert_eq!(delivered[0].actor_name(), Some("alice"));
    }

    #[tokio::test]
    async fn test_actorless_statements_share_anonymous_session() {
        let collector = Arc::new(MockCollector::new());
        let mut deliverer = Deliverer::new(collector.clone());
        let ctx = context();

        deliverer
            .deliver(&ctx, &mut [Statement::default()])
            .await
            .unwrap();
        deliverer
            .deliver(&ctx, &mut [Statement::default()])
            .await
            .unwrap();

        assert_eq!(collector.start_call_count(), 1);
        assert_eq!(deliverer.token_cache().get("anonymous"), Some("token-1"));
    }
}
