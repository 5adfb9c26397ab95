//! Statement normalization.
//!
//! Every statement leaves this module with a present, non-empty
//! `object.definition.type`; the collector rejects statements without one.
//! The processor also owns per-round actor renaming and the optional
//! experiment extensions attached to the result block.

use rand::Rng;
use serde_json::{Map, Value};

use trace_soak_shared::types::{ObjectDefinition, Statement, StatementObject, StatementResult};

/// Sentinel object type filled in when the source omits one.
pub const DEFAULT_OBJECT_TYPE: &str = ".../test_type";

/// Extension key carrying the experiment group label.
pub const EXPERIMENT_GROUP_EXTENSION: &str =
    "https://analytics.e-ucm.es/xapi/ext/experiment-group";

/// Extension key carrying the randomized feature flags.
pub const FEATURE_FLAGS_EXTENSION: &str = "https://analytics.e-ucm.es/xapi/ext/feature-flags";

/// Experiment groups, one of which is assigned uniformly per statement.
pub const EXPERIMENT_GROUPS: [&str; 5] =
    ["control", "variant-a", "variant-b", "variant-c", "variant-d"];

/// Feature flags, each drawn independently with probability 0.5.
pub const FEATURE_FLAGS: [&str; 6] = [
    "hints",
    "audio",
    "subtitles",
    "tutorial_skipped",
    "hard_mode",
    "fullscreen",
];

/// Configuration for the statement processor.
#[derive(Debug, Clone, Default)]
pub struct ProcessorConfig {
    /// Attach randomized experiment-group and feature-flag extensions to
    /// every statement.
    pub experiment_extensions: bool,
}

/// Processor that normalizes statements before delivery.
pub struct StatementProcessor {
    config: ProcessorConfig,
}

impl StatementProcessor {
    /// Create a processor with default configuration.
    pub fn new() -> Self {
        Self {
            config: ProcessorConfig::default(),
        }
    }

    /// Create a processor with custom configuration.
    pub fn with_config(config: ProcessorConfig) -> Self {
        Self { config }
    }

    /// Normalize a single statement in place.
    pub fn normalize(&self, statement: &mut Statement) {
        let object = statement
            .object
            .get_or_insert_with(StatementObject::default);
        let definition = object
            .definition
            .get_or_insert_with(ObjectDefinition::default);
        match definition.object_type.as_deref() {
            Some(object_type) if !object_type.is_empty() => {}
            _ => definition.object_type = Some(DEFAULT_OBJECT_TYPE.to_string()),
        }

        if self.config.experiment_extensions {
            attach_experiment_extensions(statement);
        }
    }
}

impl Default for StatementProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Rewrite the actor name so statements from different rounds stay
/// distinguishable on the collector. Statements without an actor are left
/// untouched.
pub fn prefix_round_actor(statement: &mut Statement, round: u32) {
    if let Some(actor) = &mut statement.actor {
        if let Some(name) = &actor.name {
            actor.name = Some(format!("round-{}-{}", round, name));
        }
    }
}

fn attach_experiment_extensions(statement: &mut Statement) {
    let mut rng = rand::thread_rng();

    let group = EXPERIMENT_GROUPS[rng.gen_range(0..EXPERIMENT_GROUPS.len())];
    let mut flags = Map::new();
    for flag in FEATURE_FLAGS {
        flags.insert(flag.to_string(), Value::Bool(rng.gen_bool(0.5)));
    }

    let result = statement
        .result
        .get_or_insert_with(StatementResult::default);
    let extensions = result.extensions.get_or_insert_with(Map::new);
    extensions.insert(
        EXPERIMENT_GROUP_EXTENSION.to_string(),
        Value::String(group.to_string()),
    );
    extensions.insert(FEATURE_FLAGS_EXTENSION.to_string(), Value::Object(flags));
}

#[cfg(test)]
mod tests {
    use super::*;
    use trace_soak_shared::types::Actor;

    fn statement_with_actor(name: &str) -> Statement {
        Statement {
            actor: Some(Actor::named(name)),
            ..Statement::default()
        }
    }

    #[test]
    fn test_missing_object_gets_default_type() {
        let processor = StatementProcessor::new();
        let mut statement = statement_with_actor("alice");

        processor.normalize(&mut statement);

        let definition = statement.object.unwrap().definition.unwrap();
        assert_eq!(definition.object_type.as_deref(), Some(DEFAULT_OBJECT_TYPE));
    }

    #[test]
    fn test_missing_definition_type_gets_default() {
        let processor = StatementProcessor::new();
        let mut statement: Statement =
            serde_json::from_str(r#"{"object":{"id":"level-1","definition":{}}}"#).unwrap();

        processor.normalize(&mut statement);

        let object = statement.object.unwrap();
        assert_eq!(
            object.definition.unwrap().object_type.as_deref(),
            Some(DEFAULT_OBJECT_TYPE)
        );
        // The rest of the object is untouched.
        assert_eq!(object.extra.get("id").and_then(|v| v.as_str()), Some("level-1"));
    }

    #[test]
    fn test_existing_type_is_preserved() {
        let processor = StatementProcessor::new();
        let mut statement: Statement =
            serde_json::from_str(r#"{"object":{"definition":{"type":"serious-game"}}}"#).unwrap();

        processor.normalize(&mut statement);

        assert_eq!(
            statement
                .object
                .unwrap()
                .definition
                .unwrap()
                .object_type
                .as_deref(),
            Some("serious-game")
        );
    }

    #[test]
    fn test_empty_type_is_replaced() {
        let processor = StatementProcessor::new();
        let mut statement: Statement =
            serde_json::from_str(r#"{"object":{"definition":{"type":""}}}"#).unwrap();

        processor.normalize(&mut statement);

        assert_eq!(
            statement
                .object
                .unwrap()
                .definition
                .unwrap()
                .object_type
                .as_deref(),
            Some(DEFAULT_OBJECT_TYPE)
        );
    }

    #[test]
    fn test_unknown_fields_survive_normalization() {
        let processor = StatementProcessor::new();
        let raw = r#"{
            "actor": {"name": "alice"},
            "verb": {"id": "http://adlnet.gov/expapi/verbs/completed"},
            "timestamp": "2016-01-22T14:11:22Z"
        }"#;
        let mut statement: Statement = serde_json::from_str(raw).unwrap();

        processor.normalize(&mut statement);

        let original: Value = serde_json::from_str(raw).unwrap();
        let normalized = serde_json::to_value(&statement).unwrap();
        assert_eq!(normalized["verb"], original["verb"]);
        assert_eq!(normalized["timestamp"], original["timestamp"]);
        assert_eq!(normalized["actor"], original["actor"]);
    }

    #[test]
    fn test_round_prefix() {
        let mut statement = statement_with_actor("alice");
        prefix_round_actor(&mut statement, 2);
        assert_eq!(statement.actor_name(), Some("round-2-alice"));
    }

    #[test]
    fn test_round_prefix_without_actor() {
        let mut statement = Statement::default();
        prefix_round_actor(&mut statement, 2);
        assert!(statement.actor.is_none());
    }

    #[test]
    fn test_experiment_extensions_attached() {
        let processor = StatementProcessor::with_config(ProcessorConfig {
            experiment_extensions: true,
        });
        let mut statement = statement_with_actor("alice");

        processor.normalize(&mut statement);

        let extensions = statement.result.unwrap().extensions.unwrap();
        let group = extensions
            .get(EXPERIMENT_GROUP_EXTENSION)
            .and_then(|v| v.as_str())
            .unwrap();
        assert!(EXPERIMENT_GROUPS.contains(&group));

        let flags = extensions
            .get(FEATURE_FLAGS_EXTENSION)
            .and_then(|v| v.as_object())
            .unwrap();
        assert_eq!(flags.len(), FEATURE_FLAGS.len());
        assert!(flags.values().all(|v| v.is_boolean()));
    }

    #[test]
    fn test_extensions_merge_into_existing_result() {
        let processor = StatementProcessor::with_config(ProcessorConfig {
            experiment_extensions: true,
        });
        let mut statement: Statement = serde_json::from_str(
            r#"{"result":{"score":{"raw":10},"extensions":{"custom":"kept"}}}"#,
        )
        .unwrap();

        processor.normalize(&mut statement);

        let result = statement.result.unwrap();
        assert!(result.extra.contains_key("score"));
        let extensions = result.extensions.unwrap();
        assert_eq!(extensions.get("custom").and_then(|v| v.as_str()), Some("kept"));
        assert!(extensions.contains_key(EXPERIMENT_GROUP_EXTENSION));
    }
}
