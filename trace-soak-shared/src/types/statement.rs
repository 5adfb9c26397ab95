//! xAPI-style statement types.
//!
//! Statements arrive as arbitrary JSON from the source. Only the fields the
//! pipeline inspects or rewrites are modeled; everything else (verb, context,
//! timestamp, ...) is carried through verbatim via flattened maps.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::Actor;

/// One structured event record describing an actor performing an action on
/// an object, with optional result data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Statement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<Actor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<StatementObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<StatementResult>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Statement {
    /// The actor name, when the source supplied one.
    pub fn actor_name(&self) -> Option<&str> {
        self.actor.as_ref().and_then(|a| a.name.as_deref())
    }
}

/// The object a statement acts on. The collector requires a definition type
/// on every submitted statement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatementObject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<ObjectDefinition>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjectDefinition {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Optional result block; extensions hold URI-keyed experiment data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatementResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_of_uninterpreted_fields() {
        let raw = r#"{
            "actor": {"name": "alice"},
            "verb": {"id": "http://adlnet.gov/expapi/verbs/completed"},
            "object": {"id": "level-1", "definition": {"type": "serious-game", "name": {"en": "Level 1"}}},
            "timestamp": "2016-01-22T14:11:22Z"
        }"#;
        let statement: Statement = serde_json::from_str(raw).unwrap();

        assert_eq!(statement.actor_name(), Some("alice"));
        assert!(statement.extra.contains_key("verb"));
        assert!(statement.extra.contains_key("timestamp"));

        let object = statement.object.as_ref().unwrap();
        assert_eq!(
            object.extra.get("id").and_then(|v| v.as_str()),
            Some("level-1")
        );
        let definition = object.definition.as_ref().unwrap();
        assert_eq!(definition.object_type.as_deref(), Some("serious-game"));
        assert!(definition.extra.contains_key("name"));

        let back = serde_json::to_value(&statement).unwrap();
        assert_eq!(back, serde_json::from_str::<Value>(raw).unwrap());
    }

    #[test]
    fn test_statement_without_object() {
        let statement: Statement = serde_json::from_str(r#"{"actor":{"name":"bob"}}"#).unwrap();
        assert!(statement.object.is_none());
        assert!(statement.result.is_none());
    }
}
