use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identity performing tracked actions.
///
/// The `name` is the key used for token caching; every other field the
/// source provides (account objects, mbox, etc.) is carried through
/// untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Actor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Actor {
    /// Create an actor with only a name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_fields_roundtrip() {
        let raw = r#"{"name":"alice","mbox":"mailto:alice@example.com"}"#;
        let actor: Actor = serde_json::from_str(raw).unwrap();

        assert_eq!(actor.name.as_deref(), Some("alice"));
        assert_eq!(
            actor.extra.get("mbox").and_then(|v| v.as_str()),
            Some("mailto:alice@example.com")
        );

        let back = serde_json::to_value(&actor).unwrap();
        assert_eq!(back, serde_json::from_str::<serde_json::Value>(raw).unwrap());
    }
}
