//! Per-actor auth token cache.

use std::collections::HashMap;

/// Maps an actor name to the auth token issued by its collection-start call,
/// so repeated sends by the same actor skip re-authentication.
///
/// Purely in-memory, no eviction; bounded by the small number of distinct
/// actors in a run and dropped with the process.
#[derive(Debug, Default)]
pub struct TokenCache {
    tokens: HashMap<String, String>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, actor: &str) -> Option<&str> {
        self.tokens.get(actor).map(String::as_str)
    }

    pub fn insert(&mut self, actor: impl Into<String>, token: impl Into<String>) {
        self.tokens.insert(actor.into(), token.into());
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_absent() {
        let cache = TokenCache::new();
        assert!(cache.get("alice").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_insert_and_get() {
        let mut cache = TokenCache::new();
        cache.insert("alice", "token-1");

        assert_eq!(cache.get("alice"), Some("token-1"));
        assert!(cache.get("bob").is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_insert_overwrites() {
        let mut cache = TokenCache::new();
        cache.insert("alice", "token-1");
        cache.insert("alice", "token-2");

        assert_eq!(cache.get("alice"), Some("token-2"));
        assert_eq!(cache.len(), 1);
    }
}
