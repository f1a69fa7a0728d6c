//! API-key registry — the access gate for the gated deployment variant.
//!
//! Keys are opaque strings in a process-wide allow-list, each optionally
//! bound to a persona (system instruction) that overrides the deployment
//! default. Keys minted at runtime have no bound persona. No expiry, no
//! revocation short of a restart.

use dashmap::DashMap;
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use thiserror::Error;

/// Length of the random suffix of minted keys.
const KEY_SUFFIX_LEN: usize = 16;

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("Invalid or missing API key")]
    Unauthorized,
}

/// Allow-list of API keys with optional per-key personas.
#[derive(Debug, Default)]
pub struct KeyRegistry {
    keys: DashMap<String, Option<String>>,
}

impl KeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds a key, optionally binding a persona to it.
    pub fn seed(&self, key: impl Into<String>, persona: Option<String>) {
        self.keys.insert(key.into(), persona);
    }

    /// Validates a presented credential.
    ///
    /// Returns the persona bound to the key, or `None` if the key is valid
    /// but unbound (the caller falls back to the deployment default).
    pub fn authenticate(&self, key: &str) -> Result<Option<String>, KeyError> {
        if key.is_empty() {
            return Err(KeyError::Unauthorized);
        }
        self.keys
            .get(key)
            .map(|entry| entry.value().clone())
            .ok_or(KeyError::Unauthorized)
    }

    /// Mints a new random key, inserts it unbound, and returns it.
    pub fn register(&self) -> String {
        let suffix: String = rng()
            .sample_iter(&Alphanumeric)
            .take(KEY_SUFFIX_LEN)
            .map(char::from)
            .collect();
        let key = format!("user_{suffix}");
        self.keys.insert(key.clone(), None);
        key
    }

    /// Number of registered keys (health metadata).
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_then_authenticate_yields_unbound_persona() {
        let registry = KeyRegistry::new();
        let key = registry.register();

        assert!(key.starts_with("user_"));
        assert_eq!(key.len(), "user_".len() + KEY_SUFFIX_LEN);
        assert!(registry.authenticate(&key).unwrap().is_none());
    }

    #[test]
    fn seeded_key_carries_its_persona() {
        let registry = KeyRegistry::new();
        registry.seed("demo_key_123", Some("You are the demo bot.".into()));

        let persona = registry.authenticate("demo_key_123").unwrap();
        assert_eq!(persona.as_deref(), Some("You are the demo bot."));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let registry = KeyRegistry::new();
        registry.seed("demo_key_123", None);

        assert!(matches!(
            registry.authenticate("wrong"),
            Err(KeyError::Unauthorized)
        ));
    }

    #[test]
    fn empty_key_is_rejected() {
        let registry = KeyRegistry::new();
        assert!(matches!(
            registry.authenticate(""),
            Err(KeyError::Unauthorized)
        ));
    }

    #[test]
    fn minted_keys_are_distinct() {
        let registry = KeyRegistry::new();
        let a = registry.register();
        let b = registry.register();
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
    }
}
