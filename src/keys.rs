//! Key Generation Module
//!
//! Derives namespaced string cache keys so different subsystems sharing
//! one cache instance cannot collide.

// == Key Generator Trait ==
/// Builds cache keys from caller input.
///
/// The provided helpers cover the common namespacing schemes; only the
/// prefix joining is implementation-specific.
pub trait KeyGenerator: Send + Sync {
    /// Derives a cache key from raw input.
    fn generate_key(&self, input: &str) -> String;

    /// Derives a cache key under an explicit prefix ("{prefix}:{input}").
    ///
    /// The prefix is joined before key derivation, so a configured
    /// namespace stays outermost.
    fn generate_key_with_prefix(&self, prefix: &str, input: &str) -> String {
        self.generate_key(&format!("{}:{}", prefix, input))
    }

    /// Key for a single entity, e.g. `article:42`.
    fn entity_key(&self, entity_type: &str, id: &str) -> String {
        self.generate_key_with_prefix(entity_type, id)
    }

    /// Key for a filtered entity list, e.g. `article:list:recent`.
    fn list_key(&self, entity_type: &str, filter: &str) -> String {
        self.generate_key_with_prefix(&format!("{}:list", entity_type), filter)
    }

    /// Key for a session, e.g. `session:abc123`.
    fn session_key(&self, session_id: &str) -> String {
        self.generate_key_with_prefix("session", session_id)
    }
}

// == Default Key Generator ==
/// Key generator with an optional configured namespace prefix.
///
/// With a prefix of `app`, `generate_key("user:1")` yields `app:user:1`;
/// without one the input passes through unchanged.
#[derive(Debug, Clone, Default)]
pub struct DefaultKeyGenerator {
    prefix: Option<String>,
}

impl DefaultKeyGenerator {
    /// Creates a generator without a namespace prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator that prefixes every key with `prefix`.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }
}

impl KeyGenerator for DefaultKeyGenerator {
    fn generate_key(&self, input: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, input),
            None => input.to_string(),
        }
    }
}
