//! In-memory result cache with a fixed time-to-live.
//!
//! Keys are content-derived: a hash of the raw connection string and the
//! normalized query text. Only successful results are stored, always with
//! `cache_hit = false` baked in; the orchestrator flags the returned copy
//! on retrieval without mutating the stored entry. Expired entries are
//! dropped lazily on lookup.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::engine::ExecutionResult;

/// Default entry lifetime.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Derives the cache key for a request.
///
/// The key is a hex digest over the raw connection string (empty when no
/// database is configured) concatenated with the trimmed, lowercased
/// query text.
pub fn cache_key(connection_string: &str, question: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(connection_string.as_bytes());
    hasher.update(question.trim().to_lowercase().as_bytes());
    hex::encode(hasher.finalize())
}

struct CacheEntry {
    stored_at: Instant,
    value: ExecutionResult,
}

/// Shared in-memory result cache.
///
/// Concurrent requests may race on the same miss; both will compute and
/// the last write wins, which is fine because results for the same key
/// are equivalent.
pub struct ResultCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultCache {
    /// Creates a cache with the default 60-second TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Creates a cache with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Looks up a cached result, evicting it first if expired.
    pub fn get(&self, key: &str) -> Option<ExecutionResult> {
        let mut entries = self.entries.lock().expect("cache lock poisoned");

        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() <= self.ttl => {
                debug!(key, "Cache hit");
                Some(entry.value.clone())
            }
            Some(_) => {
                debug!(key, "Cache entry expired");
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Stores a result under the given key.
    pub fn set(&self, key: &str, value: ExecutionResult) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.insert(
            key.to_string(),
            CacheEntry {
                stored_at: Instant::now(),
                value,
            },
        );
    }

    /// Returns the number of live entries (expired ones may linger until
    /// their next lookup).
    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache lock poisoned").len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
