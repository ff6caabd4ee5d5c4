//! Content-addressed result cache.
//!
//! Keys are SHA-256 digests of the raw uploaded bytes, so byte-identical
//! files hit the same entry regardless of filename. Eviction removes the
//! least-recently-accessed entry once the configured capacity is reached.
//! Entries never expire by age.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use sha2::{Digest, Sha256};

use crate::models::ParsedResume;

/// SHA-256 hex digest of a file's raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    pub fn of(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        let digest = hasher.finalize();
        let mut hex = String::with_capacity(64);
        for byte in digest {
            hex.push_str(&format!("{byte:02x}"));
        }
        ContentHash(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short prefix for log lines.
    pub fn short(&self) -> &str {
        &self.0[..12]
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

struct CacheEntry {
    parsed: ParsedResume,
    last_access: Instant,
}

/// Process-wide parse-result cache. Interior mutex; every operation is a
/// single short critical section.
pub struct ResultCache {
    capacity: usize,
    entries: Mutex<HashMap<ContentHash, CacheEntry>>,
}

impl ResultCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Looks up a previous result for these bytes, refreshing its recency.
    pub fn get(&self, hash: &ContentHash) -> Option<ParsedResume> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let entry = entries.get_mut(hash)?;
        entry.last_access = Instant::now();
        Some(entry.parsed.clone())
    }

    /// Stores a result, evicting the least-recently-accessed entry first
    /// when a new key would exceed capacity. Re-putting an existing key
    /// replaces the value and refreshes recency without evicting.
    pub fn put(&self, hash: ContentHash, parsed: ParsedResume) {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if !entries.contains_key(&hash) && entries.len() >= self.capacity {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_access)
                .map(|(key, _)| key.clone());
            if let Some(oldest) = oldest {
                tracing::debug!(evicted = oldest.short(), "cache at capacity");
                entries.remove(&oldest);
            }
        }

        entries.insert(
            hash,
            CacheEntry {
                parsed,
                last_access: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
