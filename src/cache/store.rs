//! Cache Store Module
//!
//! In-memory cache engine: a HashMap of TTL entries behind a lock, counting
//! every lookup as a hit or a miss.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheBackend, CacheEntry, CacheStats};
use crate::error::CacheError;

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, CacheEntry>,
    stats: CacheStats,
}

// == Memory Cache Store ==
/// In-process stand-in for a networked cache server.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    inner: RwLock<Inner>,
}

impl MemoryCacheStore {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub async fn cleanup_expired(&self) -> usize {
        let mut inner = self.inner.write().await;
        let before = inner.entries.len();
        inner.entries.retain(|_, entry| !entry.is_expired());
        before - inner.entries.len()
    }

    // == Clear ==
    /// Drops every entry. Counters are left untouched.
    pub async fn clear(&self) {
        self.inner.write().await.entries.clear();
    }

    // == Length ==
    /// Number of stored entries, expired ones included until cleanup runs.
    pub async fn len(&self) -> usize {
        self.inner.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CacheBackend for MemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        // Write lock: lookups mutate the counters and may drop an expired entry
        let mut inner = self.inner.write().await;

        let expired = inner.entries.get(key).map(CacheEntry::is_expired);
        if expired == Some(true) {
            inner.entries.remove(key);
        }
        let live = inner
            .entries
            .get(key)
            .map(|entry| entry.value.clone());

        match live {
            Some(value) => {
                inner.stats.record_hit();
                Ok(Some(value))
            }
            None => {
                inner.stats.record_miss();
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, value: String, ttl_seconds: u64) -> Result<(), CacheError> {
        let mut inner = self.inner.write().await;
        inner
            .entries
            .insert(key.to_string(), CacheEntry::new(value, ttl_seconds));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.inner.write().await.entries.remove(key);
        Ok(())
    }

    async fn stats(&self) -> Result<CacheStats, CacheError> {
        Ok(self.inner.read().await.stats)
    }
}
