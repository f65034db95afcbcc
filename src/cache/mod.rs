//! Cache Module
//!
//! The cache store boundary and an in-memory implementation of it with TTL
//! expiration and cumulative hit/miss counters.

mod entry;
mod stats;
mod store;


use async_trait::async_trait;

use crate::error::CacheError;

// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::MemoryCacheStore;

// == Cache Backend ==
/// Key-value store with per-entry TTL, shared by every caller of the caching
/// layer. Implementations are internally synchronized: each call is atomic
/// for its key.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Returns the live value under `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Stores `value` under `key`, replacing any previous entry.
    async fn set(&self, key: &str, value: String, ttl_seconds: u64) -> Result<(), CacheError>;

    /// Removes `key`. Removing an absent key succeeds.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Cumulative lookup counters for the lifetime of the store.
    async fn stats(&self) -> Result<CacheStats, CacheError>;
}
