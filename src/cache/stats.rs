//! Cache Statistics Module
//!
//! Cumulative lookup counters kept by the cache store over its whole lifetime.

use serde::Serialize;

// == Cache Stats ==
/// Raw hit/miss counters. Every key lookup counts, not only the collection key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups that found a live entry
    pub hits: u64,
    /// Lookups that found nothing or an expired entry
    pub misses: u64,
}

impl CacheStats {
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Total lookups observed.
    pub fn total(&self) -> u64 {
        self.hits + self.misses
    }
}
