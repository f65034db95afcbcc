//! Caching Module
//!
//! The read-through cache for the property collection, the hook that evicts it
//! after writes, and the hit/miss metrics reporter.
//!
//! All three share one injected [`CacheBackend`] handle. The collection lives
//! under a single fixed key; any mutation evicts it whole.
//!
//! [`CacheBackend`]: crate::cache::CacheBackend

mod invalidation;
mod metrics;
mod read_through;

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub use invalidation::InvalidationHook;
pub use metrics::{hit_ratio_percentage, CacheMetrics, MetricsReporter};
pub use read_through::{CacheOutcome, Fetched, ReadThroughCache};

use crate::config::{Config, DEFAULT_CACHE_TTL};
use crate::error::CacheError;

/// Cache key holding the full property collection.
pub const ALL_PROPERTIES_KEY: &str = "all_properties";

// == Cache Settings ==
/// Tuning shared by the caching components.
#[derive(Debug, Clone, Copy)]
pub struct CacheSettings {
    /// TTL applied when the collection is populated
    pub ttl_seconds: u64,
    /// Deadline for each cache store call
    pub cache_timeout: Duration,
    /// Deadline for each record store call
    pub store_timeout: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_CACHE_TTL,
            cache_timeout: Duration::from_millis(500),
            store_timeout: Duration::from_secs(5),
        }
    }
}

impl From<&Config> for CacheSettings {
    fn from(config: &Config) -> Self {
        Self {
            ttl_seconds: config.cache_ttl,
            cache_timeout: config.cache_timeout,
            store_timeout: config.store_timeout,
        }
    }
}

// == Invalidation Generation ==
/// Counter bumped by every invalidation.
///
/// A reader snapshots it before querying the record store and refuses to
/// publish its result if the value moved in the meantime.
#[derive(Debug, Clone, Default)]
pub struct Generation(Arc<AtomicU64>);

impl Generation {
    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    pub(crate) fn bump(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// Runs a cache store call under a deadline.
pub(crate) async fn cache_call<T, F>(deadline: Duration, call: F) -> Result<T, CacheError>
where
    F: Future<Output = Result<T, CacheError>>,
{
    tokio::time::timeout(deadline, call)
        .await
        .unwrap_or(Err(CacheError::Timeout(deadline)))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_bumps_monotonically() {
        let generation = Generation::default();
        let shared = generation.clone();

        assert_eq!(generation.current(), 0);
        assert_eq!(shared.bump(), 1);
        assert_eq!(generation.bump(), 2);
        assert_eq!(shared.current(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_call_timeout() {
        let result: Result<(), CacheError> = cache_call(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(1)).await;
            Ok(())
        })
        .await;

        assert_eq!(result, Err(CacheError::Timeout(Duration::from_millis(10))));
    }

    #[test]
    fn test_settings_from_config() {
        let config = Config {
            cache_ttl: 42,
            ..Config::default()
        };
        let settings = CacheSettings::from(&config);
        assert_eq!(settings.ttl_seconds, 42);
        assert_eq!(settings.cache_timeout, config.cache_timeout);
    }
}
