//! Hit/miss metrics derived from the cache store's lifetime counters.
//!
//! The counters cover every lookup against the cache store, not only the
//! collection key, so the ratio describes the whole store.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{error, info};

use super::cache_call;
use crate::cache::{CacheBackend, CacheStats};

/// Hit ratio as a percentage rounded to two decimals; 0 when nothing was looked up.
pub fn hit_ratio_percentage(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        return 0.0;
    }
    let ratio = hits as f64 / total as f64 * 100.0;
    (ratio * 100.0).round() / 100.0
}

// == Cache Metrics ==
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheMetrics {
    pub keyspace_hits: u64,
    pub keyspace_misses: u64,
    pub total_requests: u64,
    pub hit_ratio_percentage: f64,
    /// Set when the counters could not be read; all numbers are then zero
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CacheMetrics {
    pub fn from_stats(stats: CacheStats) -> Self {
        Self {
            keyspace_hits: stats.hits,
            keyspace_misses: stats.misses,
            total_requests: stats.total(),
            hit_ratio_percentage: hit_ratio_percentage(stats.hits, stats.misses),
            error: None,
        }
    }

    pub fn unavailable(error: impl Into<String>) -> Self {
        Self {
            keyspace_hits: 0,
            keyspace_misses: 0,
            total_requests: 0,
            hit_ratio_percentage: 0.0,
            error: Some(error.into()),
        }
    }
}

// == Metrics Reporter ==
#[derive(Clone)]
pub struct MetricsReporter {
    cache: Arc<dyn CacheBackend>,
    timeout: Duration,
}

impl MetricsReporter {
    pub fn new(cache: Arc<dyn CacheBackend>, timeout: Duration) -> Self {
        Self { cache, timeout }
    }

    /// Never fails: an unreachable cache yields zeroed metrics with `error` set.
    pub async fn get_metrics(&self) -> CacheMetrics {
        match cache_call(self.timeout, self.cache.stats()).await {
            Ok(stats) => {
                let metrics = CacheMetrics::from_stats(stats);
                info!(
                    "Cache Metrics - Hits: {}, Misses: {}, Hit Ratio: {:.2}%",
                    metrics.keyspace_hits, metrics.keyspace_misses, metrics.hit_ratio_percentage
                );
                metrics
            }
            Err(err) => {
                error!("Error retrieving cache metrics: {}", err);
                CacheMetrics::unavailable(err.to_string())
            }
        }
    }
}
