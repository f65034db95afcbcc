//! Evicts the cached collection after every committed write.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{error, info};

use super::{cache_call, Generation, ALL_PROPERTIES_KEY};
use crate::cache::CacheBackend;
use crate::error::CacheError;
use crate::properties::{MutationListener, PropertyEvent};

// == Invalidation Hook ==
/// Registered with the repository; deletes the collection key on any mutation.
#[derive(Clone)]
pub struct InvalidationHook {
    cache: Arc<dyn CacheBackend>,
    generation: Generation,
    timeout: Duration,
}

impl InvalidationHook {
    pub fn new(cache: Arc<dyn CacheBackend>, generation: Generation, timeout: Duration) -> Self {
        Self {
            cache,
            generation,
            timeout,
        }
    }

    /// Evicts the collection entry.
    ///
    /// The generation is bumped before the delete so an in-flight populate
    /// either sees the bump or is removed by the delete.
    pub async fn invalidate(&self) -> Result<(), CacheError> {
        self.generation.bump();
        cache_call(self.timeout, self.cache.delete(ALL_PROPERTIES_KEY)).await
    }
}

#[async_trait]
impl MutationListener for InvalidationHook {
    async fn on_mutation(&self, event: PropertyEvent) {
        info!(
            "Property {} was {}. Invalidating cache...",
            event.id(),
            event.action()
        );

        match self.invalidate().await {
            Ok(()) => info!("Cache invalidated successfully"),
            // The write already committed; a stale entry lives at most one TTL
            Err(err) => error!(
                "Cache invalidation failed after property {} was {}: {}",
                event.id(),
                event.action(),
                err
            ),
        }
    }
}
