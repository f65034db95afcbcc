//! Read-through cache for the full property collection.

use std::sync::Arc;

use tracing::{info, warn};

use super::{cache_call, CacheSettings, Generation, InvalidationHook, ALL_PROPERTIES_KEY};
use crate::cache::CacheBackend;
use crate::error::StoreError;
use crate::properties::{with_deadline, Property, PropertyStore};

/// How a read was served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    /// Served from the cache store; the record store was not touched
    Hit,
    /// Served from the record store
    Miss,
    /// Cache store unreachable, served from the record store without populating
    Bypass,
}

/// Result of a read along with how it was served.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub properties: Vec<Property>,
    pub outcome: CacheOutcome,
}

// == Read-Through Cache ==
#[derive(Clone)]
pub struct ReadThroughCache {
    cache: Arc<dyn CacheBackend>,
    store: Arc<dyn PropertyStore>,
    generation: Generation,
    settings: CacheSettings,
}

impl ReadThroughCache {
    pub fn new(
        cache: Arc<dyn CacheBackend>,
        store: Arc<dyn PropertyStore>,
        settings: CacheSettings,
    ) -> Self {
        Self {
            cache,
            store,
            generation: Generation::default(),
            settings,
        }
    }

    /// A hook that evicts this cache's collection entry.
    ///
    /// The hook shares the invalidation generation, so a populate racing with
    /// a write is discarded.
    pub fn invalidation_hook(&self) -> InvalidationHook {
        InvalidationHook::new(
            Arc::clone(&self.cache),
            self.generation.clone(),
            self.settings.cache_timeout,
        )
    }

    /// Returns every property, from the cache when possible.
    pub async fn get_all(&self) -> Result<Vec<Property>, StoreError> {
        self.fetch().await.map(|fetched| fetched.properties)
    }

    /// Like [`get_all`](Self::get_all), also reporting hit, miss or bypass.
    pub async fn fetch(&self) -> Result<Fetched, StoreError> {
        let cache_reachable = match cache_call(
            self.settings.cache_timeout,
            self.cache.get(ALL_PROPERTIES_KEY),
        )
        .await
        {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Property>>(&raw) {
                Ok(properties) => {
                    info!("Cache HIT: retrieved {} properties", properties.len());
                    return Ok(Fetched {
                        properties,
                        outcome: CacheOutcome::Hit,
                    });
                }
                Err(err) => {
                    warn!("Cached collection is unreadable ({}), refetching", err);
                    true
                }
            },
            Ok(None) => {
                info!("Cache MISS: fetching properties from the record store");
                true
            }
            Err(err) => {
                warn!("{}; reading from the record store without caching", err);
                false
            }
        };

        let generation = self.generation.current();
        let properties = with_deadline(self.settings.store_timeout, self.store.list_all()).await?;

        if !cache_reachable {
            return Ok(Fetched {
                properties,
                outcome: CacheOutcome::Bypass,
            });
        }

        self.populate(&properties, generation).await;

        Ok(Fetched {
            properties,
            outcome: CacheOutcome::Miss,
        })
    }

    /// Stores the snapshot unless an invalidation happened since `generation`
    /// was read.
    async fn populate(&self, properties: &[Property], generation: u64) {
        if self.generation.current() != generation {
            info!("Collection invalidated during fetch, skipping cache population");
            return;
        }

        let encoded = match serde_json::to_string(properties) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!("Failed to encode properties for caching: {}", err);
                return;
            }
        };

        let timeout = self.settings.cache_timeout;
        let ttl = self.settings.ttl_seconds;
        let populated = cache_call(timeout, self.cache.set(ALL_PROPERTIES_KEY, encoded, ttl)).await;
        if let Err(err) = populated {
            warn!("Failed to populate cache: {}", err);
            return;
        }

        // The set may have landed after a concurrent invalidation's delete
        if self.generation.current() != generation {
            if let Err(err) = cache_call(timeout, self.cache.delete(ALL_PROPERTIES_KEY)).await {
                warn!("Failed to withdraw raced cache population: {}", err);
            }
            return;
        }

        info!("Cached {} properties for {} seconds", properties.len(), ttl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::cache::MemoryCacheStore;
    use crate::caching::test_support::FlakyCache;
    use crate::properties::{InMemoryPropertyStore, PropertyFields};

    async fn seeded_store(count: usize) -> Arc<InMemoryPropertyStore> {
        let store = Arc::new(InMemoryPropertyStore::new());
        for i in 0..count {
            store
                .create(PropertyFields::new(
                    format!("Listing {}", i),
                    "desc",
                    1_000.0 * (i + 1) as f64,
                    "Somewhere",
                ))
                .await
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_first_read_misses_then_hits() {
        let store = seeded_store(3).await;
        let cache = Arc::new(MemoryCacheStore::new());
        let reader = ReadThroughCache::new(cache.clone(), store.clone(), CacheSettings::default());

        let first = reader.fetch().await.unwrap();
        assert_eq!(first.outcome, CacheOutcome::Miss);
        assert_eq!(first.properties.len(), 3);

        let second = reader.fetch().await.unwrap();
        assert_eq!(second.outcome, CacheOutcome::Hit);
        assert_eq!(second.properties, first.properties);

        let third = reader.fetch().await.unwrap();
        assert_eq!(third.outcome, CacheOutcome::Hit);
        assert_eq!(store.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_miss_populates_with_ttl() {
        let store = seeded_store(2).await;
        let cache = Arc::new(MemoryCacheStore::new());
        let reader = ReadThroughCache::new(cache.clone(), store, CacheSettings::default());

        reader.get_all().await.unwrap();

        let raw = cache.get(ALL_PROPERTIES_KEY).await.unwrap().unwrap();
        let cached: Vec<Property> = serde_json::from_str(&raw).unwrap();
        assert_eq!(cached.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let store = seeded_store(1).await;
        let cache = Arc::new(MemoryCacheStore::new());
        let settings = CacheSettings {
            ttl_seconds: 1,
            ..CacheSettings::default()
        };
        let reader = ReadThroughCache::new(cache, store.clone(), settings);

        reader.get_all().await.unwrap();
        tokio::time::sleep(Duration::from_secs(2)).await;

        assert_eq!(reader.fetch().await.unwrap().outcome, CacheOutcome::Miss);
        assert_eq!(store.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_unbounded_ttl_still_caches() {
        let store = seeded_store(2).await;
        let settings = CacheSettings {
            ttl_seconds: u64::MAX,
            ..CacheSettings::default()
        };
        let reader = ReadThroughCache::new(Arc::new(MemoryCacheStore::new()), store, settings);

        assert_eq!(reader.fetch().await.unwrap().outcome, CacheOutcome::Miss);
        let second = reader.fetch().await.unwrap();
        assert_eq!(second.outcome, CacheOutcome::Hit);
        assert_eq!(second.properties.len(), 2);
    }

    #[tokio::test]
    async fn test_hit_returns_exact_prices() {
        let store = Arc::new(InMemoryPropertyStore::new());
        for price in [1.0715660391465826e-75, 971986371.8547629, 0.1 + 0.2] {
            store
                .create(PropertyFields::new("Listing", "desc", price, "Somewhere"))
                .await
                .unwrap();
        }
        let reader = ReadThroughCache::new(
            Arc::new(MemoryCacheStore::new()),
            store,
            CacheSettings::default(),
        );

        let miss = reader.fetch().await.unwrap();
        let hit = reader.fetch().await.unwrap();

        assert_eq!(hit.outcome, CacheOutcome::Hit);
        for (cached, fresh) in hit.properties.iter().zip(&miss.properties) {
            assert_eq!(cached.price.to_bits(), fresh.price.to_bits());
        }
        assert_eq!(hit.properties, miss.properties);
    }

    #[tokio::test]
    async fn test_empty_collection_is_cached() {
        let store = seeded_store(0).await;
        let reader = ReadThroughCache::new(
            Arc::new(MemoryCacheStore::new()),
            store.clone(),
            CacheSettings::default(),
        );

        assert_eq!(reader.fetch().await.unwrap().outcome, CacheOutcome::Miss);
        let second = reader.fetch().await.unwrap();
        assert_eq!(second.outcome, CacheOutcome::Hit);
        assert!(second.properties.is_empty());
    }

    #[tokio::test]
    async fn test_cache_offline_reads_store_without_populating() {
        let store = seeded_store(3).await;
        let cache = Arc::new(FlakyCache::default());
        cache.set_offline(true);
        let reader = ReadThroughCache::new(cache.clone(), store.clone(), CacheSettings::default());

        let fetched = reader.fetch().await.unwrap();
        assert_eq!(fetched.outcome, CacheOutcome::Bypass);
        assert_eq!(fetched.properties.len(), 3);

        cache.set_offline(false);
        assert!(cache.inner.is_empty().await);
        assert_eq!(reader.fetch().await.unwrap().outcome, CacheOutcome::Miss);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cache_timeout_degrades_to_store() {
        let store = seeded_store(2).await;
        let cache = Arc::new(FlakyCache::default());
        cache.set_hanging(true);
        let reader = ReadThroughCache::new(cache, store, CacheSettings::default());

        let fetched = reader.fetch().await.unwrap();
        assert_eq!(fetched.outcome, CacheOutcome::Bypass);
        assert_eq!(fetched.properties.len(), 2);
    }

    #[tokio::test]
    async fn test_unreadable_entry_is_replaced() {
        let store = seeded_store(1).await;
        let cache = Arc::new(MemoryCacheStore::new());
        cache
            .set(ALL_PROPERTIES_KEY, "not json".to_string(), 60)
            .await
            .unwrap();
        let reader = ReadThroughCache::new(cache.clone(), store, CacheSettings::default());

        assert_eq!(reader.fetch().await.unwrap().outcome, CacheOutcome::Miss);
        assert_eq!(reader.fetch().await.unwrap().outcome, CacheOutcome::Hit);
    }

    struct DownStore;

    #[async_trait]
    impl PropertyStore for DownStore {
        async fn list_all(&self) -> Result<Vec<Property>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
        async fn create(&self, _fields: PropertyFields) -> Result<Property, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
        async fn update(&self, _id: u64, _fields: PropertyFields) -> Result<Property, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
        async fn delete(&self, _id: u64) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_store_failure_propagates_and_nothing_is_cached() {
        let cache = Arc::new(MemoryCacheStore::new());
        let reader =
            ReadThroughCache::new(cache.clone(), Arc::new(DownStore), CacheSettings::default());

        let result = reader.get_all().await;

        assert!(matches!(result, Err(StoreError::Unavailable(_))));
        assert!(cache.is_empty().await);
    }

    /// Store whose scan lets an invalidation slip in before it answers.
    struct RacingStore {
        inner: InMemoryPropertyStore,
        hook: tokio::sync::OnceCell<InvalidationHook>,
    }

    #[async_trait]
    impl PropertyStore for RacingStore {
        async fn list_all(&self) -> Result<Vec<Property>, StoreError> {
            let snapshot = self.inner.list_all().await;
            if let Some(hook) = self.hook.get() {
                hook.invalidate().await.unwrap();
            }
            snapshot
        }
        async fn create(&self, fields: PropertyFields) -> Result<Property, StoreError> {
            self.inner.create(fields).await
        }
        async fn update(&self, id: u64, fields: PropertyFields) -> Result<Property, StoreError> {
            self.inner.update(id, fields).await
        }
        async fn delete(&self, id: u64) -> Result<(), StoreError> {
            self.inner.delete(id).await
        }
    }

    #[tokio::test]
    async fn test_populate_skipped_when_invalidated_during_fetch() {
        let store = Arc::new(RacingStore {
            inner: InMemoryPropertyStore::new(),
            hook: tokio::sync::OnceCell::new(),
        });
        let cache = Arc::new(MemoryCacheStore::new());
        let reader = ReadThroughCache::new(cache.clone(), store.clone(), CacheSettings::default());
        let _ = store.hook.set(reader.invalidation_hook());

        let fetched = reader.fetch().await.unwrap();

        assert_eq!(fetched.outcome, CacheOutcome::Miss);
        assert!(cache.is_empty().await, "raced snapshot must not be cached");
    }
}
