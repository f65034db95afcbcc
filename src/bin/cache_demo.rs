//! Walks through the caching lifecycle and prints what happens at each step:
//! a cold read, a warm read, the metrics, a write, and the read after it.

use std::sync::Arc;
use std::time::Instant;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use property_cache::cache::MemoryCacheStore;
use property_cache::caching::{CacheOutcome, MetricsReporter};
use property_cache::properties::{InMemoryPropertyStore, PropertyFields, PropertyRepository};
use property_cache::{CacheSettings, Config, ReadThroughCache};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "property_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = CacheSettings::from(&Config::from_env());
    let cache = Arc::new(MemoryCacheStore::new());
    let store = Arc::new(InMemoryPropertyStore::new());
    let reader = ReadThroughCache::new(cache.clone(), store.clone(), settings);
    let repository = PropertyRepository::new(store.clone(), settings.store_timeout)
        .with_listener(Arc::new(reader.invalidation_hook()));
    let metrics = MetricsReporter::new(cache.clone(), settings.cache_timeout);

    println!("\n=== Testing Property Caching System ===\n");

    cache.clear().await;
    println!("1. Cleared all cache\n");

    if store.count().await == 0 {
        println!("2. Creating sample properties...");
        let samples = [
            ("Luxury Apartment", "Beautiful 2BR apartment in downtown", 250_000.0, "New York"),
            ("Beach House", "Stunning ocean view property", 500_000.0, "Miami"),
            ("Mountain Cabin", "Cozy cabin in the mountains", 180_000.0, "Colorado"),
        ];
        for (title, description, price, location) in samples {
            repository
                .create(PropertyFields::new(title, description, price, location))
                .await?;
        }
        println!("   Created {} properties\n", samples.len());
    } else {
        println!("2. Using existing {} properties\n", store.count().await);
    }

    println!("3. First call - Should be CACHE MISS:");
    timed_read(&reader, CacheOutcome::Miss).await?;

    println!("4. Second call - Should be CACHE HIT:");
    timed_read(&reader, CacheOutcome::Hit).await?;

    println!("5. Cache Metrics:");
    let snapshot = metrics.get_metrics().await;
    println!("   Hits: {}", snapshot.keyspace_hits);
    println!("   Misses: {}", snapshot.keyspace_misses);
    println!("   Hit Ratio: {}%\n", snapshot.hit_ratio_percentage);

    println!("6. Testing cache invalidation...");
    println!("   Creating a new property...");
    repository
        .create(PropertyFields::new(
            "Test Property",
            "For testing cache invalidation",
            100_000.0,
            "Test City",
        ))
        .await?;
    println!("   Cache should be automatically cleared!\n");

    println!("7. Verifying cache invalidation - Should be CACHE MISS again:");
    timed_read(&reader, CacheOutcome::Miss).await?;

    println!("\n=== Test Complete! ===\n");
    println!("Expected results:");
    println!("- First call: Slower (cache miss, record store query)");
    println!("- Second call: Much faster (cache hit, no record store)");
    println!("- After creating property: Slower again (cache cleared, new data)");

    Ok(())
}

async fn timed_read(reader: &ReadThroughCache, expected: CacheOutcome) -> anyhow::Result<()> {
    let start = Instant::now();
    let fetched = reader.fetch().await?;
    let elapsed = start.elapsed();

    println!(
        "   Retrieved {} properties in {:.4} seconds ({:?})",
        fetched.properties.len(),
        elapsed.as_secs_f64(),
        fetched.outcome
    );
    if fetched.outcome != expected {
        println!("   Unexpected outcome, wanted {:?}", expected);
    }
    println!();
    Ok(())
}
