//! Property Cache - read-through caching for property listings
//!
//! Serves the full property collection from a TTL cache, evicts it on every
//! write, and reports cache hit/miss metrics.

pub mod api;
pub mod cache;
pub mod caching;
pub mod config;
pub mod error;
pub mod models;
pub mod properties;
pub mod tasks;

pub use api::AppState;
pub use caching::{CacheMetrics, CacheSettings, ReadThroughCache};
pub use config::Config;
pub use tasks::spawn_cleanup_task;
