//! API Handlers
//!
//! HTTP request handlers for the property and cache endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::cache::CacheBackend;
use crate::caching::{CacheMetrics, CacheSettings, MetricsReporter, ReadThroughCache};
use crate::error::{ApiError, Result};
use crate::models::{DeleteResponse, HealthResponse, PropertyResponse};
use crate::properties::{PropertyFields, PropertyRepository, PropertyStore};

/// Application state shared across all handlers.
///
/// Reads go through the cache, writes through the repository whose listener
/// evicts that cache.
#[derive(Clone)]
pub struct AppState {
    pub properties: ReadThroughCache,
    pub repository: PropertyRepository,
    pub metrics: MetricsReporter,
}

impl AppState {
    /// Wires the caching components around one cache handle and one store.
    pub fn new(
        cache: Arc<dyn CacheBackend>,
        store: Arc<dyn PropertyStore>,
        settings: CacheSettings,
    ) -> Self {
        let properties = ReadThroughCache::new(Arc::clone(&cache), Arc::clone(&store), settings);
        let repository = PropertyRepository::new(store, settings.store_timeout)
            .with_listener(Arc::new(properties.invalidation_hook()));
        let metrics = MetricsReporter::new(cache, settings.cache_timeout);

        Self {
            properties,
            repository,
            metrics,
        }
    }
}

fn parse_body(
    body: std::result::Result<Json<PropertyFields>, JsonRejection>,
) -> Result<PropertyFields> {
    body.map(|Json(fields)| fields)
        .map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))
}

/// Handler for GET /properties/
pub async fn list_properties_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<PropertyResponse>>> {
    let properties = state.properties.get_all().await?;
    Ok(Json(properties.into_iter().map(PropertyResponse::from).collect()))
}

/// Handler for POST /properties/
pub async fn create_property_handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<PropertyFields>, JsonRejection>,
) -> Result<(StatusCode, Json<PropertyResponse>)> {
    let fields = parse_body(body)?;
    let property = state.repository.create(fields).await?;
    Ok((StatusCode::CREATED, Json(property.into())))
}

/// Handler for PUT /properties/:id
pub async fn update_property_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    body: std::result::Result<Json<PropertyFields>, JsonRejection>,
) -> Result<Json<PropertyResponse>> {
    let fields = parse_body(body)?;
    let property = state.repository.update(id, fields).await?;
    Ok(Json(property.into()))
}

/// Handler for DELETE /properties/:id
pub async fn delete_property_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<DeleteResponse>> {
    state.repository.delete(id).await?;
    Ok(Json(DeleteResponse::new(id)))
}

/// Handler for GET /cache/metrics
///
/// Always 200; a cache outage shows up in the `error` field.
pub async fn metrics_handler(State(state): State<AppState>) -> Json<CacheMetrics> {
    Json(state.metrics.get_metrics().await)
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
