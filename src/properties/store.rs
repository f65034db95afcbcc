//! Record store boundary and its in-memory implementation.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{Property, PropertyFields};
use crate::error::StoreError;

// == Property Store ==
/// Durable storage for property records.
///
/// `list_all` returns the whole collection ordered by id, without pagination.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Property>, StoreError>;
    async fn create(&self, fields: PropertyFields) -> Result<Property, StoreError>;
    async fn update(&self, id: u64, fields: PropertyFields) -> Result<Property, StoreError>;
    async fn delete(&self, id: u64) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    records: BTreeMap<u64, Property>,
}

// == In-Memory Store ==
/// Process-local record store. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct InMemoryPropertyStore {
    inner: RwLock<Inner>,
    list_calls: AtomicU64,
}

impl InMemoryPropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of full scans served so far.
    pub fn list_calls(&self) -> u64 {
        self.list_calls.load(Ordering::Relaxed)
    }

    pub async fn count(&self) -> usize {
        self.inner.read().await.records.len()
    }
}

#[async_trait]
impl PropertyStore for InMemoryPropertyStore {
    async fn list_all(&self) -> Result<Vec<Property>, StoreError> {
        self.list_calls.fetch_add(1, Ordering::Relaxed);
        let inner = self.inner.read().await;
        Ok(inner.records.values().cloned().collect())
    }

    async fn create(&self, fields: PropertyFields) -> Result<Property, StoreError> {
        fields.validate()?;

        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let id = inner.next_id;
        let property = Property::from_fields(id, fields, Utc::now());
        inner.records.insert(id, property.clone());
        Ok(property)
    }

    async fn update(&self, id: u64, fields: PropertyFields) -> Result<Property, StoreError> {
        fields.validate()?;

        let mut inner = self.inner.write().await;
        let property = inner
            .records
            .get_mut(&id)
            .ok_or(StoreError::NotFound(id))?;
        property.apply(fields);
        Ok(property.clone())
    }

    async fn delete(&self, id: u64) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner
            .records
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}
