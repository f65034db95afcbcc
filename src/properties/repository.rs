//! Write path over the record store.
//!
//! Every successful write notifies the registered mutation listeners after the
//! store commit and before returning to the caller.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::{
    with_deadline, MutationListener, Property, PropertyEvent, PropertyFields, PropertyStore,
};
use crate::error::StoreError;

// == Property Repository ==
#[derive(Clone)]
pub struct PropertyRepository {
    store: Arc<dyn PropertyStore>,
    listeners: Vec<Arc<dyn MutationListener>>,
    timeout: Duration,
}

impl PropertyRepository {
    pub fn new(store: Arc<dyn PropertyStore>, timeout: Duration) -> Self {
        Self {
            store,
            listeners: Vec::new(),
            timeout,
        }
    }

    /// Registers a listener. Listeners run in registration order.
    pub fn with_listener(mut self, listener: Arc<dyn MutationListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    /// The underlying store, for readers that bypass the write path.
    pub fn store(&self) -> Arc<dyn PropertyStore> {
        Arc::clone(&self.store)
    }

    pub async fn create(&self, fields: PropertyFields) -> Result<Property, StoreError> {
        let property = with_deadline(self.timeout, self.store.create(fields)).await?;
        self.publish(PropertyEvent::Created { id: property.id }).await;
        Ok(property)
    }

    pub async fn update(&self, id: u64, fields: PropertyFields) -> Result<Property, StoreError> {
        let property = with_deadline(self.timeout, self.store.update(id, fields)).await?;
        self.publish(PropertyEvent::Updated { id }).await;
        Ok(property)
    }

    pub async fn delete(&self, id: u64) -> Result<(), StoreError> {
        with_deadline(self.timeout, self.store.delete(id)).await?;
        self.publish(PropertyEvent::Deleted { id }).await;
        Ok(())
    }

    async fn publish(&self, event: PropertyEvent) {
        debug!(
            "Publishing {:?} to {} listener(s)",
            event,
            self.listeners.len()
        );
        for listener in &self.listeners {
            listener.on_mutation(event).await;
        }
    }
}
