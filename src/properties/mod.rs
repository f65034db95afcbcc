//! Properties Module
//!
//! Property records, the record store boundary, and the write path that
//! publishes mutation events.

mod events;
mod model;
mod repository;
mod store;

use std::future::Future;
use std::time::Duration;

pub use events::{MutationListener, PropertyEvent};
pub use model::{Property, PropertyFields};
pub use repository::PropertyRepository;
pub use store::{InMemoryPropertyStore, PropertyStore};

use crate::error::StoreError;

/// Runs a record store call under a deadline. Expiry maps to `Unavailable`.
pub(crate) async fn with_deadline<T, F>(deadline: Duration, call: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Unavailable(format!(
            "record store call timed out after {:?}",
            deadline
        ))),
    }
}
