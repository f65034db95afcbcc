//! Record mutation events.
//!
//! The repository publishes one event per committed write to every registered
//! listener, in registration order, before the write call returns.

use async_trait::async_trait;

/// A committed change to the property collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyEvent {
    Created { id: u64 },
    Updated { id: u64 },
    Deleted { id: u64 },
}

impl PropertyEvent {
    pub fn id(&self) -> u64 {
        match *self {
            PropertyEvent::Created { id }
            | PropertyEvent::Updated { id }
            | PropertyEvent::Deleted { id } => id,
        }
    }

    /// Past-tense verb for log lines.
    pub fn action(&self) -> &'static str {
        match self {
            PropertyEvent::Created { .. } => "created",
            PropertyEvent::Updated { .. } => "updated",
            PropertyEvent::Deleted { .. } => "deleted",
        }
    }
}

/// Receives committed mutations.
///
/// Listeners cannot fail the write: the store commit is the source of truth,
/// so any error handling happens inside the listener.
#[async_trait]
pub trait MutationListener: Send + Sync {
    async fn on_mutation(&self, event: PropertyEvent);
}
