//! Response models for the property API
//!
//! Request bodies deserialize straight into [`PropertyFields`].
//!
//! [`PropertyFields`]: crate::properties::PropertyFields

pub mod responses;

pub use responses::{DeleteResponse, HealthResponse, PropertyResponse};
