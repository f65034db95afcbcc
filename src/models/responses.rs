//! Response DTOs for the property API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::properties::Property;

/// One property as rendered by the API.
///
/// Price is a decimal string with two places; `created_at` is RFC 3339.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyResponse {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub price: String,
    pub location: String,
    pub created_at: String,
}

impl From<Property> for PropertyResponse {
    fn from(property: Property) -> Self {
        Self {
            id: property.id,
            title: property.title,
            description: property.description,
            price: format!("{:.2}", property.price),
            location: property.location,
            created_at: property.created_at.to_rfc3339(),
        }
    }
}

/// Response body for DELETE /properties/:id
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The id that was deleted
    pub id: u64,
}

impl DeleteResponse {
    pub fn new(id: u64) -> Self {
        Self {
            message: format!("Property {} deleted successfully", id),
            id,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
