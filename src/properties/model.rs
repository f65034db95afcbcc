//! Property record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

// == Property ==
/// A property listing as owned by the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

impl Property {
    /// Builds a record from validated fields.
    pub fn from_fields(id: u64, fields: PropertyFields, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: fields.title,
            description: fields.description,
            price: fields.price,
            location: fields.location,
            created_at,
        }
    }

    /// Overwrites the writable attributes, keeping id and creation time.
    pub fn apply(&mut self, fields: PropertyFields) {
        self.title = fields.title;
        self.description = fields.description;
        self.price = fields.price;
        self.location = fields.location;
    }
}

// == Property Fields ==
/// Writable attributes used by create and update.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PropertyFields {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub location: String,
}

impl PropertyFields {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        location: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            price,
            location: location.into(),
        }
    }

    /// Rejects empty titles or locations and negative or non-finite prices.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.title.trim().is_empty() {
            return Err(StoreError::InvalidInput("Title cannot be empty".to_string()));
        }
        if self.location.trim().is_empty() {
            return Err(StoreError::InvalidInput(
                "Location cannot be empty".to_string(),
            ));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(StoreError::InvalidInput(format!(
                "Price must be a non-negative number, got {}",
                self.price
            )));
        }
        Ok(())
    }
}
