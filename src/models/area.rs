//! Area model
//!
//! This module defines the Area entity, a named neighbourhood that groups
//! café listings for browsing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Area entity representing a neighbourhood in the directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Area {
    /// Unique identifier
    pub id: i64,
    /// Area name
    pub name: String,
    /// Short description of the neighbourhood
    pub description: String,
    /// Latitude of the area centre
    pub latitude: Option<f64>,
    /// Longitude of the area centre
    pub longitude: Option<f64>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Area {
    /// Create a new Area with the given parameters.
    ///
    /// The ID will be set to 0 and should be assigned by the database.
    pub fn new(name: String, description: String) -> Self {
        Self {
            id: 0, // Will be set by the database
            name,
            description,
            latitude: None,
            longitude: None,
            created_at: Utc::now(),
        }
    }

    /// Set the coordinates of the area centre
    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }
}
