//! Café model
//!
//! This module defines the Cafe entity, the heart of the directory. A café
//! carries contact details, amenity flags, and an optional link to the
//! neighbourhood area it belongs to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Café entity representing one listing in the directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cafe {
    /// Unique identifier
    pub id: i64,
    /// Café name
    pub name: String,
    /// Area this café belongs to, if any
    pub area_id: Option<i64>,
    /// Street address
    pub street_address: Option<String>,
    /// City
    pub city: Option<String>,
    /// Postal code
    pub zip_code: Option<String>,
    /// Opening hours, free-form (e.g. "7am-5pm")
    pub hours: Option<String>,
    /// Contact phone number
    pub phone: Option<String>,
    /// Seating situation, free-form
    pub seating: Option<String>,
    /// Parking situation, free-form
    pub parking: Option<String>,
    /// Website URL
    pub website: Option<String>,
    /// Instagram handle or URL
    pub instagram: Option<String>,
    /// Exterior photo path
    pub image_path_exterior: Option<String>,
    /// Interior photo path
    pub image_path_interior: Option<String>,
    /// Miscellaneous photo path
    pub image_path_misc: Option<String>,
    /// Whether the café is take-out only
    pub take_out_only: bool,
    /// Whether wifi is available
    pub wifi: bool,
    /// Whether whole beans are sold
    pub beans: bool,
    /// Whether a customer restroom exists
    pub restroom: bool,
    /// Latitude of the café location
    pub latitude: Option<f64>,
    /// Longitude of the café location
    pub longitude: Option<f64>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Cafe {
    /// Create a new Cafe from the given input.
    ///
    /// The ID will be set to 0 and should be assigned by the database.
    pub fn new(input: CreateCafeInput) -> Self {
        let now = Utc::now();
        Self {
            id: 0, // Will be set by the database
            name: input.name,
            area_id: input.area_id,
            street_address: input.street_address,
            city: input.city,
            zip_code: input.zip_code,
            hours: input.hours,
            phone: input.phone,
            seating: input.seating,
            parking: input.parking,
            website: input.website,
            instagram: input.instagram,
            image_path_exterior: input.image_path_exterior,
            image_path_interior: input.image_path_interior,
            image_path_misc: input.image_path_misc,
            take_out_only: input.take_out_only,
            wifi: input.wifi,
            beans: input.beans,
            restroom: input.restroom,
            latitude: input.latitude,
            longitude: input.longitude,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for creating a café listing.
///
/// Only the name is required; everything else defaults to absent/false,
/// so listings can start sparse and be filled in as details are gathered.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCafeInput {
    /// Café name (required)
    pub name: String,
    /// Area this café belongs to
    pub area_id: Option<i64>,
    /// Street address
    pub street_address: Option<String>,
    /// City
    pub city: Option<String>,
    /// Postal code
    pub zip_code: Option<String>,
    /// Opening hours
    pub hours: Option<String>,
    /// Contact phone number
    pub phone: Option<String>,
    /// Seating situation
    pub seating: Option<String>,
    /// Parking situation
    pub parking: Option<String>,
    /// Website URL
    pub website: Option<String>,
    /// Instagram handle or URL
    pub instagram: Option<String>,
    /// Exterior photo path
    pub image_path_exterior: Option<String>,
    /// Interior photo path
    pub image_path_interior: Option<String>,
    /// Miscellaneous photo path
    pub image_path_misc: Option<String>,
    /// Whether the café is take-out only
    #[serde(default)]
    pub take_out_only: bool,
    /// Whether wifi is available
    #[serde(default)]
    pub wifi: bool,
    /// Whether whole beans are sold
    #[serde(default)]
    pub beans: bool,
    /// Whether a customer restroom exists
    #[serde(default)]
    pub restroom: bool,
    /// Latitude of the café location
    pub latitude: Option<f64>,
    /// Longitude of the café location
    pub longitude: Option<f64>,
}
