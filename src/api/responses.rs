//! Shared API response types
//!
//! Common response structures used by more than one endpoint, so the wire
//! shapes stay consistent across registration, login and profile routes.

use serde::{Deserialize, Serialize};

use crate::models::User;

/// User payload returned by registration, login, profile and favorite routes.
///
/// The password hash has no field here, so no handler can leak it.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    pub favorite_cafes: Vec<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            birthday: user.birthday.map(|d| d.to_string()),
            favorite_cafes: user.favorite_cafes,
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}

/// Simple message payload (account deletion confirmations)
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
