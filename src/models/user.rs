//! User model
//!
//! This module defines the User entity and related types for the café
//! directory. The username is the identity key: it is unique, immutable
//! after registration, and what authentication tokens refer to.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// User entity representing a registered account.
///
/// The password is only ever stored as an argon2 hash, and the hash is
/// excluded from serialization so it can never leak into an API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: i64,
    /// Username (unique, identity key)
    pub username: String,
    /// Email address
    pub email: String,
    /// Password hash (argon2)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Date of birth (optional)
    pub birthday: Option<NaiveDate>,
    /// IDs of the cafés this user has favorited
    #[serde(default)]
    pub favorite_cafes: Vec<i64>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with the given parameters.
    ///
    /// Note: The password should already be hashed before calling this function.
    /// Use `services::password::hash_password()` to hash the password.
    pub fn new(
        username: String,
        email: String,
        password_hash: String,
        birthday: Option<NaiveDate>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0, // Will be set by the database
            username,
            email,
            password_hash,
            birthday,
            favorite_cafes: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether the given café is in this user's favorites
    pub fn has_favorite(&self, cafe_id: i64) -> bool {
        self.favorite_cafes.contains(&cafe_id)
    }
}

/// Input for creating a new user (before password hashing)
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    /// Username
    pub username: String,
    /// Email address
    pub email: String,
    /// Plaintext password (will be hashed)
    pub password: String,
    /// Date of birth (optional)
    pub birthday: Option<NaiveDate>,
}

impl CreateUserInput {
    /// Create registration input without a birthday
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            birthday: None,
        }
    }

    /// Set the birthday
    pub fn with_birthday(mut self, birthday: NaiveDate) -> Self {
        self.birthday = Some(birthday);
        self
    }
}

/// Input for updating a user.
///
/// The username is deliberately absent: tokens carry it as their subject,
/// so renaming an account would orphan every token issued for it.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserInput {
    /// New email (optional)
    pub email: Option<String>,
    /// New password (optional, will be hashed)
    pub password: Option<String>,
    /// New date of birth (optional)
    pub birthday: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_new() {
        let user = User::new(
            "alice123".to_string(),
            "alice@example.com".to_string(),
            "hashed_password".to_string(),
            None,
        );

        assert_eq!(user.id, 0);
        assert_eq!(user.username, "alice123");
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.birthday, None);
        assert!(user.favorite_cafes.is_empty());
    }

    #[test]
    fn test_user_new_with_birthday() {
        let birthday = NaiveDate::from_ymd_opt(1990, 4, 1).unwrap();
        let user = User::new(
            "alice123".to_string(),
            "alice@example.com".to_string(),
            "hash".to_string(),
            Some(birthday),
        );

        assert_eq!(user.birthday, Some(birthday));
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User::new(
            "alice123".to_string(),
            "alice@example.com".to_string(),
            "super_secret_hash".to_string(),
            None,
        );

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "alice123");
    }

    #[test]
    fn test_has_favorite() {
        let mut user = User::new(
            "alice123".to_string(),
            "alice@example.com".to_string(),
            "hash".to_string(),
            None,
        );
        user.favorite_cafes = vec![1, 7];

        assert!(user.has_favorite(1));
        assert!(user.has_favorite(7));
        assert!(!user.has_favorite(2));
    }
}
