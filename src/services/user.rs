//! User service
//!
//! Business logic for user accounts: registration, login, profile updates,
//! deletion, and the per-user set of favorite cafés. Password hashing is
//! delegated to the password module and token issuance to the token
//! service; this module owns input validation and the rules that follow
//! from the username being the account's identity key.

use crate::db::repositories::{CafeRepository, UserRepository};
use crate::models::{CreateUserInput, UpdateUserInput, User};
use crate::services::password::{hash_password_async, verify_password_async};
use crate::services::token::TokenService;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Minimum username length
const MIN_USERNAME_LENGTH: usize = 5;

/// A single field-level validation failure, reported back to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// The input field the issue applies to
    pub field: &'static str,
    /// Human-readable description of what is wrong
    pub message: String,
}

impl ValidationIssue {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// User service error types
#[derive(Debug, Error)]
pub enum UserServiceError {
    /// One or more input fields failed validation; every issue is reported,
    /// not just the first
    #[error("Validation failed: {}", format_issues(.0))]
    ValidationError(Vec<ValidationIssue>),

    /// The requested username is already registered
    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    /// Login failed. Deliberately silent about whether the username or the
    /// password was wrong.
    #[error("Invalid username or password")]
    AuthenticationError,

    /// No user with the given username
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// No café with the given id
    #[error("Café not found: {0}")]
    CafeNotFound(i64),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A successful login: the authenticated user plus a freshly issued token
#[derive(Debug)]
pub struct LoginOutcome {
    pub user: User,
    pub token: String,
}

/// Input for user login
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

impl LoginInput {
    /// Create a new login input
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// User service for account management and authentication
pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    cafe_repo: Arc<dyn CafeRepository>,
    token_service: Arc<TokenService>,
}

impl UserService {
    /// Create a new user service
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        cafe_repo: Arc<dyn CafeRepository>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            user_repo,
            cafe_repo,
            token_service,
        }
    }

    /// Register a new user account.
    ///
    /// All field problems are collected and reported together so the client
    /// can fix a whole form in one round trip.
    pub async fn register(&self, input: CreateUserInput) -> Result<User, UserServiceError> {
        let mut issues = Vec::new();
        validate_username(&input.username, &mut issues);
        validate_email(&input.email, &mut issues);
        validate_password(&input.password, &mut issues);
        if !issues.is_empty() {
            return Err(UserServiceError::ValidationError(issues));
        }

        let existing = self
            .user_repo
            .get_by_username(&input.username)
            .await
            .context("Failed to check for existing username")?;
        if existing.is_some() {
            return Err(UserServiceError::UsernameTaken(input.username));
        }

        let password_hash = hash_password_async(input.password)
            .await
            .context("Failed to hash password")?;

        let user = User::new(input.username, input.email, password_hash, input.birthday);
        let created = self
            .user_repo
            .create(&user)
            .await
            .context("Failed to create user")?;

        tracing::info!(username = %created.username, "Registered new user");

        Ok(created)
    }

    /// Authenticate a user and issue a bearer token.
    ///
    /// An unknown username and a wrong password fail identically, so this
    /// endpoint cannot be used to probe which usernames exist.
    pub async fn login(&self, input: LoginInput) -> Result<LoginOutcome, UserServiceError> {
        let user = self
            .user_repo
            .get_by_username(&input.username)
            .await
            .context("Failed to look up user")?
            .ok_or(UserServiceError::AuthenticationError)?;

        let valid = verify_password_async(input.password, user.password_hash.clone())
            .await
            .context("Failed to verify password")?;
        if !valid {
            return Err(UserServiceError::AuthenticationError);
        }

        let token = self
            .token_service
            .issue(&user.username)
            .context("Failed to issue token")?;

        Ok(LoginOutcome { user, token })
    }

    /// Look up a user by username
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>, UserServiceError> {
        let user = self
            .user_repo
            .get_by_username(username)
            .await
            .context("Failed to get user")?;
        Ok(user)
    }

    /// Update a user's email, password, or birthday.
    ///
    /// The username itself cannot change: issued tokens name it as their
    /// subject, and those tokens must keep resolving to the same account.
    pub async fn update(
        &self,
        username: &str,
        input: UpdateUserInput,
    ) -> Result<User, UserServiceError> {
        let mut user = self
            .user_repo
            .get_by_username(username)
            .await
            .context("Failed to get user")?
            .ok_or_else(|| UserServiceError::UserNotFound(username.to_string()))?;

        let mut issues = Vec::new();
        if let Some(email) = &input.email {
            validate_email(email, &mut issues);
        }
        if let Some(password) = &input.password {
            validate_password(password, &mut issues);
        }
        if !issues.is_empty() {
            return Err(UserServiceError::ValidationError(issues));
        }

        if let Some(email) = input.email {
            user.email = email;
        }
        if let Some(password) = input.password {
            user.password_hash = hash_password_async(password)
                .await
                .context("Failed to hash new password")?;
        }
        if let Some(birthday) = input.birthday {
            user.birthday = Some(birthday);
        }

        let updated = self
            .user_repo
            .update(&user)
            .await
            .context("Failed to update user")?;

        Ok(updated)
    }

    /// Delete a user account. The favorites rows go with it via the
    /// foreign key cascade.
    pub async fn delete(&self, username: &str) -> Result<(), UserServiceError> {
        let user = self
            .user_repo
            .get_by_username(username)
            .await
            .context("Failed to get user")?
            .ok_or_else(|| UserServiceError::UserNotFound(username.to_string()))?;

        let deleted = self
            .user_repo
            .delete(user.id)
            .await
            .context("Failed to delete user")?;
        if !deleted {
            return Err(UserServiceError::UserNotFound(username.to_string()));
        }

        tracing::info!(username, "Deleted user account");

        Ok(())
    }

    /// Add a café to a user's favorites and return the updated user.
    ///
    /// Favorites are a set: adding a café that is already favorited is a
    /// no-op, not an error. The café itself must exist.
    pub async fn add_favorite(
        &self,
        username: &str,
        cafe_id: i64,
    ) -> Result<User, UserServiceError> {
        let user = self
            .user_repo
            .get_by_username(username)
            .await
            .context("Failed to get user")?
            .ok_or_else(|| UserServiceError::UserNotFound(username.to_string()))?;

        let cafe = self
            .cafe_repo
            .get_by_id(cafe_id)
            .await
            .context("Failed to look up café")?;
        if cafe.is_none() {
            return Err(UserServiceError::CafeNotFound(cafe_id));
        }

        self.user_repo
            .add_favorite(user.id, cafe_id)
            .await
            .context("Failed to add favorite")?;

        self.reload(username).await
    }

    /// Remove a café from a user's favorites and return the updated user.
    ///
    /// Removing a café that is not in the set succeeds and changes nothing.
    pub async fn remove_favorite(
        &self,
        username: &str,
        cafe_id: i64,
    ) -> Result<User, UserServiceError> {
        let user = self
            .user_repo
            .get_by_username(username)
            .await
            .context("Failed to get user")?
            .ok_or_else(|| UserServiceError::UserNotFound(username.to_string()))?;

        self.user_repo
            .remove_favorite(user.id, cafe_id)
            .await
            .context("Failed to remove favorite")?;

        self.reload(username).await
    }

    /// Re-read a user after a favorites change so the returned value
    /// reflects the new state
    async fn reload(&self, username: &str) -> Result<User, UserServiceError> {
        self.user_repo
            .get_by_username(username)
            .await
            .context("Failed to reload user")?
            .ok_or_else(|| UserServiceError::UserNotFound(username.to_string()))
    }
}

fn validate_username(username: &str, issues: &mut Vec<ValidationIssue>) {
    if username.len() < MIN_USERNAME_LENGTH {
        issues.push(ValidationIssue::new(
            "username",
            format!("must be at least {} characters", MIN_USERNAME_LENGTH),
        ));
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        issues.push(ValidationIssue::new(
            "username",
            "must contain only letters and digits",
        ));
    }
}

fn validate_email(email: &str, issues: &mut Vec<ValidationIssue>) {
    if email.trim().is_empty() {
        issues.push(ValidationIssue::new("email", "cannot be empty"));
    } else if !is_valid_email(email) {
        issues.push(ValidationIssue::new(
            "email",
            "must be a valid email address",
        ));
    }
}

fn validate_password(password: &str, issues: &mut Vec<ValidationIssue>) {
    if password.is_empty() {
        issues.push(ValidationIssue::new("password", "cannot be empty"));
    }
}

/// Just enough syntax checking to catch obvious mistakes; whether the
/// address can actually receive mail is not something a format check
/// can prove
fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::{SqlxCafeRepository, SqlxUserRepository};
    use crate::db::{create_test_pool, migrations, DynDatabasePool};
    use crate::models::{Cafe, CreateCafeInput};
    use chrono::NaiveDate;

    async fn setup_test_service() -> (DynDatabasePool, UserService) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let user_repo = SqlxUserRepository::boxed(pool.clone());
        let cafe_repo = SqlxCafeRepository::boxed(pool.clone());
        let token_service = Arc::new(TokenService::new("test-secret", 7));
        let service = UserService::new(user_repo, cafe_repo, token_service);

        (pool, service)
    }

    async fn create_test_cafe(pool: &DynDatabasePool, name: &str) -> Cafe {
        let repo = SqlxCafeRepository::new(pool.clone());
        let cafe = Cafe::new(CreateCafeInput {
            name: name.to_string(),
            ..Default::default()
        });
        repo.create(&cafe).await.expect("Failed to create café")
    }

    // ========================================================================
    // Registration tests
    // ========================================================================

    #[tokio::test]
    async fn test_register_user() {
        let (_pool, service) = setup_test_service().await;

        let input = CreateUserInput::new("alice123", "alice@example.com", "Secr3t!");
        let user = service.register(input).await.expect("Failed to register");

        assert_eq!(user.username, "alice123");
        assert_eq!(user.email, "alice@example.com");
        assert!(user.favorite_cafes.is_empty());
        // Stored as an argon2 hash, never the plaintext
        assert_ne!(user.password_hash, "Secr3t!");
        assert!(user.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_register_with_birthday() {
        let (_pool, service) = setup_test_service().await;

        let birthday = NaiveDate::from_ymd_opt(1990, 4, 1).unwrap();
        let input = CreateUserInput::new("alice123", "alice@example.com", "Secr3t!")
            .with_birthday(birthday);
        let user = service.register(input).await.expect("Failed to register");

        assert_eq!(user.birthday, Some(birthday));
    }

    #[tokio::test]
    async fn test_register_duplicate_username_fails() {
        let (_pool, service) = setup_test_service().await;

        let input1 = CreateUserInput::new("alice123", "first@example.com", "Secr3t!");
        service
            .register(input1)
            .await
            .expect("Failed to register first user");

        let input2 = CreateUserInput::new("alice123", "second@example.com", "0therPw!");
        let result = service.register(input2).await;

        assert!(matches!(result, Err(UserServiceError::UsernameTaken(_))));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_allowed() {
        let (_pool, service) = setup_test_service().await;

        let input1 = CreateUserInput::new("alice123", "shared@example.com", "Secr3t!");
        service
            .register(input1)
            .await
            .expect("Failed to register first user");

        // Only the username is unique; two accounts may share an address
        let input2 = CreateUserInput::new("bobby99", "shared@example.com", "0therPw!");
        let user = service
            .register(input2)
            .await
            .expect("Second registration should succeed");

        assert_eq!(user.username, "bobby99");
    }

    #[tokio::test]
    async fn test_register_short_username_fails() {
        let (_pool, service) = setup_test_service().await;

        let input = CreateUserInput::new("al1", "alice@example.com", "Secr3t!");
        let result = service.register(input).await;

        match result {
            Err(UserServiceError::ValidationError(issues)) => {
                assert!(issues.iter().any(|i| i.field == "username"));
            }
            other => panic!("Expected validation error, got {:?}", other.map(|u| u.username)),
        }
    }

    #[tokio::test]
    async fn test_register_non_alphanumeric_username_fails() {
        let (_pool, service) = setup_test_service().await;

        let input = CreateUserInput::new("alice_123", "alice@example.com", "Secr3t!");
        let result = service.register(input).await;

        assert!(matches!(result, Err(UserServiceError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_register_invalid_email_fails() {
        let (_pool, service) = setup_test_service().await;

        for bad_email in ["invalid-email", "@example.com", "alice@nodot", ""] {
            let input = CreateUserInput::new("alice123", bad_email, "Secr3t!");
            let result = service.register(input).await;

            match result {
                Err(UserServiceError::ValidationError(issues)) => {
                    assert!(
                        issues.iter().any(|i| i.field == "email"),
                        "{:?} should be rejected",
                        bad_email
                    );
                }
                _ => panic!("{:?} should fail validation", bad_email),
            }
        }
    }

    #[tokio::test]
    async fn test_register_empty_password_fails() {
        let (_pool, service) = setup_test_service().await;

        let input = CreateUserInput::new("alice123", "alice@example.com", "");
        let result = service.register(input).await;

        assert!(matches!(result, Err(UserServiceError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_register_collects_all_issues() {
        let (_pool, service) = setup_test_service().await;

        // Bad username, bad email, and empty password at once
        let input = CreateUserInput::new("a!", "not-an-email", "");
        let result = service.register(input).await;

        match result {
            Err(UserServiceError::ValidationError(issues)) => {
                let fields: Vec<&str> = issues.iter().map(|i| i.field).collect();
                assert!(fields.contains(&"username"));
                assert!(fields.contains(&"email"));
                assert!(fields.contains(&"password"));
            }
            _ => panic!("Expected a validation error listing every field"),
        }
    }

    // ========================================================================
    // Login tests
    // ========================================================================

    #[tokio::test]
    async fn test_login_success() {
        let (_pool, service) = setup_test_service().await;

        let input = CreateUserInput::new("alice123", "alice@example.com", "Secr3t!");
        let registered = service.register(input).await.expect("Failed to register");

        let outcome = service
            .login(LoginInput::new("alice123", "Secr3t!"))
            .await
            .expect("Login should succeed");

        assert_eq!(outcome.user.id, registered.id);
        assert!(!outcome.token.is_empty());
    }

    #[tokio::test]
    async fn test_login_token_names_the_user() {
        let (_pool, service) = setup_test_service().await;

        let input = CreateUserInput::new("alice123", "alice@example.com", "Secr3t!");
        service.register(input).await.expect("Failed to register");

        let outcome = service
            .login(LoginInput::new("alice123", "Secr3t!"))
            .await
            .expect("Login should succeed");

        let token_service = TokenService::new("test-secret", 7);
        let claims = token_service
            .verify(&outcome.token)
            .expect("Token should verify under the issuing secret");
        assert_eq!(claims.sub, "alice123");
    }

    #[tokio::test]
    async fn test_login_wrong_password_fails() {
        let (_pool, service) = setup_test_service().await;

        let input = CreateUserInput::new("alice123", "alice@example.com", "Secr3t!");
        service.register(input).await.expect("Failed to register");

        let result = service.login(LoginInput::new("alice123", "wrong!")).await;

        assert!(matches!(result, Err(UserServiceError::AuthenticationError)));
    }

    #[tokio::test]
    async fn test_login_unknown_user_fails() {
        let (_pool, service) = setup_test_service().await;

        let result = service.login(LoginInput::new("nobody99", "Secr3t!")).await;

        assert!(matches!(result, Err(UserServiceError::AuthenticationError)));
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let (_pool, service) = setup_test_service().await;

        let input = CreateUserInput::new("alice123", "alice@example.com", "Secr3t!");
        service.register(input).await.expect("Failed to register");

        let wrong_password = service
            .login(LoginInput::new("alice123", "wrong!"))
            .await
            .expect_err("Wrong password must fail");
        let unknown_user = service
            .login(LoginInput::new("nobody99", "Secr3t!"))
            .await
            .expect_err("Unknown user must fail");

        // Same message either way, so the endpoint leaks nothing about
        // which usernames exist
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }

    // ========================================================================
    // Lookup, update, and delete tests
    // ========================================================================

    #[tokio::test]
    async fn test_get_by_username() {
        let (_pool, service) = setup_test_service().await;

        let input = CreateUserInput::new("alice123", "alice@example.com", "Secr3t!");
        service.register(input).await.expect("Failed to register");

        let found = service
            .get_by_username("alice123")
            .await
            .expect("Lookup should not error");
        assert_eq!(found.map(|u| u.email), Some("alice@example.com".to_string()));

        let missing = service
            .get_by_username("nobody99")
            .await
            .expect("Lookup should not error");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_update_email_and_birthday() {
        let (_pool, service) = setup_test_service().await;

        let input = CreateUserInput::new("alice123", "alice@example.com", "Secr3t!");
        service.register(input).await.expect("Failed to register");

        let birthday = NaiveDate::from_ymd_opt(1992, 12, 24).unwrap();
        let updated = service
            .update(
                "alice123",
                UpdateUserInput {
                    email: Some("new@example.com".to_string()),
                    birthday: Some(birthday),
                    ..Default::default()
                },
            )
            .await
            .expect("Update should succeed");

        assert_eq!(updated.email, "new@example.com");
        assert_eq!(updated.birthday, Some(birthday));
        assert_eq!(updated.username, "alice123");
    }

    #[tokio::test]
    async fn test_update_password_changes_login() {
        let (_pool, service) = setup_test_service().await;

        let input = CreateUserInput::new("alice123", "alice@example.com", "Secr3t!");
        service.register(input).await.expect("Failed to register");

        service
            .update(
                "alice123",
                UpdateUserInput {
                    password: Some("N3wSecret!".to_string()),
                    ..Default::default()
                },
            )
            .await
            .expect("Update should succeed");

        let old = service.login(LoginInput::new("alice123", "Secr3t!")).await;
        assert!(matches!(old, Err(UserServiceError::AuthenticationError)));

        service
            .login(LoginInput::new("alice123", "N3wSecret!"))
            .await
            .expect("New password should log in");
    }

    #[tokio::test]
    async fn test_update_invalid_email_fails() {
        let (_pool, service) = setup_test_service().await;

        let input = CreateUserInput::new("alice123", "alice@example.com", "Secr3t!");
        service.register(input).await.expect("Failed to register");

        let result = service
            .update(
                "alice123",
                UpdateUserInput {
                    email: Some("not-an-email".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(UserServiceError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_update_unknown_user_fails() {
        let (_pool, service) = setup_test_service().await;

        let result = service
            .update("nobody99", UpdateUserInput::default())
            .await;

        assert!(matches!(result, Err(UserServiceError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_user() {
        let (_pool, service) = setup_test_service().await;

        let input = CreateUserInput::new("alice123", "alice@example.com", "Secr3t!");
        service.register(input).await.expect("Failed to register");

        service
            .delete("alice123")
            .await
            .expect("Delete should succeed");

        let found = service
            .get_by_username("alice123")
            .await
            .expect("Lookup should not error");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_delete_unknown_user_fails() {
        let (_pool, service) = setup_test_service().await;

        let result = service.delete("nobody99").await;

        assert!(matches!(result, Err(UserServiceError::UserNotFound(_))));
    }

    // ========================================================================
    // Favorites tests
    // ========================================================================

    #[tokio::test]
    async fn test_add_favorite() {
        let (pool, service) = setup_test_service().await;

        let cafe = create_test_cafe(&pool, "The Daily Grind").await;
        let input = CreateUserInput::new("alice123", "alice@example.com", "Secr3t!");
        service.register(input).await.expect("Failed to register");

        let user = service
            .add_favorite("alice123", cafe.id)
            .await
            .expect("Add favorite should succeed");

        assert!(user.has_favorite(cafe.id));
    }

    #[tokio::test]
    async fn test_add_favorite_is_idempotent() {
        let (pool, service) = setup_test_service().await;

        let cafe = create_test_cafe(&pool, "The Daily Grind").await;
        let input = CreateUserInput::new("alice123", "alice@example.com", "Secr3t!");
        service.register(input).await.expect("Failed to register");

        service
            .add_favorite("alice123", cafe.id)
            .await
            .expect("First add should succeed");
        let user = service
            .add_favorite("alice123", cafe.id)
            .await
            .expect("Repeated add should also succeed");

        assert_eq!(user.favorite_cafes, vec![cafe.id]);
    }

    #[tokio::test]
    async fn test_add_favorite_unknown_cafe_fails() {
        let (_pool, service) = setup_test_service().await;

        let input = CreateUserInput::new("alice123", "alice@example.com", "Secr3t!");
        service.register(input).await.expect("Failed to register");

        let result = service.add_favorite("alice123", 9999).await;

        assert!(matches!(result, Err(UserServiceError::CafeNotFound(9999))));
    }

    #[tokio::test]
    async fn test_add_favorite_unknown_user_fails() {
        let (pool, service) = setup_test_service().await;

        let cafe = create_test_cafe(&pool, "The Daily Grind").await;

        let result = service.add_favorite("nobody99", cafe.id).await;

        assert!(matches!(result, Err(UserServiceError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn test_remove_favorite() {
        let (pool, service) = setup_test_service().await;

        let cafe = create_test_cafe(&pool, "The Daily Grind").await;
        let input = CreateUserInput::new("alice123", "alice@example.com", "Secr3t!");
        service.register(input).await.expect("Failed to register");

        service
            .add_favorite("alice123", cafe.id)
            .await
            .expect("Add favorite should succeed");
        let user = service
            .remove_favorite("alice123", cafe.id)
            .await
            .expect("Remove favorite should succeed");

        assert!(!user.has_favorite(cafe.id));
    }

    #[tokio::test]
    async fn test_remove_absent_favorite_succeeds() {
        let (pool, service) = setup_test_service().await;

        let cafe = create_test_cafe(&pool, "The Daily Grind").await;
        let input = CreateUserInput::new("alice123", "alice@example.com", "Secr3t!");
        service.register(input).await.expect("Failed to register");

        // Never favorited; removal is a harmless no-op
        let user = service
            .remove_favorite("alice123", cafe.id)
            .await
            .expect("Removing an absent favorite should succeed");

        assert!(user.favorite_cafes.is_empty());
    }

    #[tokio::test]
    async fn test_favorites_ordered_by_cafe_id() {
        let (pool, service) = setup_test_service().await;

        let first = create_test_cafe(&pool, "First Crack").await;
        let second = create_test_cafe(&pool, "Second Wave").await;
        let third = create_test_cafe(&pool, "Third Place").await;

        let input = CreateUserInput::new("alice123", "alice@example.com", "Secr3t!");
        service.register(input).await.expect("Failed to register");

        // Add out of order; the stored set reads back sorted
        service.add_favorite("alice123", third.id).await.unwrap();
        service.add_favorite("alice123", first.id).await.unwrap();
        let user = service.add_favorite("alice123", second.id).await.unwrap();

        assert_eq!(user.favorite_cafes, vec![first.id, second.id, third.id]);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
