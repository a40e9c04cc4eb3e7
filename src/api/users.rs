//! User API endpoints
//!
//! Handles HTTP requests for user accounts:
//! - POST /users - registration
//! - GET /users/{username} - profile lookup
//! - PUT /users/{username} - profile update (owner only)
//! - DELETE /users/{username} - account deletion (owner only)
//! - POST /users/{username}/cafes/{cafe_id} - add a favorite café
//! - DELETE /users/{username}/cafes/{cafe_id} - remove a favorite café

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::api::middleware::{ApiError, AppState, AuthenticatedUser};
use crate::api::responses::{MessageResponse, UserResponse};
use crate::models::{CreateUserInput, UpdateUserInput, User};

/// Request body for user registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub birthday: Option<NaiveDate>,
}

/// Request body for updating a profile.
///
/// The username itself cannot change; bearer tokens name it as their
/// subject, so a rename would strand every token issued for the account.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub birthday: Option<NaiveDate>,
}

/// Reject requests that act on another user's account
fn ensure_owner(current: &User, username: &str) -> Result<(), ApiError> {
    if current.username != username {
        return Err(ApiError::forbidden("You can only manage your own account"));
    }
    Ok(())
}

/// POST /users - Register a new user
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut input = CreateUserInput::new(body.username, body.email, body.password);
    if let Some(birthday) = body.birthday {
        input = input.with_birthday(birthday);
    }

    let user = state.user_service.register(input).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /users/{username} - Look up a user profile
pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .user_service
        .get_by_username(&username)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User not found: {}", username)))?;

    Ok(Json(user.into()))
}

/// PUT /users/{username} - Update a profile (owner only)
pub async fn update_user(
    State(state): State<AppState>,
    AuthenticatedUser(current): AuthenticatedUser,
    Path(username): Path<String>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    ensure_owner(&current, &username)?;

    let input = UpdateUserInput {
        email: body.email,
        password: body.password,
        birthday: body.birthday,
    };
    let user = state.user_service.update(&username, input).await?;

    Ok(Json(user.into()))
}

/// DELETE /users/{username} - Delete an account (owner only)
pub async fn delete_user(
    State(state): State<AppState>,
    AuthenticatedUser(current): AuthenticatedUser,
    Path(username): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    ensure_owner(&current, &username)?;

    state.user_service.delete(&username).await?;

    Ok(Json(MessageResponse {
        message: format!("{} was deleted.", username),
    }))
}

/// POST /users/{username}/cafes/{cafe_id} - Add a favorite café (owner only)
///
/// Idempotent: adding a café that is already a favorite succeeds and leaves
/// a single entry.
pub async fn add_favorite(
    State(state): State<AppState>,
    AuthenticatedUser(current): AuthenticatedUser,
    Path((username, cafe_id)): Path<(String, i64)>,
) -> Result<Json<UserResponse>, ApiError> {
    ensure_owner(&current, &username)?;

    let user = state.user_service.add_favorite(&username, cafe_id).await?;

    Ok(Json(user.into()))
}

/// DELETE /users/{username}/cafes/{cafe_id} - Remove a favorite café (owner
/// only). Removing a café that is not a favorite succeeds.
pub async fn remove_favorite(
    State(state): State<AppState>,
    AuthenticatedUser(current): AuthenticatedUser,
    Path((username, cafe_id)): Path<(String, i64)>,
) -> Result<Json<UserResponse>, ApiError> {
    ensure_owner(&current, &username)?;

    let user = state
        .user_service
        .remove_favorite(&username, cafe_id)
        .await?;

    Ok(Json(user.into()))
}
