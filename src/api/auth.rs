//! Authentication API endpoints
//!
//! Handles HTTP requests for logging in:
//! - POST /login - exchange credentials for a bearer token

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::{MessageResponse, UserResponse};
use crate::services::{LoginInput, UserServiceError};

/// Body returned for every failed login attempt.
///
/// Existing clients match on this exact string, and it deliberately does not
/// distinguish unknown usernames from wrong passwords.
const LOGIN_REJECTION: &str = "Something is not right";

/// Request body for user login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response for successful authentication
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
}

/// POST /login - User login
///
/// Success: 200 with the user and a fresh bearer token. Any credential
/// failure: 400 with the fixed rejection body.
pub async fn login(State(state): State<AppState>, Json(body): Json<LoginRequest>) -> Response {
    let input = LoginInput::new(body.username, body.password);

    match state.user_service.login(input).await {
        Ok(outcome) => Json(AuthResponse {
            user: outcome.user.into(),
            token: outcome.token,
        })
        .into_response(),
        Err(UserServiceError::AuthenticationError) => (
            StatusCode::BAD_REQUEST,
            Json(MessageResponse {
                message: LOGIN_REJECTION.to_string(),
            }),
        )
            .into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}
