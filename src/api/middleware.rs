//! API middleware
//!
//! Contains the shared application state, the JSON error envelope used by
//! every endpoint, and the bearer-token authentication middleware that
//! guards protected routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::models::User;
use crate::services::{
    AreaService, AreaServiceError, CafeService, CafeServiceError, TokenService, UserService,
    UserServiceError,
};

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub cafe_service: Arc<CafeService>,
    pub area_service: Arc<AreaService>,
    pub token_service: Arc<TokenService>,
}

/// Authenticated user extracted from request extensions.
///
/// Inserted by [`require_auth`]; handlers on protected routes take it as an
/// extractor parameter.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

/// Error response for API errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: ApiErrorDetail {
                code: code.into(),
                message: message.into(),
                details: Some(details),
            },
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("UNAUTHORIZED", message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new("FORBIDDEN", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new("CONFLICT", message)
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.error.code.as_str() {
            "UNAUTHORIZED" => StatusCode::UNAUTHORIZED,
            "FORBIDDEN" => StatusCode::FORBIDDEN,
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "VALIDATION_ERROR" => StatusCode::UNPROCESSABLE_ENTITY,
            "CONFLICT" => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(self)).into_response()
    }
}

impl From<UserServiceError> for ApiError {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::ValidationError(issues) => ApiError::with_details(
                "VALIDATION_ERROR",
                "Validation failed",
                serde_json::json!(issues),
            ),
            UserServiceError::UsernameTaken(username) => {
                ApiError::conflict(format!("Username already taken: {}", username))
            }
            // Login handles this inline with its own response body; this arm
            // is a fallback for any other path.
            UserServiceError::AuthenticationError => {
                ApiError::unauthorized("Invalid username or password")
            }
            UserServiceError::UserNotFound(username) => {
                ApiError::not_found(format!("User not found: {}", username))
            }
            UserServiceError::CafeNotFound(id) => {
                ApiError::not_found(format!("Café not found: {}", id))
            }
            UserServiceError::InternalError(source) => {
                tracing::error!(error = ?source, "User operation failed");
                ApiError::internal_error("Internal server error")
            }
        }
    }
}

impl From<CafeServiceError> for ApiError {
    fn from(err: CafeServiceError) -> Self {
        match err {
            CafeServiceError::NotFound(name) => {
                ApiError::not_found(format!("Café not found: {}", name))
            }
            CafeServiceError::InternalError(source) => {
                tracing::error!(error = ?source, "Café lookup failed");
                ApiError::internal_error("Internal server error")
            }
        }
    }
}

impl From<AreaServiceError> for ApiError {
    fn from(err: AreaServiceError) -> Self {
        match err {
            AreaServiceError::NotFound(name) => {
                ApiError::not_found(format!("Area not found: {}", name))
            }
            AreaServiceError::InternalError(source) => {
                tracing::error!(error = ?source, "Area lookup failed");
                ApiError::internal_error("Internal server error")
            }
        }
    }
}

/// Extract the bearer token from the Authorization header
fn extract_bearer_token(request: &Request) -> Option<String> {
    let auth_header = request.headers().get(header::AUTHORIZATION)?;
    let auth_str = auth_header.to_str().ok()?;
    auth_str.strip_prefix("Bearer ").map(|t| t.to_string())
}

/// Authentication middleware
///
/// Verifies the bearer token signature and expiry, then re-resolves the
/// subject against the user store so that accounts deleted after issuance
/// are rejected even while their tokens are inside the expiry window.
/// Rejection reasons are logged at debug level and never put in the body.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&request)
        .ok_or_else(|| ApiError::unauthorized("Missing authentication token"))?;

    let claims = state.token_service.verify(&token).map_err(|e| {
        tracing::debug!(reason = %e, "Rejected bearer token");
        ApiError::unauthorized("Invalid or expired token")
    })?;

    let user = state
        .user_service
        .get_by_username(&claims.sub)
        .await?
        .ok_or_else(|| {
            tracing::debug!(subject = %claims.sub, "Token subject no longer exists");
            ApiError::unauthorized("Invalid or expired token")
        })?;

    request.extensions_mut().insert(AuthenticatedUser(user));
    Ok(next.run(request).await)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};

    fn create_request_with_auth(value: &str) -> Request<Body> {
        Request::builder()
            .uri("/test")
            .header(header::AUTHORIZATION, value)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_extract_bearer_token() {
        let request = create_request_with_auth("Bearer test-token-123");
        assert_eq!(
            extract_bearer_token(&request),
            Some("test-token-123".to_string())
        );
    }

    #[test]
    fn test_extract_bearer_token_none() {
        let request = Request::builder().uri("/test").body(Body::empty()).unwrap();
        assert!(extract_bearer_token(&request).is_none());
    }

    #[test]
    fn test_extract_bearer_token_wrong_scheme() {
        let request = create_request_with_auth("Basic dXNlcjpwYXNz");
        assert!(extract_bearer_token(&request).is_none());
    }

    #[test]
    fn test_extract_bearer_token_case_sensitive_scheme() {
        let request = create_request_with_auth("bearer lowercase-scheme");
        assert!(extract_bearer_token(&request).is_none());
    }

    #[test]
    fn test_api_error_unauthorized() {
        let error = ApiError::unauthorized("Test message");
        assert_eq!(error.error.code, "UNAUTHORIZED");
        assert_eq!(error.error.message, "Test message");
    }

    #[test]
    fn test_api_error_with_details() {
        let details = serde_json::json!([{"field": "username", "message": "too short"}]);
        let error = ApiError::with_details("VALIDATION_ERROR", "Invalid", details.clone());
        assert_eq!(error.error.details, Some(details));
    }

    #[test]
    fn test_api_error_status_mapping() {
        let cases = [
            (ApiError::unauthorized("x"), StatusCode::UNAUTHORIZED),
            (ApiError::forbidden("x"), StatusCode::FORBIDDEN),
            (ApiError::not_found("x"), StatusCode::NOT_FOUND),
            (
                ApiError::validation_error("x"),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (ApiError::conflict("x"), StatusCode::CONFLICT),
            (
                ApiError::internal_error("x"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_api_error_unknown_code_is_internal() {
        let error = ApiError::new("SOMETHING_ELSE", "x");
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_api_error_serialization_omits_empty_details() {
        let error = ApiError::not_found("User not found: ghost");
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert!(json["error"].get("details").is_none());
    }

    #[test]
    fn test_username_taken_maps_to_conflict() {
        let error: ApiError = UserServiceError::UsernameTaken("alice123".to_string()).into();
        assert_eq!(error.error.code, "CONFLICT");
        assert!(error.error.message.contains("alice123"));
    }

    #[test]
    fn test_unknown_cafe_maps_to_not_found() {
        let error: ApiError = UserServiceError::CafeNotFound(42).into();
        assert_eq!(error.error.code, "NOT_FOUND");
        assert!(error.error.message.contains("42"));
    }

    #[test]
    fn test_internal_error_message_is_generic() {
        let error: ApiError =
            UserServiceError::InternalError(anyhow::anyhow!("connection refused at 10.0.0.5"))
                .into();

        assert_eq!(error.error.code, "INTERNAL_ERROR");
        assert_eq!(error.error.message, "Internal server error");
    }
}
