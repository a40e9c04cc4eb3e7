//! API layer - HTTP handlers and routing
//!
//! This module contains all HTTP endpoints of the café directory:
//! - Auth endpoints (login)
//! - User endpoints (registration, profile, favorites)
//! - Café endpoints (directory listing and lookup)
//! - Area endpoints (neighbourhood listing and lookup)
//!
//! Everything except `/hello`, registration and login sits behind the
//! bearer-token middleware.

pub mod areas;
pub mod auth;
pub mod cafes;
pub mod middleware;
pub mod responses;
pub mod users;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use middleware::{ApiError, AppState, AuthenticatedUser};

/// GET /hello - API greeting
async fn hello() -> &'static str {
    "Welcome to my cafe API!"
}

/// Build the main API router
pub fn build_api_router(state: AppState) -> Router<AppState> {
    // Protected routes (bearer token required)
    let protected_routes = Router::new()
        .route("/cafes", get(cafes::list_cafes))
        .route("/cafes/{name}", get(cafes::get_cafe))
        .route("/areas", get(areas::list_areas))
        .route("/areas/{name}", get(areas::get_area))
        .route("/users/{username}", get(users::get_user))
        .route("/users/{username}", put(users::update_user))
        .route("/users/{username}", delete(users::delete_user))
        .route("/users/{username}/cafes/{cafe_id}", post(users::add_favorite))
        .route(
            "/users/{username}/cafes/{cafe_id}",
            delete(users::remove_favorite),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            middleware::require_auth,
        ));

    // Public routes
    Router::new()
        .route("/hello", get(hello))
        .route("/users", post(users::register))
        .route("/login", post(auth::login))
        .merge(protected_routes)
}

/// Build the complete router with CORS and request tracing
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin.parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .merge(build_api_router(state.clone()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Tests
// ============================================================================
