//! Café API endpoints
//!
//! Read-only directory routes:
//! - GET /cafes - list all cafés
//! - GET /cafes/{name} - look up a single café by name

use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::middleware::{ApiError, AppState};
use crate::models::Cafe;

/// GET /cafes - List all cafés, newest first
pub async fn list_cafes(State(state): State<AppState>) -> Result<Json<Vec<Cafe>>, ApiError> {
    let cafes = state.cafe_service.list().await?;
    Ok(Json(cafes))
}

/// GET /cafes/{name} - Look up a café by its exact name
pub async fn get_cafe(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Cafe>, ApiError> {
    let cafe = state.cafe_service.get_by_name(&name).await?;
    Ok(Json(cafe))
}
