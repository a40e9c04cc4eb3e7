//! Area API endpoints
//!
//! Read-only directory routes:
//! - GET /areas - list all areas
//! - GET /areas/{name} - look up a single area by name

use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::middleware::{ApiError, AppState};
use crate::models::Area;

/// GET /areas - List all areas, alphabetically
pub async fn list_areas(State(state): State<AppState>) -> Result<Json<Vec<Area>>, ApiError> {
    let areas = state.area_service.list().await?;
    Ok(Json(areas))
}

/// GET /areas/{name} - Look up an area by its exact name
pub async fn get_area(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Area>, ApiError> {
    let area = state.area_service.get_by_name(&name).await?;
    Ok(Json(area))
}
