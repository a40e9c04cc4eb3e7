//! Area service
//!
//! Read-side business logic for neighbourhood areas. Like cafés, areas are
//! reference data: the HTTP surface lists them and looks them up by name.

use crate::db::repositories::AreaRepository;
use crate::models::Area;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Error types for area service operations
#[derive(Debug, thiserror::Error)]
pub enum AreaServiceError {
    /// Area not found
    #[error("Area not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Area service for neighbourhood listings
pub struct AreaService {
    repo: Arc<dyn AreaRepository>,
}

impl AreaService {
    /// Create a new area service
    pub fn new(repo: Arc<dyn AreaRepository>) -> Self {
        Self { repo }
    }

    /// List all areas, alphabetically
    pub async fn list(&self) -> Result<Vec<Area>, AreaServiceError> {
        self.repo
            .list()
            .await
            .context("Failed to list areas")
            .map_err(Into::into)
    }

    /// Get an area by its exact name
    pub async fn get_by_name(&self, name: &str) -> Result<Area, AreaServiceError> {
        self.repo
            .get_by_name(name)
            .await
            .context("Failed to get area by name")?
            .ok_or_else(|| AreaServiceError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::SqlxAreaRepository;
    use crate::db::{create_test_pool, migrations, DynDatabasePool};

    async fn setup_test_service() -> (DynDatabasePool, AreaService) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let repo = SqlxAreaRepository::boxed(pool.clone());
        let service = AreaService::new(repo);

        (pool, service)
    }

    async fn seed_area(pool: &DynDatabasePool, name: &str) -> Area {
        let repo = SqlxAreaRepository::new(pool.clone());
        repo.create(&Area::new(name.to_string(), format!("{} area", name)))
            .await
            .expect("Failed to seed area")
    }

    #[tokio::test]
    async fn test_list_empty() {
        let (_pool, service) = setup_test_service().await;

        let areas = service.list().await.expect("Failed to list areas");
        assert!(areas.is_empty());
    }

    #[tokio::test]
    async fn test_list_alphabetical() {
        let (pool, service) = setup_test_service().await;

        seed_area(&pool, "Riverside").await;
        seed_area(&pool, "Harbour").await;

        let areas = service.list().await.expect("Failed to list areas");

        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].name, "Harbour");
        assert_eq!(areas[1].name, "Riverside");
    }

    #[tokio::test]
    async fn test_get_by_name() {
        let (pool, service) = setup_test_service().await;

        seed_area(&pool, "Old Town").await;

        let area = service
            .get_by_name("Old Town")
            .await
            .expect("Area should be found");
        assert_eq!(area.name, "Old Town");
    }

    #[tokio::test]
    async fn test_get_by_name_not_found() {
        let (_pool, service) = setup_test_service().await;

        let result = service.get_by_name("Atlantis").await;

        assert!(matches!(result, Err(AreaServiceError::NotFound(_))));
    }
}
