//! Area repository
//!
//! Database operations for neighbourhood areas.
//!
//! This module provides:
//! - `AreaRepository` trait defining the interface for area data access
//! - `SqlxAreaRepository` implementing the trait for SQLite and MySQL

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::Area;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

/// Area repository trait
#[async_trait]
pub trait AreaRepository: Send + Sync {
    /// Create a new area
    async fn create(&self, area: &Area) -> Result<Area>;

    /// Get area by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Area>>;

    /// Get area by exact name
    async fn get_by_name(&self, name: &str) -> Result<Option<Area>>;

    /// List all areas, alphabetically
    async fn list(&self) -> Result<Vec<Area>>;
}

/// SQLx-based area repository implementation
///
/// Supports both SQLite and MySQL databases.
pub struct SqlxAreaRepository {
    pool: DynDatabasePool,
}

impl SqlxAreaRepository {
    /// Create a new SQLx area repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn AreaRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl AreaRepository for SqlxAreaRepository {
    async fn create(&self, area: &Area) -> Result<Area> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                create_area_sqlite(self.pool.as_sqlite().unwrap(), area).await
            }
            DatabaseDriver::Mysql => create_area_mysql(self.pool.as_mysql().unwrap(), area).await,
        }
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Area>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                get_area_by_id_sqlite(self.pool.as_sqlite().unwrap(), id).await
            }
            DatabaseDriver::Mysql => get_area_by_id_mysql(self.pool.as_mysql().unwrap(), id).await,
        }
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Area>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                get_area_by_name_sqlite(self.pool.as_sqlite().unwrap(), name).await
            }
            DatabaseDriver::Mysql => {
                get_area_by_name_mysql(self.pool.as_mysql().unwrap(), name).await
            }
        }
    }

    async fn list(&self) -> Result<Vec<Area>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => list_areas_sqlite(self.pool.as_sqlite().unwrap()).await,
            DatabaseDriver::Mysql => list_areas_mysql(self.pool.as_mysql().unwrap()).await,
        }
    }
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn create_area_sqlite(pool: &SqlitePool, area: &Area) -> Result<Area> {
    let now = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO areas (name, description, latitude, longitude, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&area.name)
    .bind(&area.description)
    .bind(area.latitude)
    .bind(area.longitude)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create area")?;

    let id = result.last_insert_rowid();

    Ok(Area {
        id,
        created_at: now,
        ..area.clone()
    })
}

async fn get_area_by_id_sqlite(pool: &SqlitePool, id: i64) -> Result<Option<Area>> {
    let row = sqlx::query(
        "SELECT id, name, description, latitude, longitude, created_at FROM areas WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .context("Failed to get area by ID")?;

    match row {
        Some(row) => Ok(Some(row_to_area_sqlite(&row)?)),
        None => Ok(None),
    }
}

async fn get_area_by_name_sqlite(pool: &SqlitePool, name: &str) -> Result<Option<Area>> {
    let row = sqlx::query(
        "SELECT id, name, description, latitude, longitude, created_at FROM areas WHERE name = ?",
    )
    .bind(name)
    .fetch_optional(pool)
    .await
    .context("Failed to get area by name")?;

    match row {
        Some(row) => Ok(Some(row_to_area_sqlite(&row)?)),
        None => Ok(None),
    }
}

async fn list_areas_sqlite(pool: &SqlitePool) -> Result<Vec<Area>> {
    let rows = sqlx::query(
        "SELECT id, name, description, latitude, longitude, created_at FROM areas ORDER BY name",
    )
    .fetch_all(pool)
    .await
    .context("Failed to list areas")?;

    let mut areas = Vec::new();
    for row in rows {
        areas.push(row_to_area_sqlite(&row)?);
    }

    Ok(areas)
}

fn row_to_area_sqlite(row: &sqlx::sqlite::SqliteRow) -> Result<Area> {
    Ok(Area {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        latitude: row.get("latitude"),
        longitude: row.get("longitude"),
        created_at: row.get("created_at"),
    })
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn create_area_mysql(pool: &MySqlPool, area: &Area) -> Result<Area> {
    let now = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO areas (name, description, latitude, longitude, created_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&area.name)
    .bind(&area.description)
    .bind(area.latitude)
    .bind(area.longitude)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create area")?;

    let id = result.last_insert_id() as i64;

    Ok(Area {
        id,
        created_at: now,
        ..area.clone()
    })
}

async fn get_area_by_id_mysql(pool: &MySqlPool, id: i64) -> Result<Option<Area>> {
    let row = sqlx::query(
        "SELECT id, name, description, latitude, longitude, created_at FROM areas WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .context("Failed to get area by ID")?;

    match row {
        Some(row) => Ok(Some(row_to_area_mysql(&row)?)),
        None => Ok(None),
    }
}

async fn get_area_by_name_mysql(pool: &MySqlPool, name: &str) -> Result<Option<Area>> {
    let row = sqlx::query(
        "SELECT id, name, description, latitude, longitude, created_at FROM areas WHERE name = ?",
    )
    .bind(name)
    .fetch_optional(pool)
    .await
    .context("Failed to get area by name")?;

    match row {
        Some(row) => Ok(Some(row_to_area_mysql(&row)?)),
        None => Ok(None),
    }
}

async fn list_areas_mysql(pool: &MySqlPool) -> Result<Vec<Area>> {
    let rows = sqlx::query(
        "SELECT id, name, description, latitude, longitude, created_at FROM areas ORDER BY name",
    )
    .fetch_all(pool)
    .await
    .context("Failed to list areas")?;

    let mut areas = Vec::new();
    for row in rows {
        areas.push(row_to_area_mysql(&row)?);
    }

    Ok(areas)
}

fn row_to_area_mysql(row: &sqlx::mysql::MySqlRow) -> Result<Area> {
    Ok(Area {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        latitude: row.get("latitude"),
        longitude: row.get("longitude"),
        created_at: row.get("created_at"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};

    async fn setup_test_repo() -> (DynDatabasePool, SqlxAreaRepository) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        let repo = SqlxAreaRepository::new(pool.clone());
        (pool, repo)
    }

    #[tokio::test]
    async fn test_create_area() {
        let (_pool, repo) = setup_test_repo().await;

        let area = Area::new(
            "Riverside".to_string(),
            "Cafés along the river walk".to_string(),
        )
        .with_coordinates(59.437, 24.7536);

        let created = repo.create(&area).await.expect("Failed to create area");

        assert!(created.id > 0);
        assert_eq!(created.name, "Riverside");
        assert_eq!(created.latitude, Some(59.437));
    }

    #[tokio::test]
    async fn test_get_area_by_id() {
        let (_pool, repo) = setup_test_repo().await;

        let created = repo
            .create(&Area::new(
                "Old Town".to_string(),
                "Cobblestones and coffee".to_string(),
            ))
            .await
            .expect("Failed to create area");

        let found = repo
            .get_by_id(created.id)
            .await
            .expect("Failed to get area")
            .expect("Area not found");

        assert_eq!(found.name, "Old Town");
        assert_eq!(found.description, "Cobblestones and coffee");
        assert_eq!(found.latitude, None);
    }

    #[tokio::test]
    async fn test_get_area_by_id_not_found() {
        let (_pool, repo) = setup_test_repo().await;

        let found = repo.get_by_id(999).await.expect("Failed to get area");

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_get_area_by_name() {
        let (_pool, repo) = setup_test_repo().await;

        repo.create(&Area::new(
            "Arts District".to_string(),
            "Galleries, roasters, and warehouses".to_string(),
        ))
        .await
        .expect("Failed to create area");

        let found = repo
            .get_by_name("Arts District")
            .await
            .expect("Failed to get area by name")
            .expect("Area not found");
        assert_eq!(found.description, "Galleries, roasters, and warehouses");

        let missing = repo
            .get_by_name("Nowhere")
            .await
            .expect("Failed to get area by name");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_list_areas_alphabetical() {
        let (_pool, repo) = setup_test_repo().await;

        for name in ["Riverside", "Old Town", "Harbour"] {
            repo.create(&Area::new(name.to_string(), format!("{} area", name)))
                .await
                .expect("Failed to create area");
        }

        let areas = repo.list().await.expect("Failed to list areas");

        assert_eq!(areas.len(), 3);
        assert_eq!(areas[0].name, "Harbour");
        assert_eq!(areas[1].name, "Old Town");
        assert_eq!(areas[2].name, "Riverside");
    }
}
