//! Café repository
//!
//! Database operations for café listings.
//!
//! This module provides:
//! - `CafeRepository` trait defining the interface for café data access
//! - `SqlxCafeRepository` implementing the trait for SQLite and MySQL
//!
//! The directory is read-mostly: listings are created by seeding or
//! administrative tooling, while the HTTP surface only reads them.

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::Cafe;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

/// Café repository trait
#[async_trait]
pub trait CafeRepository: Send + Sync {
    /// Create a new café listing
    async fn create(&self, cafe: &Cafe) -> Result<Cafe>;

    /// Get café by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<Cafe>>;

    /// Get café by exact name
    async fn get_by_name(&self, name: &str) -> Result<Option<Cafe>>;

    /// List all cafés, newest first
    async fn list(&self) -> Result<Vec<Cafe>>;
}

/// SQLx-based café repository implementation
///
/// Supports both SQLite and MySQL databases.
pub struct SqlxCafeRepository {
    pool: DynDatabasePool,
}

impl SqlxCafeRepository {
    /// Create a new SQLx café repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn CafeRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl CafeRepository for SqlxCafeRepository {
    async fn create(&self, cafe: &Cafe) -> Result<Cafe> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                create_cafe_sqlite(self.pool.as_sqlite().unwrap(), cafe).await
            }
            DatabaseDriver::Mysql => create_cafe_mysql(self.pool.as_mysql().unwrap(), cafe).await,
        }
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Cafe>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                get_cafe_by_id_sqlite(self.pool.as_sqlite().unwrap(), id).await
            }
            DatabaseDriver::Mysql => get_cafe_by_id_mysql(self.pool.as_mysql().unwrap(), id).await,
        }
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Cafe>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                get_cafe_by_name_sqlite(self.pool.as_sqlite().unwrap(), name).await
            }
            DatabaseDriver::Mysql => {
                get_cafe_by_name_mysql(self.pool.as_mysql().unwrap(), name).await
            }
        }
    }

    async fn list(&self) -> Result<Vec<Cafe>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => list_cafes_sqlite(self.pool.as_sqlite().unwrap()).await,
            DatabaseDriver::Mysql => list_cafes_mysql(self.pool.as_mysql().unwrap()).await,
        }
    }
}

const CAFE_COLUMNS: &str = "id, name, area_id, street_address, city, zip_code, \
     hours, phone, seating, parking, website, instagram, \
     image_path_exterior, image_path_interior, image_path_misc, \
     take_out_only, wifi, beans, restroom, latitude, longitude, created_at, updated_at";

// ============================================================================
// SQLite implementations
// ============================================================================

async fn create_cafe_sqlite(pool: &SqlitePool, cafe: &Cafe) -> Result<Cafe> {
    let now = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO cafes (name, area_id, street_address, city, zip_code,
                           hours, phone, seating, parking, website, instagram,
                           image_path_exterior, image_path_interior, image_path_misc,
                           take_out_only, wifi, beans, restroom, latitude, longitude,
                           created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&cafe.name)
    .bind(cafe.area_id)
    .bind(&cafe.street_address)
    .bind(&cafe.city)
    .bind(&cafe.zip_code)
    .bind(&cafe.hours)
    .bind(&cafe.phone)
    .bind(&cafe.seating)
    .bind(&cafe.parking)
    .bind(&cafe.website)
    .bind(&cafe.instagram)
    .bind(&cafe.image_path_exterior)
    .bind(&cafe.image_path_interior)
    .bind(&cafe.image_path_misc)
    .bind(cafe.take_out_only)
    .bind(cafe.wifi)
    .bind(cafe.beans)
    .bind(cafe.restroom)
    .bind(cafe.latitude)
    .bind(cafe.longitude)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create cafe")?;

    let id = result.last_insert_rowid();

    Ok(Cafe {
        id,
        created_at: now,
        updated_at: now,
        ..cafe.clone()
    })
}

async fn get_cafe_by_id_sqlite(pool: &SqlitePool, id: i64) -> Result<Option<Cafe>> {
    let row = sqlx::query(&format!("SELECT {} FROM cafes WHERE id = ?", CAFE_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get cafe by ID")?;

    match row {
        Some(row) => Ok(Some(row_to_cafe_sqlite(&row)?)),
        None => Ok(None),
    }
}

async fn get_cafe_by_name_sqlite(pool: &SqlitePool, name: &str) -> Result<Option<Cafe>> {
    let row = sqlx::query(&format!("SELECT {} FROM cafes WHERE name = ?", CAFE_COLUMNS))
        .bind(name)
        .fetch_optional(pool)
        .await
        .context("Failed to get cafe by name")?;

    match row {
        Some(row) => Ok(Some(row_to_cafe_sqlite(&row)?)),
        None => Ok(None),
    }
}

async fn list_cafes_sqlite(pool: &SqlitePool) -> Result<Vec<Cafe>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM cafes ORDER BY created_at DESC, id DESC",
        CAFE_COLUMNS
    ))
    .fetch_all(pool)
    .await
    .context("Failed to list cafes")?;

    let mut cafes = Vec::new();
    for row in rows {
        cafes.push(row_to_cafe_sqlite(&row)?);
    }

    Ok(cafes)
}

fn row_to_cafe_sqlite(row: &sqlx::sqlite::SqliteRow) -> Result<Cafe> {
    Ok(Cafe {
        id: row.get("id"),
        name: row.get("name"),
        area_id: row.get("area_id"),
        street_address: row.get("street_address"),
        city: row.get("city"),
        zip_code: row.get("zip_code"),
        hours: row.get("hours"),
        phone: row.get("phone"),
        seating: row.get("seating"),
        parking: row.get("parking"),
        website: row.get("website"),
        instagram: row.get("instagram"),
        image_path_exterior: row.get("image_path_exterior"),
        image_path_interior: row.get("image_path_interior"),
        image_path_misc: row.get("image_path_misc"),
        take_out_only: row.get("take_out_only"),
        wifi: row.get("wifi"),
        beans: row.get("beans"),
        restroom: row.get("restroom"),
        latitude: row.get("latitude"),
        longitude: row.get("longitude"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn create_cafe_mysql(pool: &MySqlPool, cafe: &Cafe) -> Result<Cafe> {
    let now = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO cafes (name, area_id, street_address, city, zip_code,
                           hours, phone, seating, parking, website, instagram,
                           image_path_exterior, image_path_interior, image_path_misc,
                           take_out_only, wifi, beans, restroom, latitude, longitude,
                           created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&cafe.name)
    .bind(cafe.area_id)
    .bind(&cafe.street_address)
    .bind(&cafe.city)
    .bind(&cafe.zip_code)
    .bind(&cafe.hours)
    .bind(&cafe.phone)
    .bind(&cafe.seating)
    .bind(&cafe.parking)
    .bind(&cafe.website)
    .bind(&cafe.instagram)
    .bind(&cafe.image_path_exterior)
    .bind(&cafe.image_path_interior)
    .bind(&cafe.image_path_misc)
    .bind(cafe.take_out_only)
    .bind(cafe.wifi)
    .bind(cafe.beans)
    .bind(cafe.restroom)
    .bind(cafe.latitude)
    .bind(cafe.longitude)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create cafe")?;

    let id = result.last_insert_id() as i64;

    Ok(Cafe {
        id,
        created_at: now,
        updated_at: now,
        ..cafe.clone()
    })
}

async fn get_cafe_by_id_mysql(pool: &MySqlPool, id: i64) -> Result<Option<Cafe>> {
    let row = sqlx::query(&format!("SELECT {} FROM cafes WHERE id = ?", CAFE_COLUMNS))
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get cafe by ID")?;

    match row {
        Some(row) => Ok(Some(row_to_cafe_mysql(&row)?)),
        None => Ok(None),
    }
}

async fn get_cafe_by_name_mysql(pool: &MySqlPool, name: &str) -> Result<Option<Cafe>> {
    let row = sqlx::query(&format!("SELECT {} FROM cafes WHERE name = ?", CAFE_COLUMNS))
        .bind(name)
        .fetch_optional(pool)
        .await
        .context("Failed to get cafe by name")?;

    match row {
        Some(row) => Ok(Some(row_to_cafe_mysql(&row)?)),
        None => Ok(None),
    }
}

async fn list_cafes_mysql(pool: &MySqlPool) -> Result<Vec<Cafe>> {
    let rows = sqlx::query(&format!(
        "SELECT {} FROM cafes ORDER BY created_at DESC, id DESC",
        CAFE_COLUMNS
    ))
    .fetch_all(pool)
    .await
    .context("Failed to list cafes")?;

    let mut cafes = Vec::new();
    for row in rows {
        cafes.push(row_to_cafe_mysql(&row)?);
    }

    Ok(cafes)
}

fn row_to_cafe_mysql(row: &sqlx::mysql::MySqlRow) -> Result<Cafe> {
    Ok(Cafe {
        id: row.get("id"),
        name: row.get("name"),
        area_id: row.get("area_id"),
        street_address: row.get("street_address"),
        city: row.get("city"),
        zip_code: row.get("zip_code"),
        hours: row.get("hours"),
        phone: row.get("phone"),
        seating: row.get("seating"),
        parking: row.get("parking"),
        website: row.get("website"),
        instagram: row.get("instagram"),
        image_path_exterior: row.get("image_path_exterior"),
        image_path_interior: row.get("image_path_interior"),
        image_path_misc: row.get("image_path_misc"),
        take_out_only: row.get("take_out_only"),
        wifi: row.get("wifi"),
        beans: row.get("beans"),
        restroom: row.get("restroom"),
        latitude: row.get("latitude"),
        longitude: row.get("longitude"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}
