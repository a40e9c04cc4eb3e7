//! User repository
//!
//! Database operations for user accounts and their favorite cafés.
//!
//! This module provides:
//! - `UserRepository` trait defining the interface for user data access
//! - `SqlxUserRepository` implementing the trait for SQLite and MySQL
//!
//! Favorites live in the `favorite_cafes` junction table but are exposed
//! on the `User` model as a plain list of café IDs: every read hydrates
//! `favorite_cafes` so callers never see a half-loaded user.

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::User;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user
    async fn create(&self, user: &User) -> Result<User>;

    /// Get user by ID
    async fn get_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Get user by username
    async fn get_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Update a user's email, password hash and birthday
    async fn update(&self, user: &User) -> Result<User>;

    /// Delete a user.
    ///
    /// Returns `true` if a row was deleted, `false` if no such user
    /// existed.
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Add a café to the user's favorites.
    ///
    /// Returns `true` if the favorite was added, `false` if it was
    /// already present.
    async fn add_favorite(&self, user_id: i64, cafe_id: i64) -> Result<bool>;

    /// Remove a café from the user's favorites.
    ///
    /// Returns `true` if the favorite was removed, `false` if it was
    /// not present.
    async fn remove_favorite(&self, user_id: i64, cafe_id: i64) -> Result<bool>;

    /// Get the IDs of the user's favorite cafés, ascending
    async fn favorite_ids(&self, user_id: i64) -> Result<Vec<i64>>;
}

/// SQLx-based user repository implementation
///
/// Supports both SQLite and MySQL databases.
pub struct SqlxUserRepository {
    pool: DynDatabasePool,
}

impl SqlxUserRepository {
    /// Create a new SQLx user repository
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    /// Create a boxed repository for use with dependency injection
    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn UserRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create(&self, user: &User) -> Result<User> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => create_user_sqlite(self.pool.as_sqlite().unwrap(), user).await,
            DatabaseDriver::Mysql => create_user_mysql(self.pool.as_mysql().unwrap(), user).await,
        }
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => get_user_by_id_sqlite(self.pool.as_sqlite().unwrap(), id).await,
            DatabaseDriver::Mysql => get_user_by_id_mysql(self.pool.as_mysql().unwrap(), id).await,
        }
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                get_user_by_username_sqlite(self.pool.as_sqlite().unwrap(), username).await
            }
            DatabaseDriver::Mysql => {
                get_user_by_username_mysql(self.pool.as_mysql().unwrap(), username).await
            }
        }
    }

    async fn update(&self, user: &User) -> Result<User> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => update_user_sqlite(self.pool.as_sqlite().unwrap(), user).await,
            DatabaseDriver::Mysql => update_user_mysql(self.pool.as_mysql().unwrap(), user).await,
        }
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => delete_user_sqlite(self.pool.as_sqlite().unwrap(), id).await,
            DatabaseDriver::Mysql => delete_user_mysql(self.pool.as_mysql().unwrap(), id).await,
        }
    }

    async fn add_favorite(&self, user_id: i64, cafe_id: i64) -> Result<bool> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                add_favorite_sqlite(self.pool.as_sqlite().unwrap(), user_id, cafe_id).await
            }
            DatabaseDriver::Mysql => {
                add_favorite_mysql(self.pool.as_mysql().unwrap(), user_id, cafe_id).await
            }
        }
    }

    async fn remove_favorite(&self, user_id: i64, cafe_id: i64) -> Result<bool> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                remove_favorite_sqlite(self.pool.as_sqlite().unwrap(), user_id, cafe_id).await
            }
            DatabaseDriver::Mysql => {
                remove_favorite_mysql(self.pool.as_mysql().unwrap(), user_id, cafe_id).await
            }
        }
    }

    async fn favorite_ids(&self, user_id: i64) -> Result<Vec<i64>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => {
                favorite_ids_sqlite(self.pool.as_sqlite().unwrap(), user_id).await
            }
            DatabaseDriver::Mysql => {
                favorite_ids_mysql(self.pool.as_mysql().unwrap(), user_id).await
            }
        }
    }
}

// ============================================================================
// SQLite implementations
// ============================================================================

async fn create_user_sqlite(pool: &SqlitePool, user: &User) -> Result<User> {
    let now = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO users (username, email, password_hash, birthday, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.birthday)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create user")?;

    let id = result.last_insert_rowid();

    Ok(User {
        id,
        username: user.username.clone(),
        email: user.email.clone(),
        password_hash: user.password_hash.clone(),
        birthday: user.birthday,
        favorite_cafes: Vec::new(),
        created_at: now,
        updated_at: now,
    })
}

async fn get_user_by_id_sqlite(pool: &SqlitePool, id: i64) -> Result<Option<User>> {
    let row = sqlx::query(
        r#"
        SELECT id, username, email, password_hash, birthday, created_at, updated_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .context("Failed to get user by ID")?;

    match row {
        Some(row) => {
            let mut user = row_to_user_sqlite(&row)?;
            user.favorite_cafes = favorite_ids_sqlite(pool, user.id).await?;
            Ok(Some(user))
        }
        None => Ok(None),
    }
}

async fn get_user_by_username_sqlite(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let row = sqlx::query(
        r#"
        SELECT id, username, email, password_hash, birthday, created_at, updated_at
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await
    .context("Failed to get user by username")?;

    match row {
        Some(row) => {
            let mut user = row_to_user_sqlite(&row)?;
            user.favorite_cafes = favorite_ids_sqlite(pool, user.id).await?;
            Ok(Some(user))
        }
        None => Ok(None),
    }
}

async fn update_user_sqlite(pool: &SqlitePool, user: &User) -> Result<User> {
    let now = Utc::now();

    sqlx::query(
        r#"
        UPDATE users
        SET email = ?, password_hash = ?, birthday = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.birthday)
    .bind(now)
    .bind(user.id)
    .execute(pool)
    .await
    .context("Failed to update user")?;

    // Return the updated user
    get_user_by_id_sqlite(pool, user.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("User not found after update"))
}

async fn delete_user_sqlite(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete user")?;

    Ok(result.rows_affected() > 0)
}

async fn add_favorite_sqlite(pool: &SqlitePool, user_id: i64, cafe_id: i64) -> Result<bool> {
    let result = sqlx::query(
        "INSERT OR IGNORE INTO favorite_cafes (user_id, cafe_id, created_at) VALUES (?, ?, ?)",
    )
    .bind(user_id)
    .bind(cafe_id)
    .bind(Utc::now())
    .execute(pool)
    .await
    .context("Failed to add favorite")?;

    Ok(result.rows_affected() > 0)
}

async fn remove_favorite_sqlite(pool: &SqlitePool, user_id: i64, cafe_id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM favorite_cafes WHERE user_id = ? AND cafe_id = ?")
        .bind(user_id)
        .bind(cafe_id)
        .execute(pool)
        .await
        .context("Failed to remove favorite")?;

    Ok(result.rows_affected() > 0)
}

async fn favorite_ids_sqlite(pool: &SqlitePool, user_id: i64) -> Result<Vec<i64>> {
    let rows =
        sqlx::query("SELECT cafe_id FROM favorite_cafes WHERE user_id = ? ORDER BY cafe_id")
            .bind(user_id)
            .fetch_all(pool)
            .await
            .context("Failed to get favorite café IDs")?;

    Ok(rows.iter().map(|row| row.get("cafe_id")).collect())
}

fn row_to_user_sqlite(row: &sqlx::sqlite::SqliteRow) -> Result<User> {
    Ok(User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        birthday: row.get("birthday"),
        favorite_cafes: Vec::new(),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

// ============================================================================
// MySQL implementations
// ============================================================================

async fn create_user_mysql(pool: &MySqlPool, user: &User) -> Result<User> {
    let now = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO users (username, email, password_hash, birthday, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.birthday)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to create user")?;

    let id = result.last_insert_id() as i64;

    Ok(User {
        id,
        username: user.username.clone(),
        email: user.email.clone(),
        password_hash: user.password_hash.clone(),
        birthday: user.birthday,
        favorite_cafes: Vec::new(),
        created_at: now,
        updated_at: now,
    })
}

async fn get_user_by_id_mysql(pool: &MySqlPool, id: i64) -> Result<Option<User>> {
    let row = sqlx::query(
        r#"
        SELECT id, username, email, password_hash, birthday, created_at, updated_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .context("Failed to get user by ID")?;

    match row {
        Some(row) => {
            let mut user = row_to_user_mysql(&row)?;
            user.favorite_cafes = favorite_ids_mysql(pool, user.id).await?;
            Ok(Some(user))
        }
        None => Ok(None),
    }
}

async fn get_user_by_username_mysql(pool: &MySqlPool, username: &str) -> Result<Option<User>> {
    let row = sqlx::query(
        r#"
        SELECT id, username, email, password_hash, birthday, created_at, updated_at
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await
    .context("Failed to get user by username")?;

    match row {
        Some(row) => {
            let mut user = row_to_user_mysql(&row)?;
            user.favorite_cafes = favorite_ids_mysql(pool, user.id).await?;
            Ok(Some(user))
        }
        None => Ok(None),
    }
}

async fn update_user_mysql(pool: &MySqlPool, user: &User) -> Result<User> {
    let now = Utc::now();

    sqlx::query(
        r#"
        UPDATE users
        SET email = ?, password_hash = ?, birthday = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(user.birthday)
    .bind(now)
    .bind(user.id)
    .execute(pool)
    .await
    .context("Failed to update user")?;

    // Return the updated user
    get_user_by_id_mysql(pool, user.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("User not found after update"))
}

async fn delete_user_mysql(pool: &MySqlPool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete user")?;

    Ok(result.rows_affected() > 0)
}

async fn add_favorite_mysql(pool: &MySqlPool, user_id: i64, cafe_id: i64) -> Result<bool> {
    let result = sqlx::query(
        "INSERT IGNORE INTO favorite_cafes (user_id, cafe_id, created_at) VALUES (?, ?, ?)",
    )
    .bind(user_id)
    .bind(cafe_id)
    .bind(Utc::now())
    .execute(pool)
    .await
    .context("Failed to add favorite")?;

    Ok(result.rows_affected() > 0)
}

async fn remove_favorite_mysql(pool: &MySqlPool, user_id: i64, cafe_id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM favorite_cafes WHERE user_id = ? AND cafe_id = ?")
        .bind(user_id)
        .bind(cafe_id)
        .execute(pool)
        .await
        .context("Failed to remove favorite")?;

    Ok(result.rows_affected() > 0)
}

async fn favorite_ids_mysql(pool: &MySqlPool, user_id: i64) -> Result<Vec<i64>> {
    let rows =
        sqlx::query("SELECT cafe_id FROM favorite_cafes WHERE user_id = ? ORDER BY cafe_id")
            .bind(user_id)
            .fetch_all(pool)
            .await
            .context("Failed to get favorite café IDs")?;

    Ok(rows.iter().map(|row| row.get("cafe_id")).collect())
}

fn row_to_user_mysql(row: &sqlx::mysql::MySqlRow) -> Result<User> {
    Ok(User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        birthday: row.get("birthday"),
        favorite_cafes: Vec::new(),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}
