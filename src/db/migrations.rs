//! Database migrations module
//!
//! Code-based migrations for the café directory. All migrations are embedded
//! directly in Rust code as SQL strings, supporting both SQLite and MySQL
//! databases for single-binary deployment.
//!
//! # Usage
//!
//! ```ignore
//! use cafedex::db::{create_pool, migrations};
//!
//! let pool = create_pool(&config).await?;
//! migrations::run_migrations(&pool).await?;
//! ```
//!
//! Each migration is a `Migration` struct with a unique `version`, a
//! human-readable `name`, and SQL for each supported backend.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row, SqlitePool};

use super::DynDatabasePool;
use crate::config::DatabaseDriver;

/// A database migration with SQL for both SQLite and MySQL
#[derive(Debug, Clone)]
pub struct Migration {
    /// Migration version number (must be unique and sequential)
    pub version: i32,
    /// Human-readable migration name
    pub name: &'static str,
    /// SQL statements for SQLite
    pub up_sqlite: &'static str,
    /// SQL statements for MySQL
    pub up_mysql: &'static str,
}

/// Migration record stored in the database
#[derive(Debug, Clone)]
pub struct MigrationRecord {
    /// Migration version number
    pub version: i64,
    /// Migration name/description
    pub name: String,
    /// When the migration was applied
    pub applied_at: DateTime<Utc>,
}

/// All migrations for the café directory.
/// These are embedded in the binary for single-binary deployment.
pub const MIGRATIONS: &[Migration] = &[
    // Migration 1: Create users table
    // Username is the identity key; email is required but deliberately not
    // unique, so two accounts may share an address.
    Migration {
        version: 1,
        name: "create_users",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username VARCHAR(50) NOT NULL UNIQUE,
                email VARCHAR(255) NOT NULL,
                password_hash VARCHAR(255) NOT NULL,
                birthday DATE,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            CREATE INDEX IF NOT EXISTS idx_users_username ON users(username);
        "#,
        up_mysql: r#"
            CREATE TABLE IF NOT EXISTS users (
                id BIGINT PRIMARY KEY AUTO_INCREMENT,
                username VARCHAR(50) NOT NULL UNIQUE,
                email VARCHAR(255) NOT NULL,
                password_hash VARCHAR(255) NOT NULL,
                birthday DATE,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP
            );
            CREATE INDEX idx_users_username ON users(username);
        "#,
    },
    // Migration 2: Create areas table
    Migration {
        version: 2,
        name: "create_areas",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS areas (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(100) NOT NULL,
                description TEXT NOT NULL,
                latitude REAL,
                longitude REAL,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            CREATE INDEX IF NOT EXISTS idx_areas_name ON areas(name);
        "#,
        up_mysql: r#"
            CREATE TABLE IF NOT EXISTS areas (
                id BIGINT PRIMARY KEY AUTO_INCREMENT,
                name VARCHAR(100) NOT NULL,
                description TEXT NOT NULL,
                latitude DOUBLE,
                longitude DOUBLE,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            CREATE INDEX idx_areas_name ON areas(name);
        "#,
    },
    // Migration 3: Create cafes table
    // A café may sit outside any catalogued area, so area_id is nullable and
    // survives area deletion.
    Migration {
        version: 3,
        name: "create_cafes",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS cafes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(255) NOT NULL,
                area_id INTEGER,
                street_address VARCHAR(255),
                city VARCHAR(100),
                zip_code VARCHAR(20),
                hours VARCHAR(255),
                phone VARCHAR(50),
                seating VARCHAR(100),
                parking VARCHAR(255),
                website VARCHAR(500),
                instagram VARCHAR(255),
                image_path_exterior VARCHAR(500),
                image_path_interior VARCHAR(500),
                image_path_misc VARCHAR(500),
                take_out_only INTEGER NOT NULL DEFAULT 0,
                wifi INTEGER NOT NULL DEFAULT 0,
                beans INTEGER NOT NULL DEFAULT 0,
                restroom INTEGER NOT NULL DEFAULT 0,
                latitude REAL,
                longitude REAL,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (area_id) REFERENCES areas(id) ON DELETE SET NULL
            );
            CREATE INDEX IF NOT EXISTS idx_cafes_name ON cafes(name);
            CREATE INDEX IF NOT EXISTS idx_cafes_area_id ON cafes(area_id);
        "#,
        up_mysql: r#"
            CREATE TABLE IF NOT EXISTS cafes (
                id BIGINT PRIMARY KEY AUTO_INCREMENT,
                name VARCHAR(255) NOT NULL,
                area_id BIGINT,
                street_address VARCHAR(255),
                city VARCHAR(100),
                zip_code VARCHAR(20),
                hours VARCHAR(255),
                phone VARCHAR(50),
                seating VARCHAR(100),
                parking VARCHAR(255),
                website VARCHAR(500),
                instagram VARCHAR(255),
                image_path_exterior VARCHAR(500),
                image_path_interior VARCHAR(500),
                image_path_misc VARCHAR(500),
                take_out_only TINYINT NOT NULL DEFAULT 0,
                wifi TINYINT NOT NULL DEFAULT 0,
                beans TINYINT NOT NULL DEFAULT 0,
                restroom TINYINT NOT NULL DEFAULT 0,
                latitude DOUBLE,
                longitude DOUBLE,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP,
                FOREIGN KEY (area_id) REFERENCES areas(id) ON DELETE SET NULL
            );
            CREATE INDEX idx_cafes_name ON cafes(name);
            CREATE INDEX idx_cafes_area_id ON cafes(area_id);
        "#,
    },
    // Migration 4: Create favorite_cafes junction table
    // The composite primary key gives favorites set semantics at the schema
    // level: a user can favorite a café at most once.
    Migration {
        version: 4,
        name: "create_favorite_cafes",
        up_sqlite: r#"
            CREATE TABLE IF NOT EXISTS favorite_cafes (
                user_id INTEGER NOT NULL,
                cafe_id INTEGER NOT NULL,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                PRIMARY KEY (user_id, cafe_id),
                FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
                FOREIGN KEY (cafe_id) REFERENCES cafes(id) ON DELETE CASCADE
            );
            CREATE INDEX IF NOT EXISTS idx_favorite_cafes_user_id ON favorite_cafes(user_id);
            CREATE INDEX IF NOT EXISTS idx_favorite_cafes_cafe_id ON favorite_cafes(cafe_id);
        "#,
        up_mysql: r#"
            CREATE TABLE IF NOT EXISTS favorite_cafes (
                user_id BIGINT NOT NULL,
                cafe_id BIGINT NOT NULL,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                PRIMARY KEY (user_id, cafe_id),
                FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE,
                FOREIGN KEY (cafe_id) REFERENCES cafes(id) ON DELETE CASCADE
            );
            CREATE INDEX idx_favorite_cafes_user_id ON favorite_cafes(user_id);
            CREATE INDEX idx_favorite_cafes_cafe_id ON favorite_cafes(cafe_id);
        "#,
    },
];

/// Run all pending migrations
///
/// Creates the migrations tracking table if it doesn't exist, checks which
/// migrations have already been applied, and runs any pending migrations in
/// order.
///
/// # Returns
///
/// Number of migrations applied
///
/// # Errors
///
/// Returns an error if any migration fails to apply
pub async fn run_migrations(pool: &DynDatabasePool) -> Result<usize> {
    create_migrations_table(pool).await?;

    let applied = get_applied_migrations(pool).await?;
    let applied_versions: Vec<i32> = applied.iter().map(|m| m.version as i32).collect();

    let mut count = 0;

    for migration in MIGRATIONS {
        if !applied_versions.contains(&migration.version) {
            tracing::info!(
                "Applying migration {}: {}",
                migration.version,
                migration.name
            );
            apply_migration(pool, migration)
                .await
                .with_context(|| format!("Failed to apply migration: {}", migration.name))?;
            count += 1;
        }
    }

    if count > 0 {
        tracing::info!("Applied {} migration(s)", count);
    } else {
        tracing::debug!("No pending migrations");
    }

    Ok(count)
}

/// Create the migrations tracking table if it doesn't exist
async fn create_migrations_table(pool: &DynDatabasePool) -> Result<()> {
    let sql = match pool.driver() {
        DatabaseDriver::Sqlite => {
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version INTEGER PRIMARY KEY,
                name VARCHAR(255) NOT NULL UNIQUE,
                applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#
        }
        DatabaseDriver::Mysql => {
            r#"
            CREATE TABLE IF NOT EXISTS _migrations (
                version INT PRIMARY KEY,
                name VARCHAR(255) NOT NULL UNIQUE,
                applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#
        }
    };

    pool.execute(sql).await?;
    Ok(())
}

/// Get list of already applied migrations
async fn get_applied_migrations(pool: &DynDatabasePool) -> Result<Vec<MigrationRecord>> {
    match pool.driver() {
        DatabaseDriver::Sqlite => get_applied_migrations_sqlite(pool.as_sqlite().unwrap()).await,
        DatabaseDriver::Mysql => get_applied_migrations_mysql(pool.as_mysql().unwrap()).await,
    }
}

async fn get_applied_migrations_sqlite(pool: &SqlitePool) -> Result<Vec<MigrationRecord>> {
    let rows =
        sqlx::query("SELECT version, name, applied_at FROM _migrations ORDER BY version")
            .fetch_all(pool)
            .await?;

    let mut records = Vec::new();
    for row in rows {
        records.push(MigrationRecord {
            version: row.get("version"),
            name: row.get("name"),
            applied_at: row.get("applied_at"),
        });
    }

    Ok(records)
}

async fn get_applied_migrations_mysql(pool: &MySqlPool) -> Result<Vec<MigrationRecord>> {
    let rows =
        sqlx::query("SELECT version, name, applied_at FROM _migrations ORDER BY version")
            .fetch_all(pool)
            .await?;

    let mut records = Vec::new();
    for row in rows {
        records.push(MigrationRecord {
            version: row.get("version"),
            name: row.get("name"),
            applied_at: row.get("applied_at"),
        });
    }

    Ok(records)
}

/// Apply a single migration
async fn apply_migration(pool: &DynDatabasePool, migration: &Migration) -> Result<()> {
    match pool.driver() {
        DatabaseDriver::Sqlite => {
            apply_migration_sqlite(pool.as_sqlite().unwrap(), migration).await
        }
        DatabaseDriver::Mysql => {
            apply_migration_mysql(pool.as_mysql().unwrap(), migration).await
        }
    }
}

async fn apply_migration_sqlite(pool: &SqlitePool, migration: &Migration) -> Result<()> {
    // Migration SQL may contain multiple statements
    for statement in split_sql_statements(migration.up_sqlite) {
        let statement = statement.trim();
        if !statement.is_empty() {
            sqlx::query(statement)
                .execute(pool)
                .await
                .with_context(|| format!("Failed to execute: {}", truncate_sql(statement)))?;
        }
    }

    sqlx::query("INSERT INTO _migrations (version, name) VALUES (?, ?)")
        .bind(migration.version)
        .bind(migration.name)
        .execute(pool)
        .await?;

    Ok(())
}

async fn apply_migration_mysql(pool: &MySqlPool, migration: &Migration) -> Result<()> {
    // Migration SQL may contain multiple statements
    for statement in split_sql_statements(migration.up_mysql) {
        let statement = statement.trim();
        if !statement.is_empty() {
            sqlx::query(statement)
                .execute(pool)
                .await
                .with_context(|| format!("Failed to execute: {}", truncate_sql(statement)))?;
        }
    }

    sqlx::query("INSERT INTO _migrations (version, name) VALUES (?, ?)")
        .bind(migration.version)
        .bind(migration.name)
        .execute(pool)
        .await?;

    Ok(())
}

/// Truncate SQL for error messages
fn truncate_sql(sql: &str) -> String {
    if sql.len() > 100 {
        format!("{}...", &sql[..100])
    } else {
        sql.to_string()
    }
}

/// Split SQL into individual statements, handling comments properly
fn split_sql_statements(sql: &str) -> Vec<&str> {
    let mut statements = Vec::new();
    let mut current_start = 0;
    let mut in_statement = false;

    for (i, c) in sql.char_indices() {
        match c {
            ';' => {
                if in_statement {
                    let stmt = sql[current_start..i].trim();
                    if !stmt.is_empty() && !is_comment_only(stmt) {
                        statements.push(stmt);
                    }
                    in_statement = false;
                }
                current_start = i + 1;
            }
            _ if !c.is_whitespace() && !in_statement => {
                current_start = i;
                in_statement = true;
            }
            _ => {}
        }
    }

    // Handle last statement without trailing semicolon
    if in_statement {
        let stmt = sql[current_start..].trim();
        if !stmt.is_empty() && !is_comment_only(stmt) {
            statements.push(stmt);
        }
    }

    statements
}

/// Check if a string contains only SQL comments
fn is_comment_only(s: &str) -> bool {
    for line in s.lines() {
        let trimmed = line.trim();
        if !trimmed.is_empty() && !trimmed.starts_with("--") {
            return false;
        }
    }
    true
}

/// Check if migrations are up to date
pub async fn is_up_to_date(pool: &DynDatabasePool) -> Result<bool> {
    // The tracking table may not exist yet on a fresh database
    let _ = create_migrations_table(pool).await;

    let applied = get_applied_migrations(pool).await?;
    Ok(applied.len() == MIGRATIONS.len())
}

/// Get the total number of migrations defined
pub fn total_migrations() -> usize {
    MIGRATIONS.len()
}
