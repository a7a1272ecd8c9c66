// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! SQLite schema helpers shared by repository implementations.
//!
//! Applies migrations on start-up so tests and the running service always
//! see a consistent schema.

use sqlx::migrate::MigrateDatabase;
use sqlx::SqlitePool;
use tracing::{debug, info};

/// Runs pending migrations against the provided pool.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    debug!("ensuring image store schema is up to date");
    sqlx::migrate!("../migrations").run(pool).await?;
    info!("image store schema is up to date");
    Ok(())
}

/// Creates the SQLite database file if it does not already exist.
pub async fn create_database_if_missing(database_url: &str) -> Result<(), sqlx::Error> {
    if !sqlx::Sqlite::database_exists(database_url).await? {
        debug!(database_url, "database does not exist, creating");
        sqlx::Sqlite::create_database(database_url).await?;
    } else {
        debug!(database_url, "database already exists");
    }
    Ok(())
}

/// Creates the database if missing, connects, and migrates it in one call.
///
/// The pool is capped at a single connection: SQLite only supports one
/// active writer, and this store has no read-only fast path worth a
/// separate pool.
pub async fn initialize_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    create_database_if_missing(database_url).await?;

    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect(database_url)
        .await?;

    ensure_schema(&pool).await?;

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn temp_db_url() -> (NamedTempFile, String) {
        let temp = NamedTempFile::new().unwrap();
        let url = format!("sqlite://{}", temp.path().to_str().unwrap());
        (temp, url)
    }

    #[tokio::test]
    async fn creates_database_idempotently() {
        let (temp, url) = temp_db_url();
        drop(temp);
        create_database_if_missing(&url).await.unwrap();
        create_database_if_missing(&url).await.unwrap();
    }

    #[tokio::test]
    async fn initializes_images_table() {
        let (temp, url) = temp_db_url();
        drop(temp);
        let pool = initialize_database(&url).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='images'")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let (temp, url) = temp_db_url();
        drop(temp);
        create_database_if_missing(&url).await.unwrap();
        let pool = sqlx::sqlite::SqlitePoolOptions::new().max_connections(1).connect(&url).await.unwrap();

        ensure_schema(&pool).await.unwrap();
        ensure_schema(&pool).await.unwrap();
    }
}
