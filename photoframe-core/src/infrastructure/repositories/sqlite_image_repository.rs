// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # SQLite Image Repository
//!
//! The only `ImageRepository` implementation: a single `images` table,
//! ordered by `(created_at, row_ordinal)`. The connection pool is capped
//! at one connection since SQLite allows only a single active writer and
//! this store has no read replica to offload to.

use crate::infrastructure::repositories::schema;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use photoframe_domain::{validate_create_inputs, ImageId, ImageRecord, ImageRepository, PhotoframeError, ProjectionField};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;

pub struct SqliteImageRepository {
    pool: SqlitePool,
}

impl SqliteImageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connects to (creating and migrating if necessary) a SQLite database
    /// at the given URL, e.g. `sqlite://./photoframe.db` or
    /// `sqlite::memory:`.
    pub async fn connect(database_url: &str) -> Result<Self, PhotoframeError> {
        let pool = schema::initialize_database(database_url)
            .await
            .map_err(|e| PhotoframeError::Unavailable(e.to_string()))?;
        Ok(Self::new(pool))
    }

    fn row_to_record(row: &sqlx::sqlite::SqliteRow, projection: Option<&[ProjectionField]>) -> Result<ImageRecord, PhotoframeError> {
        let include = |field: ProjectionField| projection.is_none_or(|fields| fields.contains(&field));

        let id = if include(ProjectionField::Id) {
            let raw: String = row.get("id");
            ImageId::from_str(&raw).map_err(|e| PhotoframeError::SerializationError(e.to_string()))?
        } else {
            ImageId::default()
        };

        let original = if include(ProjectionField::Original) { row.get::<Vec<u8>, _>("original") } else { Vec::new() };

        let processed = if include(ProjectionField::Processed) { row.get::<Vec<u8>, _>("processed") } else { Vec::new() };

        let created_at = if include(ProjectionField::CreatedAt) {
            let raw: String = row.get("created_at");
            DateTime::parse_from_rfc3339(&raw)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| PhotoframeError::SerializationError(e.to_string()))?
        } else {
            DateTime::<Utc>::from_timestamp(0, 0).expect("epoch is a valid timestamp")
        };

        Ok(ImageRecord::new(id, original, processed, created_at))
    }
}

#[async_trait]
impl ImageRepository for SqliteImageRepository {
    async fn create(&self, original: Vec<u8>, processed: Vec<u8>) -> Result<ImageId, PhotoframeError> {
        validate_create_inputs(&original, &processed)?;

        let id = ImageId::new();
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

        sqlx::query("INSERT INTO images (id, original, processed, created_at) VALUES (?, ?, ?, ?)")
            .bind(id.to_string())
            .bind(&original)
            .bind(&processed)
            .bind(&created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| PhotoframeError::WriteFailed(e.to_string()))?;

        Ok(id)
    }

    async fn get_by_id(&self, id: ImageId) -> Result<Option<ImageRecord>, PhotoframeError> {
        let row = sqlx::query("SELECT id, original, processed, created_at FROM images WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| PhotoframeError::Unavailable(e.to_string()))?;

        row.as_ref().map(|r| Self::row_to_record(r, None)).transpose()
    }

    async fn list(&self, projection: Option<&[ProjectionField]>) -> Result<Vec<ImageRecord>, PhotoframeError> {
        let rows = sqlx::query("SELECT id, original, processed, created_at FROM images ORDER BY created_at ASC, row_ordinal ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| PhotoframeError::Unavailable(e.to_string()))?;

        rows.iter().map(|row| Self::row_to_record(row, projection)).collect()
    }

    async fn delete(&self, id: ImageId) -> Result<(), PhotoframeError> {
        sqlx::query("DELETE FROM images WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| PhotoframeError::WriteFailed(e.to_string()))?;
        Ok(())
    }

    async fn close(&self) -> Result<(), PhotoframeError> {
        self.pool.close().await;
        Ok(())
    }
}
