// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Image Repository Interface
//!
//! Defines the repository pattern interface for image persistence, the
//! abstraction boundary between the domain and infrastructure layers. The
//! core depends only on this trait: atomic `create`, byte-exact
//! round-trips for `original`/`processed`, the projection semantics of
//! `list`, and insertion order keyed by `(created_at, row_ordinal)`.
//!
//! The trait lives in the domain layer and is implemented against SQLite
//! in `photoframe-core::infrastructure::repositories`; an in-memory
//! implementation is straightforward to add for testing without ever
//! touching a real database.

use crate::entities::{ImageRecord, ProjectionField};
use crate::value_objects::ImageId;
use crate::PhotoframeError;
use async_trait::async_trait;

/// Persistence contract the intake orchestrator and rotation scheduler
/// depend on.
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// Atomically stores a new record's `original` and `processed` bytes
    /// and returns its newly assigned id. Both buffers must be non-empty.
    async fn create(&self, original: Vec<u8>, processed: Vec<u8>) -> Result<ImageId, PhotoframeError>;

    /// Fetches a single record by id, or `None` if no such id exists.
    async fn get_by_id(&self, id: ImageId) -> Result<Option<ImageRecord>, PhotoframeError>;

    /// Lists records ordered `(created_at asc, row_ordinal asc)`.
    ///
    /// `projection` selects which fields are populated on the returned
    /// records; `None` selects all fields. Unselected fields are left
    /// zero-valued (empty buffers, the epoch for `created_at`).
    async fn list(&self, projection: Option<&[ProjectionField]>) -> Result<Vec<ImageRecord>, PhotoframeError>;

    /// Deletes a record by id. Idempotent: deleting a missing id is not an
    /// error.
    async fn delete(&self, id: ImageId) -> Result<(), PhotoframeError>;

    /// Releases any held resources (connection pools, file handles).
    async fn close(&self) -> Result<(), PhotoframeError>;
}

/// Validates the non-empty-buffer precondition shared by every
/// `ImageRepository::create` implementation.
pub fn validate_create_inputs(original: &[u8], processed: &[u8]) -> Result<(), PhotoframeError> {
    if original.is_empty() {
        return Err(PhotoframeError::WriteFailed("original buffer must not be empty".into()));
    }
    if processed.is_empty() {
        return Err(PhotoframeError::WriteFailed("processed buffer must not be empty".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_original() {
        assert!(validate_create_inputs(&[], &[1]).is_err());
    }

    #[test]
    fn rejects_empty_processed() {
        assert!(validate_create_inputs(&[1], &[]).is_err());
    }

    #[test]
    fn accepts_both_non_empty() {
        assert!(validate_create_inputs(&[1], &[2]).is_ok());
    }
}
