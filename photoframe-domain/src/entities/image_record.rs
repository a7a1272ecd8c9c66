// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Image Record Entity
//!
//! The one entity in this domain: an uploaded image, immutable once
//! created. There is no update path -- a record is created once by the
//! intake orchestrator and later deleted wholesale, never mutated in
//! place.

use crate::value_objects::ImageId;
use chrono::{DateTime, Utc};

/// A persisted image: its PNG-normalized original, its pipeline-processed
/// artifact, and the metadata the store assigns at insert time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub id: ImageId,
    pub original: Vec<u8>,
    pub processed: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

/// The PNG magic number every `original` byte buffer must begin with.
pub const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

impl ImageRecord {
    pub fn new(id: ImageId, original: Vec<u8>, processed: Vec<u8>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            original,
            processed,
            created_at,
        }
    }

    /// True once both buffers are populated.
    pub fn is_complete(&self) -> bool {
        !self.original.is_empty() && !self.processed.is_empty()
    }

    /// True iff `original` starts with the canonical PNG magic.
    pub fn has_valid_png_original(&self) -> bool {
        self.original.starts_with(&PNG_MAGIC)
    }
}

/// Selects which fields a `list` projection populates; unselected fields are
/// left zero-valued on the returned records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectionField {
    Id,
    Original,
    Processed,
    CreatedAt,
}

impl ProjectionField {
    pub fn parse(name: &str) -> Result<Self, crate::PhotoframeError> {
        match name {
            "id" => Ok(Self::Id),
            "original" => Ok(Self::Original),
            "processed" => Ok(Self::Processed),
            "created_at" => Ok(Self::CreatedAt),
            other => Err(crate::PhotoframeError::UnknownField(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_record_requires_both_buffers() {
        let record = ImageRecord::new(ImageId::new(), vec![1], vec![2], Utc::now());
        assert!(record.is_complete());

        let incomplete = ImageRecord::new(ImageId::new(), vec![1], vec![], Utc::now());
        assert!(!incomplete.is_complete());
    }

    #[test]
    fn validates_png_magic() {
        let mut bytes = PNG_MAGIC.to_vec();
        bytes.extend_from_slice(b"rest");
        let record = ImageRecord::new(ImageId::new(), bytes, vec![1], Utc::now());
        assert!(record.has_valid_png_original());

        let bad = ImageRecord::new(ImageId::new(), vec![0, 1, 2], vec![1], Utc::now());
        assert!(!bad.has_valid_png_original());
    }

    #[test]
    fn rejects_unknown_projection_field() {
        assert!(ProjectionField::parse("bogus").is_err());
        assert!(ProjectionField::parse("created_at").is_ok());
    }
}
