// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Image Identifier Value Object
//!
//! `ImageId` is a type-safe wrapper around a random v4 UUID: a 122-bit random
//! value rendered in canonical 8-4-4-4-12 hex form. It is the stable,
//! globally-unique identity of an [`crate::entities::ImageRecord`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque, globally unique identifier for a stored image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(Uuid);

impl ImageId {
    /// Generates a new random (v4) identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ImageId {
    /// The nil UUID, used as the zero-value for an unselected projection
    /// field -- never a substitute for [`ImageId::new`].
    fn default() -> Self {
        Self(Uuid::nil())
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Canonical 8-4-4-4-12 hyphenated hex form.
        write!(f, "{}", self.0.as_hyphenated())
    }
}

impl FromStr for ImageId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl From<Uuid> for ImageId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}
