// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Entities: domain objects with identity and a lifecycle.

pub mod image_record;

pub use image_record::{ImageRecord, ProjectionField, PNG_MAGIC};
