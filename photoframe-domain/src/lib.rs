// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Photo Frame Domain
//!
//! Pure business logic for the photo-frame image service: the image
//! record entity, the value objects it's built from, the pipeline stage
//! and parameter-coercion service contracts, and the `ImageRepository`
//! persistence port. Nothing in this crate touches a filesystem, a
//! database, or a network socket - those live in `photoframe-core`'s
//! infrastructure layer, which depends on this crate rather than the
//! other way around.
//!
//! ## Layout
//!
//! - [`error`] - the domain-wide `PhotoframeError` type.
//! - [`value_objects`] - `ImageId`, `Rgb8`/`PalettePair`/`Palette`,
//!   `StageConfig`/`PipelineConfig`.
//! - [`entities`] - `ImageRecord`, the one entity in this domain.
//! - [`services`] - the `ImageStage`/`FromParams` stage contract and the
//!   parameter coercion helpers stages build their configs from.
//! - [`repositories`] - the `ImageRepository` persistence port.

pub mod entities;
pub mod error;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use error::{PhotoframeError, Result};

pub use entities::{ImageRecord, ProjectionField, PNG_MAGIC};
pub use repositories::{validate_create_inputs, ImageRepository};
pub use services::{get_bool, get_float, get_int, get_string, get_value, validate_required, FromParams, ImageStage};
pub use value_objects::{validate_unique_names, ImageId, Palette, PalettePair, ParamMap, PipelineConfig, Rgb8, StageConfig};
