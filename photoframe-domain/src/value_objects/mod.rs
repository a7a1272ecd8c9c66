// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Value objects: immutable, validated domain data.

pub mod color;
pub mod image_id;
pub mod stage_config;

pub use color::{Palette, PalettePair, Rgb8};
pub use image_id::ImageId;
pub use stage_config::{validate_unique_names, ParamMap, PipelineConfig, StageConfig};
