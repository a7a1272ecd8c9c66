// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Stage Service Trait
//!
//! Defines the contract every pipeline processing stage must implement,
//! whether built-in (PNG normalization, orientation, crop, scale, pixel
//! scale, dither) or a future custom stage. A `StageService`/`FromParameters`
//! split: a uniform trait so the registry and invoker never need to know a
//! stage's concrete type, plus a `FromParams` trait so each stage's typed
//! config is built once at construction time instead of re-parsed on every
//! `execute` call.
//!
//! ## Why One Unified Trait?
//!
//! All six built-in stages share the exact same shape -- take an encoded
//! image, return an encoded image -- so a single `execute` method covers all
//! of them. There is no reverse operation in this pipeline (unlike
//! compression/encryption pipelines, image stages are one-directional), so
//! the trait is simpler than a bidirectional codec trait would be.

use crate::value_objects::ParamMap;
use crate::PhotoframeError;

/// Converts a stage's `ParamMap` into its typed configuration.
///
/// Implemented once per stage (`CropParams`, `ScaleParams`, `DitherParams`,
/// ...). Keeping this as a trait (rather than one large match statement in
/// the registry) means adding a stage only touches that stage's module.
pub trait FromParams: Sized {
    fn from_params(params: &ParamMap) -> Result<Self, PhotoframeError>;
}

/// A named, constructed pipeline stage.
///
/// Implementations are stateless after construction (any configuration was
/// resolved once via `FromParams`) and must be `Send + Sync`: the pipeline
/// invoker may run different stage instances concurrently across different
/// images, though never concurrently on the same stage+buffer.
pub trait ImageStage: Send + Sync {
    /// The stage's registered name, for observability and error messages.
    fn name(&self) -> &'static str;

    /// Transforms an encoded image buffer into another encoded image
    /// buffer. Input and output are self-contained encoded images (PNG,
    /// except where a stage explicitly documents otherwise).
    fn execute(&self, input: &[u8]) -> Result<Vec<u8>, PhotoframeError>;
}
