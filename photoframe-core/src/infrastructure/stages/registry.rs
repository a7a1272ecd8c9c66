// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Stage Registry
//!
//! Maps a stage name to the factory that builds it from a `ParamMap`. The
//! stage set is closed: there is no runtime plugin loading, only the six
//! built-ins registered once at process start via [`register_builtins`].

use crate::infrastructure::stages::crop::{CropParams, CropStage};
use crate::infrastructure::stages::dither::{DitherParams, DitherStage};
use crate::infrastructure::stages::orientation::{OrientationParams, OrientationStage};
use crate::infrastructure::stages::pixel_scale::{PixelScaleParams, PixelScaleStage};
use crate::infrastructure::stages::png_normalize::{PngNormalizeParams, PngNormalizeStage};
use crate::infrastructure::stages::scale::{ScaleParams, ScaleStage};
use photoframe_domain::{FromParams, ImageStage, ParamMap, PhotoframeError};
use std::collections::HashMap;

type Factory = Box<dyn Fn(&ParamMap) -> Result<Box<dyn ImageStage>, PhotoframeError> + Send + Sync>;

/// Process-wide stage registry. Registration happens once at startup;
/// lookup (`create`) is read-only and needs no lock.
pub struct StageRegistry {
    factories: HashMap<String, Factory>,
}

impl StageRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registers a named factory. Fails with `InvalidConfig` if `name` is
    /// empty or already registered.
    pub fn register(&mut self, name: &str, factory: Factory) -> Result<(), PhotoframeError> {
        if name.is_empty() {
            return Err(PhotoframeError::InvalidConfig("stage name must not be empty".into()));
        }
        if self.factories.contains_key(name) {
            return Err(PhotoframeError::InvalidConfig(format!("stage already registered: {name}")));
        }
        self.factories.insert(name.to_string(), factory);
        Ok(())
    }

    /// Builds a stage instance from its registered name and params.
    /// `Unknown` maps to `UnknownStage`; factory validation failures
    /// propagate as-is (already `InvalidParams`/`MissingParam`).
    pub fn create(&self, name: &str, params: &ParamMap) -> Result<Box<dyn ImageStage>, PhotoframeError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| PhotoframeError::UnknownStage(name.to_string()))?;
        factory(params)
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn registered_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for StageRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        register_builtins(&mut registry);
        registry
    }
}

/// Registers the six built-in stages. Called once by the bootstrap entry
/// point; registration order is irrelevant.
pub fn register_builtins(registry: &mut StageRegistry) {
    registry
        .register(
            "pngNormalize",
            Box::new(|params| {
                let parsed = PngNormalizeParams::from_params(params)?;
                Ok(Box::new(PngNormalizeStage::new(parsed)) as Box<dyn ImageStage>)
            }),
        )
        .expect("builtin stage names are unique");
    registry
        .register(
            "orientation",
            Box::new(|params| {
                let parsed = OrientationParams::from_params(params)?;
                Ok(Box::new(OrientationStage::new(parsed)) as Box<dyn ImageStage>)
            }),
        )
        .expect("builtin stage names are unique");
    registry
        .register(
            "crop",
            Box::new(|params| {
                let parsed = CropParams::from_params(params)?;
                Ok(Box::new(CropStage::new(parsed)) as Box<dyn ImageStage>)
            }),
        )
        .expect("builtin stage names are unique");
    registry
        .register(
            "scale",
            Box::new(|params| {
                let parsed = ScaleParams::from_params(params)?;
                Ok(Box::new(ScaleStage::new(parsed)) as Box<dyn ImageStage>)
            }),
        )
        .expect("builtin stage names are unique");
    registry
        .register(
            "pixelScale",
            Box::new(|params| {
                let parsed = PixelScaleParams::from_params(params)?;
                Ok(Box::new(PixelScaleStage::new(parsed)) as Box<dyn ImageStage>)
            }),
        )
        .expect("builtin stage names are unique");
    registry
        .register(
            "dither",
            Box::new(|params| {
                let parsed = DitherParams::from_params(params)?;
                Ok(Box::new(DitherStage::new(parsed)) as Box<dyn ImageStage>)
            }),
        )
        .expect("builtin stage names are unique");
}
