// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Stage Configuration Value Object
//!
//! A stage config is a `(name, params)` pair: `name` selects a registered
//! stage factory (see `services::ImageStage`), `params` is a heterogeneous,
//! string-keyed mapping of stage arguments. `serde_json::Value` already
//! models exactly the heterogeneous type set needed (string, int, float,
//! bool, nested list/mapping for palettes), so it is used directly rather
//! than inventing a parallel enum.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stage's parameter mapping: string keys to dynamically typed values.
pub type ParamMap = Map<String, Value>;

/// One entry of a pipeline configuration: a stage name paired with its
/// parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageConfig {
    pub name: String,
    #[serde(default)]
    pub params: ParamMap,
}

impl StageConfig {
    pub fn new(name: impl Into<String>, params: ParamMap) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    pub fn with_no_params(name: impl Into<String>) -> Self {
        Self::new(name, ParamMap::new())
    }
}

/// An ordered sequence of stage configs: the declared pipeline.
pub type PipelineConfig = Vec<StageConfig>;

/// Validates that stage names are unique across a pipeline configuration.
/// Enforced by the config loader, not the registry.
pub fn validate_unique_names(pipeline: &PipelineConfig) -> Result<(), crate::PhotoframeError> {
    let mut seen = std::collections::HashSet::new();
    for stage in pipeline {
        if !seen.insert(stage.name.as_str()) {
            return Err(crate::PhotoframeError::DuplicateStage(stage.name.clone()));
        }
    }
    Ok(())
}
