// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Application Configuration
//!
//! Loads the service's runtime configuration -- rotation timezone, SQLite
//! database location, the declared pipeline stage sequence, and the PNG
//! normalizer's SVG fallback size -- through the `config` crate, layering a
//! config file (TOML, YAML, or JSON, detected from extension) over built-in
//! defaults and `PHOTOFRAME__`-prefixed environment variable overrides.
//!
//! The pipeline stage sequence is itself just one section of this file; it
//! is validated for duplicate stage names at load time (spec: "rejected at
//! load time with `InvalidConfig`") rather than deferred to first pipeline
//! run.

use photoframe_domain::{validate_unique_names, PhotoframeError, PipelineConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Validated, immutable application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// IANA timezone name the rotation scheduler uses for its day boundary.
    /// Falls back to UTC if the name fails to parse.
    pub rotation_timezone: String,

    /// SQLite connection URL, e.g. `sqlite://photoframe.db` or
    /// `sqlite::memory:`.
    pub database_url: String,

    /// Connection pool size. SQLite allows only one active writer; anything
    /// greater than 1 is clamped down at load time with a warning.
    pub database_pool_size: u32,

    /// Fallback raster width used for size-less SVG uploads. 0 disables the
    /// fallback (the normalizer then fails size-less SVGs with
    /// `MissingSvgSize`).
    pub svg_fallback_width: u32,

    /// Fallback raster height, paired with `svg_fallback_width`.
    pub svg_fallback_height: u32,

    /// The declared pipeline: an ordered sequence of `(stage name, params)`.
    pub pipeline: PipelineConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rotation_timezone: "UTC".to_string(),
            database_url: "sqlite://photoframe.db".to_string(),
            database_pool_size: 1,
            svg_fallback_width: 0,
            svg_fallback_height: 0,
            pipeline: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from an optional file layered over defaults and
    /// environment overrides, then validates the pipeline section.
    ///
    /// `config_path`, when given, must exist; its extension (`toml`, `yaml`,
    /// `yml`, `json`) selects the format. Environment variables are read
    /// with the `PHOTOFRAME__` prefix and `__` as the nesting separator,
    /// e.g. `PHOTOFRAME__ROTATION_TIMEZONE=America/Chicago`.
    pub fn load(config_path: Option<&Path>) -> Result<Self, PhotoframeError> {
        let defaults = Self::default();
        let mut builder = config::Config::builder()
            .set_default("rotation_timezone", defaults.rotation_timezone.clone())
            .and_then(|b| b.set_default("database_url", defaults.database_url.clone()))
            .and_then(|b| b.set_default("database_pool_size", defaults.database_pool_size))
            .and_then(|b| b.set_default("svg_fallback_width", defaults.svg_fallback_width))
            .and_then(|b| b.set_default("svg_fallback_height", defaults.svg_fallback_height))
            .map_err(|e| PhotoframeError::InvalidConfig(e.to_string()))?;

        if let Some(path) = config_path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder = builder.add_source(config::Environment::with_prefix("PHOTOFRAME").separator("__").try_parsing(true));

        let raw = builder.build().map_err(|e| PhotoframeError::InvalidConfig(e.to_string()))?;
        let mut cfg: AppConfig = raw.try_deserialize().map_err(|e| PhotoframeError::InvalidConfig(e.to_string()))?;

        validate_unique_names(&cfg.pipeline)?;

        if cfg.database_pool_size > 1 {
            tracing::warn!(
                requested = cfg.database_pool_size,
                "SQLite supports a single active writer; clamping pool size to 1"
            );
            cfg.database_pool_size = 1;
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_empty_pipeline_and_utc_timezone() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.rotation_timezone, "UTC");
        assert!(cfg.pipeline.is_empty());
    }

    #[test]
    fn load_with_no_file_falls_back_to_defaults() {
        let cfg = AppConfig::load(None).unwrap();
        assert_eq!(cfg.database_url, "sqlite://photoframe.db");
        assert_eq!(cfg.database_pool_size, 1);
    }

    #[test]
    fn load_rejects_duplicate_stage_names() {
        let mut cfg = AppConfig::default();
        cfg.pipeline = vec![
            photoframe_domain::StageConfig::with_no_params("crop"),
            photoframe_domain::StageConfig::with_no_params("crop"),
        ];
        let err = validate_unique_names(&cfg.pipeline).unwrap_err();
        assert!(matches!(err, PhotoframeError::DuplicateStage(_)));
    }
}
