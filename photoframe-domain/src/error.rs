// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Domain Error System
//!
//! A single, hierarchical error type for the photo-frame domain, organized by
//! the failure categories the system actually surfaces: configuration,
//! decode, pipeline, store, and scheduler errors.
//!
//! Validation errors (bad stage params, unknown stage names) are meant to be
//! raised at config-load or stage-construction time, before a pipeline run
//! ever starts. A stage failure during `execute` is wrapped with the failing
//! stage's name and index so the caller never has to guess which stage in a
//! chain misbehaved.

use thiserror::Error;

/// Domain-specific errors for the photo-frame image service.
#[derive(Error, Debug, Clone)]
pub enum PhotoframeError {
    // --- Config errors ---
    #[error("unknown stage: {0}")]
    UnknownStage(String),

    #[error("invalid parameters for stage {stage}: {reason}")]
    InvalidParams { stage: String, reason: String },

    #[error("missing required parameter: {0}")]
    MissingParam(String),

    #[error("duplicate stage name in pipeline config: {0}")]
    DuplicateStage(String),

    #[error("invalid pipeline configuration: {0}")]
    InvalidConfig(String),

    // --- Decode errors ---
    #[error("could not decode image: {0}")]
    UndecodableImage(String),

    #[error("SVG input has no intrinsic size and no fallback size was configured")]
    MissingSvgSize,

    // --- Pipeline errors ---
    #[error("stage '{stage_name}' (index {index}) failed: {cause}")]
    StageFailure {
        stage_name: String,
        index: usize,
        cause: String,
    },

    // --- Store errors ---
    #[error("image not found")]
    NotFound,

    #[error("unknown projection field: {0}")]
    UnknownField(String),

    #[error("write failed: {0}")]
    WriteFailed(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    // --- Scheduler errors ---
    #[error("no images are available for rotation")]
    NoImages,

    // --- Ambient infrastructure errors ---
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("serialization error: {0}")]
    SerializationError(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl PhotoframeError {
    pub fn stage_failure(stage_name: impl Into<String>, index: usize, cause: impl Into<String>) -> Self {
        Self::StageFailure {
            stage_name: stage_name.into(),
            index,
            cause: cause.into(),
        }
    }

    pub fn invalid_params(stage: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            stage: stage.into(),
            reason: reason.into(),
        }
    }

    /// Categorizes the error for logging and metrics call sites.
    pub fn category(&self) -> &'static str {
        match self {
            PhotoframeError::UnknownStage(_)
            | PhotoframeError::InvalidParams { .. }
            | PhotoframeError::MissingParam(_)
            | PhotoframeError::DuplicateStage(_)
            | PhotoframeError::InvalidConfig(_) => "configuration",
            PhotoframeError::UndecodableImage(_) | PhotoframeError::MissingSvgSize => "decode",
            PhotoframeError::StageFailure { .. } => "pipeline",
            PhotoframeError::NotFound
            | PhotoframeError::UnknownField(_)
            | PhotoframeError::WriteFailed(_)
            | PhotoframeError::Unavailable(_) => "store",
            PhotoframeError::NoImages => "scheduler",
            PhotoframeError::IoError(_) => "io",
            PhotoframeError::SerializationError(_) => "serialization",
            PhotoframeError::InternalError(_) => "internal",
        }
    }

    /// Whether the caller can reasonably retry the operation unchanged.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PhotoframeError::Unavailable(_) | PhotoframeError::IoError(_))
    }
}

impl From<std::io::Error> for PhotoframeError {
    fn from(err: std::io::Error) -> Self {
        PhotoframeError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for PhotoframeError {
    fn from(err: serde_json::Error) -> Self {
        PhotoframeError::SerializationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PhotoframeError>;
