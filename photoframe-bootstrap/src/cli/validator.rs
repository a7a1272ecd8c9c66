// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Path Argument Validation
//!
//! Validates the file paths this CLI accepts (`add-image`'s source image,
//! `validate-config`'s target, `--config`) before they reach disk I/O:
//! length limits, dangerous shell-metacharacter rejection, and existence.

use std::path::{Path, PathBuf};
use thiserror::Error;

const MAX_PATH_LENGTH: usize = 4096;

const DANGEROUS_PATTERNS: &[&str] = &["`", ";", "&", "|", ">", "<", "\n", "\r", "\0"];

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("path exceeds maximum length (max {MAX_PATH_LENGTH})")]
    PathTooLong,

    #[error("path contains disallowed character '{pattern}': {arg}")]
    DangerousPattern { pattern: String, arg: String },

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("not a file: {0}")]
    NotAFile(String),
}

/// Validates a path argument that must already exist and be a regular file
/// (the source image for `add-image`, the target for `validate-config`).
pub fn validate_existing_file(raw: &str) -> Result<PathBuf, ValidationError> {
    check_safe(raw)?;

    let path = Path::new(raw);
    if !path.exists() {
        return Err(ValidationError::PathNotFound(raw.to_string()));
    }
    if !path.is_file() {
        return Err(ValidationError::NotAFile(raw.to_string()));
    }
    Ok(path.to_path_buf())
}

fn check_safe(raw: &str) -> Result<(), ValidationError> {
    if raw.len() > MAX_PATH_LENGTH {
        return Err(ValidationError::PathTooLong);
    }
    for pattern in DANGEROUS_PATTERNS {
        if raw.contains(pattern) {
            return Err(ValidationError::DangerousPattern {
                pattern: pattern.to_string(),
                arg: raw.to_string(),
            });
        }
    }
    Ok(())
}
