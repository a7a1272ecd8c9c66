// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Exit Code Mapping
//!
//! Unix exit codes following BSD `sysexits.h` conventions, mapped from
//! [`photoframe_domain::PhotoframeError`]'s category so a script driving
//! this CLI can branch on failure class without parsing stderr.

use photoframe_domain::PhotoframeError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum ExitCode {
    #[default]
    Success = 0,
    Error = 1,
    UsageError = 64,
    DataError = 65,
    NoInput = 66,
    Unavailable = 69,
    Software = 70,
    CantCreate = 73,
    IoError = 74,
    Config = 78,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Maps a domain error to the exit code a caller should see.
    pub fn from_domain_error(error: &PhotoframeError) -> Self {
        match error {
            PhotoframeError::UnknownStage(_)
            | PhotoframeError::InvalidParams { .. }
            | PhotoframeError::MissingParam(_)
            | PhotoframeError::DuplicateStage(_)
            | PhotoframeError::InvalidConfig(_) => ExitCode::Config,
            PhotoframeError::UndecodableImage(_) | PhotoframeError::MissingSvgSize => ExitCode::DataError,
            PhotoframeError::StageFailure { .. } => ExitCode::Software,
            PhotoframeError::NotFound | PhotoframeError::UnknownField(_) | PhotoframeError::NoImages => ExitCode::NoInput,
            PhotoframeError::WriteFailed(_) => ExitCode::CantCreate,
            PhotoframeError::Unavailable(_) => ExitCode::Unavailable,
            PhotoframeError::IoError(_) => ExitCode::IoError,
            PhotoframeError::SerializationError(_) => ExitCode::DataError,
            PhotoframeError::InternalError(_) => ExitCode::Software,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ExitCode::Success => "Success",
            ExitCode::Error => "General error",
            ExitCode::UsageError => "Command line usage error",
            ExitCode::DataError => "Data format error",
            ExitCode::NoInput => "Cannot open input",
            ExitCode::Unavailable => "Service unavailable",
            ExitCode::Software => "Internal software error",
            ExitCode::CantCreate => "Cannot create output",
            ExitCode::IoError => "I/O error",
            ExitCode::Config => "Configuration error",
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_i32())
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code.as_i32()
    }
}
