// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # CLI Parser
//!
//! Command-line interface parsing using clap. This module defines the CLI
//! structure and handles argument parsing; path safety checks happen in
//! [`super::validator`] after parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure.
#[derive(Parser, Debug, Clone)]
#[command(name = "photoframe")]
#[command(about = concat!("Photo Frame Image Service v", env!("CARGO_PKG_VERSION")))]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file path (TOML, YAML, or JSON).
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// CLI subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Upload a file, normalize it to PNG, run the configured pipeline, and
    /// persist both buffers.
    AddImage {
        /// Path to the source image (PNG, JPEG, GIF, BMP, TIFF, WebP, or SVG).
        path: PathBuf,
    },

    /// List the ids of every stored, fully-processed image.
    List,

    /// Show a single stored record's metadata.
    Show {
        /// Image id (canonical hyphenated UUID form).
        id: String,
    },

    /// Delete a stored image by id. Idempotent.
    Delete {
        /// Image id to delete.
        id: String,
    },

    /// Rotation scheduler operations.
    Rotation {
        #[command(subcommand)]
        action: RotationAction,
    },

    /// Validate a configuration file without starting anything.
    ValidateConfig {
        /// Configuration file to validate.
        path: PathBuf,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum RotationAction {
    /// Show which image would be displayed right now.
    Today,

    /// Show when every stored image is next scheduled to display.
    Schedule {
        /// Reference date (RFC 3339), defaults to now.
        #[arg(long)]
        date: Option<String>,
    },
}

/// Parses process arguments into a [`Cli`]. Clap exits the process with a
/// usage message on a parse failure.
pub fn parse_cli() -> Cli {
    Cli::parse()
}
