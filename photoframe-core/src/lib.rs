// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Photo Frame Core
//!
//! Wires the pure `photoframe-domain` contracts to real infrastructure:
//! the six image stages and their registry, the pipeline invoker, the
//! SQLite-backed repository, configuration loading, and logging
//! initialization. The [`application`] layer sits on top of all of that
//! and is the surface a caller (the bootstrap CLI) actually depends on.
//!
//! ## Layout
//!
//! - [`infrastructure`] - stages, runtime (pipeline invoker), repositories
//!   (SQLite), config, logging.
//! - [`application`] - the intake orchestrator (C7) and rotation scheduler
//!   (C6) use cases built on top of infrastructure.

pub mod application;
pub mod infrastructure;

pub use application::{IntakeOrchestrator, RotationScheduler};
pub use infrastructure::AppConfig;
