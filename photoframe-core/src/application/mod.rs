// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Application layer: the use cases that orchestrate the domain ports
//! against the infrastructure implementations -- intake and rotation, the
//! two operations a caller (CLI or, out of scope here, an HTTP handler)
//! actually invokes.

pub mod use_cases;

pub use use_cases::{IntakeOrchestrator, RotationScheduler};
