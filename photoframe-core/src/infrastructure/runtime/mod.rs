// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The pipeline invoker: runs a declared stage sequence over a byte buffer.

pub mod invoker;

pub use invoker::{PipelineInvoker, PipelineSummary, StageEvent};
