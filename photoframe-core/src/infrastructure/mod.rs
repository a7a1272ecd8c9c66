// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Infrastructure: everything that touches the outside world -- image
//! codecs, the SQLite repository, configuration loading, logging, and the
//! pipeline invoker's runtime.

pub mod config;
pub mod logging;
pub mod repositories;
pub mod runtime;
pub mod stages;

pub use config::AppConfig;
