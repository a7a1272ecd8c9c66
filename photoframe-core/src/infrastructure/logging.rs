// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Logging Initialization
//!
//! Installs a `tracing-subscriber` global subscriber. The per-stage and
//! per-pipeline structured events (see
//! [`crate::infrastructure::runtime::invoker`]) are plain `tracing` events;
//! this module only wires up where they go and at what verbosity.

use tracing_subscriber::EnvFilter;

/// Initializes the global `tracing` subscriber.
///
/// `RUST_LOG` (or `verbose` forcing `debug` as a floor) controls verbosity;
/// without either, the default filter is `info`.
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    // Installing the subscriber twice (e.g. across multiple tests in the same
    // process) is a programmer error we tolerate rather than panic on.
    let _ = subscriber.try_init();
}
