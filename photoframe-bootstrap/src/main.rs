// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Process entry point: parse argv, run the requested command, exit with
//! the mapped status code.

use photoframe_bootstrap::cli::parse_cli;

#[tokio::main]
async fn main() {
    let cli = parse_cli();
    let exit_code = photoframe_bootstrap::run(cli).await;
    std::process::exit(exit_code.as_i32());
}
