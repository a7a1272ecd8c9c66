// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Repositories: persistence ports implemented by the infrastructure layer.

pub mod image_repository;

pub use image_repository::{validate_create_inputs, ImageRepository};
