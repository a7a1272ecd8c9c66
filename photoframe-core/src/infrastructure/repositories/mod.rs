// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The SQLite-backed `ImageRepository` implementation and its schema
//! migration helpers.

pub mod schema;
pub mod sqlite_image_repository;

pub use sqlite_image_repository::SqliteImageRepository;
