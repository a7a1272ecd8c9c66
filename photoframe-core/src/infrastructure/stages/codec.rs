// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Shared PNG decode/encode helpers used by every stage past the normalizer.

use image::DynamicImage;
use photoframe_domain::PhotoframeError;
use std::io::Cursor;

/// Decodes a byte buffer known to be a PNG (the normalizer guarantees this
/// for every stage downstream of it).
pub fn decode_png(bytes: &[u8]) -> Result<DynamicImage, PhotoframeError> {
    image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
        .map_err(|e| PhotoframeError::UndecodableImage(e.to_string()))
}

/// Encodes an in-memory image back to canonical PNG bytes.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>, PhotoframeError> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| PhotoframeError::InternalError(format!("PNG encode failed: {e}")))?;
    Ok(buf)
}
