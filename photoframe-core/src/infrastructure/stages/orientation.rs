// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Orientation Stage
//!
//! Rotates an image 90 degrees so it matches a requested portrait/landscape
//! orientation. Square images are left alone unless `rotateWhenSquare` is
//! set, and an image already matching the requested orientation is
//! returned byte-for-byte unchanged.

use crate::infrastructure::stages::codec::{decode_png, encode_png};
use image::{DynamicImage, RgbaImage};
use photoframe_domain::{get_bool, get_string, FromParams, ImageStage, ParamMap, PhotoframeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrientationParams {
    pub orientation: Orientation,
    pub rotate_when_square: bool,
    pub clockwise: bool,
}

impl FromParams for OrientationParams {
    fn from_params(params: &ParamMap) -> Result<Self, PhotoframeError> {
        let orientation = match get_string(params, "orientation", "portrait").as_str() {
            "landscape" => Orientation::Landscape,
            _ => Orientation::Portrait,
        };
        Ok(Self {
            orientation,
            rotate_when_square: get_bool(params, "rotateWhenSquare", false),
            clockwise: get_bool(params, "clockwise", true),
        })
    }
}

pub struct OrientationStage {
    params: OrientationParams,
}

impl OrientationStage {
    pub fn new(params: OrientationParams) -> Self {
        Self { params }
    }
}

impl ImageStage for OrientationStage {
    fn name(&self) -> &'static str {
        "orientation"
    }

    fn execute(&self, input: &[u8]) -> Result<Vec<u8>, PhotoframeError> {
        let decoded = decode_png(input)?;
        let (width, height) = (decoded.width(), decoded.height());

        let needs_rotation = if width == height {
            self.params.rotate_when_square
        } else {
            let currently_portrait = height > width;
            let requested_portrait = self.params.orientation == Orientation::Portrait;
            currently_portrait != requested_portrait
        };

        if !needs_rotation {
            return Ok(input.to_vec());
        }

        let rotated = rotate90(&decoded.to_rgba8(), self.params.clockwise);
        encode_png(&DynamicImage::ImageRgba8(rotated))
    }
}

/// Rotates an RGBA buffer 90 degrees. Clockwise maps `(x,y) -> (h-1-y, x)`;
/// counter-clockwise maps `(x,y) -> (y, w-1-x)`. The output canvas has
/// swapped dimensions either way.
fn rotate90(src: &RgbaImage, clockwise: bool) -> RgbaImage {
    let (w, h) = (src.width(), src.height());
    let mut dst = RgbaImage::new(h, w);
    for y in 0..h {
        for x in 0..w {
            let pixel = *src.get_pixel(x, y);
            let (nx, ny) = if clockwise {
                (h - 1 - y, x)
            } else {
                (y, w - 1 - x)
            };
            dst.put_pixel(nx, ny, pixel);
        }
    }
    dst
}
