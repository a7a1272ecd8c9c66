// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Pixel Scale Stage
//!
//! Resizes to an explicit pixel size, distorting the aspect ratio if only
//! one dimension is given without the other matching the source's ratio.
//! Unlike [`super::scale`], there is no letterboxing: the output canvas is
//! exactly the target size.

use crate::infrastructure::stages::codec::{decode_png, encode_png};
use crate::infrastructure::stages::scale::nearest_index_table;
use image::{DynamicImage, GenericImageView, RgbaImage};
use photoframe_domain::{get_int, FromParams, ImageStage, ParamMap, PhotoframeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelScaleParams {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl FromParams for PixelScaleParams {
    fn from_params(params: &ParamMap) -> Result<Self, PhotoframeError> {
        let has_width = params.contains_key("width");
        let has_height = params.contains_key("height");
        if !has_width && !has_height {
            return Err(PhotoframeError::invalid_params(
                "pixelScale",
                "at least one of width or height must be present",
            ));
        }

        let width = if has_width {
            let v = get_int(params, "width", 0);
            if v <= 0 {
                return Err(PhotoframeError::invalid_params("pixelScale", "width must be > 0"));
            }
            Some(v as u32)
        } else {
            None
        };

        let height = if has_height {
            let v = get_int(params, "height", 0);
            if v <= 0 {
                return Err(PhotoframeError::invalid_params("pixelScale", "height must be > 0"));
            }
            Some(v as u32)
        } else {
            None
        };

        Ok(Self { width, height })
    }
}

pub struct PixelScaleStage {
    params: PixelScaleParams,
}

impl PixelScaleStage {
    pub fn new(params: PixelScaleParams) -> Self {
        Self { params }
    }
}

impl ImageStage for PixelScaleStage {
    fn name(&self) -> &'static str {
        "pixelScale"
    }

    fn execute(&self, input: &[u8]) -> Result<Vec<u8>, PhotoframeError> {
        let decoded = decode_png(input)?;
        let (src_w, src_h) = decoded.dimensions();

        let target_w = self.params.width.unwrap_or_else(|| {
            let h = self.params.height.expect("validated: at least one dimension present");
            (((u64::from(h) * u64::from(src_w)) / u64::from(src_h)) as u32).max(1)
        });
        let target_h = self.params.height.unwrap_or_else(|| {
            let w = self.params.width.expect("validated: at least one dimension present");
            (((u64::from(w) * u64::from(src_h)) / u64::from(src_w)) as u32).max(1)
        });

        let source = decoded.to_rgba8();
        let x_table = nearest_index_table(src_w, target_w);
        let y_table = nearest_index_table(src_h, target_h);

        let mut canvas = RgbaImage::new(target_w, target_h);
        for dy in 0..target_h {
            let sy = y_table[dy as usize];
            for dx in 0..target_w {
                let sx = x_table[dx as usize];
                canvas.put_pixel(dx, dy, *source.get_pixel(sx, sy));
            }
        }

        encode_png(&DynamicImage::ImageRgba8(canvas))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn solid(w: u32, h: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(w, h, image::Rgb([5, 5, 5]));
        encode_png(&DynamicImage::ImageRgb8(img)).unwrap()
    }

    #[test]
    fn rejects_when_neither_dimension_present() {
        let params = ParamMap::new();
        assert!(PixelScaleParams::from_params(&params).is_err());
    }

    #[test]
    fn derives_height_from_width_and_aspect() {
        let p = PixelScaleParams {
            width: Some(50),
            height: None,
        };
        let stage = PixelScaleStage::new(p);
        let bytes = solid(100, 200);
        let out = stage.execute(&bytes).unwrap();
        let decoded = decode_png(&out).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (50, 100));
    }

    #[test]
    fn uses_both_dimensions_directly() {
        let stage = PixelScaleStage::new(PixelScaleParams {
            width: Some(30),
            height: Some(10),
        });
        let bytes = solid(100, 100);
        let out = stage.execute(&bytes).unwrap();
        let decoded = decode_png(&out).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (30, 10));
    }
}
