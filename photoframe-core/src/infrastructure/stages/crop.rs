// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Crop Stage
//!
//! Centered crop to a requested size. A no-op when the requested box is at
//! least as large as the source in both dimensions.

use crate::infrastructure::stages::codec::{decode_png, encode_png};
use image::GenericImageView;
use photoframe_domain::{get_int, validate_required, FromParams, ImageStage, ParamMap, PhotoframeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropParams {
    pub width: u32,
    pub height: u32,
}

impl FromParams for CropParams {
    fn from_params(params: &ParamMap) -> Result<Self, PhotoframeError> {
        validate_required(params, &["width", "height"])?;
        let width = get_int(params, "width", 0);
        let height = get_int(params, "height", 0);
        if width <= 0 || height <= 0 {
            return Err(PhotoframeError::invalid_params("crop", "width and height must both be > 0"));
        }
        Ok(Self {
            width: width as u32,
            height: height as u32,
        })
    }
}

pub struct CropStage {
    params: CropParams,
}

impl CropStage {
    pub fn new(params: CropParams) -> Self {
        Self { params }
    }
}

impl ImageStage for CropStage {
    fn name(&self) -> &'static str {
        "crop"
    }

    fn execute(&self, input: &[u8]) -> Result<Vec<u8>, PhotoframeError> {
        let decoded = decode_png(input)?;
        let (orig_w, orig_h) = decoded.dimensions();

        if self.params.width >= orig_w && self.params.height >= orig_h {
            return Ok(input.to_vec());
        }

        let w = self.params.width.min(orig_w);
        let h = self.params.height.min(orig_h);
        let x0 = (orig_w - w) / 2;
        let y0 = (orig_h - h) / 2;

        let cropped = decoded.crop_imm(x0, y0, w, h);
        encode_png(&cropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::stages::codec::decode_png;
    use image::{DynamicImage, RgbImage};

    fn solid(w: u32, h: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(w, h, image::Rgb([10, 20, 30]));
        encode_png(&DynamicImage::ImageRgb8(img)).unwrap()
    }

    #[test]
    fn no_op_when_target_at_least_as_large() {
        let bytes = solid(10, 10);
        let stage = CropStage::new(CropParams { width: 20, height: 20 });
        assert_eq!(stage.execute(&bytes).unwrap(), bytes);
    }

    #[test]
    fn crops_centered_region() {
        let bytes = solid(10, 10);
        let stage = CropStage::new(CropParams { width: 4, height: 6 });
        let out = stage.execute(&bytes).unwrap();
        let decoded = decode_png(&out).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 6));
    }

    #[test]
    fn rejects_non_positive_dims() {
        let mut params = ParamMap::new();
        params.insert("width".into(), serde_json::json!(0));
        params.insert("height".into(), serde_json::json!(10));
        assert!(CropParams::from_params(&params).is_err());
    }

    #[test]
    fn rejects_missing_required_key() {
        let mut params = ParamMap::new();
        params.insert("width".into(), serde_json::json!(10));
        assert!(CropParams::from_params(&params).is_err());
    }
}
