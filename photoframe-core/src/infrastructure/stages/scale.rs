// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Aspect-Preserving Scale Stage
//!
//! Fits the source image into a target box without distorting its aspect
//! ratio, letterboxing the remainder with opaque white. A no-op when the
//! source already matches the target dimensions. Nearest-neighbor
//! resampling only -- the contract explicitly excludes higher-quality
//! resampling.

use crate::infrastructure::stages::codec::{decode_png, encode_png};
use crate::infrastructure::stages::color_math::luminance_bt709;
use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};
use photoframe_domain::{get_bool, get_int, validate_required, FromParams, ImageStage, ParamMap, PhotoframeError};
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleParams {
    pub width: u32,
    pub height: u32,
    pub edge_gradient: bool,
}

impl FromParams for ScaleParams {
    fn from_params(params: &ParamMap) -> Result<Self, PhotoframeError> {
        validate_required(params, &["width", "height"])?;
        let width = get_int(params, "width", 0);
        let height = get_int(params, "height", 0);
        if width <= 0 || height <= 0 {
            return Err(PhotoframeError::invalid_params("scale", "width and height must both be > 0"));
        }
        Ok(Self {
            width: width as u32,
            height: height as u32,
            edge_gradient: get_bool(params, "edgeGradient", false),
        })
    }
}

pub struct ScaleStage {
    params: ScaleParams,
}

impl ScaleStage {
    pub fn new(params: ScaleParams) -> Self {
        Self { params }
    }
}

impl ImageStage for ScaleStage {
    fn name(&self) -> &'static str {
        "scale"
    }

    fn execute(&self, input: &[u8]) -> Result<Vec<u8>, PhotoframeError> {
        let decoded = decode_png(input)?;
        let (src_w, src_h) = decoded.dimensions();
        let (target_w, target_h) = (self.params.width, self.params.height);

        if src_w == target_w && src_h == target_h {
            return Ok(input.to_vec());
        }

        let (scaled_w, scaled_h) = scaled_size(src_w, src_h, target_w, target_h);
        let source = decoded.to_rgba8();
        let x_table = nearest_index_table(src_w, scaled_w);
        let y_table = nearest_index_table(src_h, scaled_h);

        let ox = (target_w - scaled_w) / 2;
        let oy = (target_h - scaled_h) / 2;

        let mut canvas = RgbaImage::from_pixel(target_w, target_h, Rgba([255, 255, 255, 255]));

        // Stride-partitioned by destination row: each row is independent, no
        // shared mutable state beyond its own slice, just parallel throughput.
        let rows: Vec<(u32, Vec<Rgba<u8>>)> = (0..scaled_h)
            .into_par_iter()
            .map(|dy| {
                let sy = y_table[dy as usize];
                let row: Vec<Rgba<u8>> = (0..scaled_w)
                    .map(|dx| *source.get_pixel(x_table[dx as usize], sy))
                    .collect();
                (dy, row)
            })
            .collect();
        for (dy, row) in rows {
            for (dx, pixel) in row.into_iter().enumerate() {
                canvas.put_pixel(ox + dx as u32, oy + dy, pixel);
            }
        }

        if self.params.edge_gradient {
            apply_edge_gradient(&mut canvas, ox, oy, scaled_w, scaled_h, target_w, target_h);
        }

        encode_png(&DynamicImage::ImageRgba8(canvas))
    }
}

fn scaled_size(src_w: u32, src_h: u32, target_w: u32, target_h: u32) -> (u32, u32) {
    let src_ratio = f64::from(src_w) / f64::from(src_h);
    let target_ratio = f64::from(target_w) / f64::from(target_h);
    if src_ratio > target_ratio {
        let sw = target_w;
        let sh = ((u64::from(target_w) * u64::from(src_h)) / u64::from(src_w)) as u32;
        (sw.max(1), sh.max(1))
    } else {
        let sh = target_h;
        let sw = ((u64::from(target_h) * u64::from(src_w)) / u64::from(src_h)) as u32;
        (sw.max(1), sh.max(1))
    }
}

pub(crate) fn nearest_index_table(src_len: u32, dst_len: u32) -> Vec<u32> {
    (0..dst_len)
        .map(|i| (((u64::from(i) * u64::from(src_len)) / u64::from(dst_len)) as u32).min(src_len - 1))
        .collect()
}

/// Fills the letterbox padding with a linear blend from the scaled image's
/// edge toward black or white, chosen per side by that edge's average
/// BT.709 luminance.
fn apply_edge_gradient(canvas: &mut RgbaImage, ox: u32, oy: u32, scaled_w: u32, scaled_h: u32, target_w: u32, target_h: u32) {
    if oy > 0 {
        let target = edge_target(canvas, (ox..ox + scaled_w).map(|x| (x, oy)));
        for d in 0..oy {
            let t = f64::from(oy - d) / f64::from(oy);
            for x in ox..ox + scaled_w {
                let adjacent = *canvas.get_pixel(x, oy);
                canvas.put_pixel(x, d, lerp_rgba(adjacent, target, t));
            }
        }
    }
    let bottom_pad = target_h - (oy + scaled_h);
    if bottom_pad > 0 {
        let edge_y = oy + scaled_h - 1;
        let target = edge_target(canvas, (ox..ox + scaled_w).map(|x| (x, edge_y)));
        for d in 0..bottom_pad {
            let t = f64::from(d + 1) / f64::from(bottom_pad);
            for x in ox..ox + scaled_w {
                let adjacent = *canvas.get_pixel(x, edge_y);
                canvas.put_pixel(x, oy + scaled_h + d, lerp_rgba(adjacent, target, t));
            }
        }
    }
    if ox > 0 {
        let target = edge_target(canvas, (oy..oy + scaled_h).map(|y| (ox, y)));
        for d in 0..ox {
            let t = f64::from(ox - d) / f64::from(ox);
            for y in oy..oy + scaled_h {
                let adjacent = *canvas.get_pixel(ox, y);
                canvas.put_pixel(d, y, lerp_rgba(adjacent, target, t));
            }
        }
    }
    let right_pad = target_w - (ox + scaled_w);
    if right_pad > 0 {
        let edge_x = ox + scaled_w - 1;
        let target = edge_target(canvas, (oy..oy + scaled_h).map(|y| (edge_x, y)));
        for d in 0..right_pad {
            let t = f64::from(d + 1) / f64::from(right_pad);
            for y in oy..oy + scaled_h {
                let adjacent = *canvas.get_pixel(edge_x, y);
                canvas.put_pixel(ox + scaled_w + d, y, lerp_rgba(adjacent, target, t));
            }
        }
    }
}

fn edge_target(canvas: &RgbaImage, pixels: impl Iterator<Item = (u32, u32)>) -> Rgba<u8> {
    let mut sum = 0.0;
    let mut count = 0u32;
    for (x, y) in pixels {
        let p = canvas.get_pixel(x, y);
        sum += luminance_bt709(p[0], p[1], p[2]);
        count += 1;
    }
    let avg = if count == 0 { 255.0 } else { sum / f64::from(count) };
    if avg < 127.5 {
        Rgba([0, 0, 0, 255])
    } else {
        Rgba([255, 255, 255, 255])
    }
}

fn lerp_rgba(from: Rgba<u8>, to: Rgba<u8>, t: f64) -> Rgba<u8> {
    let t = t.clamp(0.0, 1.0);
    let channel = |a: u8, b: u8| -> u8 {
        let v = f64::from(a) * (1.0 - t) + f64::from(b) * t;
        v.round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        channel(from[0], to[0]),
        channel(from[1], to[1]),
        channel(from[2], to[2]),
        255,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn solid(w: u32, h: u32, color: [u8; 3]) -> Vec<u8> {
        let img = RgbImage::from_pixel(w, h, image::Rgb(color));
        encode_png(&DynamicImage::ImageRgb8(img)).unwrap()
    }

    #[test]
    fn no_op_when_dims_already_match() {
        let bytes = solid(50, 20, [200, 0, 0]);
        let stage = ScaleStage::new(ScaleParams {
            width: 50,
            height: 20,
            edge_gradient: false,
        });
        assert_eq!(stage.execute(&bytes).unwrap(), bytes);
    }

    #[test]
    fn letterboxes_to_target_dimensions() {
        let bytes = solid(200, 100, [200, 0, 0]);
        let stage = ScaleStage::new(ScaleParams {
            width: 100,
            height: 100,
            edge_gradient: false,
        });
        let out = stage.execute(&bytes).unwrap();
        let decoded = decode_png(&out).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (100, 100));
    }

    #[test]
    fn edge_gradient_fills_padding_without_panic() {
        let bytes = solid(200, 100, [200, 0, 0]);
        let stage = ScaleStage::new(ScaleParams {
            width: 100,
            height: 100,
            edge_gradient: true,
        });
        let out = stage.execute(&bytes).unwrap();
        let decoded = decode_png(&out).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (100, 100));
    }

    #[test]
    fn scaled_size_preserves_wider_source_aspect() {
        assert_eq!(scaled_size(200, 100, 100, 100), (100, 50));
    }

    #[test]
    fn scaled_size_preserves_taller_source_aspect() {
        assert_eq!(scaled_size(100, 200, 100, 100), (50, 100));
    }

    #[test]
    fn nearest_index_table_clamps_to_last_source_index() {
        let table = nearest_index_table(10, 3);
        assert_eq!(table.len(), 3);
        assert!(*table.last().unwrap() <= 9);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use image::RgbImage;
    use proptest::prelude::*;

    proptest! {
        // P3: scale is a no-op whenever the target already matches the source.
        #[test]
        fn no_op_when_target_matches_source(w in 1u32..64, h in 1u32..64, r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            let img = RgbImage::from_pixel(w, h, image::Rgb([r, g, b]));
            let bytes = encode_png(&DynamicImage::ImageRgb8(img)).unwrap();
            let stage = ScaleStage::new(ScaleParams { width: w, height: h, edge_gradient: false });
            prop_assert_eq!(stage.execute(&bytes).unwrap(), bytes);
        }

        // nearest_index_table always produces valid, in-bounds source indices.
        #[test]
        fn nearest_index_table_is_always_in_bounds(src_len in 1u32..500, dst_len in 1u32..500) {
            let table = nearest_index_table(src_len, dst_len);
            prop_assert_eq!(table.len(), dst_len as usize);
            prop_assert!(table.iter().all(|&idx| idx < src_len));
        }
    }
}
