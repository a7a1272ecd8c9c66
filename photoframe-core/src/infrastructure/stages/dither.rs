// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Dither Stage (algorithmic centerpiece)
//!
//! Integer Floyd-Steinberg error diffusion against a *dither palette*,
//! writing the corresponding *device palette* color at each chosen index.
//! Separating the quantization target from the device target lets the
//! dither pattern be computed in a perceptually neutral palette while the
//! written pixels remain exact device colors -- the requirement for
//! e-paper-class displays whose firmware only accepts exact palette
//! entries.
//!
//! The skip-scan (step 2) is the one part of this stage that runs in
//! parallel: it is embarrassingly parallel across rows and supports early
//! exit via a shared flag. The diffusion pass itself (step 4) is an
//! inherently sequential scan -- each pixel's quantization depends on
//! accumulated error from pixels already visited -- so it runs on a single
//! thread.

use crate::infrastructure::stages::codec::{decode_png, encode_png};
use crate::infrastructure::stages::color_math::{composite_over_white, round16};
use image::{DynamicImage, RgbaImage};
use photoframe_domain::{FromParams, ImageStage, ParamMap, Palette, PalettePair, PhotoframeError, Rgb8};
use rayon::prelude::*;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone)]
pub struct DitherParams {
    pub palette: Palette,
}

impl FromParams for DitherParams {
    fn from_params(params: &ParamMap) -> Result<Self, PhotoframeError> {
        let palette = match params.get("palette") {
            Some(value) => parse_palette(value)?,
            None => Palette::default_black_white(),
        };
        Ok(Self { palette })
    }
}

fn parse_palette(value: &Value) -> Result<Palette, PhotoframeError> {
    let entries = value
        .as_array()
        .ok_or_else(|| PhotoframeError::invalid_params("dither", "palette must be an array of pairs"))?;

    let mut pairs = Vec::with_capacity(entries.len());
    for entry in entries {
        let pair = entry
            .as_array()
            .filter(|a| a.len() == 2)
            .ok_or_else(|| PhotoframeError::invalid_params("dither", "each palette entry must be a [device, dither] pair"))?;
        let device = parse_color(&pair[0])?;
        let dither = parse_color(&pair[1])?;
        pairs.push(PalettePair::new(device, dither));
    }

    Palette::new(pairs).ok_or_else(|| PhotoframeError::invalid_params("dither", "palette must not be empty"))
}

fn parse_color(value: &Value) -> Result<Rgb8, PhotoframeError> {
    let components = value
        .as_array()
        .filter(|a| a.len() == 3)
        .ok_or_else(|| PhotoframeError::invalid_params("dither", "each color must be a [r, g, b] triple"))?;

    let channel = |v: &Value| -> Result<u8, PhotoframeError> {
        v.as_u64()
            .filter(|n| *n <= 255)
            .map(|n| n as u8)
            .ok_or_else(|| PhotoframeError::invalid_params("dither", "color channels must be integers in 0..=255"))
    };

    Ok(Rgb8::new(channel(&components[0])?, channel(&components[1])?, channel(&components[2])?))
}

pub struct DitherStage {
    params: DitherParams,
}

impl DitherStage {
    pub fn new(params: DitherParams) -> Self {
        Self { params }
    }
}

impl ImageStage for DitherStage {
    fn name(&self) -> &'static str {
        "dither"
    }

    fn execute(&self, input: &[u8]) -> Result<Vec<u8>, PhotoframeError> {
        let decoded = decode_png(input)?;
        let source = decoded.to_rgba8();
        let (width, height) = (source.width(), source.height());

        let device_palette = self.params.palette.device_colors();
        let dither_palette = self.params.palette.dither_colors();

        if skip_scan_all_device_colors(&source, &device_palette) {
            return Ok(input.to_vec());
        }

        let output = diffuse(&source, width, height, &device_palette, &dither_palette);
        encode_png(&DynamicImage::ImageRgba8(output))
    }
}

/// Parallel row scan with early exit the moment any composited pixel fails
/// to match a device-palette color exactly, via a shared atomic flag.
fn skip_scan_all_device_colors(source: &RgbaImage, device_palette: &[Rgb8]) -> bool {
    let width = source.width();
    let mismatch = AtomicBool::new(false);

    (0..source.height()).into_par_iter().for_each(|y| {
        if mismatch.load(Ordering::Relaxed) {
            return;
        }
        for x in 0..width {
            if mismatch.load(Ordering::Relaxed) {
                return;
            }
            let p = source.get_pixel(x, y);
            let composited = Rgb8::new(
                composite_over_white(p[0], p[3]),
                composite_over_white(p[1], p[3]),
                composite_over_white(p[2], p[3]),
            );
            if !device_palette.contains(&composited) {
                mismatch.store(true, Ordering::Relaxed);
                return;
            }
        }
    });

    !mismatch.load(Ordering::Relaxed)
}

/// Sequential integer Floyd-Steinberg diffusion, top-to-bottom strictly
/// left-to-right, with two ring-buffered per-row error rows.
fn diffuse(source: &RgbaImage, width: u32, height: u32, device_palette: &[Rgb8], dither_palette: &[Rgb8]) -> RgbaImage {
    let w = width as usize;
    let mut err_curr = vec![[0i32; 3]; w];
    let mut err_next = vec![[0i32; 3]; w];
    let mut output = RgbaImage::new(width, height);

    for y in 0..height {
        for x in 0..w {
            let p = source.get_pixel(x as u32, y);
            let composited = [
                composite_over_white(p[0], p[3]),
                composite_over_white(p[1], p[3]),
                composite_over_white(p[2], p[3]),
            ];

            let mut adj = [0i32; 3];
            for c in 0..3 {
                adj[c] = (i32::from(composited[c]) + round16(err_curr[x][c])).clamp(0, 255);
            }

            let adj_color = Rgb8::new(adj[0] as u8, adj[1] as u8, adj[2] as u8);
            let idx = nearest_palette_index(&adj_color, dither_palette);

            output.put_pixel(x as u32, y, image::Rgba([device_palette[idx].r, device_palette[idx].g, device_palette[idx].b, 255]));

            let quantized = dither_palette[idx];
            let error = [
                adj[0] - i32::from(quantized.r),
                adj[1] - i32::from(quantized.g),
                adj[2] - i32::from(quantized.b),
            ];

            for c in 0..3 {
                let e = error[c];
                if x + 1 < w {
                    err_curr[x + 1][c] += e * 7;
                    err_next[x + 1][c] += e * 1;
                }
                if x > 0 {
                    err_next[x - 1][c] += e * 3;
                }
                err_next[x][c] += e * 5;
            }
        }

        std::mem::swap(&mut err_curr, &mut err_next);
        for slot in err_next.iter_mut() {
            *slot = [0; 3];
        }
    }

    output
}

/// Nearest color by squared Euclidean distance; ties resolve to the lowest
/// index.
fn nearest_palette_index(color: &Rgb8, palette: &[Rgb8]) -> usize {
    let mut best_idx = 0;
    let mut best_dist = u32::MAX;
    for (idx, candidate) in palette.iter().enumerate() {
        let dist = color.squared_distance(candidate);
        if dist < best_dist {
            best_dist = dist;
            best_idx = idx;
        }
    }
    best_idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn checkerboard(n: u32) -> Vec<u8> {
        let mut img = RgbImage::new(n, n);
        for y in 0..n {
            for x in 0..n {
                let color = if (x + y) % 2 == 0 { Rgb([0, 0, 0]) } else { Rgb([255, 255, 255]) };
                img.put_pixel(x, y, color);
            }
        }
        encode_png(&DynamicImage::ImageRgb8(img)).unwrap()
    }

    #[test]
    fn skips_exact_device_color_checkerboard() {
        let bytes = checkerboard(16);
        let stage = DitherStage::new(DitherParams {
            palette: Palette::default_black_white(),
        });
        assert_eq!(stage.execute(&bytes).unwrap(), bytes);
    }

    #[test]
    fn gradient_closes_to_six_pair_device_palette() {
        let mut img = RgbImage::new(64, 64);
        for y in 0..64 {
            for x in 0..64 {
                let v = ((x * 255) / 63) as u8;
                img.put_pixel(x, y, Rgb([v, v, v]));
            }
        }
        let bytes = encode_png(&DynamicImage::ImageRgb8(img)).unwrap();

        let pairs = vec![
            PalettePair::new(Rgb8::new(0, 0, 0), Rgb8::new(25, 30, 33)),
            PalettePair::new(Rgb8::new(255, 255, 255), Rgb8::new(232, 232, 232)),
            PalettePair::new(Rgb8::new(255, 255, 0), Rgb8::new(239, 222, 68)),
            PalettePair::new(Rgb8::new(0, 0, 255), Rgb8::new(33, 87, 186)),
            PalettePair::new(Rgb8::new(255, 0, 0), Rgb8::new(178, 19, 24)),
            PalettePair::new(Rgb8::new(0, 255, 0), Rgb8::new(18, 95, 32)),
        ];
        let palette = Palette::new(pairs).unwrap();
        let device_colors = palette.device_colors();
        let stage = DitherStage::new(DitherParams { palette });

        let out = stage.execute(&bytes).unwrap();
        let decoded = decode_png(&out).unwrap().to_rgba8();
        for pixel in decoded.pixels() {
            let rgb = Rgb8::new(pixel[0], pixel[1], pixel[2]);
            assert!(device_colors.contains(&rgb), "pixel {:?} not in device palette", pixel);
        }
    }

    #[test]
    fn default_palette_parses_when_absent() {
        let params = ParamMap::new();
        let parsed = DitherParams::from_params(&params).unwrap();
        assert_eq!(parsed.palette, Palette::default_black_white());
    }

    #[test]
    fn nearest_palette_index_breaks_ties_toward_lowest_index() {
        let palette = vec![Rgb8::new(100, 100, 100), Rgb8::new(100, 100, 100)];
        assert_eq!(nearest_palette_index(&Rgb8::new(100, 100, 100), &palette), 0);
    }
}
