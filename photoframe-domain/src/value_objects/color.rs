// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Color and Palette Value Objects
//!
//! An 8-bit RGB color, an ordered `(device_color, dither_color)` pair, and
//! the non-empty ordered sequence of pairs that makes up a dithering
//! palette. See GLOSSARY: "Device palette", "Dither palette", "Palette
//! pair".

use serde::{Deserialize, Serialize};

/// An 8-bit-per-channel RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Rgb8 = Rgb8::new(0, 0, 0);
    pub const WHITE: Rgb8 = Rgb8::new(255, 255, 255);

    /// Perceived luminance using BT.709 coefficients.
    pub fn luminance(&self) -> f64 {
        0.2126 * f64::from(self.r) + 0.7152 * f64::from(self.g) + 0.0722 * f64::from(self.b)
    }

    /// Squared Euclidean distance in sRGB 8-bit space.
    pub fn squared_distance(&self, other: &Rgb8) -> u32 {
        let dr = i32::from(self.r) - i32::from(other.r);
        let dg = i32::from(self.g) - i32::from(other.g);
        let db = i32::from(self.b) - i32::from(other.b);
        (dr * dr + dg * dg + db * db) as u32
    }
}

/// An ordered `(device_color, dither_color)` entry defining one index of
/// both the device and dither palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PalettePair {
    pub device: Rgb8,
    pub dither: Rgb8,
}

impl PalettePair {
    pub const fn new(device: Rgb8, dither: Rgb8) -> Self {
        Self { device, dither }
    }

    /// A pair whose device and dither colors are identical.
    pub const fn identity(color: Rgb8) -> Self {
        Self::new(color, color)
    }
}

/// A non-empty ordered sequence of palette pairs.
///
/// Index `i` of the device palette pairs 1-to-1 with index `i` of the dither
/// palette; dithering quantizes against the dither palette but writes the
/// device palette's color at the chosen index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette(Vec<PalettePair>);

impl Palette {
    /// Default palette used when a dither stage config omits `palette`:
    /// identity black/white.
    pub fn default_black_white() -> Self {
        Self(vec![
            PalettePair::identity(Rgb8::BLACK),
            PalettePair::identity(Rgb8::WHITE),
        ])
    }

    pub fn new(pairs: Vec<PalettePair>) -> Option<Self> {
        if pairs.is_empty() {
            None
        } else {
            Some(Self(pairs))
        }
    }

    pub fn pairs(&self) -> &[PalettePair] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn device_colors(&self) -> Vec<Rgb8> {
        self.0.iter().map(|p| p.device).collect()
    }

    pub fn dither_colors(&self) -> Vec<Rgb8> {
        self.0.iter().map(|p| p.dither).collect()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::default_black_white()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_is_black_and_white() {
        let palette = Palette::default_black_white();
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.pairs()[0].device, Rgb8::BLACK);
        assert_eq!(palette.pairs()[1].device, Rgb8::WHITE);
    }

    #[test]
    fn rejects_empty_palette() {
        assert!(Palette::new(vec![]).is_none());
    }

    #[test]
    fn squared_distance_is_symmetric() {
        let a = Rgb8::new(10, 20, 30);
        let b = Rgb8::new(200, 5, 90);
        assert_eq!(a.squared_distance(&b), b.squared_distance(&a));
    }
}
