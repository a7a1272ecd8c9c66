// /////////////////////////////////////////////////////////////////////////////
// Photo Frame Image Service
// Copyright (c) 2025 Photo Frame Contributors
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # PNG Normalizer
//!
//! The intake orchestrator's first stage: guarantees every image handed to
//! the rest of the pipeline is a decodable PNG. Three input shapes are
//! handled, cheapest first: already-PNG (identity), SVG (rasterized), and
//! any other supported raster format (decoded and re-encoded).

use crate::infrastructure::stages::codec::encode_png;
use crate::infrastructure::stages::color_math::composite_over_white;
use image::DynamicImage;
use photoframe_domain::{get_int, FromParams, ImageStage, ParamMap, PhotoframeError, PNG_MAGIC};
use usvg::{TreeParsing, TreePostProc};

/// Fallback raster size used when a size-less SVG is rasterized. Zero
/// means "no fallback configured".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PngNormalizeParams {
    pub svg_fallback_width: u32,
    pub svg_fallback_height: u32,
}

impl FromParams for PngNormalizeParams {
    fn from_params(params: &ParamMap) -> Result<Self, PhotoframeError> {
        let width = get_int(params, "svgFallbackWidth", 0).max(0) as u32;
        let height = get_int(params, "svgFallbackHeight", 0).max(0) as u32;
        Ok(Self {
            svg_fallback_width: width,
            svg_fallback_height: height,
        })
    }
}

pub struct PngNormalizeStage {
    params: PngNormalizeParams,
}

impl PngNormalizeStage {
    pub fn new(params: PngNormalizeParams) -> Self {
        Self { params }
    }
}

impl ImageStage for PngNormalizeStage {
    fn name(&self) -> &'static str {
        "pngNormalize"
    }

    fn execute(&self, input: &[u8]) -> Result<Vec<u8>, PhotoframeError> {
        if input.starts_with(&PNG_MAGIC) {
            return Ok(input.to_vec());
        }

        if looks_like_svg(input) {
            return rasterize_svg(input, self.params);
        }

        let decoded = image::load_from_memory(input).map_err(|e| PhotoframeError::UndecodableImage(e.to_string()))?;
        encode_png(&decoded)
    }
}

/// Heuristic SVG sniff: the first 4 KiB contains an `<svg` open tag or the
/// SVG XML namespace.
fn looks_like_svg(bytes: &[u8]) -> bool {
    let window = &bytes[..bytes.len().min(4096)];
    let text = String::from_utf8_lossy(window);
    text.contains("<svg") || text.contains("http://www.w3.org/2000/svg")
}

fn rasterize_svg(bytes: &[u8], params: PngNormalizeParams) -> Result<Vec<u8>, PhotoframeError> {
    let options = usvg::Options::default();
    let mut tree =
        usvg::Tree::from_data(bytes, &options).map_err(|e| PhotoframeError::UndecodableImage(format!("invalid SVG: {e}")))?;

    let mut fontdb = usvg::fontdb::Database::new();
    fontdb.load_system_fonts();
    tree.postprocess(usvg::PostProcessingSteps::default(), &fontdb);

    let (width, height) = match svg_intrinsic_size(bytes) {
        Some(size) => size,
        None => {
            if params.svg_fallback_width > 0 && params.svg_fallback_height > 0 {
                (params.svg_fallback_width, params.svg_fallback_height)
            } else {
                return Err(PhotoframeError::MissingSvgSize);
            }
        }
    };

    let image = render_tree(&tree, width, height)?;
    encode_png(&image)
}

/// Reads the root `<svg>` tag's `width`/`height` attributes, if both are
/// present and strictly positive. A numeric prefix is accepted so unit
/// suffixes (`"64px"`) don't defeat the heuristic.
fn svg_intrinsic_size(bytes: &[u8]) -> Option<(u32, u32)> {
    let text = String::from_utf8_lossy(bytes);
    let tag_start = text.find("<svg")?;
    let tag_end = tag_start + text[tag_start..].find('>')?;
    let tag = &text[tag_start..tag_end];

    let width = read_numeric_attr(tag, "width")?;
    let height = read_numeric_attr(tag, "height")?;
    if width > 0.0 && height > 0.0 {
        Some((width.round() as u32, height.round() as u32))
    } else {
        None
    }
}

fn read_numeric_attr(tag: &str, attr: &str) -> Option<f64> {
    let needle = format!("{attr}=\"");
    let idx = tag.find(&needle)? + needle.len();
    let rest = &tag[idx..];
    let end = rest.find('"')?;
    let raw = &rest[..end];
    let numeric: String = raw.chars().take_while(|c| c.is_ascii_digit() || *c == '.').collect();
    numeric.parse::<f64>().ok()
}

fn render_tree(tree: &usvg::Tree, width: u32, height: u32) -> Result<DynamicImage, PhotoframeError> {
    use resvg::tiny_skia::{Pixmap, Transform};

    let mut pixmap =
        Pixmap::new(width, height).ok_or_else(|| PhotoframeError::UndecodableImage("empty SVG raster target".into()))?;

    let tree_size = tree.size;
    let scale_x = width as f32 / tree_size.width();
    let scale_y = height as f32 / tree_size.height();
    let scale = scale_x.min(scale_y);
    let transform = Transform::from_scale(scale, scale);

    resvg::render(tree, transform, &mut pixmap.as_mut());

    let mut rgb = image::RgbImage::new(width, height);
    for (dst, src) in rgb.pixels_mut().zip(pixmap.data().chunks_exact(4)) {
        let (r, g, b, a) = (src[0], src[1], src[2], src[3]);
        *dst = image::Rgb([
            composite_over_white(r, a),
            composite_over_white(g, a),
            composite_over_white(b, a),
        ]);
    }

    Ok(DynamicImage::ImageRgb8(rgb))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(pairs: Vec<(&str, serde_json::Value)>) -> ParamMap {
        let mut map = ParamMap::new();
        for (k, v) in pairs {
            map.insert(k.to_string(), v);
        }
        map
    }

    #[test]
    fn identity_fast_path_for_valid_png_magic() {
        let mut bytes = PNG_MAGIC.to_vec();
        bytes.extend_from_slice(b"not really a png but magic matches");
        let stage = PngNormalizeStage::new(PngNormalizeParams {
            svg_fallback_width: 0,
            svg_fallback_height: 0,
        });
        let out = stage.execute(&bytes).unwrap();
        assert_eq!(out, bytes);
    }

    #[test]
    fn sized_svg_rasterizes_without_fallback() {
        let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="10" height="10" fill="black"/></svg>"#;
        let stage = PngNormalizeStage::new(PngNormalizeParams {
            svg_fallback_width: 0,
            svg_fallback_height: 0,
        });
        let out = stage.execute(svg).unwrap();
        assert!(out.starts_with(&PNG_MAGIC));
    }

    #[test]
    fn sizeless_svg_without_fallback_fails() {
        let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"><rect width="10" height="10" fill="black"/></svg>"#;
        let stage = PngNormalizeStage::new(PngNormalizeParams {
            svg_fallback_width: 0,
            svg_fallback_height: 0,
        });
        let err = stage.execute(svg).unwrap_err();
        assert!(matches!(err, PhotoframeError::MissingSvgSize));
    }

    #[test]
    fn sizeless_svg_uses_fallback() {
        let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10"><rect width="10" height="10" fill="black"/></svg>"#;
        let stage = PngNormalizeStage::new(PngNormalizeParams {
            svg_fallback_width: 32,
            svg_fallback_height: 16,
        });
        let out = stage.execute(svg).unwrap();
        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 16));
    }

    #[test]
    fn params_default_to_zero() {
        let p = PngNormalizeParams::from_params(&params(vec![])).unwrap();
        assert_eq!(p.svg_fallback_width, 0);
        assert_eq!(p.svg_fallback_height, 0);
    }

    #[test]
    fn params_read_configured_fallback() {
        let p = PngNormalizeParams::from_params(&params(vec![("svgFallbackWidth", json!(200)), ("svgFallbackHeight", json!(100))]))
            .unwrap();
        assert_eq!(p.svg_fallback_width, 200);
        assert_eq!(p.svg_fallback_height, 100);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        // P1: any real PNG passes through the identity fast-path untouched.
        #[test]
        fn identity_fast_path_for_arbitrary_valid_png(
            w in 1u32..32, h in 1u32..32, r in any::<u8>(), g in any::<u8>(), b in any::<u8>(),
        ) {
            let img = image::RgbImage::from_pixel(w, h, image::Rgb([r, g, b]));
            let bytes = encode_png(&DynamicImage::ImageRgb8(img)).unwrap();
            prop_assert!(bytes.starts_with(&PNG_MAGIC));

            let stage = PngNormalizeStage::new(PngNormalizeParams {
                svg_fallback_width: 0,
                svg_fallback_height: 0,
            });
            prop_assert_eq!(stage.execute(&bytes).unwrap(), bytes);
        }
    }
}
