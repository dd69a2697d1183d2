//! Host call boundary
//!
//! Flat entry points for the moderation service: plain integers and float triples in, a
//! float buffer or nothing out. Every failure is logged and collapsed to `None`.

use tracing::warn;

use crate::image_pipeline::{
    common::error::{PreprocessError, Result},
    config::PreprocessConfig,
    conversions::ImageToChwPipeline,
    normalize::NormalizationParams,
    tensor::ChwTensor,
};

fn output_size(out_w: i32, out_h: i32) -> Result<(usize, usize)> {
    if out_w <= 0 || out_h <= 0 {
        return Err(PreprocessError::invalid_dimensions(out_w, out_h));
    }
    Ok((out_w as usize, out_h as usize))
}

fn run(encoded: &[u8], out_w: i32, out_h: i32, params: NormalizationParams) -> Result<ChwTensor> {
    let (width, height) = output_size(out_w, out_h)?;
    let config = PreprocessConfig::builder()
        .output_size(width, height)
        .normalization(params)
        .build();
    ImageToChwPipeline::new(config)?.preprocess(encoded)
}

/// Decodes `encoded`, resizes its short side to 256, center-crops to `out_w` x `out_h` and
/// returns the normalized planar tensor of `3 * out_w * out_h` floats.
pub fn preprocess_to_chw(
    encoded: &[u8],
    out_w: i32,
    out_h: i32,
    mean: [f32; 3],
    std: [f32; 3],
) -> Option<Vec<f32>> {
    match run(encoded, out_w, out_h, NormalizationParams::new(mean, std)) {
        Ok(tensor) => Some(tensor.into_vec()),
        Err(e) => {
            warn!(kind = ?e.kind(), error = %e, "CHW preprocessing failed");
            None
        }
    }
}

/// [`preprocess_to_chw`] with ImageNet statistics and a square output.
pub fn preprocess_imagenet_chw(encoded: &[u8], size: i32) -> Option<Vec<f32>> {
    let params = NormalizationParams::imagenet();
    preprocess_to_chw(encoded, size, size, params.mean, params.std)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};

    use super::*;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 77]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn returns_planar_buffer_of_expected_length() {
        let out = preprocess_imagenet_chw(&png(300, 260), 224).unwrap();
        assert_eq!(out.len(), 3 * 224 * 224);
        assert!(out.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn rectangular_output() {
        let out = preprocess_to_chw(&png(64, 64), 200, 100, [0.0; 3], [1.0; 3]).unwrap();
        assert_eq!(out.len(), 3 * 200 * 100);
        assert!(out.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn non_positive_size_is_none() {
        assert!(preprocess_to_chw(&png(8, 8), 0, 224, [0.0; 3], [1.0; 3]).is_none());
        assert!(preprocess_to_chw(&png(8, 8), 224, -1, [0.0; 3], [1.0; 3]).is_none());
    }

    #[test]
    fn zero_std_is_none() {
        assert!(preprocess_to_chw(&png(8, 8), 4, 4, [0.0; 3], [1.0, 0.0, 1.0]).is_none());
    }

    #[test]
    fn crop_larger_than_resized_is_none() {
        // short side becomes 256, so a 300 px crop cannot fit
        assert!(preprocess_to_chw(&png(50, 50), 300, 300, [0.0; 3], [1.0; 3]).is_none());
    }

    #[test]
    fn thin_image_is_none_instead_of_huge_resize() {
        // 1x40000 would resize to 256x10240000 (7.8 GB)
        assert!(preprocess_imagenet_chw(&png(1, 40_000), 224).is_none());
    }

    #[test]
    fn garbage_and_empty_input_are_none() {
        assert!(preprocess_imagenet_chw(b"not an image", 224).is_none());
        assert!(preprocess_imagenet_chw(&[], 224).is_none());
    }
}
