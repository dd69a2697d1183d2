//! Bilinear resampler backed by `image::imageops`.

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgb};
use tracing::debug;

use crate::image_pipeline::common::error::{PreprocessError, Result};
use crate::image_pipeline::decode::RgbPixelGrid;
use crate::image_pipeline::resize::resampler::Resampler;

/// Linear (triangle filter) interpolation over packed RGB rows.
pub struct LinearResampler;

fn to_u32(value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        PreprocessError::ResizeFailed(format!("dimension {} exceeds codec limits", value))
    })
}

impl Resampler for LinearResampler {
    fn resample(&self, src: &RgbPixelGrid, width: usize, height: usize) -> Result<RgbPixelGrid> {
        if width == 0 || height == 0 {
            return Err(PreprocessError::ResizeFailed(format!(
                "degenerate target {}x{}",
                width, height
            )));
        }

        let view: ImageBuffer<Rgb<u8>, &[u8]> = ImageBuffer::from_raw(
            to_u32(src.width())?,
            to_u32(src.height())?,
            src.as_bytes(),
        )
        .ok_or_else(|| {
            PreprocessError::ResizeFailed(format!(
                "source buffer does not match {}x{}",
                src.width(),
                src.height()
            ))
        })?;

        debug!(
            "Resampling {}x{} -> {}x{}",
            src.width(),
            src.height(),
            width,
            height
        );

        let resized = imageops::resize(&view, to_u32(width)?, to_u32(height)?, FilterType::Triangle);
        let (out_w, out_h) = resized.dimensions();
        if out_w as usize != width || out_h as usize != height {
            return Err(PreprocessError::ResizeFailed(format!(
                "resampler produced {}x{}, expected {}x{}",
                out_w, out_h, width, height
            )));
        }

        RgbPixelGrid::new(width, height, resized.into_raw())
            .map_err(|e| PreprocessError::ResizeFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::common::error::ErrorKind;

    fn solid(width: usize, height: usize, rgb: [u8; 3]) -> RgbPixelGrid {
        let data = rgb.iter().copied().cycle().take(width * height * 3).collect();
        RgbPixelGrid::new(width, height, data).unwrap()
    }

    #[test]
    fn produces_requested_dimensions() {
        let src = solid(40, 30, [0, 0, 0]);
        let out = LinearResampler.resample(&src, 32, 24).unwrap();
        assert_eq!((out.width(), out.height()), (32, 24));
        assert_eq!(out.as_bytes().len(), 32 * 24 * 3);
    }

    #[test]
    fn solid_color_survives_interpolation() {
        let src = solid(10, 7, [12, 200, 99]);
        let out = LinearResampler.resample(&src, 23, 16).unwrap();
        for y in 0..16 {
            for x in 0..23 {
                assert_eq!(out.pixel(x, y), [12, 200, 99]);
            }
        }
    }

    #[test]
    fn identity_size_keeps_pixels() {
        let data: Vec<u8> = (0..4 * 3 * 3).map(|v| (v * 7) as u8).collect();
        let src = RgbPixelGrid::new(4, 3, data).unwrap();
        let out = LinearResampler.resample(&src, 4, 3).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn does_not_touch_source() {
        let src = solid(8, 8, [1, 2, 3]);
        let before = src.clone();
        let _ = LinearResampler.resample(&src, 3, 3).unwrap();
        assert_eq!(src, before);
    }

    #[test]
    fn rejects_degenerate_target() {
        let src = solid(8, 8, [1, 2, 3]);
        let err = LinearResampler.resample(&src, 0, 8).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ResizeFailed);
    }
}
