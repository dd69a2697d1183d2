//! Decoder backed by the `image` crate.
//!
//! Handles the raster formats enabled on the `image` dependency (PNG, JPEG, BMP, GIF).
//! Whatever the source channel layout (grayscale, RGBA, 16-bit), the output is always
//! forced to 8-bit RGB.

use tracing::debug;

use crate::image_pipeline::common::error::{PreprocessError, Result};
use crate::image_pipeline::decode::decoder::ImageDecoder;
use crate::image_pipeline::decode::types::RgbPixelGrid;

pub struct ImageCrateDecoder;

impl ImageDecoder for ImageCrateDecoder {
    fn decode(&self, data: &[u8]) -> Result<RgbPixelGrid> {
        if data.is_empty() {
            return Err(PreprocessError::DecodeFailed("empty input".to_string()));
        }

        debug!("Decoding image, {} bytes", data.len());

        let decoded = image::load_from_memory(data)
            .map_err(|e| PreprocessError::DecodeFailed(e.to_string()))?;
        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();

        debug!("Decoded image: {}x{}", width, height);

        RgbPixelGrid::new(width as usize, height as usize, rgb.into_raw())
    }
}
