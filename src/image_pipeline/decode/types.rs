//! Pixel grid types shared by the decode, resize and crop stages

use crate::image_pipeline::common::error::{PreprocessError, Result, checked_len};

/// Number of interleaved samples per pixel.
pub const RGB_CHANNELS: usize = 3;

/// Row-major, channel-interleaved 8-bit RGB image without row padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbPixelGrid {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbPixelGrid {
    /// Wraps `data` as a `width` x `height` grid.
    ///
    /// Fails with `InvalidDimensions` when either side is zero or when the buffer
    /// length is not exactly `width * height * 3`.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PreprocessError::invalid_dimensions(width, height));
        }
        if data.len() != checked_len(width, height, RGB_CHANNELS)? {
            return Err(PreprocessError::invalid_dimensions(width, height));
        }
        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width * RGB_CHANNELS
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Interleaved samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: usize) -> &[u8] {
        let stride = self.stride();
        &self.data[y * stride..(y + 1) * stride]
    }

    /// # Panics
    ///
    /// Panics if `(x, y)` lies outside the grid.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        assert!(x < self.width, "x={} out of range for width {}", x, self.width);
        let i = x * RGB_CHANNELS;
        let row = self.row(y);
        [row[i], row[i + 1], row[i + 2]]
    }
}
