//! Center-crop extraction
//!
//! Copies a fixed-size window out of the middle of a resized grid.

use crate::image_pipeline::common::error::{PreprocessError, Result, checked_len, try_alloc};
use crate::image_pipeline::decode::{RGB_CHANNELS, RgbPixelGrid};

/// Top-left corner of a centered window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropWindow {
    pub x0: usize,
    pub y0: usize,
    pub width: usize,
    pub height: usize,
}

impl CropWindow {
    /// Centers an `out_width` x `out_height` window inside a `width` x `height` grid.
    ///
    /// Offsets use floor division, so an odd remainder leaves the extra column/row on the
    /// right/bottom. Fails with `CropOutOfBounds` when the window does not fit.
    pub fn centered(width: usize, height: usize, out_width: usize, out_height: usize) -> Result<Self> {
        if out_width == 0 || out_height == 0 {
            return Err(PreprocessError::invalid_dimensions(out_width, out_height));
        }
        if out_width > width || out_height > height {
            return Err(PreprocessError::CropOutOfBounds {
                out_width,
                out_height,
                width,
                height,
            });
        }
        Ok(Self {
            x0: (width - out_width) / 2,
            y0: (height - out_height) / 2,
            width: out_width,
            height: out_height,
        })
    }
}

/// Extracts the centered `out_width` x `out_height` window of `src` into a new grid.
pub fn center_crop(src: &RgbPixelGrid, out_width: usize, out_height: usize) -> Result<RgbPixelGrid> {
    let window = CropWindow::centered(src.width(), src.height(), out_width, out_height)?;

    let mut data = try_alloc::<u8>(checked_len(out_width, out_height, RGB_CHANNELS)?)?;
    let start = window.x0 * RGB_CHANNELS;
    let end = start + out_width * RGB_CHANNELS;
    for y in 0..out_height {
        data.extend_from_slice(&src.row(window.y0 + y)[start..end]);
    }

    RgbPixelGrid::new(out_width, out_height, data)
}
