use crate::image_pipeline::common::error::{PreprocessError, Result};

/// Length the short side of every image is scaled to before cropping.
pub const SHORT_SIDE_TARGET: usize = 256;

/// Computes the `(width, height)` that maps the short side of a `width` x `height`
/// source onto `short_side` while keeping the aspect ratio.
///
/// The long side is rounded half away from zero. Both results are at least 1.
pub fn resize_dimensions(width: usize, height: usize, short_side: usize) -> Result<(usize, usize)> {
    if width == 0 || height == 0 {
        return Err(PreprocessError::invalid_dimensions(width, height));
    }
    if short_side == 0 {
        return Err(PreprocessError::invalid_dimensions(short_side, short_side));
    }

    let short = width.min(height) as f64;
    let scale = short_side as f64 / short;
    let rw = (width as f64 * scale).round().max(1.0);
    let rh = (height as f64 * scale).round().max(1.0);

    if rw > usize::MAX as f64 || rh > usize::MAX as f64 {
        return Err(PreprocessError::invalid_dimensions(width, height));
    }

    Ok((rw as usize, rh as usize))
}
