use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::decode::RgbPixelGrid;

pub trait Resampler {
    /// Produces a new `width` x `height` grid from `src`. `src` is never modified.
    fn resample(&self, src: &RgbPixelGrid, width: usize, height: usize) -> Result<RgbPixelGrid>;
}
