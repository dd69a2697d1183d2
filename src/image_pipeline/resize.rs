//! Resize module
//!
//! Aspect-preserving resize of a decoded grid so that its short side hits a fixed target.

mod dimensions;
mod linear_resampler;
mod resampler;

pub use dimensions::{SHORT_SIDE_TARGET, resize_dimensions};
pub use linear_resampler::LinearResampler;
pub use resampler::Resampler;
