//! Image decoding module
//!
//! This module turns encoded image bytes into interleaved RGB pixel grids.

mod decoder;
mod image_crate_decoder;
pub mod types;

pub use decoder::ImageDecoder;
pub use image_crate_decoder::ImageCrateDecoder;
pub use types::{RGB_CHANNELS, RgbPixelGrid};
