//! Pipeline conversions module
//!
//! This module contains the orchestration logic that chains decode, resize, crop and
//! normalization into one call.

mod image_to_chw;


pub use image_to_chw::ImageToChwPipeline;
