//! Normalization module
//!
//! Per-channel mean/std normalization and the interleaved-to-planar (CHW) conversion.

mod params;
mod planarize;

pub use params::NormalizationParams;
pub use planarize::normalize_to_chw;
