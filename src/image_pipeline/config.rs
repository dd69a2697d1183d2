//! Preprocessing configuration types

use crate::image_pipeline::common::error::{PreprocessError, Result};
use crate::image_pipeline::normalize::NormalizationParams;
use crate::image_pipeline::resize::SHORT_SIDE_TARGET;
use crate::image_pipeline::tensor::OutputTransfer;

/// Spatial input size of the moderation classifier.
pub const DEFAULT_OUTPUT_SIZE: usize = 224;

/// Default ceiling on the pixel count of the resized grid (256 x 65536).
pub const DEFAULT_MAX_RESIZED_PIXELS: usize = 1 << 24;

/// Configuration for encoded image to CHW tensor preprocessing
#[derive(Debug, Clone)]
pub struct PreprocessConfig {
    /// Width of the output tensor
    pub out_width: usize,
    /// Height of the output tensor
    pub out_height: usize,
    /// Length the short side is resized to before cropping
    pub short_side: usize,
    /// Per-channel mean/std
    pub normalization: NormalizationParams,
    /// Whether to check decoded dimensions against `max_dimension`
    pub validate_dimensions: bool,
    /// Largest accepted width or height of a decoded image
    pub max_dimension: Option<usize>,
    /// Largest accepted `width * height` of the resized grid, checked before resampling.
    /// Thin sources keep their aspect ratio, so a small input can still demand a huge grid.
    pub max_resized_pixels: Option<usize>,
    /// How `preprocess_for_transfer` hands the tensor over
    pub transfer: OutputTransfer,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            out_width: DEFAULT_OUTPUT_SIZE,
            out_height: DEFAULT_OUTPUT_SIZE,
            short_side: SHORT_SIDE_TARGET,
            normalization: NormalizationParams::imagenet(),
            validate_dimensions: true,
            max_dimension: Some(50_000),
            max_resized_pixels: Some(DEFAULT_MAX_RESIZED_PIXELS),
            transfer: OutputTransfer::Owned,
        }
    }
}

impl PreprocessConfig {
    pub fn builder() -> PreprocessConfigBuilder {
        PreprocessConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.out_width == 0 || self.out_height == 0 {
            return Err(PreprocessError::invalid_dimensions(self.out_width, self.out_height));
        }
        if self.short_side == 0 {
            return Err(PreprocessError::invalid_dimensions(self.short_side, self.short_side));
        }
        self.normalization.validate()
    }
}

/// Builder for PreprocessConfig
#[derive(Default)]
pub struct PreprocessConfigBuilder {
    out_width: Option<usize>,
    out_height: Option<usize>,
    short_side: Option<usize>,
    normalization: Option<NormalizationParams>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<usize>>,
    max_resized_pixels: Option<Option<usize>>,
    transfer: Option<OutputTransfer>,
}

impl PreprocessConfigBuilder {
    pub fn output_size(mut self, width: usize, height: usize) -> Self {
        self.out_width = Some(width);
        self.out_height = Some(height);
        self
    }

    pub fn short_side(mut self, short_side: usize) -> Self {
        self.short_side = Some(short_side);
        self
    }

    pub fn normalization(mut self, params: NormalizationParams) -> Self {
        self.normalization = Some(params);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<usize>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn max_resized_pixels(mut self, max: Option<usize>) -> Self {
        self.max_resized_pixels = Some(max);
        self
    }

    pub fn transfer(mut self, transfer: OutputTransfer) -> Self {
        self.transfer = Some(transfer);
        self
    }

    pub fn build(self) -> PreprocessConfig {
        let default = PreprocessConfig::default();
        PreprocessConfig {
            out_width: self.out_width.unwrap_or(default.out_width),
            out_height: self.out_height.unwrap_or(default.out_height),
            short_side: self.short_side.unwrap_or(default.short_side),
            normalization: self.normalization.unwrap_or(default.normalization),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
            max_resized_pixels: self.max_resized_pixels.unwrap_or(default.max_resized_pixels),
            transfer: self.transfer.unwrap_or(default.transfer),
        }
    }
}
