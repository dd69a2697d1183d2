//! Per-channel normalization constants

use crate::image_pipeline::common::error::{PreprocessError, Result};

const CHANNEL_NAMES: [&str; 3] = ["R", "G", "B"];

/// Mean and standard deviation for each RGB channel, applied to samples scaled to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizationParams {
    pub mean: [f32; 3],
    pub std: [f32; 3],
}

impl Default for NormalizationParams {
    fn default() -> Self {
        Self::imagenet()
    }
}

impl NormalizationParams {
    pub fn new(mean: [f32; 3], std: [f32; 3]) -> Self {
        Self { mean, std }
    }

    /// ImageNet statistics used by torchvision-style classifiers.
    pub fn imagenet() -> Self {
        Self {
            mean: [0.485, 0.456, 0.406],
            std: [0.229, 0.224, 0.225],
        }
    }

    /// Leaves samples as `byte / 255`.
    pub fn identity() -> Self {
        Self {
            mean: [0.0; 3],
            std: [1.0; 3],
        }
    }

    /// Rejects zero, subnormal or non-finite standard deviations, non-finite means, and
    /// pairs whose outputs for samples in `[0, 1]` would overflow `f32`.
    pub fn validate(&self) -> Result<()> {
        for c in 0..3 {
            let (mean, std) = (self.mean[c], self.std[c]);
            if !mean.is_finite() {
                return Err(PreprocessError::InvalidNormalizationParams(format!(
                    "mean[{}] ({}) is {}",
                    c, CHANNEL_NAMES[c], mean
                )));
            }
            if std == 0.0 {
                return Err(PreprocessError::InvalidNormalizationParams(format!(
                    "std[{}] ({}) is zero",
                    c, CHANNEL_NAMES[c]
                )));
            }
            if !std.is_normal() {
                return Err(PreprocessError::InvalidNormalizationParams(format!(
                    "std[{}] ({}) is {:e}",
                    c, CHANNEL_NAMES[c], std
                )));
            }
            // Output is monotonic in the sample, so the two ends bound every value.
            let low = (0.0 - mean) / std;
            let high = (1.0 - mean) / std;
            if !low.is_finite() || !high.is_finite() {
                return Err(PreprocessError::InvalidNormalizationParams(format!(
                    "mean[{}]={:e}, std[{}]={:e} ({}) overflow f32",
                    c, mean, c, std, CHANNEL_NAMES[c]
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::common::error::ErrorKind;

    #[test]
    fn presets_are_valid() {
        assert!(NormalizationParams::imagenet().validate().is_ok());
        assert!(NormalizationParams::identity().validate().is_ok());
        assert_eq!(NormalizationParams::default(), NormalizationParams::imagenet());
    }

    #[test]
    fn zero_std_is_rejected() {
        let params = NormalizationParams::new([0.0; 3], [1.0, 0.0, 1.0]);
        let err = params.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidNormalizationParams);
        assert!(err.to_string().contains("std[1] (G) is zero"));
    }

    #[test]
    fn negative_zero_std_is_rejected() {
        let params = NormalizationParams::new([0.0; 3], [1.0, 1.0, -0.0]);
        assert!(params.validate().is_err());
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let params = NormalizationParams::new([f32::NAN, 0.0, 0.0], [1.0; 3]);
        assert!(params.validate().is_err());
        let params = NormalizationParams::new([0.0; 3], [1.0, f32::INFINITY, 1.0]);
        assert!(params.validate().is_err());
    }

    #[test]
    fn subnormal_std_is_rejected() {
        let params = NormalizationParams::new([0.0; 3], [1.0, 1.0, 1e-40]);
        let err = params.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidNormalizationParams);
        assert!(err.to_string().contains("std[2] (B)"));
    }

    #[test]
    fn overflowing_mean_std_pair_is_rejected() {
        // 1e-30 is normal, but (1 - 1e10) / 1e-30 exceeds f32::MAX.
        let params = NormalizationParams::new([1e10, 0.0, 0.0], [1e-30, 1.0, 1.0]);
        let err = params.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidNormalizationParams);
    }

    #[test]
    fn small_but_safe_std_is_allowed() {
        let params = NormalizationParams::new([0.5; 3], [1e-3; 3]);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn negative_std_is_allowed() {
        let params = NormalizationParams::new([0.0; 3], [-1.0; 3]);
        assert!(params.validate().is_ok());
    }
}
