use crate::image_pipeline::common::error::{Result, checked_len, try_alloc};
use crate::image_pipeline::decode::{RGB_CHANNELS, RgbPixelGrid};
use crate::image_pipeline::normalize::params::NormalizationParams;
use crate::image_pipeline::tensor::ChwTensor;

/// Normalizes an interleaved RGB grid into a planar CHW tensor.
///
/// Sample `c` of pixel `(x, y)` becomes `(byte / 255 - mean[c]) / std[c]` at index
/// `c * w * h + y * w + x`. All arithmetic is `f32`.
pub fn normalize_to_chw(src: &RgbPixelGrid, params: &NormalizationParams) -> Result<ChwTensor> {
    params.validate()?;

    let (width, height) = (src.width(), src.height());
    let plane = width * height;
    let len = checked_len(width, height, RGB_CHANNELS)?;

    let mut data = try_alloc::<f32>(len)?;
    data.resize(len, 0.0);

    let (r, rest) = data.split_at_mut(plane);
    let (g, b) = rest.split_at_mut(plane);
    let mut planes: [&mut [f32]; 3] = [r, g, b];

    for (i, pixel) in src.as_bytes().chunks_exact(RGB_CHANNELS).enumerate() {
        for c in 0..RGB_CHANNELS {
            planes[c][i] = (pixel[c] as f32 / 255.0 - params.mean[c]) / params.std[c];
        }
    }

    ChwTensor::new(width, height, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::common::error::ErrorKind;

    #[test]
    fn planar_layout_for_2x2() {
        // pixel (row, col) channel c = 10 * (row * 2 + col) + c
        let mut data = Vec::new();
        for row in 0..2u8 {
            for col in 0..2u8 {
                for c in 0..3u8 {
                    data.push(10 * (row * 2 + col) + c);
                }
            }
        }
        let grid = RgbPixelGrid::new(2, 2, data).unwrap();
        let tensor = normalize_to_chw(&grid, &NormalizationParams::identity()).unwrap();

        assert_eq!(tensor.len(), 12);
        for c in 0..3usize {
            for row in 0..2usize {
                for col in 0..2usize {
                    let byte = (10 * (row * 2 + col) + c) as f32;
                    assert_eq!(tensor.as_slice()[c * 4 + row * 2 + col], byte / 255.0);
                }
            }
        }
    }

    #[test]
    fn identity_params_give_byte_over_255() {
        let data: Vec<u8> = (0..=255u8).cycle().take(16 * 16 * 3).collect();
        let grid = RgbPixelGrid::new(16, 16, data.clone()).unwrap();
        let tensor = normalize_to_chw(&grid, &NormalizationParams::identity()).unwrap();

        let plane = 16 * 16;
        for (i, pixel) in data.chunks_exact(3).enumerate() {
            for c in 0..3 {
                assert_eq!(tensor.as_slice()[c * plane + i], pixel[c] as f32 / 255.0);
            }
        }
    }

    #[test]
    fn imagenet_values() {
        let grid = RgbPixelGrid::new(1, 1, vec![255, 0, 128]).unwrap();
        let params = NormalizationParams::imagenet();
        let tensor = normalize_to_chw(&grid, &params).unwrap();

        let expected = [
            (1.0f32 - 0.485) / 0.229,
            (0.0f32 - 0.456) / 0.224,
            (128.0f32 / 255.0 - 0.406) / 0.225,
        ];
        assert_eq!(tensor.as_slice(), &expected);
    }

    #[test]
    fn zero_std_fails_without_producing_output() {
        let grid = RgbPixelGrid::new(1, 1, vec![1, 2, 3]).unwrap();
        let params = NormalizationParams::new([0.5; 3], [0.2, 0.2, 0.0]);
        let err = normalize_to_chw(&grid, &params).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidNormalizationParams);
    }

    #[test]
    fn subnormal_std_fails_instead_of_producing_inf() {
        let grid = RgbPixelGrid::new(1, 1, vec![255, 255, 255]).unwrap();
        let params = NormalizationParams::new([0.0; 3], [1e-40, 1.0, 1.0]);
        let err = normalize_to_chw(&grid, &params).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidNormalizationParams);
    }

    #[test]
    fn output_is_finite_for_every_byte() {
        let data: Vec<u8> = (0..=255u8).flat_map(|v| [v, v, v]).collect();
        let grid = RgbPixelGrid::new(256, 1, data).unwrap();
        let tensor = normalize_to_chw(&grid, &NormalizationParams::imagenet()).unwrap();
        assert!(tensor.as_slice().iter().all(|v| v.is_finite()));
    }
}
