//! Tensor ownership and transfer types

use crate::image_pipeline::common::error::{PreprocessError, Result, checked_len};
use crate::image_pipeline::decode::RGB_CHANNELS;
use crate::image_pipeline::tensor::stats::TensorStats;

/// Planar (channel-major) RGB tensor: all R samples row-major, then all G, then all B.
#[derive(Debug, Clone, PartialEq)]
pub struct ChwTensor {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl ChwTensor {
    pub fn new(width: usize, height: usize, data: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 || data.len() != checked_len(width, height, RGB_CHANNELS)? {
            return Err(PreprocessError::invalid_dimensions(width, height));
        }
        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `[channels, height, width]`
    pub fn shape(&self) -> [usize; 3] {
        [RGB_CHANNELS, self.height, self.width]
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Direct view of the tensor memory, no copy.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// One channel plane.
    ///
    /// # Panics
    ///
    /// Panics if `c >= 3`.
    pub fn channel(&self, c: usize) -> &[f32] {
        assert!(c < RGB_CHANNELS, "channel {} out of range", c);
        let plane = self.width * self.height;
        &self.data[c * plane..(c + 1) * plane]
    }

    pub fn get(&self, c: usize, y: usize, x: usize) -> Option<f32> {
        if c >= RGB_CHANNELS || y >= self.height || x >= self.width {
            return None;
        }
        Some(self.data[c * self.width * self.height + y * self.width + x])
    }

    /// Copy-out for callers that must keep their own buffer.
    pub fn to_vec(&self) -> Vec<f32> {
        self.data.clone()
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Little-endian `f32` wire encoding.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.data.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    pub fn stats(&self) -> TensorStats {
        TensorStats::compute(&self.data)
    }

    pub fn into_payload(self, transfer: OutputTransfer) -> TensorPayload {
        match transfer {
            OutputTransfer::Owned => TensorPayload::Floats(self.data),
            OutputTransfer::LittleEndianBytes => TensorPayload::Bytes(self.to_le_bytes()),
        }
    }
}

/// How a finished tensor leaves the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputTransfer {
    /// Hand over the float buffer itself.
    #[default]
    Owned,
    /// Serialize into a byte buffer, as a direct byte buffer would carry it.
    LittleEndianBytes,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TensorPayload {
    Floats(Vec<f32>),
    Bytes(Vec<u8>),
}

impl TensorPayload {
    /// Number of `f32` values carried, regardless of encoding.
    pub fn len(&self) -> usize {
        match self {
            Self::Floats(values) => values.len(),
            Self::Bytes(bytes) => bytes.len() / std::mem::size_of::<f32>(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decodes the payload back into floats, copying only for the byte encoding.
    pub fn into_floats(self) -> Vec<f32> {
        match self {
            Self::Floats(values) => values,
            Self::Bytes(bytes) => bytes
                .chunks_exact(4)
                .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
                .collect(),
        }
    }
}
