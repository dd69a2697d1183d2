use thiserror::Error;

#[derive(Error, Debug)]
pub enum PreprocessError {
    #[error("Invalid image dimensions: width={width}, height={height}")]
    InvalidDimensions { width: i64, height: i64 },

    #[error("Failed to decode image: {0}")]
    DecodeFailed(String),

    #[error("Failed to resize image: {0}")]
    ResizeFailed(String),

    #[error("Crop {out_width}x{out_height} does not fit inside {width}x{height}")]
    CropOutOfBounds {
        out_width: usize,
        out_height: usize,
        width: usize,
        height: usize,
    },

    #[error("Invalid normalization parameters: {0}")]
    InvalidNormalizationParams(String),

    #[error("Failed to allocate {bytes} bytes")]
    AllocationFailed { bytes: usize },

    #[error("Failed to read input file: {0}")]
    InputReadError(String),
}

/// Coarse classification of a [`PreprocessError`], stable across message changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidDimensions,
    DecodeFailed,
    ResizeFailed,
    CropOutOfBounds,
    InvalidNormalizationParams,
    AllocationFailed,
    Io,
}

impl PreprocessError {
    pub fn invalid_dimensions(width: impl TryInto<i64>, height: impl TryInto<i64>) -> Self {
        Self::InvalidDimensions {
            width: width.try_into().unwrap_or(i64::MAX),
            height: height.try_into().unwrap_or(i64::MAX),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidDimensions { .. } => ErrorKind::InvalidDimensions,
            Self::DecodeFailed(_) => ErrorKind::DecodeFailed,
            Self::ResizeFailed(_) => ErrorKind::ResizeFailed,
            Self::CropOutOfBounds { .. } => ErrorKind::CropOutOfBounds,
            Self::InvalidNormalizationParams(_) => ErrorKind::InvalidNormalizationParams,
            Self::AllocationFailed { .. } => ErrorKind::AllocationFailed,
            Self::InputReadError(_) => ErrorKind::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, PreprocessError>;

/// Allocates an empty buffer with room for exactly `len` elements, reporting failure
/// instead of aborting.
pub(crate) fn try_alloc<T>(len: usize) -> Result<Vec<T>> {
    let bytes = len.saturating_mul(std::mem::size_of::<T>());
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| PreprocessError::AllocationFailed { bytes })?;
    Ok(buffer)
}

/// `a * b * c` for buffer sizes, with overflow reported as an allocation failure.
pub(crate) fn checked_len(a: usize, b: usize, c: usize) -> Result<usize> {
    a.checked_mul(b)
        .and_then(|n| n.checked_mul(c))
        .ok_or(PreprocessError::AllocationFailed { bytes: usize::MAX })
}
