//! Image preprocessing pipeline module
//!
//! Turns an encoded image into the planar, normalized float tensor a classifier consumes:
//! decode, resize the short side, center crop, normalize and planarize. Each stage lives in
//! its own module and returns a freshly owned buffer; `conversions` chains them.

pub mod common;
pub mod config;
pub mod conversions;
pub mod crop;
pub mod decode;
pub mod host;
pub mod normalize;
pub mod observer;
pub mod resize;
pub mod tensor;

pub use common::{
    ErrorKind,
    PreprocessError,
    Result,
};

pub use config::{
    DEFAULT_OUTPUT_SIZE,
    PreprocessConfig,
    PreprocessConfigBuilder,
};

pub use decode::{
    ImageCrateDecoder,
    ImageDecoder,
    RgbPixelGrid,
};

pub use resize::{
    LinearResampler,
    Resampler,
    SHORT_SIDE_TARGET,
    resize_dimensions,
};

pub use crop::{CropWindow, center_crop};

pub use normalize::{NormalizationParams, normalize_to_chw};

pub use tensor::{ChwTensor, OutputTransfer, TensorPayload, TensorStats};

pub use observer::{
    NoopObserver,
    PipelineObserver,
    PipelineTimings,
    Stage,
    StepTiming,
    TimingObserver,
    TracingObserver,
};

pub use conversions::{
    ImageToChwPipeline,
};
