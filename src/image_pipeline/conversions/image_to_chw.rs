use std::path::Path;
use std::time::Instant;

use tracing::{debug, info, instrument, warn};

use crate::image_pipeline::{
    common::error::{PreprocessError, Result, checked_len, try_alloc},
    config::PreprocessConfig,
    crop::center_crop,
    decode::{ImageCrateDecoder, ImageDecoder, RGB_CHANNELS, RgbPixelGrid},
    normalize::normalize_to_chw,
    observer::{PipelineObserver, Stage, TracingObserver},
    resize::{LinearResampler, Resampler, resize_dimensions},
    tensor::{ChwTensor, TensorPayload},
};

/// Encoded image -> resized -> center-cropped -> normalized planar tensor.
///
/// Holds no per-call state; one instance can serve any number of calls, from several
/// threads when the decoder, resampler and observer are `Sync`.
pub struct ImageToChwPipeline<D: ImageDecoder, R: Resampler, O: PipelineObserver> {
    decoder: D,
    resampler: R,
    observer: O,
    config: PreprocessConfig,
}

impl ImageToChwPipeline<ImageCrateDecoder, LinearResampler, TracingObserver> {
    pub fn new(config: PreprocessConfig) -> Result<Self> {
        Self::with_custom(ImageCrateDecoder, LinearResampler, TracingObserver, config)
    }
}

fn grid_dims(grid: &RgbPixelGrid) -> (usize, usize) {
    (grid.width(), grid.height())
}

fn tensor_dims(tensor: &ChwTensor) -> (usize, usize) {
    (tensor.width(), tensor.height())
}

impl<D: ImageDecoder, R: Resampler, O: PipelineObserver> ImageToChwPipeline<D, R, O> {
    pub fn with_custom(decoder: D, resampler: R, observer: O, config: PreprocessConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            decoder,
            resampler,
            observer,
            config,
        })
    }

    /// Runs one stage inside its own span and reports the outcome to the observer.
    fn checkpoint<T>(
        &self,
        stage: Stage,
        dims: fn(&T) -> (usize, usize),
        run: impl FnOnce() -> Result<T>,
    ) -> Result<T> {
        let _span = tracing::info_span!("stage", name = stage.name()).entered();
        let start = Instant::now();
        match run() {
            Ok(output) => {
                let (width, height) = dims(&output);
                self.observer.on_stage(stage, width, height, start.elapsed());
                Ok(output)
            }
            Err(e) => {
                self.observer.on_failure(stage, &e);
                Err(e)
            }
        }
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(PreprocessError::invalid_dimensions(width, height));
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!(
                    "Image dimensions {}x{} exceed maximum {}",
                    width, height, max
                );
                return Err(PreprocessError::invalid_dimensions(width, height));
            }
        }

        Ok(())
    }

    /// Fails with `AllocationFailed` when a `width` x `height` grid exceeds
    /// `max_resized_pixels` or cannot be reserved. Runs before the resampler allocates.
    fn check_resized_size(&self, width: usize, height: usize) -> Result<()> {
        let bytes = checked_len(width, height, RGB_CHANNELS)?;
        if let Some(max) = self.config.max_resized_pixels {
            if width.saturating_mul(height) > max {
                warn!(
                    "Resized grid {}x{} exceeds maximum of {} pixels",
                    width, height, max
                );
                return Err(PreprocessError::AllocationFailed { bytes });
            }
        }
        drop(try_alloc::<u8>(bytes)?);
        Ok(())
    }

    fn resize(&self, grid: &RgbPixelGrid) -> Result<RgbPixelGrid> {
        self.checkpoint(Stage::Resized, grid_dims, || {
            let (rw, rh) = resize_dimensions(grid.width(), grid.height(), self.config.short_side)?;
            self.check_resized_size(rw, rh)?;
            let resized = self.resampler.resample(grid, rw, rh)?;
            if (resized.width(), resized.height()) != (rw, rh) {
                return Err(PreprocessError::ResizeFailed(format!(
                    "resampler produced {}x{}, expected {}x{}",
                    resized.width(),
                    resized.height(),
                    rw,
                    rh
                )));
            }
            Ok(resized)
        })
    }

    fn crop(&self, grid: &RgbPixelGrid) -> Result<RgbPixelGrid> {
        self.checkpoint(Stage::Cropped, grid_dims, || {
            center_crop(grid, self.config.out_width, self.config.out_height)
        })
    }

    fn normalize(&self, grid: &RgbPixelGrid) -> Result<ChwTensor> {
        self.checkpoint(Stage::Normalized, tensor_dims, || {
            normalize_to_chw(grid, &self.config.normalization)
        })
    }

    fn check_source(&self, grid: &RgbPixelGrid) -> Result<()> {
        let (width, height) = grid_dims(grid);
        let _span = tracing::info_span!("validate_dimensions", width, height).entered();
        let start = Instant::now();
        match self.validate_dimensions(width, height) {
            Ok(()) => {
                self.observer.on_stage(Stage::Validated, width, height, start.elapsed());
                Ok(())
            }
            Err(e) => {
                self.observer.on_failure(Stage::Validated, &e);
                Err(e)
            }
        }
    }

    fn crop_and_normalize(&self, resized: RgbPixelGrid) -> Result<ChwTensor> {
        let cropped = self.crop(&resized)?;
        drop(resized);
        self.normalize(&cropped)
    }

    /// Runs stages 2-4 on an already decoded grid.
    pub fn preprocess_grid(&self, grid: &RgbPixelGrid) -> Result<ChwTensor> {
        self.check_source(grid)?;
        let resized = self.resize(grid)?;
        self.crop_and_normalize(resized)
    }

    #[instrument(skip(self, encoded), fields(input_size = encoded.len()))]
    pub fn preprocess(&self, encoded: &[u8]) -> Result<ChwTensor> {
        debug!("Starting CHW preprocessing");

        let resized = {
            let decoded = self.checkpoint(Stage::Decoded, grid_dims, || self.decoder.decode(encoded))?;
            self.check_source(&decoded)?;
            self.resize(&decoded)?
        };
        let tensor = self.crop_and_normalize(resized)?;

        info!(
            width = tensor.width(),
            height = tensor.height(),
            len = tensor.len(),
            "Preprocessing complete"
        );
        Ok(tensor)
    }

    /// Like [`preprocess`](Self::preprocess), encoded per `config.transfer`.
    pub fn preprocess_for_transfer(&self, encoded: &[u8]) -> Result<TensorPayload> {
        Ok(self.preprocess(encoded)?.into_payload(self.config.transfer))
    }

    #[instrument(skip(self, input_path))]
    pub fn preprocess_file<P: AsRef<Path>>(&self, input_path: P) -> Result<ChwTensor> {
        let input_path = input_path.as_ref();

        info!(input = %input_path.display(), "Preprocessing file");

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                PreprocessError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        self.preprocess(&input_data)
    }

    pub fn config(&self) -> &PreprocessConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PreprocessConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }
}
