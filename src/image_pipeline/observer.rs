//! Pipeline observers
//!
//! The orchestrator reports each finished stage to a [`PipelineObserver`]. Stages themselves
//! never log, which keeps them pure.

mod timing;

use std::sync::Mutex;
use std::time::Duration;

use tracing::{debug, warn};

use crate::image_pipeline::common::error::PreprocessError;

pub use timing::{PipelineTimings, StepTiming};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Decoded,
    /// Source size checks, run on decoded and caller-supplied grids alike.
    Validated,
    Resized,
    Cropped,
    Normalized,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Decoded => "decode",
            Stage::Validated => "validate_dimensions",
            Stage::Resized => "resize",
            Stage::Cropped => "center_crop",
            Stage::Normalized => "normalize",
        }
    }
}

pub trait PipelineObserver {
    /// Called after `stage` produced a `width` x `height` output.
    fn on_stage(&self, _stage: Stage, _width: usize, _height: usize, _elapsed: Duration) {}

    /// Called when `stage` failed; no later stage runs.
    fn on_failure(&self, _stage: Stage, _error: &PreprocessError) {}
}

pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Emits one structured `tracing` event per checkpoint.
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_stage(&self, stage: Stage, width: usize, height: usize, elapsed: Duration) {
        debug!(
            stage = stage.name(),
            width,
            height,
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "Stage complete"
        );
    }

    fn on_failure(&self, stage: Stage, error: &PreprocessError) {
        warn!(stage = stage.name(), error = %error, "Stage failed");
    }
}

/// Records stage durations for later inspection.
#[derive(Default)]
pub struct TimingObserver {
    timings: Mutex<PipelineTimings>,
}

impl TimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collected timings, leaving an empty record behind.
    pub fn take(&self) -> PipelineTimings {
        match self.timings.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl PipelineObserver for TimingObserver {
    fn on_stage(&self, stage: Stage, _width: usize, _height: usize, elapsed: Duration) {
        match self.timings.lock() {
            Ok(mut guard) => guard.add_step(stage.name(), elapsed),
            Err(poisoned) => poisoned.into_inner().add_step(stage.name(), elapsed),
        }
    }
}

impl<O: PipelineObserver + ?Sized> PipelineObserver for &O {
    fn on_stage(&self, stage: Stage, width: usize, height: usize, elapsed: Duration) {
        (**self).on_stage(stage, width, height, elapsed)
    }

    fn on_failure(&self, stage: Stage, error: &PreprocessError) {
        (**self).on_failure(stage, error)
    }
}
