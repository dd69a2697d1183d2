use anyhow::{Context, bail};
use moderation_preprocess::image_pipeline::{
    DEFAULT_OUTPUT_SIZE, ImageCrateDecoder, ImageToChwPipeline, LinearResampler,
    NormalizationParams, PreprocessConfig, TimingObserver,
};
use moderation_preprocess::logger;

use tracing::info;

const USAGE: &str = "usage: moderation-preprocess <image> [size]";

fn main() -> anyhow::Result<()> {
    logger::init();

    let mut args = std::env::args().skip(1);
    let Some(input) = args.next() else {
        bail!(USAGE);
    };
    let size = match args.next() {
        Some(raw) => raw
            .parse::<usize>()
            .with_context(|| format!("invalid size {:?}\n{}", raw, USAGE))?,
        None => DEFAULT_OUTPUT_SIZE,
    };

    let config = PreprocessConfig::builder()
        .output_size(size, size)
        .normalization(NormalizationParams::imagenet())
        .build();
    let observer = TimingObserver::new();
    let pipeline = ImageToChwPipeline::with_custom(ImageCrateDecoder, LinearResampler, &observer, config)?;

    info!("CHW preprocessing pipeline initialized");
    info!(
        "Output: {}x{}, short side {}",
        pipeline.config().out_width,
        pipeline.config().out_height,
        pipeline.config().short_side
    );

    let tensor = pipeline
        .preprocess_file(&input)
        .with_context(|| format!("preprocessing {} failed", input))?;

    let stats = tensor.stats();
    info!("Tensor shape: {:?} ({} values)", tensor.shape(), tensor.len());
    info!(
        "min={:?} max={:?} mean={:?} nan={} inf={}",
        stats.min, stats.max, stats.mean, stats.nan_count, stats.inf_count
    );
    info!("Timing summary:\n{}", observer.take().summary());

    Ok(())
}
