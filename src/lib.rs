//! Image preprocessing for the moderation classifier.
//!
//! ```no_run
//! use moderation_preprocess::image_pipeline::{ImageToChwPipeline, PreprocessConfig};
//!
//! # fn main() -> moderation_preprocess::image_pipeline::Result<()> {
//! let pipeline = ImageToChwPipeline::new(PreprocessConfig::default())?;
//! let tensor = pipeline.preprocess_file("photo.jpg")?;
//! assert_eq!(tensor.shape(), [3, 224, 224]);
//! # Ok(())
//! # }
//! ```

pub mod image_pipeline;
pub mod logger;
