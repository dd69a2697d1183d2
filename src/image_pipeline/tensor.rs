//! Output tensor module
//!
//! The planar float tensor handed to the caller, its transfer encodings and summary statistics.

mod stats;
mod types;

pub use stats::TensorStats;
pub use types::{ChwTensor, OutputTransfer, TensorPayload};
