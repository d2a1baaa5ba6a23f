//! Pose estimation over indexed datasets.
//!
//! This crate composes the pipeline's pieces into an inference wrapper:
//!
//! - [`PoseEstimator`] - Owns a predictor (any
//!   [`PosePredictor`](pose_models::PosePredictor)) and a
//!   [`PoseDataset`](pose_dataset::PoseDataset); `estimate(i)` runs the
//!   model on dataset entry `i` and returns the predicted pose
//!
//! The convenience constructor
//! [`PoseEstimator::from_files`] loads a trained
//! [`PoseNet`](pose_models::PoseNet) from a weights file and builds the
//! dataset with augmentation disabled, the usual inference setup.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod estimator;

// Re-export the estimator
pub use estimator::PoseEstimator;

// Re-export error types
pub use error::{EstimatorError, Result};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{EstimatorError, PoseEstimator};
}
