//! Error types for pose-estimator crate.

use thiserror::Error;

use pose_dataset::DatasetError;
use pose_models::ModelError;

/// Errors that can occur in pose-estimator operations.
#[derive(Debug, Error)]
pub enum EstimatorError {
    /// Dataset failure (manifest, image load, index bounds).
    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// Model failure (weights, shapes, prediction).
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// Model and dataset disagree on joint count.
    #[error("joint count mismatch: model regresses {model}, dataset annotates {dataset}")]
    JointCountMismatch {
        /// Joints the model regresses.
        model: usize,
        /// Joints per dataset entry.
        dataset: usize,
    },

    /// Prediction produced an unexpected result.
    #[error("prediction error: {0}")]
    Prediction(String),
}

impl EstimatorError {
    /// Creates a joint count mismatch error.
    #[must_use]
    pub const fn joint_count_mismatch(model: usize, dataset: usize) -> Self {
        Self::JointCountMismatch { model, dataset }
    }

    /// Creates a prediction error.
    #[must_use]
    pub fn prediction(reason: impl Into<String>) -> Self {
        Self::Prediction(reason.into())
    }
}

/// Result type for pose-estimator operations.
pub type Result<T> = std::result::Result<T, EstimatorError>;
