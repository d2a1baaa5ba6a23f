//! Error types for pose-models crate.

use thiserror::Error;

/// Errors that can occur in pose-models operations.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Failed to load model weights.
    #[error("failed to load weights from {path}: {reason}")]
    WeightsLoad {
        /// Path to the weights file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Failed to save model weights.
    #[error("failed to save weights to {path}: {reason}")]
    WeightsSave {
        /// Path to the weights file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Weights file not found.
    #[error("weights file not found: {0}")]
    WeightsNotFound(String),

    /// Weights file extension not recognized.
    #[error("unsupported weights format: {0}")]
    UnsupportedFormat(String),

    /// Invalid model configuration.
    #[error("invalid model configuration: {0}")]
    InvalidConfig(String),

    /// Input shape does not match what the model expects.
    #[error("shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// Expected shape.
        expected: String,
        /// Actual shape.
        actual: String,
    },

    /// Failed to extract tensor data.
    #[error("tensor data error: {0}")]
    TensorData(String),
}

impl ModelError {
    /// Creates a weights load error.
    #[must_use]
    pub fn weights_load(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::WeightsLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a weights save error.
    #[must_use]
    pub fn weights_save(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::WeightsSave {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a weights not found error.
    #[must_use]
    pub fn weights_not_found(path: impl Into<String>) -> Self {
        Self::WeightsNotFound(path.into())
    }

    /// Creates an unsupported format error.
    #[must_use]
    pub fn unsupported_format(path: impl Into<String>) -> Self {
        Self::UnsupportedFormat(path.into())
    }

    /// Creates an invalid config error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }

    /// Creates a shape mismatch error.
    #[must_use]
    pub fn shape_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Creates a tensor data error.
    #[must_use]
    pub fn tensor_data(reason: impl Into<String>) -> Self {
        Self::TensorData(reason.into())
    }
}

/// Result type for pose-models operations.
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_weights_load() {
        let err = ModelError::weights_load("model.bin", "record version mismatch");
        assert!(err.to_string().contains("model.bin"));
        assert!(err.to_string().contains("record version mismatch"));
    }

    #[test]
    fn error_weights_not_found() {
        let err = ModelError::weights_not_found("/tmp/model.bin");
        assert!(err.to_string().contains("/tmp/model.bin"));
    }

    #[test]
    fn error_unsupported_format() {
        let err = ModelError::unsupported_format("model.npz");
        assert!(err.to_string().contains("model.npz"));
    }

    #[test]
    fn error_shape_mismatch() {
        let err = ModelError::shape_mismatch("3x227x227", "1x227x227");
        assert!(err.to_string().contains("expected 3x227x227"));
        assert!(err.to_string().contains("got 1x227x227"));
    }
}
