//! Error types for pose-dataset crate.

use thiserror::Error;

use pose_types::PoseTypesError;

/// Errors that can occur in pose-dataset operations.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Manifest parsing or type-level failure.
    #[error("manifest error: {0}")]
    Manifest(#[from] PoseTypesError),

    /// Failed to read or decode an image file.
    #[error("failed to load image {path}: {reason}")]
    ImageLoad {
        /// Path to the image file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Example index past the end of the dataset.
    #[error("example index {index} out of range for dataset of size {len}")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Dataset size.
        len: usize,
    },

    /// Invalid indexer configuration.
    #[error("invalid indexer configuration: {0}")]
    InvalidConfig(String),

    /// Augmentation failure.
    #[error("augmentation error: {0}")]
    Augmentation(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),
}

impl DatasetError {
    /// Creates an image load error.
    #[must_use]
    pub fn image_load(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ImageLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates an index out of range error.
    #[must_use]
    pub const fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    /// Creates an invalid config error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }

    /// Creates an augmentation error.
    #[must_use]
    pub fn augmentation(reason: impl Into<String>) -> Self {
        Self::Augmentation(reason.into())
    }

    /// Creates an IO error.
    #[must_use]
    pub fn io(reason: impl Into<String>) -> Self {
        Self::Io(reason.into())
    }
}

impl From<std::io::Error> for DatasetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type for pose-dataset operations.
pub type Result<T> = std::result::Result<T, DatasetError>;
