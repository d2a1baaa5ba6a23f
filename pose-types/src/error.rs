//! Error types for pose-types crate.

use thiserror::Error;

/// Errors that can occur in pose-types operations.
#[derive(Debug, Error)]
pub enum PoseTypesError {
    /// Malformed manifest line.
    #[error("manifest parse error at line {line}: {reason}")]
    ManifestParse {
        /// 1-based line number in the manifest file.
        line: usize,
        /// Reason for failure.
        reason: String,
    },

    /// Joint count differs between manifest entries.
    #[error("joint count mismatch at line {line}: expected {expected}, got {actual}")]
    JointCountMismatch {
        /// 1-based line number in the manifest file.
        line: usize,
        /// Joint count of the first entry.
        expected: usize,
        /// Joint count of the offending entry.
        actual: usize,
    },

    /// Image buffer length does not match its dimensions.
    #[error("image buffer length {actual} does not match {channels}x{height}x{width}")]
    BufferLenMismatch {
        /// Channel count.
        channels: usize,
        /// Height in pixels.
        height: usize,
        /// Width in pixels.
        width: usize,
        /// Actual buffer length.
        actual: usize,
    },

    /// Crop window is outside the image or empty.
    #[error("invalid crop window: {0}")]
    InvalidCrop(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),
}

impl PoseTypesError {
    /// Creates a manifest parse error.
    #[must_use]
    pub fn manifest_parse(line: usize, reason: impl Into<String>) -> Self {
        Self::ManifestParse {
            line,
            reason: reason.into(),
        }
    }

    /// Creates a joint count mismatch error.
    #[must_use]
    pub const fn joint_count_mismatch(line: usize, expected: usize, actual: usize) -> Self {
        Self::JointCountMismatch {
            line,
            expected,
            actual,
        }
    }

    /// Creates a buffer length mismatch error.
    #[must_use]
    pub const fn buffer_len_mismatch(
        channels: usize,
        height: usize,
        width: usize,
        actual: usize,
    ) -> Self {
        Self::BufferLenMismatch {
            channels,
            height,
            width,
            actual,
        }
    }

    /// Creates an invalid crop error.
    #[must_use]
    pub fn invalid_crop(reason: impl Into<String>) -> Self {
        Self::InvalidCrop(reason.into())
    }

    /// Creates an IO error.
    #[must_use]
    pub fn io(reason: impl Into<String>) -> Self {
        Self::Io(reason.into())
    }
}

impl From<std::io::Error> for PoseTypesError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type for pose-types operations.
pub type Result<T> = std::result::Result<T, PoseTypesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_manifest_parse() {
        let err = PoseTypesError::manifest_parse(3, "expected 7 fields");
        assert!(err.to_string().contains("line 3"));
        assert!(err.to_string().contains("expected 7 fields"));
    }

    #[test]
    fn error_joint_count_mismatch() {
        let err = PoseTypesError::joint_count_mismatch(5, 14, 7);
        let msg = err.to_string();
        assert!(msg.contains("line 5"));
        assert!(msg.contains("14"));
        assert!(msg.contains('7'));
    }

    #[test]
    fn error_buffer_len_mismatch() {
        let err = PoseTypesError::buffer_len_mismatch(3, 4, 4, 10);
        assert!(err.to_string().contains("3x4x4"));
        assert!(err.to_string().contains("10"));
    }

    #[test]
    fn error_invalid_crop() {
        let err = PoseTypesError::invalid_crop("empty window on x axis");
        assert!(err.to_string().contains("empty window"));
    }

    #[test]
    fn error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
        let err: PoseTypesError = io_err.into();
        assert!(matches!(err, PoseTypesError::Io(_)));
    }
}
