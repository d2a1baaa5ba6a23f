//! Indexer configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a [`PoseDataset`](crate::PoseDataset).
///
/// `kernel_size` and `stride` describe the first convolution of the target
/// network; random crops keep the keypoint spread inside a kernel-sized
/// receptive window and stay aligned to the stride grid.
///
/// # Example
///
/// ```
/// use pose_dataset::IndexerConfig;
///
/// let config = IndexerConfig::default();
/// assert!(config.augment);
/// assert_eq!(config.kernel_size, 11);
/// assert_eq!(config.stride, 4);
///
/// let inference = IndexerConfig::inference();
/// assert!(!inference.augment);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexerConfig {
    /// Whether to apply random crop and eigen noise per access.
    pub augment: bool,

    /// Kernel size of the target network's first convolution.
    pub kernel_size: usize,

    /// Stride of the target network's first convolution.
    pub stride: usize,

    /// RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            augment: true,
            kernel_size: 11,
            stride: 4,
            seed: None,
        }
    }
}

impl IndexerConfig {
    /// Creates the default training configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an inference configuration (augmentation disabled).
    #[must_use]
    pub fn inference() -> Self {
        Self {
            augment: false,
            ..Self::default()
        }
    }

    /// Enables or disables augmentation.
    #[must_use]
    pub const fn with_augment(mut self, augment: bool) -> Self {
        self.augment = augment;
        self
    }

    /// Sets the kernel size.
    #[must_use]
    pub const fn with_kernel_size(mut self, kernel_size: usize) -> Self {
        self.kernel_size = kernel_size;
        self
    }

    /// Sets the stride.
    #[must_use]
    pub const fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride;
        self
    }

    /// Sets the RNG seed for reproducible augmentation.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `true` if kernel size and stride are both at least 1.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.kernel_size >= 1 && self.stride >= 1
    }
}
