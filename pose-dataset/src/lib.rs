//! Pose dataset indexing.
//!
//! This crate turns a pose manifest (image paths plus joint annotations)
//! into normalized training examples:
//!
//! # Dataset Access
//!
//! - [`PoseDataset`] - Parse-once, lazy-access indexed dataset
//! - [`PoseExample`] - One `(image, pose, visibility)` triple
//! - [`IndexerConfig`] - Augmentation flag, crop kernel/stride, RNG seed
//!
//! # Augmentation
//!
//! - [`random_crop`] - Stride-aligned random crop that keeps the keypoint
//!   bounding box (plus margin) inside the window
//! - [`eigen_noise`] - Fancy-PCA color jitter along the channel covariance
//!   eigenbasis
//!
//! # Image Loading
//!
//! - [`load_image`] - File decode into a 3-channel CHW `f32` buffer
//!
//! # Pipeline
//!
//! Per access: decode -> random crop -> eigen noise -> divide by 255. The
//! two augmentation steps run only when enabled; the normalization always
//! runs. Every step works on fresh buffers, so the parsed annotations are
//! read-only after construction.
//!
//! # Example
//!
//! ```no_run
//! use pose_dataset::{IndexerConfig, PoseDataset};
//!
//! let mut dataset = PoseDataset::from_manifest_path(
//!     "train.csv",
//!     IndexerConfig::default().with_seed(42),
//! )?;
//!
//! for i in 0..dataset.len() {
//!     let example = dataset.get_example(i)?;
//!     assert_eq!(example.pose.len(), example.visibility.len());
//! }
//! # Ok::<(), pose_dataset::DatasetError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod augment;
mod config;
mod error;
mod indexer;
mod loader;

// Re-export dataset types
pub use indexer::{PoseDataset, PoseExample};

// Re-export configuration
pub use config::IndexerConfig;

// Re-export augmentation primitives
pub use augment::{eigen_noise, random_crop};

// Re-export image loading
pub use loader::load_image;

// Re-export error types
pub use error::{DatasetError, Result};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{DatasetError, IndexerConfig, PoseDataset, PoseExample};
}
