//! Core types for pose-estimation pipelines.
//!
//! This crate provides the data types shared across the pipeline:
//!
//! # Pose Types
//!
//! - [`Keypoint`] - A single joint position in pixel coordinates
//! - [`Pose`] - Ordered keypoints for one image, with bounding-box and
//!   translation helpers
//!
//! # Image Types
//!
//! - [`ChwImage`] - Flat `f32` image buffer in channel-first layout, the
//!   form neural-network inputs expect
//!
//! # Manifest Types
//!
//! - [`Manifest`] / [`ManifestEntry`] - The `path,x,y,v,...` annotation
//!   list format, parsed and validated up front
//!
//! # Design Philosophy
//!
//! These are pure data types: no image codecs, no ML framework, no
//! augmentation. Loading lives in `pose-dataset`, models in `pose-models`.
//! Keeping this layer dependency-light lets every other crate share it.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod image;
mod keypoint;
mod manifest;

// Re-export pose types
pub use keypoint::{Keypoint, Pose};

// Re-export image types
pub use image::ChwImage;

// Re-export manifest types
pub use manifest::{Manifest, ManifestEntry};

// Re-export error types
pub use error::{PoseTypesError, Result};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{ChwImage, Keypoint, Manifest, ManifestEntry, Pose, PoseTypesError};
}
