//! Burn pose-regression model and weights persistence.
//!
//! This crate provides the model layer of the pose pipeline:
//!
//! # Model
//!
//! - [`PoseNet`] - AlexNet-style convolutional regressor emitting one
//!   `(x, y)` pair per joint
//! - [`PoseNetConfig`] - Joint count and input size
//!
//! # Capability Trait
//!
//! - [`PosePredictor`] - The opaque "predict poses for an image batch"
//!   capability the estimator is injected with
//!
//! # Weights Persistence
//!
//! - [`load_weights`] / [`save_weights`] - Burn recorder round-trips,
//!   format inferred from the file extension
//!
//! # Backend Support
//!
//! Models are generic over Burn backends. Common choices:
//! - `burn-ndarray` - CPU inference (default for tests)
//! - `burn-wgpu` - GPU inference
//!
//! # Example
//!
//! ```ignore
//! use pose_models::{load_weights, PoseNet, PoseNetConfig, PosePredictor};
//!
//! let device = Default::default();
//! let net = PoseNet::<MyBackend>::new(PoseNetConfig::new(14), &device);
//! let net = load_weights(net, "pose.bin", &device)?;
//!
//! let poses = net.predict_poses(&images)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod posenet;
mod predictor;
mod weights;

// Re-export model types
pub use posenet::{PoseNet, PoseNetConfig};

// Re-export the capability trait
pub use predictor::PosePredictor;

// Re-export weights utilities
pub use weights::{load_weights, save_weights, WeightsFormat};

// Re-export error types
pub use error::{ModelError, Result};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        load_weights, save_weights, ModelError, PoseNet, PoseNetConfig, PosePredictor,
        WeightsFormat,
    };
}
