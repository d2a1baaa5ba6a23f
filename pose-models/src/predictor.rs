//! The predictor capability trait.

use burn::module::Module;
use burn::prelude::Backend;
use burn::tensor::{Tensor, TensorData};

use pose_types::{ChwImage, Pose};

use crate::error::{ModelError, Result};
use crate::posenet::PoseNet;

/// Capability of estimating poses from image batches.
///
/// The estimator depends on this trait rather than a concrete network, so
/// inference code can be exercised with a stub and the real model swapped
/// in without touching the wrapper.
pub trait PosePredictor {
    /// Number of joints per predicted pose.
    fn num_joints(&self) -> usize;

    /// Predicts one pose per input image.
    ///
    /// # Errors
    ///
    /// Returns an error if an input image has the wrong shape or the
    /// prediction fails.
    fn predict_poses(&self, batch: &[ChwImage]) -> Result<Vec<Pose>>;
}

impl<B: Backend> PosePredictor for PoseNet<B> {
    fn num_joints(&self) -> usize {
        Self::num_joints(self)
    }

    fn predict_poses(&self, batch: &[ChwImage]) -> Result<Vec<Pose>> {
        if batch.is_empty() {
            return Ok(Vec::new());
        }

        let side = self.input_size();
        let expected = (3, side, side);
        let mut flat = Vec::with_capacity(batch.len() * 3 * side * side);
        for image in batch {
            if image.dims() != expected {
                return Err(ModelError::shape_mismatch(
                    format!("{}x{}x{}", expected.0, expected.1, expected.2),
                    format!(
                        "{}x{}x{}",
                        image.channels(),
                        image.height(),
                        image.width()
                    ),
                ));
            }
            flat.extend_from_slice(image.data());
        }

        let device = self.devices().into_iter().next().unwrap_or_default();
        let data = TensorData::new(flat, [batch.len(), 3, side, side]);
        let input = Tensor::<B, 4>::from_data(data, &device);

        let output = self.predict(input);
        let values: Vec<f32> = output
            .into_data()
            .to_vec()
            .map_err(|e| ModelError::tensor_data(format!("{e:?}")))?;

        let joints = Self::num_joints(self);
        let poses = values
            .chunks_exact(2 * joints)
            .map(|coords| {
                let pairs: Vec<[f32; 2]> =
                    coords.chunks_exact(2).map(|xy| [xy[0], xy[1]]).collect();
                Pose::from_xy(&pairs)
            })
            .collect();

        Ok(poses)
    }
}
