//! The pose estimation wrapper.

use std::path::Path;

use burn::prelude::Backend;
use tracing::info;

use pose_dataset::{IndexerConfig, PoseDataset};
use pose_models::{load_weights, PoseNet, PoseNetConfig, PosePredictor};
use pose_types::Pose;

use crate::error::{EstimatorError, Result};

/// Estimates poses for entries of an indexed dataset.
///
/// Composes a [`PosePredictor`] with a [`PoseDataset`]: `estimate(i)`
/// fetches example `i`, wraps its image into a single-item batch, and
/// returns the model's prediction. The predictor is an injected
/// capability, so any model (or a test stub) can stand behind it.
///
/// # Example
///
/// ```no_run
/// use burn_ndarray::NdArray;
/// use pose_estimator::PoseEstimator;
/// use pose_models::{PoseNet, PoseNetConfig};
///
/// let device = Default::default();
/// let mut estimator = PoseEstimator::<PoseNet<NdArray<f32>>>::from_files(
///     PoseNetConfig::new(14),
///     "pose.bin",
///     "val.csv",
///     &device,
/// )?;
///
/// let pose = estimator.estimate(0)?;
/// assert_eq!(pose.len(), 14);
/// # Ok::<(), pose_estimator::EstimatorError>(())
/// ```
#[derive(Debug)]
pub struct PoseEstimator<M: PosePredictor> {
    model: M,
    dataset: PoseDataset,
}

impl<M: PosePredictor> PoseEstimator<M> {
    /// Creates an estimator from a predictor and a dataset.
    ///
    /// # Errors
    ///
    /// Returns `JointCountMismatch` if the dataset annotates a different
    /// joint count than the model regresses.
    pub fn new(model: M, dataset: PoseDataset) -> Result<Self> {
        if let Some(annotated) = dataset.joint_count() {
            if annotated != model.num_joints() {
                return Err(EstimatorError::joint_count_mismatch(
                    model.num_joints(),
                    annotated,
                ));
            }
        }

        info!(
            entries = dataset.len(),
            joints = model.num_joints(),
            "Initialized pose estimator"
        );

        Ok(Self { model, dataset })
    }

    /// Returns the number of dataset entries.
    #[must_use]
    pub fn dataset_size(&self) -> usize {
        self.dataset.len()
    }

    /// Returns the underlying dataset.
    #[must_use]
    pub const fn dataset(&self) -> &PoseDataset {
        &self.dataset
    }

    /// Returns the underlying predictor.
    #[must_use]
    pub const fn model(&self) -> &M {
        &self.model
    }

    /// Estimates the pose for dataset entry `index`.
    ///
    /// # Errors
    ///
    /// Returns the dataset's out-of-range or image-load error, or the
    /// model's prediction error.
    pub fn estimate(&mut self, index: usize) -> Result<Pose> {
        let example = self.dataset.get_example(index)?;
        let mut poses = self
            .model
            .predict_poses(std::slice::from_ref(&example.image))?;

        poses.pop().ok_or_else(|| {
            EstimatorError::prediction("model returned no pose for a single-image batch")
        })
    }
}

impl<B: Backend> PoseEstimator<PoseNet<B>> {
    /// Builds an estimator by loading trained weights and a manifest.
    ///
    /// The dataset is constructed with augmentation disabled, the usual
    /// setting for inference.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidConfig` model error for a bad configuration, a
    /// weights error if the model file cannot be loaded, or a dataset
    /// error if the manifest is malformed.
    pub fn from_files(
        config: PoseNetConfig,
        weights_path: impl AsRef<Path>,
        manifest_path: impl AsRef<Path>,
        device: &B::Device,
    ) -> Result<Self> {
        if !config.is_valid() {
            return Err(pose_models::ModelError::invalid_config(format!(
                "{} joints, {}px input",
                config.num_joints, config.input_size
            ))
            .into());
        }

        let model = PoseNet::new(config, device);
        let model = load_weights(model, weights_path, device)?;
        let dataset = PoseDataset::from_manifest_path(manifest_path, IndexerConfig::inference())?;

        Self::new(model, dataset)
    }
}
