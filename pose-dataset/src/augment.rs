//! Data augmentation: stride-aligned random crop and eigen noise.

use nalgebra::{Matrix3, Vector3};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

use pose_types::{ChwImage, Pose};

use crate::error::{DatasetError, Result};

/// Pixel margin kept around the keypoint spread inside the crop window.
const SPREAD_MARGIN: i64 = 3;

/// Standard deviation of the eigen-noise scale factor.
const NOISE_SIGMA: f64 = 0.1;

/// Crop window `[min, max)` for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AxisCrop {
    min: usize,
    max: usize,
}

/// Draws a crop window for one axis.
///
/// The window always contains `[p_min, p_max]` with at least a 1px margin,
/// spans at least `kernel_size`, and removes a stride-aligned number of
/// pixels. Returns `None` when no valid window exists (keypoints span
/// nearly the whole axis); the caller then leaves the axis uncropped.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]
fn draw_axis_crop<R: Rng>(
    size: usize,
    p_min: f32,
    p_max: f32,
    kernel_size: usize,
    stride: usize,
    rng: &mut R,
) -> Option<AxisCrop> {
    let size = size as i64;
    let spread = f64::from(p_max - p_min).ceil() as i64 + SPREAD_MARGIN;
    let window = spread.max(kernel_size as i64);

    let residual = size - window;
    if residual < 0 {
        return None;
    }

    // Snap the total removed width down to the stride grid.
    let removed = rng.gen_range(0..=residual) / stride as i64 * stride as i64;

    let lower = (f64::from(p_max).floor() as i64 - (size - removed) + 2).max(0);
    let upper = (f64::from(p_min).floor() as i64 - 1).min(removed);
    if lower > upper {
        return None;
    }

    let min = rng.gen_range(lower..=upper);
    let max = size - (removed - min);

    Some(AxisCrop {
        min: min as usize,
        max: max as usize,
    })
}

/// Randomly crops an image around its pose.
///
/// Each axis is cropped independently: the crop removes a stride-aligned
/// amount of slack while keeping the full keypoint bounding box (plus
/// margin) inside a window at least `kernel_size` wide. Axes without a
/// valid window are left at full extent rather than producing an inverted
/// slice.
///
/// Returns a fresh image and the pose re-expressed in crop coordinates;
/// neither input is mutated.
///
/// # Errors
///
/// Returns an error if the pose is empty or the crop slice fails.
pub fn random_crop<R: Rng>(
    image: &ChwImage,
    pose: &Pose,
    kernel_size: usize,
    stride: usize,
    rng: &mut R,
) -> Result<(ChwImage, Pose)> {
    let (_, height, width) = image.dims();
    let (min_x, min_y, max_x, max_y) = pose
        .bounding_box()
        .ok_or_else(|| DatasetError::augmentation("cannot crop around an empty pose"))?;

    let x_crop = match draw_axis_crop(width, min_x, max_x, kernel_size, stride, rng) {
        Some(window) => window,
        None => {
            debug!(axis = "x", size = width, "No valid crop window, axis left uncropped");
            AxisCrop { min: 0, max: width }
        }
    };
    let y_crop = match draw_axis_crop(height, min_y, max_y, kernel_size, stride, rng) {
        Some(window) => window,
        None => {
            debug!(axis = "y", size = height, "No valid crop window, axis left uncropped");
            AxisCrop {
                min: 0,
                max: height,
            }
        }
    };

    let cropped = image
        .cropped(x_crop.min, x_crop.max, y_crop.min, y_crop.max)
        .map_err(|e| DatasetError::augmentation(e.to_string()))?;

    #[allow(clippy::cast_precision_loss)]
    let translated = pose.translated(-(x_crop.min as f32), -(y_crop.min as f32));

    Ok((cropped, translated))
}

/// Per-channel covariance matrix of a 3-channel image.
fn channel_covariance(image: &ChwImage) -> Matrix3<f64> {
    let n = image.height() * image.width();

    let mut means = [0.0f64; 3];
    for (c, mean) in means.iter_mut().enumerate() {
        *mean = image.channel(c).iter().map(|&v| f64::from(v)).sum::<f64>();
        #[allow(clippy::cast_precision_loss)]
        {
            *mean /= n as f64;
        }
    }

    let mut cov = Matrix3::zeros();
    for a in 0..3 {
        for b in a..3 {
            let sum: f64 = image
                .channel(a)
                .iter()
                .zip(image.channel(b))
                .map(|(&va, &vb)| (f64::from(va) - means[a]) * (f64::from(vb) - means[b]))
                .sum();
            #[allow(clippy::cast_precision_loss)]
            let value = sum / (n as f64 - 1.0);
            cov[(a, b)] = value;
            cov[(b, a)] = value;
        }
    }

    cov
}

/// Adds eigen noise (fancy-PCA color jitter) to a 3-channel image.
///
/// A single Gaussian scale factor perturbs each channel along the
/// transposed eigenbasis of the channel covariance, scaled by the
/// eigenvalue square roots. The result is clamped to `[0, 255]`. Operates
/// on a copy; the input is never mutated.
///
/// # Errors
///
/// Returns an error if the image is not 3-channel.
pub fn eigen_noise<R: Rng>(image: &ChwImage, rng: &mut R) -> Result<ChwImage> {
    if image.channels() != 3 {
        return Err(DatasetError::augmentation(format!(
            "eigen noise requires a 3-channel image, got {}",
            image.channels()
        )));
    }

    // Covariance needs at least two pixels.
    if image.height() * image.width() < 2 {
        return Ok(image.clone());
    }

    let cov = channel_covariance(image);
    let eigen = cov.symmetric_eigen();

    // Numerical jitter can push tiny eigenvalues below zero.
    let sqrt_l = Vector3::from_fn(|i, _| eigen.eigenvalues[i].max(0.0).sqrt());

    let normal = Normal::new(0.0, NOISE_SIGMA)
        .map_err(|e| DatasetError::augmentation(e.to_string()))?;
    let alpha = normal.sample(rng);

    let shift = eigen.eigenvectors.transpose() * sqrt_l * alpha;

    let mut noisy = image.clone();
    for c in 0..3 {
        #[allow(clippy::cast_possible_truncation)]
        let delta = shift[c] as f32;
        for value in noisy.channel_mut(c) {
            *value += delta;
        }
    }

    Ok(noisy.clamped(0.0, 255.0))
}
