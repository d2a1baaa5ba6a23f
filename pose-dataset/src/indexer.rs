//! The pose dataset indexer.

use std::path::Path;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use pose_types::{ChwImage, Manifest, Pose};

use crate::augment;
use crate::config::IndexerConfig;
use crate::error::{DatasetError, Result};
use crate::loader;

/// One normalized training example.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseExample {
    /// CHW image with pixel values in `[0, 1]`.
    pub image: ChwImage,

    /// Joint coordinates in the (possibly cropped) image's pixel space.
    pub pose: Pose,

    /// Per-joint visibility flags.
    pub visibility: Vec<u8>,
}

/// An indexed pose dataset.
///
/// The manifest is parsed once at construction and immutable afterwards.
/// Examples are produced lazily per access and never cached: each
/// `get_example` call decodes the image fresh, augments it (when enabled),
/// and normalizes pixel values into `[0, 1]`.
///
/// The indexer owns its RNG, seeded from [`IndexerConfig::seed`], so
/// augmentation sequences are reproducible. `get_example` takes `&mut self`
/// because augmentation draws advance that RNG; the parsed annotation
/// arrays themselves are never mutated.
///
/// # Example
///
/// ```no_run
/// use pose_dataset::{IndexerConfig, PoseDataset};
///
/// let config = IndexerConfig::default().with_seed(42);
/// let mut dataset = PoseDataset::from_manifest_path("train.csv", config)?;
///
/// let example = dataset.get_example(0)?;
/// assert!(example.image.data().iter().all(|&v| (0.0..=1.0).contains(&v)));
/// # Ok::<(), pose_dataset::DatasetError>(())
/// ```
#[derive(Debug)]
pub struct PoseDataset {
    manifest: Manifest,
    config: IndexerConfig,
    rng: ChaCha8Rng,
}

impl PoseDataset {
    /// Builds a dataset from a parsed manifest.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::InvalidConfig` if the configuration is
    /// invalid.
    pub fn from_manifest(manifest: Manifest, config: IndexerConfig) -> Result<Self> {
        if !config.is_valid() {
            return Err(DatasetError::invalid_config(
                "kernel_size and stride must both be at least 1",
            ));
        }

        let rng = config
            .seed
            .map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);

        info!(
            entries = manifest.len(),
            joints = manifest.joint_count().unwrap_or(0),
            augment = config.augment,
            "Loaded pose dataset"
        );

        Ok(Self {
            manifest,
            config,
            rng,
        })
    }

    /// Builds a dataset by parsing a manifest file.
    ///
    /// # Errors
    ///
    /// Returns a manifest error for malformed files, an IO error if the
    /// file cannot be read, or `InvalidConfig` for a bad configuration.
    pub fn from_manifest_path(path: impl AsRef<Path>, config: IndexerConfig) -> Result<Self> {
        let manifest = Manifest::from_path(path)?;
        Self::from_manifest(manifest, config)
    }

    /// Returns the number of examples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.manifest.len()
    }

    /// Returns `true` if the dataset has no examples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.manifest.is_empty()
    }

    /// Returns the per-example joint count, or `None` for an empty dataset.
    #[must_use]
    pub fn joint_count(&self) -> Option<usize> {
        self.manifest.joint_count()
    }

    /// Returns the indexer configuration.
    #[must_use]
    pub const fn config(&self) -> &IndexerConfig {
        &self.config
    }

    /// Loads, augments, and normalizes example `index`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` for an invalid index, `ImageLoad` if the
    /// referenced image cannot be read or decoded, or an augmentation
    /// error.
    pub fn get_example(&mut self, index: usize) -> Result<PoseExample> {
        let entry = self
            .manifest
            .get(index)
            .ok_or_else(|| DatasetError::index_out_of_range(index, self.manifest.len()))?;

        let mut image = loader::load_image(&entry.image_path)?;
        let mut pose = entry.pose.clone();
        let visibility = entry.visibility.clone();

        if self.config.augment {
            let (cropped, translated) = augment::random_crop(
                &image,
                &pose,
                self.config.kernel_size,
                self.config.stride,
                &mut self.rng,
            )?;
            image = augment::eigen_noise(&cropped, &mut self.rng)?;
            pose = translated;
        }

        Ok(PoseExample {
            image: image.scaled(1.0 / 255.0),
            pose,
            visibility,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use std::io::Write;
    use std::path::Path;

    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    use super::*;

    /// Writes a 64x48 gradient PNG and a manifest referencing it, one line
    /// per pose given.
    fn fixture(poses: &[&str]) -> (TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let image_path = dir.path().join("frame.png");

        let mut img = RgbImage::new(64, 48);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = Rgb([
                (40 + x * 2) as u8,
                (30 + y * 3) as u8,
                (20 + x + y) as u8,
            ]);
        }
        img.save(&image_path).unwrap();

        let manifest_path = dir.path().join("manifest.csv");
        let mut file = std::fs::File::create(&manifest_path).unwrap();
        for joints in poses {
            writeln!(file, "{},{}", image_path.display(), joints).unwrap();
        }

        (dir, manifest_path)
    }

    fn raw_pixels(path: &Path) -> ChwImage {
        crate::loader::load_image(path).unwrap()
    }

    #[test]
    fn len_matches_manifest_lines() {
        let (_dir, manifest) = fixture(&["20,15,1,35,30,1", "22,18,1,33,28,0"]);
        let dataset =
            PoseDataset::from_manifest_path(&manifest, IndexerConfig::inference()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert!(!dataset.is_empty());
        assert_eq!(dataset.joint_count(), Some(2));
    }

    #[test]
    fn get_example_without_augmentation() {
        let (dir, manifest) = fixture(&["20,15,1,35,30,0"]);
        let mut dataset =
            PoseDataset::from_manifest_path(&manifest, IndexerConfig::inference()).unwrap();

        let example = dataset.get_example(0).unwrap();
        assert_eq!(example.image.dims(), (3, 48, 64));
        assert_eq!(example.visibility, vec![1, 0]);
        assert_eq!(example.pose.get(0).unwrap().x, 20.0);
        assert_eq!(example.pose.get(1).unwrap().y, 30.0);

        // Pixels are exactly the raw decode divided by 255.
        let raw = raw_pixels(&dir.path().join("frame.png"));
        for (got, want) in example.image.data().iter().zip(raw.data()) {
            assert_eq!(*got, want / 255.0);
        }
    }

    #[test]
    fn get_example_pixels_in_unit_range() {
        let (_dir, manifest) = fixture(&["20,15,1,35,30,1"]);
        let config = IndexerConfig::default().with_seed(9);
        let mut dataset = PoseDataset::from_manifest_path(&manifest, config).unwrap();

        for _ in 0..10 {
            let example = dataset.get_example(0).unwrap();
            assert!(example
                .image
                .data()
                .iter()
                .all(|&v| (0.0..=1.0).contains(&v)));
        }
    }

    #[test]
    fn get_example_augmented_geometry() {
        let (_dir, manifest) = fixture(&["20,15,1,35,30,1"]);
        let config = IndexerConfig::default().with_seed(1);
        let mut dataset = PoseDataset::from_manifest_path(&manifest, config).unwrap();

        for _ in 0..10 {
            let example = dataset.get_example(0).unwrap();
            let (_, h, w) = example.image.dims();

            // Removed amount is stride aligned per axis.
            assert_eq!((64 - w) % 4, 0);
            assert_eq!((48 - h) % 4, 0);

            // Translated keypoints stay inside the crop window.
            let (min_x, min_y, max_x, max_y) = example.pose.bounding_box().unwrap();
            assert!(min_x >= 0.0 && min_y >= 0.0);
            #[allow(clippy::cast_precision_loss)]
            {
                assert!(max_x < w as f32 && max_y < h as f32);
            }
        }
    }

    #[test]
    fn get_example_reproducible_with_seed() {
        let (_dir, manifest) = fixture(&["20,15,1,35,30,1"]);

        let config = IndexerConfig::default().with_seed(1234);
        let mut a = PoseDataset::from_manifest_path(&manifest, config).unwrap();
        let mut b = PoseDataset::from_manifest_path(&manifest, config).unwrap();

        for i in 0..3 {
            let ea = a.get_example(0).unwrap();
            let eb = b.get_example(0).unwrap();
            assert_eq!(ea, eb, "draw {i} diverged");
        }
    }

    #[test]
    fn get_example_out_of_range() {
        let (_dir, manifest) = fixture(&["20,15,1,35,30,1"]);
        let mut dataset =
            PoseDataset::from_manifest_path(&manifest, IndexerConfig::inference()).unwrap();

        let err = dataset.get_example(1).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::IndexOutOfRange { index: 1, len: 1 }
        ));
    }

    #[test]
    fn get_example_missing_image() {
        let dir = tempfile::tempdir().unwrap();
        let manifest_path = dir.path().join("manifest.csv");
        std::fs::write(&manifest_path, "missing.png,10,10,1\n").unwrap();

        let mut dataset =
            PoseDataset::from_manifest_path(&manifest_path, IndexerConfig::inference()).unwrap();
        let err = dataset.get_example(0).unwrap_err();
        assert!(matches!(err, DatasetError::ImageLoad { .. }));
    }

    #[test]
    fn degenerate_keypoint_spread_never_panics() {
        // Keypoints span almost the entire image on both axes.
        let (_dir, manifest) = fixture(&["1,1,1,62,46,1"]);
        let config = IndexerConfig::default().with_seed(5);
        let mut dataset = PoseDataset::from_manifest_path(&manifest, config).unwrap();

        let example = dataset.get_example(0).unwrap();
        assert_eq!(example.image.dims(), (3, 48, 64));
        assert_eq!(example.pose.get(0).unwrap().x, 1.0);
    }

    #[test]
    fn invalid_config_rejected() {
        let (_dir, manifest) = fixture(&["20,15,1,35,30,1"]);
        let config = IndexerConfig::default().with_stride(0);
        let err = PoseDataset::from_manifest_path(&manifest, config).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidConfig(_)));
    }

    #[test]
    fn malformed_manifest_fails_construction() {
        let dir = tempfile::tempdir().unwrap();
        let manifest_path = dir.path().join("manifest.csv");
        std::fs::write(&manifest_path, "a.png,10,20\n").unwrap();

        let err =
            PoseDataset::from_manifest_path(&manifest_path, IndexerConfig::inference()).unwrap_err();
        assert!(matches!(err, DatasetError::Manifest(_)));
    }
}
