//! Model weights persistence via Burn recorders.

use std::path::Path;

use burn::module::Module;
use burn::prelude::Backend;
use burn::record::{BinFileRecorder, FullPrecisionSettings, NamedMpkFileRecorder, Recorder};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Supported weights file formats.
///
/// # Example
///
/// ```
/// use pose_models::WeightsFormat;
///
/// assert_eq!(WeightsFormat::from_extension("bin"), Some(WeightsFormat::Binary));
/// assert_eq!(WeightsFormat::from_extension("mpk"), Some(WeightsFormat::NamedMpk));
/// assert_eq!(WeightsFormat::from_extension("npz"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WeightsFormat {
    /// Burn's compact binary record (`.bin` / `.burn`).
    #[default]
    Binary,

    /// Named MessagePack record (`.mpk`), robust to field reordering.
    NamedMpk,
}

impl WeightsFormat {
    /// Determines the format from a file extension.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "bin" | "burn" => Some(Self::Binary),
            "mpk" => Some(Self::NamedMpk),
            _ => None,
        }
    }

    /// Determines the format from a file path.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Returns the canonical file extension.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Binary => "bin",
            Self::NamedMpk => "mpk",
        }
    }
}

impl std::fmt::Display for WeightsFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Saves model weights, appending the format's extension to `path`.
///
/// Returns the full path written.
///
/// # Errors
///
/// Returns `ModelError::WeightsSave` if recording fails.
pub fn save_weights<B, M>(model: &M, path: &str, format: WeightsFormat) -> Result<String>
where
    B: Backend,
    M: Module<B>,
{
    let full_path = format!("{}.{}", path, format.extension());
    let record = model.clone().into_record();

    match format {
        WeightsFormat::Binary => BinFileRecorder::<FullPrecisionSettings>::new()
            .record(record, full_path.clone().into())
            .map_err(|e| ModelError::weights_save(&full_path, e.to_string()))?,
        WeightsFormat::NamedMpk => NamedMpkFileRecorder::<FullPrecisionSettings>::new()
            .record(record, full_path.clone().into())
            .map_err(|e| ModelError::weights_save(&full_path, e.to_string()))?,
    }

    Ok(full_path)
}

/// Loads weights from `path` into an existing model instance.
///
/// The format is inferred from the file extension.
///
/// # Errors
///
/// Returns `WeightsNotFound` if the file does not exist,
/// `UnsupportedFormat` if the extension is unknown, or `WeightsLoad` if
/// the record cannot be read into the model.
pub fn load_weights<B, M>(model: M, path: impl AsRef<Path>, device: &B::Device) -> Result<M>
where
    B: Backend,
    M: Module<B>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Err(ModelError::weights_not_found(path.to_string_lossy()));
    }

    let format = WeightsFormat::from_path(path)
        .ok_or_else(|| ModelError::unsupported_format(path.to_string_lossy()))?;

    let loaded = match format {
        WeightsFormat::Binary => model
            .load_file(path, &BinFileRecorder::<FullPrecisionSettings>::new(), device)
            .map_err(|e| ModelError::weights_load(path.to_string_lossy(), e.to_string()))?,
        WeightsFormat::NamedMpk => model
            .load_file(
                path,
                &NamedMpkFileRecorder::<FullPrecisionSettings>::new(),
                device,
            )
            .map_err(|e| ModelError::weights_load(path.to_string_lossy(), e.to_string()))?,
    };

    Ok(loaded)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use burn_ndarray::NdArray;

    use super::*;
    use crate::posenet::{PoseNet, PoseNetConfig};

    type TestBackend = NdArray<f32>;

    #[test]
    fn format_from_extension() {
        assert_eq!(WeightsFormat::from_extension("bin"), Some(WeightsFormat::Binary));
        assert_eq!(WeightsFormat::from_extension("BURN"), Some(WeightsFormat::Binary));
        assert_eq!(WeightsFormat::from_extension("mpk"), Some(WeightsFormat::NamedMpk));
        assert_eq!(WeightsFormat::from_extension("json"), None);
    }

    #[test]
    fn format_from_path() {
        assert_eq!(
            WeightsFormat::from_path(Path::new("/models/pose.bin")),
            Some(WeightsFormat::Binary)
        );
        assert_eq!(
            WeightsFormat::from_path(Path::new("pose.mpk")),
            Some(WeightsFormat::NamedMpk)
        );
        assert_eq!(WeightsFormat::from_path(Path::new("pose")), None);
    }

    #[test]
    fn format_display() {
        assert_eq!(WeightsFormat::Binary.to_string(), "bin");
        assert_eq!(WeightsFormat::NamedMpk.to_string(), "mpk");
    }

    #[test]
    fn save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("pose").to_string_lossy().into_owned();

        let device = <TestBackend as Backend>::Device::default();
        let config = PoseNetConfig::new(2).with_input_size(67);
        let model = PoseNet::<TestBackend>::new(config, &device);

        let full_path = save_weights(&model, &base, WeightsFormat::Binary).unwrap();
        assert!(full_path.ends_with(".bin"));

        let fresh = PoseNet::<TestBackend>::new(config, &device);
        let loaded = load_weights(fresh, &full_path, &device);
        assert!(loaded.is_ok());
    }

    #[test]
    fn load_missing_file() {
        let device = <TestBackend as Backend>::Device::default();
        let config = PoseNetConfig::new(2).with_input_size(67);
        let model = PoseNet::<TestBackend>::new(config, &device);

        let err = load_weights(model, "/no/such/pose.bin", &device).unwrap_err();
        assert!(matches!(err, ModelError::WeightsNotFound(_)));
    }

    #[test]
    fn load_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pose.npz");
        std::fs::write(&path, b"not a record").unwrap();

        let device = <TestBackend as Backend>::Device::default();
        let config = PoseNetConfig::new(2).with_input_size(67);
        let model = PoseNet::<TestBackend>::new(config, &device);

        let err = load_weights(model, &path, &device).unwrap_err();
        assert!(matches!(err, ModelError::UnsupportedFormat(_)));
    }
}
