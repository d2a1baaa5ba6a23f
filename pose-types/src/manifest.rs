//! Pose manifest parsing.
//!
//! A manifest is a plain-text file listing one training example per line:
//!
//! ```text
//! images/000001.png,10.0,20.0,1,30.0,40.0,1
//! ```
//!
//! The first field is the image path; the remaining fields are flattened
//! `(x, y, visibility)` triples, one per joint. There is no header row.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PoseTypesError, Result};
use crate::keypoint::Pose;

/// One manifest line: an image path with its joint annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Path to the image file, as written in the manifest.
    pub image_path: PathBuf,

    /// Joint coordinates in pixels.
    pub pose: Pose,

    /// Per-joint visibility flags (0 = hidden, 1 = visible).
    pub visibility: Vec<u8>,
}

impl ManifestEntry {
    /// Returns the joint count.
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.pose.len()
    }
}

/// A parsed pose manifest.
///
/// Parsing validates the whole file up front: a single malformed line fails
/// the load, and every entry must annotate the same number of joints.
///
/// # Example
///
/// ```
/// use pose_types::Manifest;
///
/// let manifest = Manifest::from_reader("a.png,10,20,1,30,40,1\n".as_bytes()).unwrap();
/// assert_eq!(manifest.len(), 1);
/// assert_eq!(manifest.joint_count(), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Parses a single manifest line.
    ///
    /// `line_number` is 1-based and used only for error reporting.
    ///
    /// # Errors
    ///
    /// Returns `PoseTypesError::ManifestParse` if the line has no joint
    /// fields, the joint fields are not a multiple of three, or a field
    /// fails to parse.
    pub fn parse_line(line: &str, line_number: usize) -> Result<ManifestEntry> {
        let mut fields = line.split(',');
        let image_path = fields
            .next()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| PoseTypesError::manifest_parse(line_number, "missing image path"))?;

        let rest: Vec<&str> = fields.collect();
        if rest.is_empty() || rest.len() % 3 != 0 {
            return Err(PoseTypesError::manifest_parse(
                line_number,
                format!(
                    "expected a positive multiple of 3 joint fields, got {}",
                    rest.len()
                ),
            ));
        }

        let mut pairs = Vec::with_capacity(rest.len() / 3);
        let mut visibility = Vec::with_capacity(rest.len() / 3);
        for triple in rest.chunks_exact(3) {
            let x: f32 = triple[0].trim().parse().map_err(|_| {
                PoseTypesError::manifest_parse(
                    line_number,
                    format!("invalid x coordinate {:?}", triple[0]),
                )
            })?;
            let y: f32 = triple[1].trim().parse().map_err(|_| {
                PoseTypesError::manifest_parse(
                    line_number,
                    format!("invalid y coordinate {:?}", triple[1]),
                )
            })?;
            let v: u8 = triple[2].trim().parse().map_err(|_| {
                PoseTypesError::manifest_parse(
                    line_number,
                    format!("invalid visibility flag {:?}", triple[2]),
                )
            })?;
            pairs.push([x, y]);
            visibility.push(v);
        }

        Ok(ManifestEntry {
            image_path: PathBuf::from(image_path),
            pose: Pose::from_xy(&pairs),
            visibility,
        })
    }

    /// Parses a manifest from a reader.
    ///
    /// Empty lines are skipped, so a trailing newline does not produce a
    /// phantom entry.
    ///
    /// # Errors
    ///
    /// Returns a parse error for the first malformed line, a
    /// `JointCountMismatch` if entries disagree on joint count, or an IO
    /// error from the reader.
    pub fn from_reader(reader: impl std::io::Read) -> Result<Self> {
        let mut entries = Vec::new();
        let mut joint_count: Option<usize> = None;

        for (idx, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let line_number = idx + 1;
            let entry = Self::parse_line(line.trim_end(), line_number)?;

            match joint_count {
                None => joint_count = Some(entry.joint_count()),
                Some(expected) if expected != entry.joint_count() => {
                    return Err(PoseTypesError::joint_count_mismatch(
                        line_number,
                        expected,
                        entry.joint_count(),
                    ));
                }
                Some(_) => {}
            }

            entries.push(entry);
        }

        Ok(Self { entries })
    }

    /// Parses a manifest file.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file cannot be opened, otherwise as
    /// [`Manifest::from_reader`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    /// Returns the number of entries (non-empty manifest lines).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the manifest has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Gets an entry by index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ManifestEntry> {
        self.entries.get(index)
    }

    /// Returns all entries.
    #[must_use]
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Returns the per-entry joint count, or `None` for an empty manifest.
    ///
    /// All entries share this count; the invariant is enforced at parse
    /// time.
    #[must_use]
    pub fn joint_count(&self) -> Option<usize> {
        self.entries.first().map(ManifestEntry::joint_count)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::keypoint::Keypoint;

    #[test]
    fn parse_line_two_joints() {
        let entry = Manifest::parse_line("img1.png,10,20,1,30,40,1", 1).unwrap();
        assert_eq!(entry.image_path, PathBuf::from("img1.png"));
        assert_eq!(entry.joint_count(), 2);
        assert_eq!(entry.pose.get(0), Some(&Keypoint::new(10.0, 20.0)));
        assert_eq!(entry.pose.get(1), Some(&Keypoint::new(30.0, 40.0)));
        assert_eq!(entry.visibility, vec![1, 1]);
    }

    #[test]
    fn parse_line_float_coordinates() {
        let entry = Manifest::parse_line("a.png,10.5,20.25,0", 1).unwrap();
        assert_eq!(entry.pose.get(0), Some(&Keypoint::new(10.5, 20.25)));
        assert_eq!(entry.visibility, vec![0]);
    }

    #[test]
    fn parse_line_wrong_field_count() {
        let err = Manifest::parse_line("a.png,10,20", 4).unwrap_err();
        assert!(matches!(
            err,
            PoseTypesError::ManifestParse { line: 4, .. }
        ));
    }

    #[test]
    fn parse_line_no_joints() {
        assert!(Manifest::parse_line("a.png", 1).is_err());
    }

    #[test]
    fn parse_line_bad_number() {
        let err = Manifest::parse_line("a.png,ten,20,1", 2).unwrap_err();
        assert!(err.to_string().contains("invalid x coordinate"));
    }

    #[test]
    fn parse_line_bad_visibility() {
        let err = Manifest::parse_line("a.png,10,20,maybe", 2).unwrap_err();
        assert!(err.to_string().contains("invalid visibility flag"));
    }

    #[test]
    fn from_reader_counts_non_empty_lines() {
        let text = "a.png,1,2,1\n\nb.png,3,4,0\n";
        let manifest = Manifest::from_reader(text.as_bytes()).unwrap();
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.joint_count(), Some(1));
        assert_eq!(manifest.get(1).unwrap().image_path, PathBuf::from("b.png"));
    }

    #[test]
    fn from_reader_empty() {
        let manifest = Manifest::from_reader("".as_bytes()).unwrap();
        assert!(manifest.is_empty());
        assert_eq!(manifest.joint_count(), None);
    }

    #[test]
    fn from_reader_joint_count_mismatch() {
        let text = "a.png,1,2,1\nb.png,3,4,0,5,6,1\n";
        let err = Manifest::from_reader(text.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            PoseTypesError::JointCountMismatch {
                line: 2,
                expected: 1,
                actual: 2,
            }
        ));
    }

    #[test]
    fn from_reader_reports_line_numbers_with_blanks() {
        // The blank line still counts toward line numbering.
        let text = "a.png,1,2,1\n\nc.png,bad,2,1\n";
        let err = Manifest::from_reader(text.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            PoseTypesError::ManifestParse { line: 3, .. }
        ));
    }

    #[test]
    fn from_path_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "img1.png,10,20,1,30,40,1").unwrap();
        writeln!(file, "img2.png,50,60,0,70,80,1").unwrap();
        file.flush().unwrap();

        let manifest = Manifest::from_path(file.path()).unwrap();
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.get(1).unwrap().visibility, vec![0, 1]);
    }

    #[test]
    fn from_path_missing_file() {
        let err = Manifest::from_path("/no/such/manifest.csv").unwrap_err();
        assert!(matches!(err, PoseTypesError::Io(_)));
    }

    #[test]
    fn entry_serialization() {
        let entry = Manifest::parse_line("a.png,1,2,1", 1).unwrap();
        let json = serde_json::to_string(&entry);
        assert!(json.is_ok());

        let parsed: std::result::Result<ManifestEntry, _> =
            serde_json::from_str(&json.unwrap_or_default());
        assert!(parsed.is_ok());
    }
}
