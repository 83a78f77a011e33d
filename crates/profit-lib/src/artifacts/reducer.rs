//! Principal-component projection
//!
//! A pre-trained dimensionality reduction step: the input vector is centered
//! with the training mean and projected onto a (features x components)
//! rotation matrix. Applied after scaling, never before.

use super::Transformer;
use crate::error::{ArtifactError, TransformError};
use anyhow::Context;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
pub struct PcaReducer {
    rotation: Option<Array2<f64>>,
    mean: Option<Array1<f64>>,
}

impl PcaReducer {
    /// An unfitted reducer, unusable until a model is supplied.
    pub fn new() -> Self {
        Self {
            rotation: None,
            mean: None,
        }
    }

    /// Build a reducer from an externally computed rotation matrix and mean.
    pub fn with_model(rotation: Array2<f64>, mean: Array1<f64>) -> anyhow::Result<Self> {
        if rotation.nrows() != mean.len() {
            anyhow::bail!(
                "rotation has {} feature rows but mean has {} features",
                rotation.nrows(),
                mean.len()
            );
        }
        Ok(Self {
            rotation: Some(rotation),
            mean: Some(mean),
        })
    }

    /// Whether a projection model is present.
    pub fn is_fitted(&self) -> bool {
        self.rotation.is_some() && self.mean.is_some()
    }

    /// Number of components the projection produces.
    pub fn n_components(&self) -> usize {
        self.rotation.as_ref().map_or(0, |r| r.ncols())
    }

    /// Serialize to `path` with bincode. Unfitted reducers may be saved; they
    /// are rejected as unfitted when loaded back.
    pub fn save_model(&self, path: &Path) -> anyhow::Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        bincode::serde::encode_into_std_write(self, &mut writer, bincode::config::standard())
            .context("Failed to serialize reducer")?;
        Ok(())
    }

    /// Deserialize from `path` and verify the reducer is fitted and
    /// internally consistent.
    pub fn load_model(path: &Path) -> Result<Self, ArtifactError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ArtifactError::Missing(path.to_path_buf()),
            _ => ArtifactError::Invalid {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        })?;
        let mut reader = BufReader::new(file);
        let reducer: PcaReducer =
            bincode::serde::decode_from_std_read(&mut reader, bincode::config::standard())
                .map_err(|e| ArtifactError::Invalid {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })?;

        match (&reducer.rotation, &reducer.mean) {
            (Some(rotation), Some(mean)) => {
                if rotation.nrows() != mean.len() {
                    return Err(ArtifactError::Invalid {
                        path: path.to_path_buf(),
                        reason: format!(
                            "rotation has {} feature rows but mean has {} features",
                            rotation.nrows(),
                            mean.len()
                        ),
                    });
                }
            }
            _ => return Err(ArtifactError::Unfitted { name: "PCA reducer" }),
        }

        Ok(reducer)
    }
}

impl Default for PcaReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Transformer for PcaReducer {
    fn transform(&self, input: &Array1<f64>) -> Result<Array1<f64>, TransformError> {
        let (rotation, mean) = match (&self.rotation, &self.mean) {
            (Some(rotation), Some(mean)) => (rotation, mean),
            _ => return Err(TransformError::NotFitted),
        };
        if input.len() != mean.len() {
            return Err(TransformError::DimensionMismatch {
                expected: mean.len(),
                actual: input.len(),
            });
        }
        Ok((input - mean).dot(rotation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};
    use tempfile::TempDir;

    fn reducer_3_to_2() -> PcaReducer {
        // Components pick out (x0 + x2) and (2 * x1).
        let rotation = arr2(&[[1.0, 0.0], [0.0, 2.0], [1.0, 0.0]]);
        PcaReducer::with_model(rotation, arr1(&[1.0, 1.0, 1.0])).unwrap()
    }

    #[test]
    fn test_new_is_unfitted() {
        let reducer = PcaReducer::new();
        assert!(!reducer.is_fitted());
        assert_eq!(reducer.n_components(), 0);
        assert_eq!(
            reducer.transform(&arr1(&[1.0, 2.0, 3.0])),
            Err(TransformError::NotFitted)
        );
    }

    #[test]
    fn test_projection() {
        let reducer = reducer_3_to_2();
        assert_eq!(reducer.n_components(), 2);
        let out = reducer.transform(&arr1(&[2.0, 3.0, 4.0])).unwrap();
        assert_eq!(out, arr1(&[4.0, 4.0]));
    }

    #[test]
    fn test_dimension_mismatch() {
        let reducer = reducer_3_to_2();
        assert_eq!(
            reducer.transform(&arr1(&[1.0, 2.0])),
            Err(TransformError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_inconsistent_model_rejected() {
        let rotation = arr2(&[[1.0], [0.0]]);
        assert!(PcaReducer::with_model(rotation, arr1(&[0.0])).is_err());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pca.bin");

        let reducer = reducer_3_to_2();
        reducer.save_model(&path).unwrap();

        let loaded = PcaReducer::load_model(&path).unwrap();
        assert_eq!(loaded.n_components(), 2);
        assert_eq!(
            loaded.transform(&arr1(&[2.0, 3.0, 4.0])).unwrap(),
            arr1(&[4.0, 4.0])
        );
    }

    #[test]
    fn test_load_unfitted_is_distinct_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pca.bin");
        PcaReducer::new().save_model(&path).unwrap();

        match PcaReducer::load_model(&path) {
            Err(ArtifactError::Unfitted { .. }) => {}
            other => panic!("expected Unfitted, got {:?}", other),
        }
    }

    #[test]
    fn test_load_garbage_is_invalid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pca.bin");
        std::fs::write(&path, b"\xff\xff\xff\xff").unwrap();

        match PcaReducer::load_model(&path) {
            Err(ArtifactError::Invalid { .. }) => {}
            other => panic!("expected Invalid, got {:?}", other),
        }
    }
}
