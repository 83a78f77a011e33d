//! Standard-score feature scaler
//!
//! A pre-trained standardization step: per-feature mean and standard
//! deviation learned at training time, applied as `(x - mean) / scale`.
//! The scaler must be fitted (carry both statistics) before it is usable.

use super::Transformer;
use crate::error::{ArtifactError, TransformError};
use anyhow::Context;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::Path;

/// Standard deviations this small are degenerate; they are replaced by 1.0
/// so that transforming never divides by zero.
const MIN_SCALE: f64 = 1e-9;

#[derive(Debug, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Option<Array1<f64>>,
    scale: Option<Array1<f64>>,
}

impl StandardScaler {
    /// An unfitted scaler, unusable until statistics are supplied.
    pub fn new() -> Self {
        Self {
            mean: None,
            scale: None,
        }
    }

    /// Build a scaler from externally computed statistics. Standard
    /// deviations that are not strictly positive are sanitized to 1.0.
    pub fn with_stats(mean: Array1<f64>, raw_std: Array1<f64>) -> anyhow::Result<Self> {
        if mean.len() != raw_std.len() {
            anyhow::bail!(
                "mean has {} features but scale has {}",
                mean.len(),
                raw_std.len()
            );
        }
        if raw_std.iter().any(|s| !s.is_finite()) {
            anyhow::bail!("standard deviations contain non-finite values");
        }
        let scale = raw_std.mapv(|s| if s > MIN_SCALE { s } else { 1.0 });
        Ok(Self {
            mean: Some(mean),
            scale: Some(scale),
        })
    }

    /// Whether training statistics are present.
    pub fn is_fitted(&self) -> bool {
        self.mean.is_some() && self.scale.is_some()
    }

    /// Serialize to `path` with bincode. Unfitted scalers may be saved; they
    /// are rejected as unfitted when loaded back.
    pub fn save_model(&self, path: &Path) -> anyhow::Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        bincode::serde::encode_into_std_write(self, &mut writer, bincode::config::standard())
            .context("Failed to serialize scaler")?;
        Ok(())
    }

    /// Deserialize from `path` and verify the scaler is fitted. A decodable
    /// but unfitted scaler is `ArtifactError::Unfitted`, distinct from an
    /// undecodable file.
    pub fn load_model(path: &Path) -> Result<Self, ArtifactError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ArtifactError::Missing(path.to_path_buf()),
            _ => ArtifactError::Invalid {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        })?;
        let mut reader = BufReader::new(file);
        let scaler: StandardScaler =
            bincode::serde::decode_from_std_read(&mut reader, bincode::config::standard())
                .map_err(|e| ArtifactError::Invalid {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })?;

        match (&scaler.mean, &scaler.scale) {
            (Some(mean), Some(scale)) => {
                if mean.len() != scale.len() {
                    return Err(ArtifactError::Invalid {
                        path: path.to_path_buf(),
                        reason: format!(
                            "mean has {} features but scale has {}",
                            mean.len(),
                            scale.len()
                        ),
                    });
                }
                if scale.iter().any(|&s| !s.is_finite() || s <= 0.0) {
                    return Err(ArtifactError::Invalid {
                        path: path.to_path_buf(),
                        reason: "scale vector contains non-positive or non-finite values"
                            .to_string(),
                    });
                }
            }
            _ => return Err(ArtifactError::Unfitted { name: "scaler" }),
        }

        Ok(scaler)
    }
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl Transformer for StandardScaler {
    fn transform(&self, input: &Array1<f64>) -> Result<Array1<f64>, TransformError> {
        let (mean, scale) = match (&self.mean, &self.scale) {
            (Some(mean), Some(scale)) => (mean, scale),
            _ => return Err(TransformError::NotFitted),
        };
        if input.len() != mean.len() {
            return Err(TransformError::DimensionMismatch {
                expected: mean.len(),
                actual: input.len(),
            });
        }
        Ok((input - mean) / scale)
    }
}
