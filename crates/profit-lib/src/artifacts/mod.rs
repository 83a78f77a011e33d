//! Pre-trained artifacts and their capability contracts
//!
//! Artifacts are opaque, externally trained objects read from disk once at
//! startup. The pipeline and the prediction engine depend only on the
//! `Transformer` and `Predictor` contracts, never on concrete model types.

mod loader;
mod reducer;
mod regressor;
mod scaler;

pub use loader::{ArtifactSet, RegressorSlot};
pub use reducer::PcaReducer;
pub use regressor::OnnxRegressor;
pub use scaler::StandardScaler;

use crate::error::TransformError;
use anyhow::Result;
use ndarray::Array1;
use serde::Serialize;
use std::fmt;

/// Fixed artifact filenames, resolved against the artifact directory.
pub const SCALER_FILE: &str = "scaler.bin";
pub const REDUCER_FILE: &str = "pca.bin";
pub const REGRESSOR_FILES: [(&str, &str); 3] = [
    ("MLP Regressor", "mlp_regressor.onnx"),
    ("HistGradient Boosting", "hist_gradient_boosting.onnx"),
    ("LGBM", "lgbm.onnx"),
];

pub const SCALER_NAME: &str = "Scaler";
pub const REDUCER_NAME: &str = "PCA";

/// A fitted preprocessing step mapping one feature vector to another.
pub trait Transformer {
    fn transform(&self, input: &Array1<f64>) -> Result<Array1<f64>, TransformError>;
}

/// A trained model mapping a feature vector to a single continuous output.
pub trait Predictor {
    fn predict(&self, input: &Array1<f64>) -> Result<f64>;
}

/// Load outcome of one artifact, fixed for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactStatus {
    Loaded,
    Missing,
    Invalid,
}

impl fmt::Display for ArtifactStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactStatus::Loaded => write!(f, "loaded"),
            ArtifactStatus::Missing => write!(f, "missing"),
            ArtifactStatus::Invalid => write!(f, "invalid"),
        }
    }
}

/// An artifact slot: the deserialized object when loading succeeded, or the
/// reason it is unavailable. Read-only after initialization.
#[derive(Debug)]
pub enum Artifact<T> {
    Loaded(T),
    Missing,
    Invalid,
}

impl<T> Artifact<T> {
    pub fn status(&self) -> ArtifactStatus {
        match self {
            Artifact::Loaded(_) => ArtifactStatus::Loaded,
            Artifact::Missing => ArtifactStatus::Missing,
            Artifact::Invalid => ArtifactStatus::Invalid,
        }
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            Artifact::Loaded(inner) => Some(inner),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Artifact::Loaded(_))
    }
}

/// Load outcome of one artifact, for the presenter.
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactReport {
    pub name: &'static str,
    pub file: &'static str,
    pub status: ArtifactStatus,
}
