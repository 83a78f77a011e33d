//! Error taxonomy
//!
//! Every error here is recovered locally: a failed load degrades the
//! artifact to the `missing` or `invalid` status and a failed transform
//! passes the vector through unchanged. Nothing in this module aborts the
//! process or blocks the other artifacts.

use std::path::PathBuf;
use thiserror::Error;

/// Why an artifact could not be made available for the session.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// The artifact file does not exist under the artifact directory.
    #[error("artifact file not found: {}", .0.display())]
    Missing(PathBuf),

    /// The file decoded but the object carries no training statistics.
    #[error("{name} was loaded but is not fitted")]
    Unfitted { name: &'static str },

    /// The file exists but could not be decoded into a usable object.
    #[error("failed to decode artifact at {}: {reason}", .path.display())]
    Invalid { path: PathBuf, reason: String },
}

/// Why a transform invocation failed at prediction time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    #[error("transform invoked before the model was fitted")]
    NotFitted,

    #[error("input has {actual} features but the model expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}
