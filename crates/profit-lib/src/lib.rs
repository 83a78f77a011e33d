//! Airline profit prediction core
//!
//! Loads a fixed set of pre-trained artifacts (a feature scaler, an optional
//! principal-component reducer, and up to three regression models) once at
//! startup, applies the preprocessing pipeline to a single metrics vector,
//! and dispatches the result to every available regressor independently.

pub mod artifacts;
pub mod engine;
pub mod error;
pub mod models;
pub mod pipeline;

pub use artifacts::{ArtifactReport, ArtifactSet, ArtifactStatus, Predictor, Transformer};
pub use engine::PredictionEngine;
pub use error::{ArtifactError, TransformError};
pub use models::{
    BusinessMetrics, ModelPrediction, PredictionReport, FEATURE_COUNT, FEATURE_NAMES, MONTH_MAX,
    MONTH_MIN,
};
pub use pipeline::Preprocessor;
