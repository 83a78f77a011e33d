//! Preprocessing pipeline
//!
//! Applies the optional scaler and reducer to a single input vector in a
//! fixed order: scale, then reduce. A stage that fails hands the vector on
//! exactly as it received it; preprocessing never aborts a prediction.

use crate::artifacts::Transformer;
use ndarray::Array1;
use tracing::warn;

pub struct Preprocessor<'a> {
    scaler: Option<&'a dyn Transformer>,
    reducer: Option<&'a dyn Transformer>,
}

impl<'a> Preprocessor<'a> {
    pub fn new(
        scaler: Option<&'a dyn Transformer>,
        reducer: Option<&'a dyn Transformer>,
    ) -> Self {
        Self { scaler, reducer }
    }

    /// Transform one raw feature vector. Output dimensionality is whatever
    /// the last applied stage produces; the input passes through untouched
    /// when no stage is available.
    pub fn apply(&self, features: Array1<f64>) -> Array1<f64> {
        let features = apply_stage("scale", self.scaler, features);
        apply_stage("reduce", self.reducer, features)
    }
}

fn apply_stage(
    stage: &'static str,
    transformer: Option<&dyn Transformer>,
    features: Array1<f64>,
) -> Array1<f64> {
    match transformer {
        Some(transformer) => match transformer.transform(&features) {
            Ok(transformed) => transformed,
            Err(e) => {
                warn!(stage, error = %e, "Transform failed, passing vector through unchanged");
                features
            }
        },
        None => features,
    }
}
