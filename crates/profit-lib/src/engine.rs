//! Prediction engine
//!
//! The engine is the application context: it owns the loaded artifacts for
//! the process lifetime and turns one `BusinessMetrics` snapshot into
//! per-model predictions. Construct it once at startup and pass it by
//! reference; there is no global state.

use crate::artifacts::{ArtifactReport, ArtifactSet, Predictor, Transformer};
use crate::models::{BusinessMetrics, ModelPrediction, PredictionReport};
use crate::pipeline::Preprocessor;
use ndarray::Array1;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, warn};

pub struct PredictionEngine {
    artifacts: ArtifactSet,
}

impl PredictionEngine {
    pub fn new(artifacts: ArtifactSet) -> Self {
        Self { artifacts }
    }

    /// Load every artifact from `artifact_dir` and build the engine.
    /// Always succeeds; unavailable artifacts degrade to placeholders.
    pub fn load(artifact_dir: &Path) -> Self {
        Self::new(ArtifactSet::load(artifact_dir))
    }

    pub fn artifacts(&self) -> &ArtifactSet {
        &self.artifacts
    }

    pub fn artifact_reports(&self) -> Vec<ArtifactReport> {
        self.artifacts.reports()
    }

    /// Run only the preprocessing stages on the current form state.
    pub fn preprocess(&self, metrics: &BusinessMetrics) -> Array1<f64> {
        self.preprocessor().apply(metrics.to_vector())
    }

    /// Predict profit with every available regressor. The vector is built
    /// fresh from the form state and preprocessed once; each regressor then
    /// runs independently, and one model's absence or failure never affects
    /// the others.
    pub fn predict(&self, metrics: &BusinessMetrics) -> PredictionReport {
        let start = Instant::now();
        let features = self.preprocess(metrics);

        let predictions = self
            .artifacts
            .regressors
            .iter()
            .map(|slot| {
                let value = slot.artifact.get().and_then(|model| {
                    match model.predict(&features) {
                        Ok(value) => Some(value),
                        Err(e) => {
                            warn!(model = slot.name, error = %e, "Inference failed");
                            None
                        }
                    }
                });
                ModelPrediction {
                    model: slot.name,
                    value,
                }
            })
            .collect();

        debug!(
            elapsed_us = start.elapsed().as_micros() as u64,
            "Prediction pass completed"
        );

        PredictionReport {
            predictions,
            generated_at: chrono::Utc::now().timestamp(),
        }
    }

    fn preprocessor(&self) -> Preprocessor<'_> {
        Preprocessor::new(
            self.artifacts.scaler.get().map(|s| s as &dyn Transformer),
            self.artifacts.reducer.get().map(|r| r as &dyn Transformer),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::{Artifact, PcaReducer, RegressorSlot, StandardScaler};
    use crate::models::FEATURE_COUNT;
    use anyhow::Result;
    use ndarray::{Array1, Array2};
    use tempfile::TempDir;

    struct FixedPredictor(f64);

    impl Predictor for FixedPredictor {
        fn predict(&self, _input: &Array1<f64>) -> Result<f64> {
            Ok(self.0)
        }
    }

    struct SumPredictor;

    impl Predictor for SumPredictor {
        fn predict(&self, input: &Array1<f64>) -> Result<f64> {
            Ok(input.sum())
        }
    }

    struct FailingPredictor;

    impl Predictor for FailingPredictor {
        fn predict(&self, _input: &Array1<f64>) -> Result<f64> {
            anyhow::bail!("inference exploded")
        }
    }

    fn slot(name: &'static str, artifact: Artifact<Box<dyn Predictor>>) -> RegressorSlot {
        RegressorSlot {
            name,
            file: "unused.onnx",
            artifact,
        }
    }

    fn engine_with(
        scaler: Artifact<StandardScaler>,
        reducer: Artifact<PcaReducer>,
        regressors: Vec<RegressorSlot>,
    ) -> PredictionEngine {
        PredictionEngine::new(ArtifactSet {
            scaler,
            reducer,
            regressors,
        })
    }

    #[test]
    fn test_nothing_loaded_yields_placeholders() {
        let dir = TempDir::new().unwrap();
        let engine = PredictionEngine::load(dir.path());

        let metrics = BusinessMetrics {
            revenue: 250_000.0,
            departure_month: 7,
            ..Default::default()
        };

        let report = engine.predict(&metrics);
        assert_eq!(report.predictions.len(), 3);
        for prediction in &report.predictions {
            assert_eq!(prediction.value, None);
        }
    }

    #[test]
    fn test_predict_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let engine = PredictionEngine::load(dir.path());
        let metrics = BusinessMetrics::default();

        let first = engine.predict(&metrics);
        let second = engine.predict(&metrics);
        assert_eq!(first.predictions, second.predictions);
    }

    #[test]
    fn test_all_artifacts_present() {
        // Identity scaler, all-ones 12 -> 2 projection. With every field at
        // zero except month = 1, the reduced vector is [1.0, 1.0] and every
        // regressor sees the same input.
        let scaler = StandardScaler::with_stats(
            Array1::zeros(FEATURE_COUNT),
            Array1::from_elem(FEATURE_COUNT, 1.0),
        )
        .unwrap();
        let reducer = PcaReducer::with_model(
            Array2::from_elem((FEATURE_COUNT, 2), 1.0),
            Array1::zeros(FEATURE_COUNT),
        )
        .unwrap();

        let engine = engine_with(
            Artifact::Loaded(scaler),
            Artifact::Loaded(reducer),
            vec![
                slot("MLP Regressor", Artifact::Loaded(Box::new(SumPredictor))),
                slot(
                    "HistGradient Boosting",
                    Artifact::Loaded(Box::new(SumPredictor)),
                ),
                slot("LGBM", Artifact::Loaded(Box::new(FixedPredictor(9.87654)))),
            ],
        );

        let metrics = BusinessMetrics::default();
        let features = engine.preprocess(&metrics);
        assert_eq!(features, Array1::from_elem(2, 1.0));

        let report = engine.predict(&metrics);
        assert_eq!(report.predictions[0].value, Some(2.0));
        assert_eq!(report.predictions[1].value, Some(2.0));
        assert_eq!(report.predictions[2].rounded(), Some(9.88));
    }

    #[test]
    fn test_one_failure_never_affects_the_others() {
        let engine = engine_with(
            Artifact::Missing,
            Artifact::Missing,
            vec![
                slot("MLP Regressor", Artifact::Loaded(Box::new(FailingPredictor))),
                slot(
                    "HistGradient Boosting",
                    Artifact::Loaded(Box::new(FixedPredictor(5.0))),
                ),
                slot("LGBM", Artifact::Missing),
            ],
        );

        let report = engine.predict(&BusinessMetrics::default());
        assert_eq!(report.predictions[0].value, None);
        assert_eq!(report.predictions[1].value, Some(5.0));
        assert_eq!(report.predictions[2].value, None);
    }

    #[test]
    fn test_unscaled_vector_reaches_regressors_when_no_transforms() {
        let engine = engine_with(
            Artifact::Missing,
            Artifact::Missing,
            vec![slot("MLP Regressor", Artifact::Loaded(Box::new(SumPredictor)))],
        );

        let metrics = BusinessMetrics {
            revenue: 10.0,
            operating_cost: 4.0,
            ..Default::default()
        };

        // 10 + 4 + month (1) with everything else zero.
        let report = engine.predict(&metrics);
        assert_eq!(report.predictions[0].value, Some(15.0));
    }
}
