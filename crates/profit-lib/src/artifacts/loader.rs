//! Defensive artifact loading
//!
//! Each of the five artifacts loads independently from its fixed filename.
//! A missing or undecodable file never aborts the other loads; the failure
//! is folded into that artifact's status and the session continues without
//! it. Loading happens exactly once per process.

use super::{
    Artifact, ArtifactReport, OnnxRegressor, PcaReducer, Predictor, StandardScaler, REDUCER_FILE,
    REDUCER_NAME, REGRESSOR_FILES, SCALER_FILE, SCALER_NAME,
};
use crate::error::ArtifactError;
use crate::models::FEATURE_COUNT;
use std::path::Path;
use tracing::{error, info, warn};

/// Every artifact the session can use, loaded once at startup.
pub struct ArtifactSet {
    pub scaler: Artifact<StandardScaler>,
    pub reducer: Artifact<PcaReducer>,
    pub regressors: Vec<RegressorSlot>,
}

/// One regressor slot. The slot exists even when the model is unavailable,
/// so the presenter always reports all three.
pub struct RegressorSlot {
    pub name: &'static str,
    pub file: &'static str,
    pub artifact: Artifact<Box<dyn Predictor>>,
}

impl ArtifactSet {
    /// Load every artifact from `dir`. Never fails; failures degrade the
    /// individual artifact's status instead.
    ///
    /// The preprocessing artifacts load first: the regressors were trained
    /// on the pipeline output, so the expected graph input width is the
    /// reducer's component count when a reducer is available.
    pub fn load(dir: &Path) -> Self {
        let scaler = load_transform(&dir.join(SCALER_FILE), SCALER_NAME, StandardScaler::load_model);
        let reducer = load_transform(&dir.join(REDUCER_FILE), REDUCER_NAME, PcaReducer::load_model);

        let input_dim = reducer.get().map_or(FEATURE_COUNT, PcaReducer::n_components);
        let regressors = REGRESSOR_FILES
            .iter()
            .map(|&(name, file)| RegressorSlot {
                name,
                file,
                artifact: load_regressor(dir, name, file, input_dim),
            })
            .collect();

        Self {
            scaler,
            reducer,
            regressors,
        }
    }

    /// Width of the vector the pipeline hands to the regressors.
    pub fn pipeline_output_dim(&self) -> usize {
        self.reducer
            .get()
            .map_or(FEATURE_COUNT, PcaReducer::n_components)
    }

    /// Per-artifact load outcomes, regressors first.
    pub fn reports(&self) -> Vec<ArtifactReport> {
        let mut reports: Vec<ArtifactReport> = self
            .regressors
            .iter()
            .map(|slot| ArtifactReport {
                name: slot.name,
                file: slot.file,
                status: slot.artifact.status(),
            })
            .collect();
        reports.push(ArtifactReport {
            name: SCALER_NAME,
            file: SCALER_FILE,
            status: self.scaler.status(),
        });
        reports.push(ArtifactReport {
            name: REDUCER_NAME,
            file: REDUCER_FILE,
            status: self.reducer.status(),
        });
        reports
    }
}

fn load_transform<T, F>(path: &Path, name: &'static str, load: F) -> Artifact<T>
where
    F: FnOnce(&Path) -> Result<T, ArtifactError>,
{
    match load(path) {
        Ok(model) => {
            info!(artifact = name, path = %path.display(), "Artifact loaded");
            Artifact::Loaded(model)
        }
        Err(ArtifactError::Missing(_)) => {
            warn!(artifact = name, path = %path.display(), "Artifact file not found");
            Artifact::Missing
        }
        Err(e @ ArtifactError::Unfitted { .. }) => {
            error!(artifact = name, error = %e, "Artifact is not fitted, discarding");
            Artifact::Invalid
        }
        Err(e) => {
            error!(artifact = name, error = %e, "Failed to decode artifact, skipping");
            Artifact::Invalid
        }
    }
}

fn load_regressor(
    dir: &Path,
    name: &'static str,
    file: &'static str,
    input_dim: usize,
) -> Artifact<Box<dyn Predictor>> {
    let path = dir.join(file);
    if !path.exists() {
        warn!(model = name, path = %path.display(), "Regressor file not found");
        return Artifact::Missing;
    }
    match OnnxRegressor::load(&path, input_dim) {
        Ok(model) => {
            info!(model = name, path = %path.display(), input_dim, "Regressor loaded");
            Artifact::Loaded(Box::new(model))
        }
        Err(e) => {
            error!(model = name, error = %e, "Failed to load regressor, skipping");
            Artifact::Invalid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::ArtifactStatus;
    use ndarray::{Array1, Array2};
    use tempfile::TempDir;

    fn fitted_scaler() -> StandardScaler {
        StandardScaler::with_stats(
            Array1::from_elem(FEATURE_COUNT, 1.0),
            Array1::from_elem(FEATURE_COUNT, 2.0),
        )
        .unwrap()
    }

    fn fitted_reducer(components: usize) -> PcaReducer {
        PcaReducer::with_model(
            Array2::from_elem((FEATURE_COUNT, components), 0.5),
            Array1::zeros(FEATURE_COUNT),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_dir_all_missing() {
        let dir = TempDir::new().unwrap();
        let set = ArtifactSet::load(dir.path());

        assert_eq!(set.scaler.status(), ArtifactStatus::Missing);
        assert_eq!(set.reducer.status(), ArtifactStatus::Missing);
        assert_eq!(set.regressors.len(), 3);
        for slot in &set.regressors {
            assert_eq!(slot.artifact.status(), ArtifactStatus::Missing);
        }
    }

    #[test]
    fn test_fitted_scaler_loads() {
        let dir = TempDir::new().unwrap();
        fitted_scaler()
            .save_model(&dir.path().join(SCALER_FILE))
            .unwrap();

        let set = ArtifactSet::load(dir.path());
        assert_eq!(set.scaler.status(), ArtifactStatus::Loaded);
        // The other artifacts are untouched by the scaler's outcome.
        assert_eq!(set.reducer.status(), ArtifactStatus::Missing);
    }

    #[test]
    fn test_unfitted_scaler_is_invalid_not_missing() {
        let dir = TempDir::new().unwrap();
        StandardScaler::new()
            .save_model(&dir.path().join(SCALER_FILE))
            .unwrap();

        let set = ArtifactSet::load(dir.path());
        assert_eq!(set.scaler.status(), ArtifactStatus::Invalid);
    }

    #[test]
    fn test_unfitted_reducer_is_invalid() {
        let dir = TempDir::new().unwrap();
        PcaReducer::new()
            .save_model(&dir.path().join(REDUCER_FILE))
            .unwrap();

        let set = ArtifactSet::load(dir.path());
        assert_eq!(set.reducer.status(), ArtifactStatus::Invalid);
    }

    #[test]
    fn test_corrupt_files_are_invalid() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(SCALER_FILE), b"garbage").unwrap();
        std::fs::write(dir.path().join(REGRESSOR_FILES[0].1), b"garbage").unwrap();

        let set = ArtifactSet::load(dir.path());
        assert_eq!(set.scaler.status(), ArtifactStatus::Invalid);
        assert_eq!(set.regressors[0].artifact.status(), ArtifactStatus::Invalid);
        // The remaining regressor slots are unaffected.
        assert_eq!(set.regressors[1].artifact.status(), ArtifactStatus::Missing);
        assert_eq!(set.regressors[2].artifact.status(), ArtifactStatus::Missing);
    }

    #[test]
    fn test_pipeline_output_dim_follows_reducer() {
        let dir = TempDir::new().unwrap();
        let set = ArtifactSet::load(dir.path());
        assert_eq!(set.pipeline_output_dim(), FEATURE_COUNT);

        fitted_reducer(4)
            .save_model(&dir.path().join(REDUCER_FILE))
            .unwrap();
        let set = ArtifactSet::load(dir.path());
        assert_eq!(set.pipeline_output_dim(), 4);
    }

    #[test]
    fn test_reports_cover_all_five() {
        let dir = TempDir::new().unwrap();
        fitted_scaler()
            .save_model(&dir.path().join(SCALER_FILE))
            .unwrap();

        let set = ArtifactSet::load(dir.path());
        let reports = set.reports();
        assert_eq!(reports.len(), 5);
        assert_eq!(reports[0].name, "MLP Regressor");
        assert_eq!(reports[1].name, "HistGradient Boosting");
        assert_eq!(reports[2].name, "LGBM");
        assert_eq!(reports[3].name, SCALER_NAME);
        assert_eq!(reports[3].status, ArtifactStatus::Loaded);
        assert_eq!(reports[4].name, REDUCER_NAME);
    }
}
