//! Opaque ONNX regressor execution using tract
//!
//! Regressors are externally trained graphs; this crate only requires that
//! each accepts a `[1, n]` float input and yields at least one scalar.

use super::Predictor;
use anyhow::{Context, Result};
use ndarray::Array1;
use tract_onnx::prelude::*;

use std::path::Path;

type TractPlan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// A pre-trained regression model stored as an ONNX graph.
pub struct OnnxRegressor {
    plan: TractPlan,
    input_dim: usize,
}

impl OnnxRegressor {
    /// Load and optimize an ONNX graph, pinning the input to `[1, input_dim]`.
    pub fn load(path: &Path, input_dim: usize) -> Result<Self> {
        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .with_context(|| format!("Failed to parse ONNX graph at {}", path.display()))?
            .with_input_fact(0, f32::fact([1, input_dim]).into())
            .context("Failed to set input shape")?
            .into_optimized()
            .context("Failed to optimize graph")?
            .into_runnable()
            .context("Failed to create runnable plan")?;
        Ok(Self { plan, input_dim })
    }

    pub fn input_dim(&self) -> usize {
        self.input_dim
    }
}

impl Predictor for OnnxRegressor {
    fn predict(&self, input: &Array1<f64>) -> Result<f64> {
        if input.len() != self.input_dim {
            anyhow::bail!(
                "input has {} features but the graph expects {}",
                input.len(),
                self.input_dim
            );
        }

        let data: Vec<f32> = input.iter().map(|&v| v as f32).collect();
        let tensor: Tensor = tract_ndarray::Array2::from_shape_vec((1, self.input_dim), data)
            .context("Failed to build input tensor")?
            .into();

        let result = self.plan.run(tvec!(tensor.into()))?;
        let output = result.get(0).context("No output from graph")?;
        let view = output.to_array_view::<f32>()?;
        let value = view
            .iter()
            .next()
            .copied()
            .context("Graph produced an empty output")?;

        Ok(f64::from(value))
    }
}
