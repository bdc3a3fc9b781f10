//! Pre-trained sequence model behind a narrow trait.
//!
//! The shipped implementation evaluates a small dense feed-forward network
//! stored as JSON. Anything that maps a batch of normalized windows to one
//! normalized value per window can stand in (tests use a stub).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail, ensure};
use serde::{Deserialize, Serialize};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::error::AppError;

pub trait ForecastModel: Send + Sync {
    /// Input length every window must have
    fn window_len(&self) -> usize;

    /// One prediction per window, in the same order.
    fn predict(&self, windows: &[Vec<f64>]) -> Result<Vec<f64>, AppError>;
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Linear,
    Relu,
    Tanh,
    Sigmoid,
}

impl Activation {
    fn apply(self, x: f64) -> f64 {
        match self {
            Activation::Linear => x,
            Activation::Relu => x.max(0.0),
            Activation::Tanh => x.tanh(),
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DenseLayer {
    /// `weights[out][in]`
    pub weights: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
    pub activation: Activation,
}

impl DenseLayer {
    fn forward(&self, input: &[f64]) -> Vec<f64> {
        self.weights
            .iter()
            .zip(&self.bias)
            .map(|(row, b)| {
                let z: f64 = row.iter().zip(input).map(|(w, x)| w * x).sum::<f64>() + b;
                self.activation.apply(z)
            })
            .collect()
    }
}

/// On-disk model format
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ModelArtifact {
    pub name: String,
    pub window_len: usize,
    pub layers: Vec<DenseLayer>,
}

impl ModelArtifact {
    /// Checks that the layers chain from `window_len` inputs to a single output.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.window_len > 0, "window_len must be positive");
        ensure!(!self.layers.is_empty(), "model has no layers");

        let mut expected_in = self.window_len;
        for (idx, layer) in self.layers.iter().enumerate() {
            ensure!(!layer.weights.is_empty(), "layer {} has no units", idx);
            ensure!(
                layer.bias.len() == layer.weights.len(),
                "layer {}: {} bias terms for {} units",
                idx,
                layer.bias.len(),
                layer.weights.len()
            );
            if let Some(row) = layer.weights.iter().position(|r| r.len() != expected_in) {
                bail!(
                    "layer {} unit {}: {} weights, expected {}",
                    idx,
                    row,
                    layer.weights[row].len(),
                    expected_in
                );
            }
            let all_finite = layer.weights.iter().flatten().chain(&layer.bias).all(|v| v.is_finite());
            ensure!(all_finite, "layer {} contains non-finite parameters", idx);
            expected_in = layer.weights.len();
        }
        ensure!(expected_in == 1, "final layer must have exactly one unit, found {}", expected_in);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct DenseForecastModel {
    artifact: ModelArtifact,
}

impl DenseForecastModel {
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self> {
        artifact.validate().with_context(|| format!("invalid model '{}'", artifact.name))?;
        Ok(Self { artifact })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("reading model file {}", path.display()))?;
        let artifact: ModelArtifact =
            serde_json::from_str(&text).with_context(|| format!("decoding model file {}", path.display()))?;

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_model {
            log::info!(
                "Loaded model '{}' ({} layers, window {}) from {}",
                artifact.name,
                artifact.layers.len(),
                artifact.window_len,
                path.display()
            );
        }

        Self::from_artifact(artifact)
    }

    pub fn name(&self) -> &str {
        &self.artifact.name
    }

    fn predict_one(&self, window: &[f64]) -> f64 {
        let mut activations = window.to_vec();
        for layer in &self.artifact.layers {
            activations = layer.forward(&activations);
        }
        activations.first().copied().unwrap_or(f64::NAN)
    }
}

impl ForecastModel for DenseForecastModel {
    fn window_len(&self) -> usize {
        self.artifact.window_len
    }

    fn predict(&self, windows: &[Vec<f64>]) -> Result<Vec<f64>, AppError> {
        if let Some(bad) = windows.iter().find(|w| w.len() != self.window_len()) {
            return Err(AppError::ModelOutput(format!(
                "window of length {} given to a model expecting {}",
                bad.len(),
                self.window_len()
            )));
        }
        let out: Vec<f64> = windows.iter().map(|w| self.predict_one(w)).collect();
        if let Some(pos) = out.iter().position(|v| !v.is_finite()) {
            return Err(AppError::ModelOutput(format!("non-finite prediction at index {}", pos)));
        }
        Ok(out)
    }
}

/// Single linear unit with exponentially decaying weights (most recent value
/// weighted highest) that sum to one. Used by `make_demo_model`.
pub fn demo_artifact(window_len: usize, decay: f64) -> ModelArtifact {
    let raw: Vec<f64> = (0..window_len).map(|i| decay.powi((window_len - 1 - i) as i32)).collect();
    let total: f64 = raw.iter().sum();
    ModelArtifact {
        name: format!("ewma-{}-{}", window_len, decay),
        window_len,
        layers: vec![DenseLayer {
            weights: vec![raw.iter().map(|w| w / total).collect()],
            bias: vec![0.0],
            activation: Activation::Linear,
        }],
    }
}
