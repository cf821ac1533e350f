use anyhow::Context;
use candle_core::{DType, Device, Tensor, D};
use candle_nn::{linear, Linear, Module, VarBuilder};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use crate::error::{PipelineError, Result};
use crate::features::{l2_normalize, FeatureVector};
use super::model_trait::{validate_batch, ClassProbabilities, ProbabilityModel};

/// MLP 기반 이진 분류 모델 (추론 전용)
///
/// 아키텍처:
/// - Input: L2 정규화된 특성 벡터
/// - Hidden: `fc1 .. fc(N-1)` + ReLU
/// - Output: `fcN` 2 neurons + softmax
///
/// 레이어 크기는 safetensors 파일의 `fc{i}.weight` 텐서 모양에서 읽는다.
pub struct NeuralNetModel {
    name: String,
    device: Device,
    input_dim: usize,
    layers: Vec<Linear>,
}

impl NeuralNetModel {
    pub fn from_tensors(name: &str, tensors: HashMap<String, Tensor>, device: &Device) -> Result<Self> {
        let malformed = |reason: String| PipelineError::MalformedArtifact {
            path: name.to_string(),
            reason,
        };

        // (input, output) 차원
        let mut dims = Vec::new();
        while let Some(weight) = tensors.get(&format!("fc{}.weight", dims.len() + 1)) {
            let (out_dim, in_dim) = weight.dims2()?;
            dims.push((in_dim, out_dim));
        }

        let Some(&(input_dim, _)) = dims.first() else {
            return Err(malformed("missing fc1.weight".to_string()));
        };
        for pair in dims.windows(2) {
            if pair[0].1 != pair[1].0 {
                return Err(malformed(format!(
                    "layer output {} does not feed next layer input {}",
                    pair[0].1, pair[1].0
                )));
            }
        }
        let output_dim = dims[dims.len() - 1].1;
        if output_dim != 2 {
            return Err(malformed(format!("output layer has {} classes, expected 2", output_dim)));
        }

        let vs = VarBuilder::from_tensors(tensors, DType::F32, device);
        let mut layers = Vec::with_capacity(dims.len());
        for (i, &(in_dim, out_dim)) in dims.iter().enumerate() {
            layers.push(linear(in_dim, out_dim, vs.pp(format!("fc{}", i + 1)))?);
        }

        Ok(Self {
            name: name.to_string(),
            device: device.clone(),
            input_dim,
            layers,
        })
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let device = Device::Cpu;
        let tensors = candle_core::safetensors::load(path, &device)
            .with_context(|| format!("Failed to read network weights {}", path.display()))?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let model = Self::from_tensors(&name, tensors, &device)
            .with_context(|| format!("Failed to load network {}", path.display()))?;

        info!("Loaded neural network {} ({} layers, {} inputs)", model.name, model.layers.len(), model.input_dim);
        Ok(model)
    }

    /// Forward pass
    fn forward(&self, x: &Tensor) -> Result<Tensor> {
        let last = self.layers.len() - 1;
        let mut x = x.clone();
        for (i, layer) in self.layers.iter().enumerate() {
            x = layer.forward(&x)?;
            if i < last {
                x = x.relu()?;
            }
        }
        Ok(x)
    }
}

impl ProbabilityModel for NeuralNetModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_dim(&self) -> usize {
        self.input_dim
    }

    fn predict(&self, batch: &[FeatureVector]) -> Result<Vec<ClassProbabilities>> {
        validate_batch(self, batch)?;
        if batch.is_empty() {
            return Ok(Vec::new());
        }

        let inputs: Vec<f32> = batch
            .iter()
            .flat_map(|row| l2_normalize(row.values()))
            .map(|v| v as f32)
            .collect();
        let input = Tensor::from_vec(inputs, (batch.len(), self.input_dim), &self.device)?;

        let logits = self.forward(&input)?;
        let probs = candle_nn::ops::softmax(&logits, D::Minus1)?;
        let rows = probs.to_dtype(DType::F32)?.to_vec2::<f32>()?;

        Ok(rows
            .into_iter()
            .map(|row| ClassProbabilities::from_p1(row[1] as f64))
            .collect())
    }
}
