use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::common::DataLoader;
use crate::config::{
    BOOSTED_MODEL_DIR, BOOSTED_MONEYLINE_PATTERN, BOOSTED_TOTALS_PATTERN, NEURAL_MODEL_DIR,
    NEURAL_MONEYLINE_PATTERN, NEURAL_TOTALS_PATTERN,
};
use crate::error::PipelineError;
use super::{BoostedTreeModel, ModelKind, NeuralNetModel, ProbabilityModel};

/// Moneyline and over/under classifiers of one model family.
/// The two are separate artifacts and share no state.
#[derive(Clone)]
pub struct ModelPair {
    pub moneyline: Arc<dyn ProbabilityModel>,
    pub totals: Arc<dyn ProbabilityModel>,
}

impl ModelPair {
    pub fn new(moneyline: Arc<dyn ProbabilityModel>, totals: Arc<dyn ProbabilityModel>) -> Self {
        Self { moneyline, totals }
    }
}

/// Models loaded once at start-up, read-only afterwards
#[derive(Clone, Default)]
pub struct ModelRegistry {
    models: HashMap<ModelKind, ModelPair>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: ModelKind, pair: ModelPair) {
        self.models.insert(kind, pair);
    }

    pub fn get(&self, kind: ModelKind) -> Result<&ModelPair, PipelineError> {
        self.models.get(&kind).ok_or(PipelineError::ModelNotLoaded(kind))
    }

    pub fn load(models_dir: &Path, kinds: &[ModelKind]) -> Result<Self> {
        let mut registry = Self::new();
        for &kind in kinds {
            registry.register(kind, load_pair(models_dir, kind)?);
        }
        Ok(registry)
    }
}

fn load_pair(models_dir: &Path, kind: ModelKind) -> Result<ModelPair> {
    let pair = match kind {
        ModelKind::Boosted => {
            let dir = models_dir.join(BOOSTED_MODEL_DIR);
            let moneyline = BoostedTreeModel::load(&DataLoader::find_artifact(&dir, BOOSTED_MONEYLINE_PATTERN)?)?;
            let totals = BoostedTreeModel::load(&DataLoader::find_artifact(&dir, BOOSTED_TOTALS_PATTERN)?)?;
            ModelPair::new(Arc::new(moneyline), Arc::new(totals))
        }
        ModelKind::Neural => {
            let dir = models_dir.join(NEURAL_MODEL_DIR);
            let moneyline = NeuralNetModel::load(&DataLoader::find_artifact(&dir, NEURAL_MONEYLINE_PATTERN)?)?;
            let totals = NeuralNetModel::load(&DataLoader::find_artifact(&dir, NEURAL_TOTALS_PATTERN)?)?;
            ModelPair::new(Arc::new(moneyline), Arc::new(totals))
        }
    };
    Ok(pair)
}
