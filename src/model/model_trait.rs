use crate::error::{PipelineError, Result};
use crate::features::FeatureVector;

/// Binary class distribution for one game: class 0 (away / UNDER), class 1 (home / OVER)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassProbabilities {
    pub p0: f64,
    pub p1: f64,
}

impl ClassProbabilities {
    /// Builds the pair from the class-1 probability
    pub fn from_p1(p1: f64) -> Self {
        Self { p0: 1.0 - p1, p1 }
    }
}

/// A trained binary classifier bound to one artifact.
///
/// Implementations are read-only after loading and are shared across runs.
pub trait ProbabilityModel: Send + Sync {
    fn name(&self) -> &str;

    /// Number of columns every input row must have
    fn input_dim(&self) -> usize;

    fn predict(&self, batch: &[FeatureVector]) -> Result<Vec<ClassProbabilities>>;
}

/// Rejects rows of the wrong width and non-finite values before inference
pub fn validate_batch(model: &dyn ProbabilityModel, batch: &[FeatureVector]) -> Result<()> {
    let expected = model.input_dim();
    for (row, vector) in batch.iter().enumerate() {
        if vector.values().len() != expected {
            return Err(PipelineError::FeatureWidth {
                model: model.name().to_string(),
                expected,
                actual: vector.values().len(),
            });
        }
        if let Some(column) = vector.values().iter().position(|v| !v.is_finite()) {
            return Err(PipelineError::InvalidFeature { row, column });
        }
    }
    Ok(())
}
