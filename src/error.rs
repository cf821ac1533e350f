use thiserror::Error;

use crate::model::ModelKind;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("No model artifact matches pattern: {0}")]
    ArtifactNotFound(String),

    #[error("Malformed model artifact {path}: {reason}")]
    MalformedArtifact { path: String, reason: String },

    #[error("{model} expects {expected} features per row, got {actual}")]
    FeatureWidth {
        model: String,
        expected: usize,
        actual: usize,
    },

    #[error("Non-finite value in feature row {row}, column {column}")]
    InvalidFeature { row: usize, column: usize },

    #[error("{model} returned {actual} predictions for {expected} rows")]
    ModelOutput {
        model: String,
        expected: usize,
        actual: usize,
    },

    #[error("American odds of 0 are undefined")]
    ZeroOdds,

    #[error("Unknown model type '{0}' (expected 'xgb' or 'nn')")]
    UnknownModel(String),

    #[error("Model type {0} is not loaded")]
    ModelNotLoaded(ModelKind),

    #[error("Tensor error: {0}")]
    Tensor(#[from] candle_core::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    RunFailed(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
