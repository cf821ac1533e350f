pub mod commands;
mod prediction_orchestrator;
mod prediction_pipeline;

pub use commands::{GameReport, PredictionEvent, PredictionRequest, RunState};
pub use prediction_orchestrator::{PredictionHandle, PredictionOrchestrator};
