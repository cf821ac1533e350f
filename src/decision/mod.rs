mod metrics;
mod outcome;

pub use metrics::{compute_metrics, DecisionMetrics};
pub use outcome::{interpret_total, interpret_winner, PredictionResult, TotalPick, TotalPrediction, WinnerPick};
