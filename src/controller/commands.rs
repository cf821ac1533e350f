use std::collections::HashMap;

use crate::decision::{DecisionMetrics, PredictionResult};
use crate::model::ModelKind;
use crate::slate::{Game, GameKey, RestDays, Slate, TeamStats};

/// Prediction request sent to the orchestrator. The run owns its copy of the inputs.
#[derive(Debug, Clone)]
pub struct PredictionRequest {
    pub model: ModelKind,
    pub games: Vec<Game>,
    pub team_stats: TeamStats,
    pub rest_days: HashMap<GameKey, RestDays>,
    /// Compute Kelly stake fractions
    pub use_kelly: bool,
}

impl PredictionRequest {
    pub fn from_slate(slate: Slate, model: ModelKind, use_kelly: bool) -> Self {
        Self {
            model,
            games: slate.games,
            team_stats: slate.team_stats,
            rest_days: slate.rest_days,
            use_kelly,
        }
    }
}

/// Prediction and decision metrics for one game
#[derive(Debug, Clone, PartialEq)]
pub struct GameReport {
    pub prediction: PredictionResult,
    pub metrics: DecisionMetrics,
}

/// Events sent back to the caller, in order. `Completed` or `Failed` is always last.
#[derive(Debug, Clone)]
pub enum PredictionEvent {
    /// Percent done, non-decreasing
    Progress(u8),
    /// Full result batch in slate order, keyed by game
    Completed(Vec<GameReport>),
    /// Human-readable failure, no partial results
    Failed(String),
}

impl PredictionEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PredictionEvent::Progress(_))
    }
}

/// Current run state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Completed,
    Failed,
}

impl RunState {
    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            0 => RunState::Idle,
            1 => RunState::Running,
            2 => RunState::Completed,
            _ => RunState::Failed,
        }
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunState::Idle => write!(f, "Idle"),
            RunState::Running => write!(f, "Running"),
            RunState::Completed => write!(f, "Completed"),
            RunState::Failed => write!(f, "Failed"),
        }
    }
}
