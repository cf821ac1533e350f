use crossbeam_channel::{unbounded, Receiver, Sender};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{error, info};

use crate::config::{PROGRESS_ACCEPTED, PROGRESS_DONE};
use crate::error::{PipelineError, Result};
use crate::features::FeatureAssembler;
use crate::model::ModelRegistry;
use super::commands::{GameReport, PredictionEvent, PredictionRequest, RunState};
use super::prediction_pipeline::run_pipeline;

/// Runs prediction requests on a dedicated worker thread per run.
/// Models are shared read-only; each run owns its request data.
pub struct PredictionOrchestrator {
    registry: Arc<ModelRegistry>,
    assembler: Arc<FeatureAssembler>,
}

impl PredictionOrchestrator {
    pub fn new(registry: ModelRegistry, assembler: FeatureAssembler) -> Self {
        Self {
            registry: Arc::new(registry),
            assembler: Arc::new(assembler),
        }
    }

    /// Accepts a request and starts its run. The returned handle observes
    /// exactly one run; a new request gets a new handle.
    pub fn spawn(&self, request: PredictionRequest) -> Result<PredictionHandle> {
        let (event_tx, event_rx) = unbounded();
        let state = Arc::new(AtomicU8::new(RunState::Idle as u8));

        let registry = Arc::clone(&self.registry);
        let assembler = Arc::clone(&self.assembler);
        let worker_state = Arc::clone(&state);

        state.store(RunState::Running as u8, Ordering::Release);
        let worker = thread::Builder::new()
            .name("prediction-run".to_string())
            .spawn(move || run_worker(&registry, &assembler, request, &event_tx, &worker_state))
            .map_err(|e| {
                error!("Failed to spawn prediction worker: {}", e);
                PipelineError::Io(e)
            })?;

        Ok(PredictionHandle {
            events: event_rx,
            state,
            worker: Some(worker),
        })
    }
}

fn run_worker(
    registry: &ModelRegistry,
    assembler: &FeatureAssembler,
    request: PredictionRequest,
    events: &Sender<PredictionEvent>,
    state: &AtomicU8,
) {
    info!(
        "{} prediction run accepted: {} game(s), kelly={}",
        request.model,
        request.games.len(),
        request.use_kelly
    );
    let _ = events.send(PredictionEvent::Progress(PROGRESS_ACCEPTED));

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let models = registry.get(request.model)?;
        run_pipeline(models, assembler, &request, |p| {
            let _ = events.send(PredictionEvent::Progress(p));
        })
    }));

    let terminal = match outcome {
        Ok(Ok(reports)) => {
            info!("Prediction run completed with {} game(s)", reports.len());
            let _ = events.send(PredictionEvent::Progress(PROGRESS_DONE));
            state.store(RunState::Completed as u8, Ordering::Release);
            PredictionEvent::Completed(reports)
        }
        Ok(Err(e)) => {
            error!("Prediction run failed: {}", e);
            state.store(RunState::Failed as u8, Ordering::Release);
            PredictionEvent::Failed(format!("Error running predictions: {}", e))
        }
        Err(panic) => {
            let reason = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "worker panicked".to_string());
            error!("Prediction run panicked: {}", reason);
            state.store(RunState::Failed as u8, Ordering::Release);
            PredictionEvent::Failed(format!("Error running predictions: {}", reason))
        }
    };

    let _ = events.send(terminal);
}

/// Caller side of one run
pub struct PredictionHandle {
    events: Receiver<PredictionEvent>,
    state: Arc<AtomicU8>,
    worker: Option<JoinHandle<()>>,
}

impl PredictionHandle {
    pub fn state(&self) -> RunState {
        RunState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Blocks until the run finishes, forwarding progress, and returns its result
    pub fn wait(&mut self, mut on_progress: impl FnMut(u8)) -> Result<Vec<GameReport>> {
        let result = loop {
            match self.events.recv() {
                Ok(PredictionEvent::Progress(p)) => on_progress(p),
                Ok(PredictionEvent::Completed(reports)) => break Ok(reports),
                Ok(PredictionEvent::Failed(message)) => break Err(PipelineError::RunFailed(message)),
                Err(_) => {
                    break Err(PipelineError::RunFailed(
                        "Prediction worker exited without a result".to_string(),
                    ))
                }
            }
        };

        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
        result
    }
}
