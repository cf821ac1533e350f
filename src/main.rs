mod common;
mod config;
mod controller;
mod decision;
mod display;
mod error;
mod features;
mod model;
mod slate;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use common::DataLoader;
use config::{get_models_dir, DEFAULT_AWAY_REST_DAYS, DEFAULT_HOME_REST_DAYS, DEFAULT_LOG_FILTER};
use controller::{PredictionOrchestrator, PredictionRequest};
use display::ReportDisplay;
use features::FeatureAssembler;
use model::{ModelKind, ModelRegistry};
use slate::RestDays;

/// NBA game winner / over-under predictions with EV and Kelly sizing
#[derive(Parser, Debug)]
#[command(name = "nba-predict", version)]
struct Cli {
    /// Slate JSON: games, odds, team stats, rest days
    #[arg(short, long, env = "NBA_SLATE_PATH")]
    slate: PathBuf,

    /// Model family (xgb, nn)
    #[arg(short, long, default_value = "xgb")]
    model: ModelKind,

    /// Print Kelly stake fractions
    #[arg(short, long)]
    kelly: bool,

    /// Model artifact root (defaults to $NBA_MODELS_DIR or ./Models)
    #[arg(long)]
    models_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let cli = Cli::parse();
    let models_dir = cli.models_dir.unwrap_or_else(get_models_dir);

    let slate = DataLoader::load_slate(&cli.slate)?;

    let registry = ModelRegistry::load(&models_dir, &[cli.model])?;
    let assembler = FeatureAssembler::new(RestDays {
        home: DEFAULT_HOME_REST_DAYS,
        away: DEFAULT_AWAY_REST_DAYS,
    });
    let orchestrator = PredictionOrchestrator::new(registry, assembler);

    let display = ReportDisplay::new(cli.model, cli.kelly);
    let mut handle = orchestrator.spawn(PredictionRequest::from_slate(slate, cli.model, cli.kelly))?;
    let reports = handle.wait(|p| display.progress(p))?;
    info!("Prediction run {}", handle.state());

    display.display(&reports);

    Ok(())
}
