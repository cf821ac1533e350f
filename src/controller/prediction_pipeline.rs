use std::collections::HashMap;
use tracing::{debug, info};

use crate::config::PROGRESS_MODELS_STARTING;
use crate::decision::{compute_metrics, interpret_total, interpret_winner, PredictionResult};
use crate::error::{PipelineError, Result};
use crate::features::{FeatureAssembler, FeatureBatch};
use crate::model::{ClassProbabilities, ModelPair, ProbabilityModel};
use crate::slate::{Game, GameKey};
use super::commands::{GameReport, PredictionRequest};

/// Runs assembly → moneyline model → totals model → interpretation → metrics.
///
/// Every intermediate result is keyed by game, so a game dropped during
/// assembly cannot shift another game's prediction.
pub fn run_pipeline(
    models: &ModelPair,
    assembler: &FeatureAssembler,
    request: &PredictionRequest,
    mut progress: impl FnMut(u8),
) -> Result<Vec<GameReport>> {
    let decision = assembler.assemble(&request.games, &request.team_stats, &request.rest_days);
    let lines: HashMap<GameKey, f64> = request
        .games
        .iter()
        .filter_map(|g| g.over_under().map(|line| (g.key.clone(), line)))
        .collect();
    let totals = decision.with_totals_line(&lines);

    info!(
        "Assembled {} of {} game(s) ({} columns), {} with an over/under line",
        decision.len(),
        request.games.len(),
        decision.columns().len(),
        totals.len()
    );

    progress(PROGRESS_MODELS_STARTING);

    let moneyline = predict_keyed(models.moneyline.as_ref(), &decision)?;
    let over_under = predict_keyed(models.totals.as_ref(), &totals)?;

    let games: HashMap<&GameKey, &Game> = request.games.iter().map(|g| (&g.key, g)).collect();
    let mut reports = Vec::with_capacity(decision.len());

    for key in decision.keys() {
        let (Some(probs), Some(game)) = (moneyline.get(key), games.get(key)) else {
            continue;
        };

        let winner = interpret_winner(key, probs);
        let total = over_under
            .get(key)
            .zip(lines.get(key))
            .map(|(probs, &line)| interpret_total(probs, line));
        let metrics = compute_metrics(probs, game.market.as_ref(), request.use_kelly);

        debug!(
            "{}: {} ({:.1}%), total {:?}, EV home {:.2} away {:.2}",
            key, winner.team, winner.confidence, total.as_ref().map(|t| t.pick), metrics.home_ev, metrics.away_ev
        );

        reports.push(GameReport {
            prediction: PredictionResult {
                game: key.clone(),
                winner,
                total,
            },
            metrics,
        });
    }

    Ok(reports)
}

fn predict_keyed(
    model: &dyn ProbabilityModel,
    batch: &FeatureBatch,
) -> Result<HashMap<GameKey, ClassProbabilities>> {
    if batch.is_empty() {
        return Ok(HashMap::new());
    }

    debug!("{:?} batch of {} row(s) → {}", batch.shape(), batch.len(), model.name());
    let probs = model.predict(batch.vectors())?;
    if probs.len() != batch.len() {
        return Err(PipelineError::ModelOutput {
            model: model.name().to_string(),
            expected: batch.len(),
            actual: probs.len(),
        });
    }

    Ok(batch.keys().iter().cloned().zip(probs).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::decision::TotalPick;
    use crate::features::FeatureVector;
    use crate::slate::{AmericanOdds, MarketRecord, RestDays, TeamStatRow, TeamStats};

    /// p1 = first column / 200, a deterministic stand-in for a trained model
    struct ScaledModel {
        width: usize,
    }

    impl ProbabilityModel for ScaledModel {
        fn name(&self) -> &str {
            "scaled"
        }

        fn input_dim(&self) -> usize {
            self.width
        }

        fn predict(&self, batch: &[FeatureVector]) -> Result<Vec<ClassProbabilities>> {
            Ok(batch
                .iter()
                .map(|v| ClassProbabilities::from_p1(v.values()[0] / 200.0))
                .collect())
        }
    }

    struct ShortModel;

    impl ProbabilityModel for ShortModel {
        fn name(&self) -> &str {
            "short"
        }

        fn input_dim(&self) -> usize {
            4
        }

        fn predict(&self, _batch: &[FeatureVector]) -> Result<Vec<ClassProbabilities>> {
            Ok(Vec::new())
        }
    }

    fn stats() -> TeamStats {
        let mut stats = TeamStats::new();
        for (team, pts) in [("Boston Celtics", 130.0), ("Miami Heat", 70.0), ("Denver Nuggets", 90.0)] {
            stats.insert(team.to_string(), TeamStatRow::new(vec![("PTS".to_string(), pts)]));
        }
        stats
    }

    fn request(games: Vec<Game>) -> PredictionRequest {
        PredictionRequest {
            model: crate::model::ModelKind::Boosted,
            games,
            team_stats: stats(),
            rest_days: HashMap::new(),
            use_kelly: true,
        }
    }

    fn models() -> ModelPair {
        ModelPair::new(Arc::new(ScaledModel { width: 4 }), Arc::new(ScaledModel { width: 5 }))
    }

    fn assembler() -> FeatureAssembler {
        FeatureAssembler::new(RestDays { home: 2, away: 1 })
    }

    #[test]
    fn test_full_game_report() {
        let game = Game::new("Boston Celtics", "Miami Heat").with_market(MarketRecord {
            over_under: Some(214.5),
            home_moneyline: Some(AmericanOdds::new(-200).unwrap()),
            away_moneyline: Some(AmericanOdds::new(170).unwrap()),
        });

        let mut milestones = Vec::new();
        let reports = run_pipeline(&models(), &assembler(), &request(vec![game]), |p| milestones.push(p)).unwrap();

        assert_eq!(milestones, vec![PROGRESS_MODELS_STARTING]);
        assert_eq!(reports.len(), 1);
        let report = &reports[0];
        assert_eq!(report.prediction.winner.team, "Boston Celtics");
        assert_eq!(report.prediction.winner.confidence, 65.0);

        let total = report.prediction.total.as_ref().unwrap();
        assert_eq!(total.pick, TotalPick::Over);
        assert_eq!(total.line, 214.5);

        // 0.65 × 50 − 0.35 × 100
        assert_eq!(report.metrics.home_ev, -2.5);
        assert_eq!(report.metrics.home_kelly, 0.0);
        // 0.35 × 170 − 0.65 × 100
        assert_eq!(report.metrics.away_ev, -5.5);
    }

    #[test]
    fn test_missing_away_stats_drops_only_that_game() {
        let games = vec![
            Game::new("Boston Celtics", "Miami Heat"),
            Game::new("Denver Nuggets", "Phoenix Suns"),
            Game::new("Miami Heat", "Denver Nuggets"),
        ];
        let reports = run_pipeline(&models(), &assembler(), &request(games), |_| {}).unwrap();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].prediction.game, GameKey::new("Boston Celtics", "Miami Heat"));
        assert_eq!(reports[1].prediction.game, GameKey::new("Miami Heat", "Denver Nuggets"));
        // Miami 70 → p1 = 0.35, away side wins
        assert_eq!(reports[1].prediction.winner.team, "Denver Nuggets");
        assert!(reports.iter().all(|r| r.prediction.total.is_none()));
    }

    #[test]
    fn test_empty_slate() {
        let reports = run_pipeline(&models(), &assembler(), &request(Vec::new()), |_| {}).unwrap();
        assert!(reports.is_empty());
    }

    #[test]
    fn test_short_model_output_is_an_error() {
        let models = ModelPair::new(Arc::new(ShortModel), Arc::new(ScaledModel { width: 5 }));
        let games = vec![Game::new("Boston Celtics", "Miami Heat")];
        let err = run_pipeline(&models, &assembler(), &request(games), |_| {}).unwrap_err();
        assert!(matches!(err, PipelineError::ModelOutput { expected: 1, actual: 0, .. }));
    }
}
