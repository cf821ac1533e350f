use std::collections::HashMap;
use tracing::debug;

use crate::slate::{Game, GameKey, RestDays, TeamStats};

pub const HOME_REST_COLUMN: &str = "Days-Rest-Home";
pub const AWAY_REST_COLUMN: &str = "Days-Rest-Away";
pub const OVER_UNDER_COLUMN: &str = "OU";

/// 모델 입력용 특성 벡터 (열 순서는 배치 전체에서 고정)
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }
}

/// Decision shape feeds the moneyline model, totals shape adds the market line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureShape {
    Decision,
    Totals,
}

/// 게임 키로 정렬된 특성 배치
#[derive(Debug, Clone)]
pub struct FeatureBatch {
    shape: FeatureShape,
    columns: Vec<String>,
    keys: Vec<GameKey>,
    vectors: Vec<FeatureVector>,
}

impl FeatureBatch {
    fn empty(shape: FeatureShape) -> Self {
        Self {
            shape,
            columns: Vec::new(),
            keys: Vec::new(),
            vectors: Vec::new(),
        }
    }

    pub fn shape(&self) -> FeatureShape {
        self.shape
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn keys(&self) -> &[GameKey] {
        &self.keys
    }

    pub fn vectors(&self) -> &[FeatureVector] {
        &self.vectors
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GameKey, &FeatureVector)> {
        self.keys.iter().zip(self.vectors.iter())
    }

    /// Totals shape: copy of every row with the game's over/under line appended.
    /// Games without a line are left out of the totals batch.
    pub fn with_totals_line(&self, lines: &HashMap<GameKey, f64>) -> FeatureBatch {
        let mut totals = FeatureBatch::empty(FeatureShape::Totals);
        totals.columns = self.columns.clone();
        totals.columns.push(OVER_UNDER_COLUMN.to_string());

        for (key, vector) in self.iter() {
            match lines.get(key) {
                Some(&line) => {
                    let mut values = vector.values().to_vec();
                    values.push(line);
                    totals.keys.push(key.clone());
                    totals.vectors.push(FeatureVector::new(values));
                }
                None => debug!("No over/under line for {}, skipping totals row", key),
            }
        }

        totals
    }
}

/// 행 단위 L2 정규화 (norm이 0인 행은 그대로 유지)
pub fn l2_normalize(values: &[f64]) -> Vec<f64> {
    let norm = values.iter().map(|v| v * v).sum::<f64>().sqrt();
    let norm = if norm > 0.0 { norm } else { 1.0 };
    values.iter().map(|v| v / norm).collect()
}

/// Merges home/away season stats and rest days into one decision-shape row per game
pub struct FeatureAssembler {
    default_rest: RestDays,
}

impl FeatureAssembler {
    pub fn new(default_rest: RestDays) -> Self {
        Self { default_rest }
    }

    /// Builds the decision-shape batch in slate order.
    ///
    /// A game whose home or away team has no stat row is dropped; so is a game
    /// whose rows do not share the column layout of the first assembled game.
    pub fn assemble(
        &self,
        games: &[Game],
        stats: &TeamStats,
        rest_days: &HashMap<GameKey, RestDays>,
    ) -> FeatureBatch {
        let mut batch = FeatureBatch::empty(FeatureShape::Decision);

        for game in games {
            let (Some(home), Some(away)) = (stats.get(game.home()), stats.get(game.away())) else {
                debug!("Missing team stats for {}, dropping game", game.key);
                continue;
            };

            let columns: Vec<String> = home
                .names()
                .iter()
                .chain(away.names())
                .cloned()
                .chain([HOME_REST_COLUMN.to_string(), AWAY_REST_COLUMN.to_string()])
                .collect();

            if batch.keys.is_empty() {
                batch.columns = columns;
            } else if batch.columns != columns {
                debug!("Stat columns for {} differ from the batch layout, dropping game", game.key);
                continue;
            }

            let rest = rest_days.get(&game.key).copied().unwrap_or(self.default_rest);

            let mut values = Vec::with_capacity(home.values().len() + away.values().len() + 2);
            values.extend_from_slice(home.values());
            values.extend_from_slice(away.values());
            values.push(rest.home as f64);
            values.push(rest.away as f64);

            batch.keys.push(game.key.clone());
            batch.vectors.push(FeatureVector::new(values));
        }

        batch
    }
}
