use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use tracing::warn;

use crate::config::{DEFAULT_AWAY_REST_DAYS, DEFAULT_HOME_REST_DAYS, EXCLUDED_STAT_COLUMNS};
use super::{AmericanOdds, Game, GameKey, MarketRecord, RestDays, TeamStatRow, TeamStats};

#[derive(Debug, Deserialize)]
struct SlateFile {
    games: Vec<GameEntry>,
    team_stats: HashMap<String, Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct GameEntry {
    home: String,
    away: String,
    #[serde(default)]
    home_rest: Option<u32>,
    #[serde(default)]
    away_rest: Option<u32>,
    #[serde(default)]
    market: Option<MarketEntry>,
}

#[derive(Debug, Deserialize)]
struct MarketEntry {
    #[serde(default)]
    over_under: Option<f64>,
    #[serde(default)]
    home_moneyline: Option<f64>,
    #[serde(default)]
    away_moneyline: Option<f64>,
}

/// Everything one refresh cycle needs: games, stat rows and rest days
#[derive(Debug, Clone, Default)]
pub struct Slate {
    pub games: Vec<Game>,
    pub team_stats: TeamStats,
    pub rest_days: HashMap<GameKey, RestDays>,
}

impl Slate {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: SlateFile = serde_json::from_str(json).context("Failed to parse slate JSON")?;

        let mut team_stats = TeamStats::with_capacity(file.team_stats.len());
        for (team, columns) in file.team_stats {
            let row = stat_row(&team, columns)?;
            team_stats.insert(team, row);
        }

        let mut games = Vec::with_capacity(file.games.len());
        let mut rest_days = HashMap::new();
        let mut seen = HashSet::new();

        for entry in file.games {
            let key = GameKey::new(entry.home, entry.away);
            if !seen.insert(key.clone()) {
                warn!("Duplicate game {} in slate, keeping the first entry", key);
                continue;
            }

            if entry.home_rest.is_some() || entry.away_rest.is_some() {
                rest_days.insert(
                    key.clone(),
                    RestDays {
                        home: entry.home_rest.unwrap_or(DEFAULT_HOME_REST_DAYS),
                        away: entry.away_rest.unwrap_or(DEFAULT_AWAY_REST_DAYS),
                    },
                );
            }

            let market = entry.market.map(|m| MarketRecord {
                over_under: m.over_under,
                home_moneyline: moneyline(&key, &key.home, m.home_moneyline),
                away_moneyline: moneyline(&key, &key.away, m.away_moneyline),
            });

            games.push(Game { key, market });
        }

        Ok(Self {
            games,
            team_stats,
            rest_days,
        })
    }
}

fn stat_row(team: &str, columns: Map<String, Value>) -> Result<TeamStatRow> {
    let mut row = Vec::with_capacity(columns.len());
    for (name, value) in columns {
        if EXCLUDED_STAT_COLUMNS.contains(&name.as_str()) {
            continue;
        }
        match value.as_f64() {
            Some(v) => row.push((name, v)),
            None => bail!("Stat '{}' for team '{}' is not numeric: {}", name, team, value),
        }
    }
    Ok(TeamStatRow::new(row))
}

/// Providers may serialise prices as `-110.0`; only whole values are valid odds
fn moneyline(game: &GameKey, team: &str, odds: Option<f64>) -> Option<AmericanOdds> {
    let odds = odds?;
    if odds.fract() != 0.0 || odds.abs() > i32::MAX as f64 {
        warn!("Invalid moneyline {} for {} in {}, treating as missing", odds, team, game);
        return None;
    }
    match AmericanOdds::new(odds as i32) {
        Ok(odds) => Some(odds),
        Err(_) => {
            warn!("Zero moneyline for {} in {}, treating as missing", team, game);
            None
        }
    }
}
