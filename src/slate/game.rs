use std::fmt;

use crate::error::{PipelineError, Result};

/// Identity of a game within a slate: (home, away)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameKey {
    pub home: String,
    pub away: String,
}

impl GameKey {
    pub fn new(home: impl Into<String>, away: impl Into<String>) -> Self {
        Self {
            home: home.into(),
            away: away.into(),
        }
    }
}

impl fmt::Display for GameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs {}", self.home, self.away)
    }
}

/// American-format moneyline price. Zero is rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmericanOdds(i32);

impl AmericanOdds {
    pub fn new(odds: i32) -> Result<Self> {
        if odds == 0 {
            return Err(PipelineError::ZeroOdds);
        }
        Ok(Self(odds))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for AmericanOdds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 > 0 {
            write!(f, "+{}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Bookmaker data for one game. Absent prices stay `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketRecord {
    pub over_under: Option<f64>,
    pub home_moneyline: Option<AmericanOdds>,
    pub away_moneyline: Option<AmericanOdds>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestDays {
    pub home: u32,
    pub away: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub key: GameKey,
    pub market: Option<MarketRecord>,
}

impl Game {
    pub fn new(home: impl Into<String>, away: impl Into<String>) -> Self {
        Self {
            key: GameKey::new(home, away),
            market: None,
        }
    }

    pub fn with_market(mut self, market: MarketRecord) -> Self {
        self.market = Some(market);
        self
    }

    pub fn home(&self) -> &str {
        &self.key.home
    }

    pub fn away(&self) -> &str {
        &self.key.away
    }

    pub fn over_under(&self) -> Option<f64> {
        self.market.as_ref().and_then(|m| m.over_under)
    }
}
