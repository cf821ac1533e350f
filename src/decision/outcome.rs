use std::fmt;

use crate::common::percent;
use crate::config::CONFIDENCE_DECIMALS;
use crate::model::ClassProbabilities;
use crate::slate::GameKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalPick {
    Under,
    Over,
}

impl fmt::Display for TotalPick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TotalPick::Under => write!(f, "UNDER"),
            TotalPick::Over => write!(f, "OVER"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WinnerPick {
    pub team: String,
    pub is_home: bool,
    /// 0~100, 소수점 한 자리
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TotalPrediction {
    pub pick: TotalPick,
    pub confidence: f64,
    pub line: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub game: GameKey,
    pub winner: WinnerPick,
    /// `None` when the game had no over/under line to predict against
    pub total: Option<TotalPrediction>,
}

/// argmax over (p0, p1); the first maximal index wins, so a tie is class 0
fn predicted_class(probs: &ClassProbabilities) -> usize {
    if probs.p1 > probs.p0 {
        1
    } else {
        0
    }
}

pub fn interpret_winner(game: &GameKey, probs: &ClassProbabilities) -> WinnerPick {
    match predicted_class(probs) {
        1 => WinnerPick {
            team: game.home.clone(),
            is_home: true,
            confidence: percent(probs.p1, CONFIDENCE_DECIMALS),
        },
        _ => WinnerPick {
            team: game.away.clone(),
            is_home: false,
            confidence: percent(probs.p0, CONFIDENCE_DECIMALS),
        },
    }
}

pub fn interpret_total(probs: &ClassProbabilities, line: f64) -> TotalPrediction {
    let (pick, probability) = match predicted_class(probs) {
        1 => (TotalPick::Over, probs.p1),
        _ => (TotalPick::Under, probs.p0),
    };
    TotalPrediction {
        pick,
        confidence: percent(probability, CONFIDENCE_DECIMALS),
        line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn game() -> GameKey {
        GameKey::new("Boston Celtics", "Miami Heat")
    }

    #[test]
    fn test_home_winner() {
        let pick = interpret_winner(&game(), &ClassProbabilities::from_p1(0.6873));
        assert_eq!(pick.team, "Boston Celtics");
        assert!(pick.is_home);
        assert_eq!(pick.confidence, 68.7);
    }

    #[test]
    fn test_away_winner() {
        let pick = interpret_winner(&game(), &ClassProbabilities { p0: 0.552, p1: 0.448 });
        assert_eq!(pick.team, "Miami Heat");
        assert!(!pick.is_home);
        assert_eq!(pick.confidence, 55.2);
    }

    #[test]
    fn test_tie_goes_to_class_zero() {
        let probs = ClassProbabilities { p0: 0.5, p1: 0.5 };
        assert_eq!(interpret_winner(&game(), &probs).team, "Miami Heat");
        let total = interpret_total(&probs, 221.5);
        assert_eq!(total.pick, TotalPick::Under);
        assert_eq!(total.confidence, 50.0);
        assert_eq!(total.line, 221.5);
    }

    #[test]
    fn test_over_pick() {
        let total = interpret_total(&ClassProbabilities::from_p1(0.537), 230.0);
        assert_eq!(total.pick, TotalPick::Over);
        assert_eq!(total.confidence, 53.7);
        assert_eq!(total.pick.to_string(), "OVER");
    }

    #[test]
    fn test_class_one_iff_p1_greater() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let probs = ClassProbabilities::from_p1(rng.gen::<f64>());
            let pick = interpret_winner(&game(), &probs);
            assert_eq!(pick.is_home, probs.p1 > probs.p0);
            let total = interpret_total(&probs, 220.0);
            assert_eq!(total.pick == TotalPick::Over, probs.p1 > probs.p0);
            assert!((0.0..=100.0).contains(&pick.confidence));
            assert!(pick.confidence >= 50.0);
        }
    }
}
