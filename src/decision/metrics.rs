use crate::common::round_half_even;
use crate::config::METRIC_DECIMALS;
use crate::model::ClassProbabilities;
use crate::slate::{AmericanOdds, MarketRecord};

/// 기대값 / 켈리 비율 (홈, 원정)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DecisionMetrics {
    /// Expected return per 100 staked
    pub home_ev: f64,
    pub away_ev: f64,
    /// Kelly stake as a percentage of bankroll
    pub home_kelly: f64,
    pub away_kelly: f64,
    /// Model probability minus the price's implied probability, in points.
    /// `None` when that side is unpriced.
    pub home_edge: Option<f64>,
    pub away_edge: Option<f64>,
}

/// Net profit on a 100 stake when the bet wins
pub fn american_to_payout(odds: AmericanOdds) -> f64 {
    let odds = odds.value() as f64;
    if odds > 0.0 {
        odds
    } else {
        100.0 / -odds * 100.0
    }
}

/// Net decimal odds `b` (profit per unit staked)
pub fn american_to_decimal(odds: AmericanOdds) -> f64 {
    american_to_payout(odds) / 100.0
}

/// Break-even win probability implied by the price
pub fn implied_probability(odds: AmericanOdds) -> f64 {
    let odds = odds.value() as f64;
    if odds > 0.0 {
        100.0 / (odds + 100.0)
    } else {
        -odds / (-odds + 100.0)
    }
}

/// 시장 대비 우위 (percentage points)
pub fn edge(win_probability: f64, odds: AmericanOdds) -> f64 {
    round_half_even((win_probability - implied_probability(odds)) * 100.0, METRIC_DECIMALS)
}

/// EV = p·payout − (1−p)·100, per 100 staked
pub fn expected_value(win_probability: f64, odds: AmericanOdds) -> f64 {
    let ev = win_probability * american_to_payout(odds) - (1.0 - win_probability) * 100.0;
    round_half_even(ev, METRIC_DECIMALS)
}

/// Kelly fraction in percent, never negative.
///
/// f = (b·p − (1−p)) / b. Missing odds or probability, or no positive edge,
/// size the bet at 0.
pub fn kelly_fraction(odds: Option<AmericanOdds>, win_probability: Option<f64>) -> f64 {
    let (Some(odds), Some(p)) = (odds, win_probability) else {
        return 0.0;
    };
    if expected_value(p, odds) <= 0.0 {
        return 0.0;
    }
    let b = american_to_decimal(odds);
    let fraction = round_half_even(100.0 * (b * p - (1.0 - p)) / b, METRIC_DECIMALS);
    fraction.max(0.0)
}

/// EV is reported only when both sides are priced; Kelly only when requested
pub fn compute_metrics(
    probs: &ClassProbabilities,
    market: Option<&MarketRecord>,
    use_kelly: bool,
) -> DecisionMetrics {
    let home_odds = market.and_then(|m| m.home_moneyline);
    let away_odds = market.and_then(|m| m.away_moneyline);

    let mut metrics = DecisionMetrics::default();

    if let (Some(home), Some(away)) = (home_odds, away_odds) {
        metrics.home_ev = expected_value(probs.p1, home);
        metrics.away_ev = expected_value(probs.p0, away);
    }

    metrics.home_edge = home_odds.map(|o| edge(probs.p1, o));
    metrics.away_edge = away_odds.map(|o| edge(probs.p0, o));

    if use_kelly {
        metrics.home_kelly = kelly_fraction(home_odds, Some(probs.p1));
        metrics.away_kelly = kelly_fraction(away_odds, Some(probs.p0));
    }

    metrics
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn odds(value: i32) -> AmericanOdds {
        AmericanOdds::new(value).unwrap()
    }

    #[test]
    fn test_expected_value_positive_odds() {
        // payout 1.5 per unit: 0.60×150 − 0.40×100
        assert_eq!(expected_value(0.60, odds(150)), 50.0);
    }

    #[test]
    fn test_expected_value_negative_odds() {
        // 100/110 per unit: 0.5×90.909 − 0.5×100
        assert_eq!(expected_value(0.5, odds(-110)), -4.55);
        assert!(expected_value(0.7, odds(-110)) > 0.0);
    }

    #[test]
    fn test_kelly_favourite() {
        // b = 100/110, f = (0.909×0.70 − 0.30)/0.909
        let kelly = kelly_fraction(Some(odds(-110)), Some(0.70));
        assert!((kelly - 37.0).abs() < 0.1, "kelly = {}", kelly);
        assert!((american_to_decimal(odds(-110)) - 0.909).abs() < 1e-3);
        assert_eq!(american_to_decimal(odds(250)), 2.5);
    }

    #[test]
    fn test_kelly_clamped_without_edge() {
        assert_eq!(kelly_fraction(Some(odds(-300)), Some(0.5)), 0.0);
        assert_eq!(kelly_fraction(Some(odds(200)), Some(0.2)), 0.0);
    }

    #[test]
    fn test_kelly_missing_inputs() {
        assert_eq!(kelly_fraction(None, Some(0.9)), 0.0);
        assert_eq!(kelly_fraction(Some(odds(120)), None), 0.0);
    }

    #[test]
    fn test_ev_sign_matches_break_even() {
        let mut rng = rand::thread_rng();
        for _ in 0..2000 {
            let p: f64 = rng.gen_range(0.01..0.99);
            let o = if rng.gen_bool(0.5) {
                rng.gen_range(100..600)
            } else {
                -rng.gen_range(100..600)
            };
            let o = odds(o);
            let ev = expected_value(p, o);
            let implied = implied_probability(o);

            // skip values that round to zero near break-even
            if (p - implied).abs() > 1e-3 {
                assert_eq!(ev > 0.0, p > implied, "p={} odds={} ev={}", p, o, ev);
            }
            if (p - implied).abs() > 1e-3 {
                assert_eq!(edge(p, o) > 0.0, ev > 0.0, "p={} odds={}", p, o);
            }
            if ev <= 0.0 {
                assert_eq!(kelly_fraction(Some(o), Some(p)), 0.0, "p={} odds={}", p, o);
            }
        }
    }

    #[test]
    fn test_metrics_need_both_prices_for_ev() {
        let probs = ClassProbabilities::from_p1(0.65);
        let market = MarketRecord {
            over_under: Some(220.0),
            home_moneyline: Some(odds(-150)),
            away_moneyline: None,
        };

        let metrics = compute_metrics(&probs, Some(&market), true);
        assert_eq!(metrics.home_ev, 0.0);
        assert_eq!(metrics.away_ev, 0.0);
        assert!(metrics.home_kelly > 0.0);
        assert_eq!(metrics.away_kelly, 0.0);
        // 65 − 60
        assert_eq!(metrics.home_edge, Some(5.0));
        assert_eq!(metrics.away_edge, None);

        assert_eq!(compute_metrics(&probs, None, true), DecisionMetrics::default());
    }

    #[test]
    fn test_metrics_both_sides() {
        let probs = ClassProbabilities::from_p1(0.60);
        let market = MarketRecord {
            over_under: None,
            home_moneyline: Some(odds(150)),
            away_moneyline: Some(odds(-170)),
        };

        let metrics = compute_metrics(&probs, Some(&market), false);
        assert_eq!(metrics.home_ev, 50.0);
        assert!(metrics.away_ev < 0.0);
        // 60 − 100/250
        assert_eq!(metrics.home_edge, Some(20.0));
        assert!(metrics.away_edge.unwrap() < 0.0);
        assert_eq!(metrics.home_kelly, 0.0);
        assert_eq!(metrics.away_kelly, 0.0);
    }
}
