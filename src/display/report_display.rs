use crate::controller::GameReport;
use crate::model::ModelKind;

const WIDTH: usize = 70;

/// Console report of a finished prediction run
pub struct ReportDisplay {
    model: ModelKind,
    show_kelly: bool,
}

impl ReportDisplay {
    pub fn new(model: ModelKind, show_kelly: bool) -> Self {
        Self { model, show_kelly }
    }

    pub fn progress(&self, percent: u8) {
        println!("[{:>3}%] {} predictions", percent, self.model.name());
    }

    pub fn display(&self, reports: &[GameReport]) {
        println!("\n{}", "=".repeat(WIDTH));
        println!("{:^width$}", format!("{} PREDICTIONS", self.model.name().to_uppercase()), width = WIDTH);
        println!("{}", "=".repeat(WIDTH));

        if reports.is_empty() {
            println!("No games with complete team statistics.");
        }
        for report in reports {
            println!("{}", format_prediction(report));
        }

        println!("{}", "-".repeat(WIDTH));
        if self.show_kelly {
            println!("{:^width$}", "Expected Value & Kelly Criterion", width = WIDTH);
        } else {
            println!("{:^width$}", "Expected Value", width = WIDTH);
        }
        println!("{}", "-".repeat(WIDTH));

        for report in reports {
            for line in format_metrics(report, self.show_kelly) {
                println!("{}", line);
            }
        }
        println!("{}", "=".repeat(WIDTH));
    }
}

/// `Home (conf%) vs Away: PICK line (conf%)`, the winner marked with `*`
fn format_prediction(report: &GameReport) -> String {
    let p = &report.prediction;
    let (home, away) = if p.winner.is_home {
        (format!("*{} ({:.1}%)", p.game.home, p.winner.confidence), p.game.away.clone())
    } else {
        (p.game.home.clone(), format!("*{} ({:.1}%)", p.game.away, p.winner.confidence))
    };

    let total = match &p.total {
        Some(t) => format!("{} {} ({:.1}%)", t.pick, t.line, t.confidence),
        None => "no total line".to_string(),
    };

    format!("{} vs {}: {}", home, away, total)
}

fn format_metrics(report: &GameReport, show_kelly: bool) -> [String; 2] {
    let game = &report.prediction.game;
    let m = &report.metrics;
    let line = |team: &str, ev: f64, edge: Option<f64>, kelly: f64| {
        let mut line = format!("{} EV: {:+.2}", team, ev);
        if let Some(edge) = edge {
            line.push_str(&format!(" Edge: {:+.2}%", edge));
        }
        if show_kelly {
            line.push_str(&format!(" Fraction of Bankroll: {:.2}%", kelly));
        }
        line
    };
    [
        line(&game.home, m.home_ev, m.home_edge, m.home_kelly),
        line(&game.away, m.away_ev, m.away_edge, m.away_kelly),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::{DecisionMetrics, PredictionResult, TotalPick, TotalPrediction, WinnerPick};
    use crate::slate::GameKey;

    fn report() -> GameReport {
        GameReport {
            prediction: PredictionResult {
                game: GameKey::new("Boston Celtics", "Miami Heat"),
                winner: WinnerPick {
                    team: "Miami Heat".to_string(),
                    is_home: false,
                    confidence: 55.2,
                },
                total: Some(TotalPrediction {
                    pick: TotalPick::Under,
                    confidence: 53.7,
                    line: 214.5,
                }),
            },
            metrics: DecisionMetrics {
                home_ev: -4.55,
                away_ev: 12.3,
                home_kelly: 0.0,
                away_kelly: 6.1,
                home_edge: Some(-1.3),
                away_edge: None,
            },
        }
    }

    #[test]
    fn test_prediction_line() {
        assert_eq!(
            format_prediction(&report()),
            "Boston Celtics vs *Miami Heat (55.2%): UNDER 214.5 (53.7%)"
        );

        let mut no_total = report();
        no_total.prediction.total = None;
        assert!(format_prediction(&no_total).ends_with("no total line"));
    }

    #[test]
    fn test_metric_lines() {
        let [home, away] = format_metrics(&report(), true);
        assert_eq!(home, "Boston Celtics EV: -4.55 Edge: -1.30% Fraction of Bankroll: 0.00%");
        assert_eq!(away, "Miami Heat EV: +12.30 Fraction of Bankroll: 6.10%");

        let [home, away] = format_metrics(&report(), false);
        assert_eq!(home, "Boston Celtics EV: -4.55 Edge: -1.30%");
        assert_eq!(away, "Miami Heat EV: +12.30");
    }
}
