use std::fs;
use std::path::Path;

use serde::Serialize;
use skat_core::game::driver::{RoundOutcome, RoundResult};
use skat_core::model::seat::Seat;
use statrs::distribution::{ContinuousCDF, Normal};
use statrs::statistics::Statistics;
use thiserror::Error;

use crate::config::{BenchmarkConfig, SEATS};

const CONFIDENCE: f64 = 0.95;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("seating references agent index {0} outside the roster")]
    UnknownAgent(usize),
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Per-agent score tallies built up round by round.
pub struct SummaryCollector {
    run_id: String,
    rounds: usize,
    no_bid_rounds: usize,
    agents: Vec<AgentTally>,
}

impl SummaryCollector {
    pub fn new(config: &BenchmarkConfig) -> Self {
        let agents = config
            .agents
            .iter()
            .map(|agent| AgentTally::new(agent.name.clone(), agent.kind.clone()))
            .collect();
        Self {
            run_id: config.run_id.clone(),
            rounds: 0,
            no_bid_rounds: 0,
            agents,
        }
    }

    /// `seating[seat]` is the roster index of the agent in that seat.
    pub fn record_round(
        &mut self,
        seating: &[usize; SEATS],
        result: &RoundResult,
    ) -> Result<(), SummaryError> {
        self.rounds += 1;
        if result.outcome == RoundOutcome::NoBid {
            self.no_bid_rounds += 1;
        }

        for seat in Seat::LOOP {
            let agent_index = seating[seat.index()];
            let tally = self
                .agents
                .get_mut(agent_index)
                .ok_or(SummaryError::UnknownAgent(agent_index))?;
            tally.scores.push(f64::from(result.scores[seat.index()]));

            if result.declarer != Some(seat) {
                continue;
            }
            tally.declared += 1;
            match result.outcome {
                RoundOutcome::Completed { won: true, .. } => tally.won += 1,
                RoundOutcome::Overbid { .. } => tally.overbids += 1,
                _ => {}
            }
        }
        Ok(())
    }

    pub fn finalize(self) -> RunReport {
        RunReport {
            run_id: self.run_id,
            rounds: self.rounds,
            no_bid_rounds: self.no_bid_rounds,
            agents: self.agents.into_iter().map(AgentTally::into_report).collect(),
        }
    }
}

struct AgentTally {
    name: String,
    kind: String,
    scores: Vec<f64>,
    declared: usize,
    won: usize,
    overbids: usize,
}

impl AgentTally {
    fn new(name: String, kind: String) -> Self {
        Self {
            name,
            kind,
            scores: Vec::new(),
            declared: 0,
            won: 0,
            overbids: 0,
        }
    }

    fn into_report(self) -> AgentReport {
        let (mean, sem) = mean_and_sem(&self.scores);
        let margin = z_score(CONFIDENCE) * sem;
        AgentReport {
            name: self.name,
            kind: self.kind,
            rounds: self.scores.len(),
            total: self.scores.iter().sum(),
            mean,
            sem,
            ci95: (mean - margin, mean + margin),
            declared: self.declared,
            won: self.won,
            overbids: self.overbids,
        }
    }
}

fn mean_and_sem(scores: &[f64]) -> (f64, f64) {
    if scores.is_empty() {
        return (0.0, 0.0);
    }
    let mean = scores.iter().mean();
    if scores.len() < 2 {
        return (mean, 0.0);
    }
    let sem = scores.iter().std_dev() / (scores.len() as f64).sqrt();
    (mean, sem)
}

fn z_score(confidence: f64) -> f64 {
    Normal::new(0.0, 1.0)
        .map(|normal| normal.inverse_cdf(0.5 + confidence / 2.0))
        .unwrap_or(1.96)
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentReport {
    pub name: String,
    pub kind: String,
    pub rounds: usize,
    pub total: f64,
    pub mean: f64,
    pub sem: f64,
    pub ci95: (f64, f64),
    pub declared: usize,
    pub won: usize,
    pub overbids: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: String,
    pub rounds: usize,
    pub no_bid_rounds: usize,
    pub agents: Vec<AgentReport>,
}

impl RunReport {
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# Tournament Summary: {}\n\n", self.run_id));
        out.push_str(&format!(
            "Rounds: {} ({} passed out)\n\n",
            self.rounds, self.no_bid_rounds
        ));
        out.push_str("| Agent | Kind | Rounds | Total | Mean ± SEM | 95% CI | Declared | Won | Overbid |\n");
        out.push_str("|-------|------|--------|-------|------------|--------|----------|-----|---------|\n");

        for agent in &self.agents {
            out.push_str(&format!(
                "| {name} | {kind} | {rounds} | {total:.0} | {mean:.2} ± {sem:.2} | [{low:.2}, {high:.2}] | {declared} | {won} | {overbids} |\n",
                name = agent.name,
                kind = agent.kind,
                rounds = agent.rounds,
                total = agent.total,
                mean = agent.mean,
                sem = agent.sem,
                low = agent.ci95.0,
                high = agent.ci95.1,
                declared = agent.declared,
                won = agent.won,
                overbids = agent.overbids,
            ));
        }
        out
    }

    pub fn write_markdown(&self, path: impl AsRef<Path>) -> Result<(), SummaryError> {
        fs::write(path.as_ref(), self.to_markdown()).map_err(|source| SummaryError::Io {
            context: "writing summary markdown",
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> BenchmarkConfig {
        let yaml = r#"
run_id: "unit"
deals:
  rounds: 2
agents:
  - { name: "a", kind: "donald" }
  - { name: "b", kind: "bob" }
  - { name: "c", kind: "kenny" }
outputs:
  jsonl: "out.jsonl"
  summary_md: "summary.md"
"#;
        let mut cfg: BenchmarkConfig = serde_yaml::from_str(yaml).unwrap();
        cfg.validate().unwrap();
        cfg
    }

    #[test]
    fn mean_and_sem_of_known_values() {
        let (mean, sem) = mean_and_sem(&[2.0, 4.0, 6.0, 8.0]);
        assert!((mean - 5.0).abs() < 1e-9);
        // Sample deviation sqrt(20/3), over sqrt(4).
        assert!((sem - (20.0f64 / 3.0).sqrt() / 2.0).abs() < 1e-9);
        assert_eq!(mean_and_sem(&[7.0]), (7.0, 0.0));
        assert_eq!(mean_and_sem(&[]), (0.0, 0.0));
    }

    #[test]
    fn z_score_matches_table() {
        assert!((z_score(0.95) - 1.959_964).abs() < 1e-4);
    }

    #[test]
    fn scores_follow_the_seating() {
        let mut collector = SummaryCollector::new(&config());
        let won = RoundResult {
            declarer: Some(Seat::Middlehand),
            scores: [0, 48, 0],
            outcome: RoundOutcome::Completed {
                won: true,
                points: 70,
                value: 48,
            },
        };
        // Agent "c" sits in middlehand.
        collector.record_round(&[0, 2, 1], &won).unwrap();
        let no_bid = RoundResult {
            declarer: None,
            scores: [0, 0, 0],
            outcome: RoundOutcome::NoBid,
        };
        collector.record_round(&[1, 0, 2], &no_bid).unwrap();

        let report = collector.finalize();
        assert_eq!(report.rounds, 2);
        assert_eq!(report.no_bid_rounds, 1);
        let c = &report.agents[2];
        assert_eq!(c.name, "c");
        assert_eq!(c.declared, 1);
        assert_eq!(c.won, 1);
        assert!((c.mean - 24.0).abs() < 1e-9);
        assert!(report.to_markdown().contains("| c | kenny | 2 | 48 |"));
    }

    #[test]
    fn unknown_agent_index_is_an_error() {
        let mut collector = SummaryCollector::new(&config());
        let result = RoundResult {
            declarer: None,
            scores: [0; 3],
            outcome: RoundOutcome::NoBid,
        };
        assert!(matches!(
            collector.record_round(&[0, 1, 5], &result),
            Err(SummaryError::UnknownAgent(5))
        ));
    }
}
