mod permutations;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use skat_bot::{StrategyKind, make_strategy};
use skat_core::game::driver::{RoundOutcome, RoundResult, play_round};
use skat_core::game::serialization::RoundRecord;
use skat_core::game::strategy::Strategy;
use skat_core::model::deck::Deck;
use skat_core::model::round::{ContractViolation, Round};
use skat_core::model::seat::Seat;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{BenchmarkConfig, ResolvedOutputs, SEATS, ValidationError};
use crate::summary::{RunReport, SummaryCollector, SummaryError};

pub use permutations::SeatPermutations;

/// Plays a seeded series of rounds, rotating the seating every round.
pub struct TournamentRunner {
    config: BenchmarkConfig,
    outputs: ResolvedOutputs,
    agents: Vec<AgentBlueprint>,
    seat_permutations: SeatPermutations,
}

/// What a finished run produced.
pub struct RunSummary {
    pub rounds_played: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub report: RunReport,
}

impl TournamentRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: BenchmarkConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        if config.agents.len() != SEATS {
            return Err(RunnerError::SeatCount {
                found: config.agents.len(),
            });
        }

        let names: Vec<&str> = config.agents.iter().map(|agent| agent.name.as_str()).collect();
        let display = display_names(&names);
        let agents = config
            .agents
            .iter()
            .zip(display)
            .map(|(agent, display)| {
                Ok(AgentBlueprint {
                    name: agent.name.clone(),
                    display,
                    kind: agent.strategy_kind()?,
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        Ok(Self {
            config,
            outputs,
            agents,
            seat_permutations: SeatPermutations::new(),
        })
    }

    /// Execute the tournament, streaming one JSONL row per round.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.deals.seed.unwrap_or(0));
        let mut collector = SummaryCollector::new(&self.config);
        let mut rows_written = 0usize;

        for round_index in 0..self.config.deals.rounds {
            let deck_seed = rng.next_u64();
            let (permutation_index, seating) = self.seat_permutations.for_round(round_index);
            let (round, result) = self.play_one(deck_seed, &seating)?;
            collector.record_round(&seating, &result)?;

            let row = RoundLogRow {
                run_id: self.config.run_id.clone(),
                round_id: format!("R{round_index:05}"),
                round_index,
                permutation_index,
                deck_seed,
                seating: self.snapshot(&seating),
                record: RoundRecord::capture(&round, &result),
            };
            serde_json::to_writer(&mut writer, &row)?;
            writer.write_all(b"\n")?;
            rows_written += 1;

            self.log_round(round_index, &seating, &result);
        }

        writer.flush()?;

        let report = collector.finalize();
        report.write_markdown(&self.outputs.summary_md)?;

        Ok(RunSummary {
            rounds_played: self.config.deals.rounds,
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            report,
        })
    }

    fn play_one(
        &self,
        deck_seed: u64,
        seating: &[usize; SEATS],
    ) -> Result<(Round, RoundResult), RunnerError> {
        let names = Seat::LOOP.map(|seat| self.agents[seating[seat.index()]].display.clone());
        let mut round = Round::new(names, self.config.logging.verbosity);
        round.deal(&Deck::shuffled_with_seed(deck_seed))?;

        let mut strategies: [Box<dyn Strategy>; SEATS] = Seat::LOOP.map(|seat| {
            let agent = &self.agents[seating[seat.index()]];
            make_strategy(agent.kind, seat, strategy_seed(deck_seed, seat))
        });
        let result = play_round(&mut round, &mut strategies)?;
        Ok((round, result))
    }

    fn snapshot(&self, seating: &[usize; SEATS]) -> Vec<SeatSnapshot> {
        Seat::LOOP
            .iter()
            .map(|seat| {
                let agent = &self.agents[seating[seat.index()]];
                SeatSnapshot {
                    seat: *seat,
                    agent: agent.name.clone(),
                    kind: agent.kind.as_str().to_string(),
                }
            })
            .collect()
    }

    fn log_round(&self, round_index: usize, seating: &[usize; SEATS], result: &RoundResult) {
        if !tracing::enabled!(Level::INFO) {
            return;
        }
        let declarer = result
            .declarer
            .map(|seat| self.agents[seating[seat.index()]].name.as_str())
            .unwrap_or("-");
        let outcome = match result.outcome {
            RoundOutcome::NoBid => "no_bid",
            RoundOutcome::Overbid { .. } => "overbid",
            RoundOutcome::Completed { won: true, .. } => "won",
            RoundOutcome::Completed { won: false, .. } => "lost",
        };
        event!(
            target: "skat_bench::round",
            Level::INFO,
            run_id = %self.config.run_id,
            round_index = round_index as u64,
            declarer,
            outcome,
            score = result.declarer_score()
        );
    }
}

/// Seats share the deck seed but draw from separate streams.
fn strategy_seed(deck_seed: u64, seat: Seat) -> u64 {
    deck_seed
        .rotate_left(17)
        .wrapping_add(0x9E37_79B9_7F4A_7C15u64.wrapping_mul(seat.index() as u64 + 1))
}

/// Capitalised names, numbered where they collide, padded to one width.
pub fn display_names(names: &[&str]) -> Vec<String> {
    let capitalised: Vec<String> = names.iter().map(|name| capitalise(name)).collect();
    let mut numbered = Vec::with_capacity(capitalised.len());
    for (index, name) in capitalised.iter().enumerate() {
        let total = capitalised.iter().filter(|other| *other == name).count();
        if total > 1 {
            let ordinal = capitalised[..=index]
                .iter()
                .filter(|other| *other == name)
                .count();
            numbered.push(format!("{name}{ordinal}"));
        } else {
            numbered.push(name.clone());
        }
    }

    let width = numbered
        .iter()
        .map(|name| name.chars().count())
        .max()
        .unwrap_or(0);
    numbered
        .into_iter()
        .map(|name| format!("{name:<width$}"))
        .collect()
}

fn capitalise(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

struct AgentBlueprint {
    name: String,
    display: String,
    kind: StrategyKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeatSnapshot {
    pub seat: Seat,
    pub agent: String,
    pub kind: String,
}

#[derive(Serialize)]
struct RoundLogRow {
    run_id: String,
    round_id: String,
    round_index: usize,
    permutation_index: usize,
    deck_seed: u64,
    seating: Vec<SeatSnapshot>,
    #[serde(flatten)]
    record: RoundRecord,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("{0}")]
    Config(#[from] ValidationError),
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("round failed: {0}")]
    Round(#[from] ContractViolation),
    #[error("configuration requires exactly 3 agents but found {found}")]
    SeatCount { found: usize },
    #[error("summary error: {0}")]
    Summary(#[from] SummaryError),
}
