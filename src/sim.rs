//! Repeated collision trials across several table capacities.
//!
//! Each round draws one batch of identifiers and feeds that same batch, in
//! generation order, into a freshly reset table for every configured
//! capacity. Only collision counts are kept between rounds; summaries are
//! pure functions of that history.
//!
//! # Usage
//!
//! ```ignore
//! let config = SimulationConfig::default().with_seed(7);
//! let mut sim = Simulation::new(config)?;
//! let summary = sim.run(&mut ())?;
//! for t in &summary.tables {
//!     println!("{} -> {:.2}%", t.capacity, t.collision_rate);
//! }
//! ```
use std::collections::HashSet;
use std::io;

use crate::error::{Error, Result};
use crate::fold::Identifier;
use crate::keygen::KeyGenerator;
use crate::table::ChainedHashTable;

pub const DEFAULT_IDENTIFIER_COUNT: usize = 1000;
pub const DEFAULT_ROUND_COUNT: usize = 10;
pub const DEFAULT_CAPACITIES: [usize; 2] = [1009, 2003];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    pub capacities: Vec<usize>,
    pub identifier_count: usize,
    pub round_count: usize,
    /// Fixed seed for the identifier stream; `None` draws a fresh one.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            capacities: DEFAULT_CAPACITIES.to_vec(),
            identifier_count: DEFAULT_IDENTIFIER_COUNT,
            round_count: DEFAULT_ROUND_COUNT,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn new(capacities: Vec<usize>) -> Self {
        Self::default().with_capacities(capacities)
    }

    pub fn with_capacities(mut self, capacities: Vec<usize>) -> Self {
        self.capacities = capacities;
        self
    }

    pub fn with_identifier_count(mut self, identifier_count: usize) -> Self {
        self.identifier_count = identifier_count;
        self
    }

    pub fn with_round_count(mut self, round_count: usize) -> Self {
        self.round_count = round_count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.identifier_count == 0 {
            return Err(Error::run_params("identifier count must be at least 1"));
        }
        if self.round_count == 0 {
            return Err(Error::run_params("round count must be at least 1"));
        }
        if self.capacities.is_empty() {
            return Err(Error::run_params("at least one table capacity is required"));
        }
        let mut seen = HashSet::with_capacity(self.capacities.len());
        for &capacity in &self.capacities {
            if capacity == 0 {
                return Err(Error::InvalidCapacity { capacity });
            }
            if !seen.insert(capacity) {
                return Err(Error::run_params(format!(
                    "capacity {capacity} is listed more than once"
                )));
            }
        }
        Ok(())
    }
}

/// Collision counts for one completed round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundRecord {
    /// 1-based round number.
    pub round: usize,
    /// One entry per table, in configured capacity order.
    pub collisions: Vec<usize>,
    pub total: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableSummary {
    pub capacity: usize,
    pub total_collisions: usize,
    pub mean_collisions: f64,
    /// Mean collisions as a percentage of identifiers per round.
    pub collision_rate: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub identifier_count: usize,
    pub rounds: usize,
    pub round_totals: Vec<usize>,
    pub tables: Vec<TableSummary>,
}

impl Summary {
    pub fn table(&self, capacity: usize) -> Option<&TableSummary> {
        self.tables.iter().find(|t| t.capacity == capacity)
    }
}

/// Presentation hooks. The simulation never formats anything itself.
pub trait Reporter {
    /// Called once, before the first round runs.
    fn start(&mut self, _config: &SimulationConfig) -> io::Result<()> {
        Ok(())
    }

    /// Called after every table is filled, before the round is recorded.
    fn table_snapshot(&mut self, _round: usize, _table: &ChainedHashTable) -> io::Result<()> {
        Ok(())
    }

    fn round_complete(&mut self, _record: &RoundRecord) -> io::Result<()> {
        Ok(())
    }

    fn summary(&mut self, _summary: &Summary) -> io::Result<()> {
        Ok(())
    }
}

impl Reporter for () {}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Running { completed: usize },
    Completed,
}

pub struct Simulation {
    config: SimulationConfig,
    tables: Vec<ChainedHashTable>,
    keygen: KeyGenerator,
    records: Vec<RoundRecord>,
    state: RunState,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let tables = config
            .capacities
            .iter()
            .map(|&c| ChainedHashTable::new(c))
            .collect::<Result<Vec<_>>>()?;
        let keygen = match config.seed {
            Some(seed) => KeyGenerator::seeded(seed),
            None => KeyGenerator::new(),
        };
        Ok(Self {
            records: Vec::new(),
            config,
            tables,
            keygen,
            state: RunState::NotStarted,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn tables(&self) -> &[ChainedHashTable] {
        &self.tables
    }

    pub fn records(&self) -> &[RoundRecord] {
        &self.records
    }

    /// Per-round collision counts for one capacity.
    pub fn history(&self, capacity: usize) -> Option<Vec<usize>> {
        let slot = self.config.capacities.iter().position(|&c| c == capacity)?;
        self.records
            .iter()
            .map(|r| r.collisions.get(slot).copied())
            .collect()
    }

    /// Run one full round. Returns `None` once every round has run.
    pub fn step<R: Reporter + ?Sized>(&mut self, reporter: &mut R) -> Result<Option<&RoundRecord>> {
        if self.state == RunState::Completed {
            return Ok(None);
        }
        if self.state == RunState::NotStarted {
            reporter.start(&self.config)?;
            self.state = RunState::Running { completed: 0 };
        }
        let round = self.records.len() + 1;
        let keys = self.keygen.generate(self.config.identifier_count);
        let record = self.fill_tables(round, &keys, reporter)?;

        tracing::info!(
            round,
            total = record.total,
            collisions = ?record.collisions,
            "round complete"
        );
        reporter.round_complete(&record)?;
        self.records.push(record);

        self.state = if round >= self.config.round_count {
            RunState::Completed
        } else {
            RunState::Running { completed: round }
        };
        Ok(self.records.last())
    }

    fn fill_tables<R: Reporter + ?Sized>(
        &mut self,
        round: usize,
        keys: &[Identifier],
        reporter: &mut R,
    ) -> Result<RoundRecord> {
        let mut collisions = Vec::with_capacity(self.tables.len());
        for table in &mut self.tables {
            table.reset();
            for key in keys {
                table.insert(*key);
            }
            reporter.table_snapshot(round, table)?;
            collisions.push(table.collisions());
        }
        let total = collisions.iter().sum();
        Ok(RoundRecord {
            round,
            collisions,
            total,
        })
    }

    /// Run all remaining rounds, then summarize and report.
    pub fn run<R: Reporter + ?Sized>(&mut self, reporter: &mut R) -> Result<Summary> {
        while self.step(reporter)?.is_some() {}
        let summary = self.summary()?;
        reporter.summary(&summary)?;
        Ok(summary)
    }

    /// Aggregate the rounds completed so far.
    pub fn summary(&self) -> Result<Summary> {
        summarize(
            &self.config.capacities,
            self.config.identifier_count,
            &self.records,
        )
    }
}

/// Mean collisions and collision rate per capacity over `records`.
pub fn summarize(
    capacities: &[usize],
    identifier_count: usize,
    records: &[RoundRecord],
) -> Result<Summary> {
    if records.is_empty() {
        return Err(Error::EmptyHistory);
    }
    if identifier_count == 0 {
        return Err(Error::run_params("identifier count must be at least 1"));
    }
    if let Some(r) = records.iter().find(|r| r.collisions.len() != capacities.len()) {
        return Err(Error::run_params(format!(
            "round {} has {} collision counts for {} capacities",
            r.round,
            r.collisions.len(),
            capacities.len()
        )));
    }
    let rounds = records.len();
    let tables = capacities
        .iter()
        .enumerate()
        .map(|(slot, &capacity)| {
            let total_collisions: usize = records.iter().map(|r| r.collisions[slot]).sum();
            let mean_collisions = total_collisions as f64 / rounds as f64;
            TableSummary {
                capacity,
                total_collisions,
                mean_collisions,
                collision_rate: mean_collisions / identifier_count as f64 * 100.0,
            }
        })
        .collect();
    let summary = Summary {
        identifier_count,
        rounds,
        round_totals: records.iter().map(|r| r.total).collect(),
        tables,
    };
    tracing::info!(rounds, identifier_count, "simulation summarized");
    Ok(summary)
}
