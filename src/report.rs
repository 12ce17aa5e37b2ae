//! Plain-text console report.
//!
//! Bucket dumps are shown only for the first `snapshot_rounds` rounds and are
//! cut off after `row_limit` non-empty buckets.
use std::io::{self, Write};

use crate::sim::{Reporter, RoundRecord, SimulationConfig, Summary};
use crate::table::ChainedHashTable;

pub const DEFAULT_ROW_LIMIT: usize = 15;
const RULE_WIDTH: usize = 60;

pub struct ConsoleReporter<W: Write> {
    out: W,
    row_limit: usize,
    snapshot_rounds: usize,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            row_limit: DEFAULT_ROW_LIMIT,
            snapshot_rounds: 1,
        }
    }

    pub fn with_row_limit(mut self, row_limit: usize) -> Self {
        self.row_limit = row_limit;
        self
    }

    /// Number of leading rounds whose tables are dumped. Zero disables dumps.
    pub fn with_snapshot_rounds(mut self, snapshot_rounds: usize) -> Self {
        self.snapshot_rounds = snapshot_rounds;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn start(&mut self, config: &SimulationConfig) -> io::Result<()> {
        let columns: Vec<String> = config
            .capacities
            .iter()
            .map(|c| format!("Collisions (size={c})"))
            .collect();
        writeln!(
            self.out,
            "Round | {} | Total Collisions",
            columns.join(" | ")
        )?;
        writeln!(self.out, "{}", "-".repeat(10 + 30 * config.capacities.len()))
    }

    fn table_snapshot(&mut self, round: usize, table: &ChainedHashTable) -> io::Result<()> {
        if round > self.snapshot_rounds {
            return Ok(());
        }
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.out)?;
        writeln!(self.out, "{rule}")?;
        writeln!(
            self.out,
            "Round {round} - Table size {size} - Hash Table with Size {size}",
            size = table.capacity()
        )?;
        writeln!(self.out, "{rule}")?;

        let occupied = table.occupied_buckets();
        for (index, chain) in table.snapshot().take(self.row_limit) {
            let keys: Vec<&str> = chain.iter().map(|k| k.as_str()).collect();
            writeln!(self.out, "[{index:>4}] -> {}", keys.join(" -> "))?;
        }
        let hidden = occupied.saturating_sub(self.row_limit);
        if hidden > 0 {
            writeln!(self.out, "... ({hidden} more non-empty rows hidden)")?;
        }
        writeln!(self.out, "{}", "-".repeat(RULE_WIDTH))?;
        writeln!(self.out)
    }

    fn round_complete(&mut self, record: &RoundRecord) -> io::Result<()> {
        let mut row = vec![format!("{:>5}", record.round)];
        row.extend(record.collisions.iter().map(|c| format!("{c:^25}")));
        row.push(format!("{:^18}", record.total));
        writeln!(self.out, "{}", row.join(" | "))
    }

    fn summary(&mut self, summary: &Summary) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Total Collisions per Round:")?;
        for (i, total) in summary.round_totals.iter().enumerate() {
            writeln!(self.out, " - Round {}: {total} total collisions", i + 1)?;
        }

        writeln!(self.out)?;
        writeln!(self.out, "Average Collisions and Collision Rates Per Table:")?;
        for t in &summary.tables {
            writeln!(self.out)?;
            writeln!(self.out, "- Table Size {}:", t.capacity)?;
            writeln!(
                self.out,
                "  Average Collisions per Round: {:.2}",
                t.mean_collisions
            )?;
            writeln!(self.out, "  Average Collision Rate: {:.2}%", t.collision_rate)?;
        }
        self.out.flush()
    }
}
