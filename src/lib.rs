//! Collision experiments for a separately chained hash table keyed by
//! 12-digit numeric identifiers and indexed with a folding hash.
pub mod error;
pub mod fold;
pub mod keygen;
pub mod report;
pub mod sim;
pub mod table;

pub use error::{Error, Result};
pub use fold::{Identifier, fold_hash, fold_sum};
pub use keygen::KeyGenerator;
pub use report::ConsoleReporter;
pub use sim::{Reporter, RoundRecord, RunState, Simulation, SimulationConfig, Summary, TableSummary};
pub use table::ChainedHashTable;
