use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("table capacity must be at least 1, got: {capacity}")]
    InvalidCapacity { capacity: usize },
    #[error("identifier must be decimal digits only, got: {key:?}")]
    InvalidIdentifier { key: String },
    #[error("invalid run parameters: {reason}")]
    InvalidRunParameters { reason: String },
    #[error("no rounds have completed, nothing to summarize")]
    EmptyHistory,
    #[error("reporter failed: {0}")]
    Report(#[from] io::Error),
}

impl Error {
    pub(crate) fn run_params(reason: impl Into<String>) -> Self {
        Self::InvalidRunParameters {
            reason: reason.into(),
        }
    }
}
