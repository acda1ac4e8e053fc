use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MineError>;

/// Failures surfaced by a mining run. None of them are recoverable: a run
/// that returns an error has emitted no frequent itemsets.
#[derive(Debug, Error)]
pub enum MineError {
    #[error("unsupported value for minsup: {minsup} (expected a value in [0, 1])")]
    Config { minsup: f64 },
    #[error("I/O error on {source_name}: {source}")]
    Io {
        source_name: String,
        #[source]
        source: io::Error,
    },
    #[error("dataset truncated: expected {expected} transactions, found {found}")]
    Truncated { expected: usize, found: usize },
    #[error("dataset changed between passes: item {item} on line {line} is outside [0, {item_count})")]
    DatasetChanged {
        line: usize,
        item: usize,
        item_count: usize,
    },
    #[error("line {line}: invalid item id {token:?}")]
    Parse { line: usize, token: String },
}

/// Coarse classification of a [`MineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Io,
    Parse,
}

impl MineError {
    pub fn io(source_name: impl Into<String>, source: io::Error) -> Self {
        MineError::Io {
            source_name: source_name.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            MineError::Config { .. } => ErrorKind::Config,
            MineError::Io { .. } | MineError::Truncated { .. } | MineError::DatasetChanged { .. } => {
                ErrorKind::Io
            }
            MineError::Parse { .. } => ErrorKind::Parse,
        }
    }
}
