use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Which of the two source files a load error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Trades,
    Sentiment,
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dataset::Trades => f.write_str("trade history"),
            Dataset::Sentiment => f.write_str("sentiment index"),
        }
    }
}

/// Underlying reason a source file could not be loaded.
#[derive(Error, Debug)]
pub enum LoadCause {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("missing required column {0:?}")]
    MissingColumn(&'static str),
}

#[derive(Error, Debug)]
pub enum PipelineError {
    /// A source file is missing, unreadable, or not a CSV with the expected columns.
    #[error("Failed to load {dataset} file {}", path.display())]
    Load {
        dataset: Dataset,
        path: PathBuf,
        #[source]
        source: LoadCause,
    },

    #[error("Trade row {row}: timestamp {value:?} does not match DD-MM-YYYY HH:MM")]
    Timestamp { row: usize, value: String },

    #[error("Sentiment row {row}: unrecognised date {value:?}")]
    Date { row: usize, value: String },

    #[error("No date appears in both the trade history and the sentiment index")]
    EmptyJoin,
}

impl PipelineError {
    pub fn is_load_failure(&self) -> bool {
        matches!(self, PipelineError::Load { .. })
    }
}
