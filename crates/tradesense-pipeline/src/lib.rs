pub mod aggregate;
pub mod correlation;
pub mod error;
pub mod join;
pub mod loader;

pub use error::{Dataset, LoadCause, PipelineError};
pub use loader::Sources;

use serde::Serialize;
use tradesense_models::config::InputConfig;
use tradesense_models::correlation::CorrelationMatrix;
use tradesense_models::daily::{DailyPerformance, DailySentiment, MergedDay};

/// Everything the figure is drawn from, plus the intermediate tables.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub daily: Vec<DailyPerformance>,
    pub sentiment: Vec<DailySentiment>,
    pub merged: Vec<MergedDay>,
    pub correlation: CorrelationMatrix,
}

/// Aggregate, clean, join and correlate already-loaded tables.
///
/// An empty join is an error: there is nothing to correlate or plot.
pub fn analyze(sources: &Sources) -> Result<Analysis, PipelineError> {
    let daily = aggregate::daily_performance(&sources.trades)?;
    let sentiment = aggregate::daily_sentiment(&sources.sentiment)?;
    let merged = join::merge_on_date(&daily, &sentiment);
    if merged.is_empty() {
        return Err(PipelineError::EmptyJoin);
    }
    let correlation = correlation::correlation_matrix(&merged);

    Ok(Analysis {
        daily,
        sentiment,
        merged,
        correlation,
    })
}

/// Load both inputs and analyze them.
pub fn run_pipeline(inputs: &InputConfig) -> Result<Analysis, PipelineError> {
    let sources = loader::load_sources(inputs)?;
    analyze(&sources)
}
