use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use tradesense_models::config::InputConfig;
use tradesense_models::records::{SentimentRecord, TradeRecord};

use crate::error::{Dataset, LoadCause, PipelineError};

/// Columns the trade history export must contain.
pub const TRADE_COLUMNS: &[&str] = &[
    "Timestamp IST",
    "Closed PnL",
    "Execution Price",
    "Size USD",
    "Fee",
];

/// Columns the sentiment index export must contain.
pub const SENTIMENT_COLUMNS: &[&str] = &["date", "value", "classification"];

/// Both source tables, as read from disk.
#[derive(Debug, Clone, Default)]
pub struct Sources {
    pub trades: Vec<TradeRecord>,
    pub sentiment: Vec<SentimentRecord>,
}

/// Read a CSV table, checking the header row for `required` columns before
/// deserializing any record. Extra columns are ignored.
pub fn read_table<T, R>(reader: R, required: &[&'static str]) -> Result<Vec<T>, LoadCause>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if let Some(missing) = required
        .iter()
        .find(|column| !headers.iter().any(|h| h == **column))
    {
        return Err(LoadCause::MissingColumn(*missing));
    }

    let rows = rdr.deserialize().collect::<Result<Vec<T>, _>>()?;
    Ok(rows)
}

fn open_table<T: DeserializeOwned>(
    path: &Path,
    required: &[&'static str],
) -> Result<Vec<T>, LoadCause> {
    let file = File::open(path)?;
    read_table(file, required)
}

fn load_table<T: DeserializeOwned>(
    path: &Path,
    dataset: Dataset,
    required: &[&'static str],
) -> Result<Vec<T>, PipelineError> {
    open_table(path, required).map_err(|source| PipelineError::Load {
        dataset,
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_trades(path: &Path) -> Result<Vec<TradeRecord>, PipelineError> {
    load_table(path, Dataset::Trades, TRADE_COLUMNS)
}

pub fn load_sentiment(path: &Path) -> Result<Vec<SentimentRecord>, PipelineError> {
    load_table(path, Dataset::Sentiment, SENTIMENT_COLUMNS)
}

/// Load both source files. Fails on the first file that cannot be loaded;
/// nothing is returned for the other.
pub fn load_sources(inputs: &InputConfig) -> Result<Sources, PipelineError> {
    let trades = load_trades(Path::new(&inputs.trades_path))?;
    let sentiment = load_sentiment(Path::new(&inputs.sentiment_path))?;

    tracing::info!(
        trades = trades.len(),
        sentiment = sentiment.len(),
        "Data successfully loaded"
    );

    Ok(Sources { trades, sentiment })
}
