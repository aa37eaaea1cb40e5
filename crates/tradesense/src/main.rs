use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "tradesense",
    about = "Correlate daily trading performance with the fear & greed index and plot the result"
)]
struct Cli {
    /// Path to configuration file (built-in defaults are used if the default path is absent)
    #[arg(short, long)]
    config: Option<String>,

    /// Trade history CSV (overrides inputs.trades_path)
    #[arg(long)]
    trades: Option<String>,

    /// Fear & greed index CSV (overrides inputs.sentiment_path)
    #[arg(long)]
    sentiment: Option<String>,

    /// Figure output path, .svg (overrides output.figure_path)
    #[arg(short, long)]
    output: Option<String>,

    /// Print the analysis tables and correlation matrix as JSON to stdout
    #[arg(long)]
    json: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load config, then apply command-line overrides
    let mut config = match &cli.config {
        Some(path) => tradesense::load_config(Path::new(path), true)?,
        None => tradesense::load_config(Path::new(tradesense::DEFAULT_CONFIG_PATH), false)?,
    };
    if let Some(trades) = cli.trades {
        config.inputs.trades_path = trades;
    }
    if let Some(sentiment) = cli.sentiment {
        config.inputs.sentiment_path = sentiment;
    }
    if let Some(output) = cli.output {
        config.output.figure_path = output;
    }

    let analysis = tradesense::run(&config)?;

    if cli.json {
        let output = if cli.pretty {
            serde_json::to_string_pretty(&analysis)?
        } else {
            serde_json::to_string(&analysis)?
        };
        println!("{output}");
    }

    Ok(())
}
