pub mod config;
pub mod correlation;
pub mod daily;
pub mod records;

pub use config::{InputConfig, OutputConfig, Palette, PlotStyle, TradesenseConfig};
pub use correlation::{CorrelationMatrix, MetricColumn};
pub use daily::{DailyPerformance, DailySentiment, MergedDay};
pub use records::{SentimentLabel, SentimentRecord, TradeRecord};
