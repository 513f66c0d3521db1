//! CLI argument parsing for kadline

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for assembled timelines
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// JSON document with records, labels, bands and stats (default)
    Json,
    /// Flat CSV of interval records for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "kadline")]
#[command(version)]
#[command(about = "Correlate DHT crawl events into a renderable timeline", long_about = None)]
pub struct Cli {
    /// Path to the event log CSV written by the crawl collector
    pub input: PathBuf,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Suppress intervals shorter than this many seconds
    #[arg(
        long = "min-duration",
        value_name = "SECS",
        default_value = "0.001"
    )]
    pub min_duration: f64,

    /// Exclude provider-monitoring events from first-seen peer ranking
    #[arg(long = "rank-ignore-monitor")]
    pub rank_ignore_monitor: bool,

    /// Let connection events close pending dial operations
    #[arg(long = "connected-ends-dial")]
    pub connected_ends_dial: bool,

    /// Print correlation statistics instead of the timeline
    #[arg(short = 'c', long = "summary")]
    pub summary: bool,

    /// Enable debug logging to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
