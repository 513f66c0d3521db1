use anyhow::{Context, Result};
use clap::Parser;
use kadline::{
    cli::{Cli, OutputFormat},
    config::TimelineConfig,
    csv_output::CsvOutput,
    ingest, json_output, timeline,
};
use std::fs;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn build_config(cli: &Cli) -> TimelineConfig {
    let mut config = TimelineConfig {
        min_duration: cli.min_duration,
        monitor_excluded_from_ranking: cli.rank_ignore_monitor,
        ..TimelineConfig::default()
    };
    if cli.connected_ends_dial {
        config = config.with_connected_ends_dial();
    }
    config
}

/// Print per-lane correlation statistics for -c mode
fn print_summary(timeline: &timeline::Timeline) {
    println!("{:<22} {:>9} {:>12} {:>11}", "lane", "intervals", "orphan ends", "degenerate");
    println!("{:-<22} {:->9} {:->12} {:->11}", "", "", "", "");
    for report in &timeline.stats.lanes {
        println!(
            "{:<22} {:>9} {:>12} {:>11}",
            report.lane.name(),
            report.stats.emitted,
            report.stats.orphan_ends,
            report.stats.degenerate
        );
    }
    println!();
    println!("peers ranked: {}", timeline.labels.len());
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let report = ingest::read_events_from_path(&cli.input)
        .with_context(|| format!("reading event log {}", cli.input.display()))?;
    if !report.skipped.is_empty() {
        warn!(
            skipped = report.skipped.len(),
            parsed = report.events.len(),
            "some rows could not be parsed"
        );
    }

    let config = build_config(&cli);
    let timeline = timeline::assemble(&report.events, &config);

    if cli.summary {
        print_summary(&timeline);
        return Ok(());
    }

    let rendered = match cli.format {
        OutputFormat::Json => json_output::to_json(&timeline).context("serializing timeline")?,
        OutputFormat::Csv => {
            let mut output = CsvOutput::new();
            for record in timeline.records {
                output.add_record(record);
            }
            output.to_csv()
        }
    };

    match &cli.output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("writing output to {}", path.display()))?,
        None => print!("{rendered}"),
    }

    Ok(())
}
