//! Event-log ingestion
//!
//! Reads the CSV written by the crawl collector
//! (`peer_id,distance,time,type,has_error,error,extra`) and exposes it as an
//! ordered sequence of `Event`s. Row-level failures are isolated: a malformed
//! row is logged, collected in the report, and skipped — it never aborts the
//! rest of the run. The XOR distance is normalized here, once per row.

use crate::distance::{self, DistanceError};
use crate::event::{Event, EventKind};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("invalid timestamp: {0:?}")]
    InvalidTime(String),

    #[error("invalid has_error flag: {0:?}")]
    InvalidErrorFlag(String),

    #[error("unknown event type: {0:?}")]
    UnknownKind(String),

    #[error(transparent)]
    Distance(#[from] DistanceError),

    #[error("failed to read event log: {0}")]
    Io(#[from] std::io::Error),
}

/// A skipped row and the reason it was skipped.
#[derive(Debug)]
pub struct RowError {
    /// 1-based line number in the input.
    pub line: usize,
    pub error: IngestError,
}

/// Everything ingestion produced: the usable events plus per-row failures.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub events: Vec<Event>,
    pub skipped: Vec<RowError>,
}

/// Read and parse an event log from disk. Only I/O failures are fatal.
pub fn read_events_from_path(path: &Path) -> Result<IngestReport, IngestError> {
    let input = fs::read_to_string(path)?;
    Ok(parse_events(&input))
}

/// Parse an event log from a string, skipping the header row if present.
pub fn parse_events(input: &str) -> IngestReport {
    let mut report = IngestReport::default();

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        if line.is_empty() {
            continue;
        }
        if idx == 0 && line.starts_with("peer_id") {
            continue;
        }

        let fields = split_row(line);
        match parse_row(&fields) {
            Ok(event) => report.events.push(event),
            Err(error) => {
                warn!(line = line_no, %error, "skipping malformed row");
                report.skipped.push(RowError {
                    line: line_no,
                    error,
                });
            }
        }
    }

    report
}

/// Split one CSV row, honoring double-quoted fields with `""` escapes.
fn split_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

fn parse_row(fields: &[String]) -> Result<Event, IngestError> {
    let get = |i: usize, name: &'static str| -> Result<&str, IngestError> {
        fields
            .get(i)
            .map(|s| s.as_str())
            .ok_or(IngestError::MissingField(name))
    };

    let peer_id = get(0, "peer_id")?;
    if peer_id.is_empty() {
        return Err(IngestError::MissingField("peer_id"));
    }

    let distance_norm = distance::normalize(get(1, "distance")?)?;

    let time_field = get(2, "time")?;
    let time: f64 = time_field
        .parse()
        .map_err(|_| IngestError::InvalidTime(time_field.to_string()))?;
    if !time.is_finite() {
        return Err(IngestError::InvalidTime(time_field.to_string()));
    }

    let type_field = get(3, "type")?;
    let kind = EventKind::parse(type_field)
        .ok_or_else(|| IngestError::UnknownKind(type_field.to_string()))?;

    let error_flag = get(4, "has_error")?;
    let has_error: bool = error_flag
        .parse()
        .map_err(|_| IngestError::InvalidErrorFlag(error_flag.to_string()))?;

    let error = match get(5, "error")? {
        "" => None,
        s => Some(s.to_string()),
    };
    let extra = match get(6, "extra")? {
        "" => None,
        s => Some(s.to_string()),
    };

    Ok(Event {
        peer_id: peer_id.to_string(),
        kind,
        time,
        has_error,
        error,
        extra,
        distance_norm,
    })
}
