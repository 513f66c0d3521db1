//! CSV output format for interval records
//!
//! A flat table for spreadsheet analysis or ad-hoc plotting, one row per
//! interval record.

use crate::record::IntervalRecord;

/// CSV output formatter for a set of interval records.
#[derive(Debug, Default)]
pub struct CsvOutput {
    records: Vec<IntervalRecord>,
}

impl CsvOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an interval record to the output.
    pub fn add_record(&mut self, record: IntervalRecord) {
        self.records.push(record);
    }

    fn header() -> &'static str {
        "peer_id,lane,start,end,duration,duration_label,y,color,has_error,error,extra,distance_norm"
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    /// Format one interval record as a CSV row.
    fn format_record(record: &IntervalRecord) -> String {
        let error = record.error.as_deref().unwrap_or("");
        let extra = record.extra.as_deref().unwrap_or("");
        [
            Self::escape_field(&record.peer_id),
            Self::escape_field(record.lane.name()),
            format!("{:.6}", record.start_time),
            format!("{:.6}", record.end_time),
            format!("{:.6}", record.duration),
            record.duration_label.clone(),
            format!("{:.2}", record.y),
            Self::escape_field(&record.color),
            record.has_error.to_string(),
            Self::escape_field(error),
            Self::escape_field(extra),
            format!("{:.6e}", record.distance_norm),
        ]
        .join(",")
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        output.push_str(Self::header());
        output.push('\n');
        for record in &self.records {
            output.push_str(&Self::format_record(record));
            output.push('\n');
        }
        output
    }
}
