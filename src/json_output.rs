//! JSON output format for assembled timelines

use crate::timeline::Timeline;
use serde::Serialize;

/// Top-level JSON document: the timeline plus tool provenance, so a renderer
/// can check what produced its input.
#[derive(Debug, Clone, Serialize)]
pub struct JsonTimeline<'a> {
    pub tool: &'a str,
    pub version: &'a str,
    #[serde(flatten)]
    pub timeline: &'a Timeline,
}

/// Serialize a timeline as pretty-printed JSON.
pub fn to_json(timeline: &Timeline) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonTimeline {
        tool: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        timeline,
    })
}

/// Serialize a timeline as compact single-line JSON.
pub fn to_json_compact(timeline: &Timeline) -> serde_json::Result<String> {
    serde_json::to_string(&JsonTimeline {
        tool: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        timeline,
    })
}
