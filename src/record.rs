//! Renderable interval records
//!
//! Converts a closed interval plus the peer's rank into everything a renderer
//! needs: the vertical position (peer rank plus lane offset), the lane color
//! for the interval's error state, a compact duration label, and the hover
//! annotation text.

use crate::config::LaneStyle;
use crate::correlator::Interval;
use crate::event::Lane;
use serde::{Deserialize, Serialize};

/// Error messages are truncated to this many characters in annotations.
const ERROR_TRUNCATE_LEN: usize = 30;

/// A fully laid-out interval, ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalRecord {
    pub peer_id: String,
    pub lane: Lane,
    pub start_time: f64,
    pub end_time: f64,
    pub duration: f64,
    /// Vertical position: peer rank plus the lane's offset.
    pub y: f64,
    pub color: String,
    pub has_error: bool,
    pub error: Option<String>,
    pub extra: Option<String>,
    pub duration_label: String,
    pub annotation: String,
    pub distance_norm: f64,
}

/// Format a duration for display: seconds with 3 decimals at one second and
/// above, milliseconds with 1 decimal below.
pub fn format_duration(seconds: f64) -> String {
    if seconds >= 1.0 {
        format!("{seconds:.3}s")
    } else {
        format!("{:.1}ms", seconds * 1000.0)
    }
}

/// Build the renderable record for a closed interval.
pub fn build(interval: Interval, rank: usize, style: &LaneStyle) -> IntervalRecord {
    let duration_label = format_duration(interval.duration);

    let error_text = if interval.has_error {
        interval
            .error
            .as_deref()
            .unwrap_or("")
            .chars()
            .take(ERROR_TRUNCATE_LEN)
            .collect::<String>()
    } else {
        "-".to_string()
    };
    let annotation = format!(
        "Duration: {}\nPeer ID: {}\nError: {}\nExtra: {}",
        duration_label,
        interval.peer_id,
        error_text,
        interval.extra.as_deref().unwrap_or(""),
    );

    let color = if interval.has_error {
        style.error_color.clone()
    } else {
        style.success_color.clone()
    };

    IntervalRecord {
        peer_id: interval.peer_id,
        lane: interval.lane,
        start_time: interval.start_time,
        end_time: interval.end_time,
        duration: interval.duration,
        y: rank as f64 + style.offset,
        color,
        has_error: interval.has_error,
        error: interval.error,
        extra: interval.extra,
        duration_label,
        annotation,
        distance_norm: interval.distance_norm,
    }
}
