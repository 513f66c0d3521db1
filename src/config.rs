//! Timeline policy configuration
//!
//! Everything the correlation pipeline treats as policy rather than logic:
//! which event kinds to drop before processing, the degenerate-interval
//! threshold, per-lane presentation constants, and the first-seen ranking
//! rule for monitor events. Injected into the pipeline, never global.

use crate::event::{EventKind, Lane};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Suppression threshold for degenerate intervals, in seconds.
pub const DEFAULT_MIN_DURATION: f64 = 0.001;

/// Length of the peer-id prefix used for row labels, matching the collector's
/// truncated pretty-printed peer ids.
pub const PEER_LABEL_LEN: usize = 16;

/// Per-lane presentation constants: a vertical offset from the peer row and a
/// color pair selected by error state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneStyle {
    pub offset: f64,
    pub success_color: String,
    pub error_color: String,
}

impl LaneStyle {
    /// Baseline layout constants: just enough vertical separation to keep
    /// parallel lanes on visually distinct rows.
    pub fn baseline(lane: Lane) -> Self {
        let (offset, success, error) = match lane {
            Lane::Dial => (0.0, "red", "pink"),
            Lane::Stream => (0.15, "blue", "lightblue"),
            Lane::Message => (0.3, "purple", "plum"),
            Lane::Request => (0.45, "green", "lightgreen"),
            Lane::Monitor => (0.6, "darkorange", "moccasin"),
        };
        Self {
            offset,
            success_color: success.to_string(),
            error_color: error.to_string(),
        }
    }
}

/// Injected policy for one timeline-assembly run.
#[derive(Debug, Clone)]
pub struct TimelineConfig {
    /// Kinds dropped before ranking and correlation.
    pub ignored_kinds: HashSet<EventKind>,
    /// Intervals shorter than this are suppressed.
    pub min_duration: f64,
    /// Presentation constants per lane; lanes absent here fall back to the
    /// baseline layout.
    pub lane_styles: HashMap<Lane, LaneStyle>,
    /// Whether Monitor-kind events are excluded from first-seen ranking.
    pub monitor_excluded_from_ranking: bool,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            ignored_kinds: default_ignored_kinds(),
            min_duration: DEFAULT_MIN_DURATION,
            lane_styles: Lane::ALL
                .iter()
                .map(|lane| (*lane, LaneStyle::baseline(*lane)))
                .collect(),
            monitor_excluded_from_ranking: false,
        }
    }
}

impl TimelineConfig {
    pub fn style(&self, lane: Lane) -> LaneStyle {
        self.lane_styles
            .get(&lane)
            .cloned()
            .unwrap_or_else(|| LaneStyle::baseline(lane))
    }

    /// Remove `Connected` from the ignored set so the Dial lane can use it as
    /// an alternative end trigger.
    pub fn with_connected_ends_dial(mut self) -> Self {
        self.ignored_kinds.remove(&EventKind::Connected);
        self
    }
}

/// Connection/stream bookkeeping kinds dropped in the baseline view.
pub fn default_ignored_kinds() -> HashSet<EventKind> {
    [
        EventKind::Connected,
        EventKind::Disconnected,
        EventKind::OpenedStream,
        EventKind::ClosedStream,
        EventKind::DiscoveredPeer,
    ]
    .into_iter()
    .collect()
}
