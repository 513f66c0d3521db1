//! Interval correlation state machines
//!
//! The heart of the pipeline: one state machine per lane, keyed by peer id,
//! pairing start events with their matching ends. Overlapping operations of
//! the same kind against the same peer are tolerated with a reference count
//! rather than a stack, so only the earliest start time survives and only the
//! closing event's error/extra fields are reported. Orphan ends (no prior
//! start) and degenerate intervals (shorter than the configured threshold)
//! are dropped silently but counted for diagnostics.

use crate::config::TimelineConfig;
use crate::event::{Event, EventKind, Lane, Role};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// An in-flight operation awaiting its end event.
///
/// Exists only while `open_count > 0`; owned exclusively by the lane's
/// correlator.
#[derive(Debug, Clone, Copy)]
struct PendingOperation {
    start_time: f64,
    open_count: u32,
}

/// A closed, renderable span between a start and its matching end.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    pub peer_id: String,
    pub lane: Lane,
    pub start_time: f64,
    pub end_time: f64,
    pub duration: f64,
    pub has_error: bool,
    pub error: Option<String>,
    pub extra: Option<String>,
    pub distance_norm: f64,
}

/// Diagnostic counters for one lane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneStats {
    /// Intervals emitted.
    pub emitted: u64,
    /// End events with no matching pending operation, dropped.
    pub orphan_ends: u64,
    /// Matched intervals below the duration threshold, suppressed.
    pub degenerate: u64,
}

/// Pairing state machine for a single lane.
struct LaneCorrelator {
    lane: Lane,
    min_duration: f64,
    pending: HashMap<String, PendingOperation>,
    stats: LaneStats,
}

impl LaneCorrelator {
    fn new(lane: Lane, min_duration: f64) -> Self {
        Self {
            lane,
            min_duration,
            pending: HashMap::new(),
            stats: LaneStats::default(),
        }
    }

    fn on_start(&mut self, event: &Event) {
        self.pending
            .entry(event.peer_id.clone())
            .and_modify(|op| op.open_count += 1)
            .or_insert(PendingOperation {
                start_time: event.time,
                open_count: 1,
            });
    }

    fn on_end(&mut self, event: &Event) -> Option<Interval> {
        let Some(op) = self.pending.get_mut(&event.peer_id) else {
            // An end with no prior start is expected (the log may begin
            // mid-operation) and dropped without complaint.
            self.stats.orphan_ends += 1;
            debug!(lane = %self.lane, peer = %event.peer_id, "orphan end dropped");
            return None;
        };

        op.open_count = op.open_count.saturating_sub(1);

        // An error on one of several overlapping operations is withheld until
        // the last of them closes. The Monitor lane abandons the operation on
        // the first error instead of waiting for the count to reach zero.
        let terminal = self.lane == Lane::Monitor && event.has_error;
        if event.has_error && op.open_count != 0 && !terminal {
            return None;
        }

        let start_time = op.start_time;
        let duration = event.time - start_time;
        if duration < self.min_duration {
            self.pending.remove(&event.peer_id);
            self.stats.degenerate += 1;
            debug!(
                lane = %self.lane,
                peer = %event.peer_id,
                duration,
                "degenerate interval suppressed"
            );
            return None;
        }

        self.pending.remove(&event.peer_id);
        self.stats.emitted += 1;
        Some(Interval {
            peer_id: event.peer_id.clone(),
            lane: self.lane,
            start_time,
            end_time: event.time,
            duration,
            has_error: event.has_error,
            error: event.error.clone(),
            extra: event.extra.clone(),
            distance_norm: event.distance_norm,
        })
    }
}

/// Per-lane diagnostic counters for a whole run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrelatorStats {
    pub lanes: Vec<LaneReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneReport {
    pub lane: Lane,
    #[serde(flatten)]
    pub stats: LaneStats,
}

/// Dispatches events to the independent lane state machines.
///
/// Lanes never share pending state: a peer may hold open operations in the
/// Dial and Stream lanes at the same time without interaction.
pub struct Correlator {
    lanes: HashMap<Lane, LaneCorrelator>,
}

impl Correlator {
    pub fn new(config: &TimelineConfig) -> Self {
        let lanes = Lane::ALL
            .iter()
            .map(|lane| (*lane, LaneCorrelator::new(*lane, config.min_duration)))
            .collect();
        Self { lanes }
    }

    /// Feed one event through its lane's state machine.
    ///
    /// Returns an interval when the event closes a pending operation that
    /// survives the duration filter. `Connected` acts as an error-free end
    /// trigger for the Dial lane (a dial can close via either its end event
    /// or the connection notification, whichever arrives first); other
    /// ancillary kinds are inert here.
    pub fn process(&mut self, event: &Event) -> Option<Interval> {
        let (lane, role) = match event.kind.pairing() {
            Some(pair) => pair,
            None if event.kind == EventKind::Connected => (Lane::Dial, Role::End),
            None => return None,
        };

        let correlator = self
            .lanes
            .get_mut(&lane)
            .expect("correlator initialized for every lane");
        match role {
            Role::Start => {
                correlator.on_start(event);
                None
            }
            Role::End => correlator.on_end(event),
        }
    }

    /// Diagnostic counters, in fixed lane order.
    pub fn stats(&self) -> CorrelatorStats {
        CorrelatorStats {
            lanes: Lane::ALL
                .iter()
                .map(|lane| LaneReport {
                    lane: *lane,
                    stats: self.lanes[lane].stats,
                })
                .collect(),
        }
    }
}
