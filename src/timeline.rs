//! Timeline assembly
//!
//! Single-pass batch pipeline over an already-complete event sequence:
//! filter ignored kinds, resolve peer ranks, run the per-lane correlators in
//! event order, and collect the renderable output — interval records, one
//! label per peer row, and alternating-row shading bands. No I/O and no
//! shared state; everything is local working memory.

use crate::config::{TimelineConfig, PEER_LABEL_LEN};
use crate::correlator::{Correlator, CorrelatorStats};
use crate::event::Event;
use crate::ranking::PeerRanking;
use crate::record::{self, IntervalRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Row label for one peer, positioned at the peer's rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerLabel {
    pub peer_id: String,
    /// Truncated peer-id prefix for display.
    pub text: String,
    pub y: f64,
}

/// Horizontal shading band behind every other peer row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadingBand {
    pub y_min: f64,
    pub y_max: f64,
}

/// The final renderer-agnostic output structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    /// Interval records in the order their closing events appeared.
    pub records: Vec<IntervalRecord>,
    /// Peer labels, ascending by rank.
    pub labels: Vec<PeerLabel>,
    pub bands: Vec<ShadingBand>,
    pub stats: CorrelatorStats,
}

/// Run the full correlation pipeline over an event sequence.
pub fn assemble(events: &[Event], config: &TimelineConfig) -> Timeline {
    let kept: Vec<&Event> = events
        .iter()
        .filter(|e| !config.ignored_kinds.contains(&e.kind))
        .collect();

    // Ranking must complete before any record is built.
    let ranking = PeerRanking::resolve(kept.iter().copied(), config);

    let mut correlator = Correlator::new(config);
    let mut records = Vec::new();
    for event in &kept {
        let Some(interval) = correlator.process(event) else {
            continue;
        };
        match ranking.rank(&interval.peer_id) {
            Some(rank) => {
                let style = config.style(interval.lane);
                records.push(record::build(interval, rank, &style));
            }
            None => {
                // Only possible for peers whose every ranked event was
                // excluded by the monitor-ranking policy.
                debug!(peer = %interval.peer_id, "interval for unranked peer dropped");
            }
        }
    }

    let labels = ranking
        .by_rank()
        .into_iter()
        .map(|(peer_id, rank)| PeerLabel {
            peer_id: peer_id.to_string(),
            text: peer_id.chars().take(PEER_LABEL_LEN).collect(),
            y: rank as f64,
        })
        .collect();

    let bands = (1..=ranking.len())
        .filter(|rank| rank % 2 == 0)
        .map(|rank| ShadingBand {
            y_min: rank as f64 - 0.5,
            y_max: rank as f64 + 0.5,
        })
        .collect();

    Timeline {
        records,
        labels,
        bands,
        stats: correlator.stats(),
    }
}
