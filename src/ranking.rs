//! Peer ordering by first-seen time
//!
//! Each peer gets a fixed vertical rank derived from the earliest timestamp
//! at which it appears in the (non-ignored) event sequence. Ranks run 1..=N
//! with the earliest-seen peer at rank N, so early peers render at the top of
//! the timeline. The rank table is computed once and read-only afterwards.

use crate::config::TimelineConfig;
use crate::event::Event;
use std::collections::HashMap;

/// Immutable peer_id → rank mapping, a bijection onto 1..=N.
#[derive(Debug, Clone, Default)]
pub struct PeerRanking {
    ranks: HashMap<String, usize>,
}

impl PeerRanking {
    /// Compute first-seen times and assign ranks.
    ///
    /// Events whose kind is in `config.ignored_kinds` never contribute;
    /// Monitor-kind events are additionally skipped when
    /// `config.monitor_excluded_from_ranking` is set. Ties on first-seen time
    /// keep first-encounter order: peers are enumerated in the order they
    /// first appear in the event sequence and sorted stably by first-seen.
    pub fn resolve<'a, I>(events: I, config: &TimelineConfig) -> Self
    where
        I: IntoIterator<Item = &'a Event>,
    {
        let mut first_seen: HashMap<&str, f64> = HashMap::new();
        let mut encounter_order: Vec<&str> = Vec::new();

        for event in events {
            if config.ignored_kinds.contains(&event.kind) {
                continue;
            }
            if config.monitor_excluded_from_ranking && event.kind.is_monitor() {
                continue;
            }
            match first_seen.get_mut(event.peer_id.as_str()) {
                Some(seen) => {
                    if event.time < *seen {
                        *seen = event.time;
                    }
                }
                None => {
                    first_seen.insert(&event.peer_id, event.time);
                    encounter_order.push(&event.peer_id);
                }
            }
        }

        let mut ordered = encounter_order;
        ordered.sort_by(|a, b| first_seen[a].total_cmp(&first_seen[b]));

        let n = ordered.len();
        let ranks = ordered
            .into_iter()
            .enumerate()
            .map(|(i, peer)| (peer.to_string(), n - i))
            .collect();

        Self { ranks }
    }

    pub fn rank(&self, peer_id: &str) -> Option<usize> {
        self.ranks.get(peer_id).copied()
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    /// Peers sorted by ascending rank.
    pub fn by_rank(&self) -> Vec<(&str, usize)> {
        let mut pairs: Vec<(&str, usize)> = self
            .ranks
            .iter()
            .map(|(peer, rank)| (peer.as_str(), *rank))
            .collect();
        pairs.sort_by_key(|(_, rank)| *rank);
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;
    use proptest::prelude::*;

    fn event(peer: &str, kind: EventKind, time: f64) -> Event {
        Event {
            peer_id: peer.to_string(),
            kind,
            time,
            has_error: false,
            error: None,
            extra: None,
            distance_norm: 0.0,
        }
    }

    #[test]
    fn test_earliest_peer_gets_highest_rank() {
        let events = vec![
            event("late", EventKind::DialStart, 5.0),
            event("early", EventKind::DialStart, 1.0),
            event("middle", EventKind::DialStart, 3.0),
        ];
        let ranking = PeerRanking::resolve(&events, &TimelineConfig::default());
        assert_eq!(ranking.rank("early"), Some(3));
        assert_eq!(ranking.rank("middle"), Some(2));
        assert_eq!(ranking.rank("late"), Some(1));
    }

    #[test]
    fn test_first_seen_is_minimum_over_all_events() {
        let events = vec![
            event("a", EventKind::DialStart, 4.0),
            event("b", EventKind::DialStart, 2.0),
            event("a", EventKind::SendRequestStart, 1.0),
        ];
        let ranking = PeerRanking::resolve(&events, &TimelineConfig::default());
        // "a" was re-seen at t=1.0, earlier than "b".
        assert_eq!(ranking.rank("a"), Some(2));
        assert_eq!(ranking.rank("b"), Some(1));
    }

    #[test]
    fn test_ignored_kinds_do_not_contribute() {
        let events = vec![
            event("a", EventKind::Connected, 0.5),
            event("a", EventKind::DialStart, 2.0),
            event("b", EventKind::DialStart, 1.0),
        ];
        let ranking = PeerRanking::resolve(&events, &TimelineConfig::default());
        assert_eq!(ranking.rank("b"), Some(2));
        assert_eq!(ranking.rank("a"), Some(1));
    }

    #[test]
    fn test_monitor_exclusion_policy() {
        let events = vec![
            event("a", EventKind::MonitorProviderStart, 0.5),
            event("a", EventKind::DialStart, 2.0),
            event("b", EventKind::DialStart, 1.0),
        ];

        let baseline = TimelineConfig::default();
        let ranking = PeerRanking::resolve(&events, &baseline);
        assert_eq!(ranking.rank("a"), Some(2));

        let monitoring_aware = TimelineConfig {
            monitor_excluded_from_ranking: true,
            ..TimelineConfig::default()
        };
        let ranking = PeerRanking::resolve(&events, &monitoring_aware);
        assert_eq!(ranking.rank("b"), Some(2));
        assert_eq!(ranking.rank("a"), Some(1));
    }

    #[test]
    fn test_tie_break_keeps_encounter_order() {
        let events = vec![
            event("first", EventKind::DialStart, 1.0),
            event("second", EventKind::DialStart, 1.0),
            event("third", EventKind::DialStart, 1.0),
        ];
        let ranking = PeerRanking::resolve(&events, &TimelineConfig::default());
        assert_eq!(ranking.rank("first"), Some(3));
        assert_eq!(ranking.rank("second"), Some(2));
        assert_eq!(ranking.rank("third"), Some(1));
    }

    #[test]
    fn test_empty_input() {
        let ranking = PeerRanking::resolve(&[], &TimelineConfig::default());
        assert!(ranking.is_empty());
        assert_eq!(ranking.rank("anyone"), None);
    }

    #[test]
    fn test_by_rank_is_sorted() {
        let events = vec![
            event("a", EventKind::DialStart, 3.0),
            event("b", EventKind::DialStart, 1.0),
            event("c", EventKind::DialStart, 2.0),
        ];
        let ranking = PeerRanking::resolve(&events, &TimelineConfig::default());
        let by_rank = ranking.by_rank();
        assert_eq!(by_rank, vec![("a", 1), ("c", 2), ("b", 3)]);
    }

    proptest! {
        #[test]
        fn prop_ranks_are_a_bijection_onto_one_to_n(
            times in proptest::collection::vec(0.0_f64..1000.0, 1..40)
        ) {
            let events: Vec<Event> = times
                .iter()
                .enumerate()
                .map(|(i, t)| event(&format!("peer-{i}"), EventKind::DialStart, *t))
                .collect();
            let ranking = PeerRanking::resolve(&events, &TimelineConfig::default());

            let n = events.len();
            prop_assert_eq!(ranking.len(), n);
            let mut seen: Vec<usize> = events
                .iter()
                .map(|e| ranking.rank(&e.peer_id).unwrap())
                .collect();
            seen.sort_unstable();
            prop_assert_eq!(seen, (1..=n).collect::<Vec<_>>());

            // Smallest first-seen time maps to rank N.
            let earliest = events
                .iter()
                .min_by(|a, b| a.time.total_cmp(&b.time))
                .unwrap();
            let min_time = earliest.time;
            let top = events
                .iter()
                .filter(|e| e.time == min_time)
                .map(|e| ranking.rank(&e.peer_id).unwrap())
                .max()
                .unwrap();
            prop_assert_eq!(top, n);
        }
    }
}
