//! Event data model for DHT crawl logs
//!
//! A crawl run emits a time-ordered sequence of start/end events per peer
//! (dials, stream opens, message sends, requests, provider monitoring) plus a
//! handful of ancillary connection-bookkeeping events. This module defines the
//! closed set of event kinds, the lane taxonomy used for correlation, and the
//! immutable `Event` record produced by ingestion.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of event types found in crawl logs.
///
/// Tags are parsed from the `type` column, which carries the collector's Go
/// type names (e.g. `*main.DialStart`); the bare form without the `*main.`
/// prefix is accepted as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    DialStart,
    DialEnd,
    OpenStreamStart,
    OpenStreamEnd,
    SendMessageStart,
    SendMessageEnd,
    SendRequestStart,
    SendRequestEnd,
    MonitorProviderStart,
    MonitorProviderEnd,
    Connected,
    Disconnected,
    OpenedStream,
    ClosedStream,
    DiscoveredPeer,
}

/// Whether an event opens or closes a pending operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Start,
    End,
}

impl EventKind {
    /// Parse an event tag as written by the collector.
    ///
    /// Returns `None` for unknown tags; ingestion reports those per row.
    pub fn parse(tag: &str) -> Option<Self> {
        let name = tag.strip_prefix("*main.").unwrap_or(tag);
        let kind = match name {
            "DialStart" => Self::DialStart,
            "DialEnd" => Self::DialEnd,
            "OpenStreamStart" => Self::OpenStreamStart,
            "OpenStreamEnd" => Self::OpenStreamEnd,
            "SendMessageStart" => Self::SendMessageStart,
            "SendMessageEnd" => Self::SendMessageEnd,
            "SendRequestStart" => Self::SendRequestStart,
            "SendRequestEnd" => Self::SendRequestEnd,
            "MonitorProviderStart" => Self::MonitorProviderStart,
            "MonitorProviderEnd" => Self::MonitorProviderEnd,
            "ConnectedEvent" => Self::Connected,
            "DisconnectedEvent" => Self::Disconnected,
            "OpenedStream" => Self::OpenedStream,
            "ClosedStream" => Self::ClosedStream,
            "DiscoveredPeer" => Self::DiscoveredPeer,
            _ => return None,
        };
        Some(kind)
    }

    /// Lane and role for paired start/end kinds.
    ///
    /// Ancillary kinds (`Connected`, `Disconnected`, `OpenedStream`,
    /// `ClosedStream`, `DiscoveredPeer`) return `None`; the correlator decides
    /// separately whether any of them act as lane-specific end triggers.
    pub fn pairing(&self) -> Option<(Lane, Role)> {
        match self {
            Self::DialStart => Some((Lane::Dial, Role::Start)),
            Self::DialEnd => Some((Lane::Dial, Role::End)),
            Self::OpenStreamStart => Some((Lane::Stream, Role::Start)),
            Self::OpenStreamEnd => Some((Lane::Stream, Role::End)),
            Self::SendMessageStart => Some((Lane::Message, Role::Start)),
            Self::SendMessageEnd => Some((Lane::Message, Role::End)),
            Self::SendRequestStart => Some((Lane::Request, Role::Start)),
            Self::SendRequestEnd => Some((Lane::Request, Role::End)),
            Self::MonitorProviderStart => Some((Lane::Monitor, Role::Start)),
            Self::MonitorProviderEnd => Some((Lane::Monitor, Role::End)),
            _ => None,
        }
    }

    /// True for provider-monitoring kinds, which are optionally excluded from
    /// first-seen peer ranking.
    pub fn is_monitor(&self) -> bool {
        matches!(self, Self::MonitorProviderStart | Self::MonitorProviderEnd)
    }
}

/// An independent category of paired operations, tracked with its own state
/// machine per peer. Lanes never share pending state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lane {
    Dial,
    Stream,
    Message,
    Request,
    Monitor,
}

impl Lane {
    pub const ALL: [Lane; 5] = [
        Lane::Dial,
        Lane::Stream,
        Lane::Message,
        Lane::Request,
        Lane::Monitor,
    ];

    /// Human-readable lane name, matching the legend of the original views.
    pub fn name(&self) -> &'static str {
        match self {
            Lane::Dial => "Dialing Peer",
            Lane::Stream => "Opening Stream",
            Lane::Message => "Adding Provider",
            Lane::Request => "Finding Closer Nodes",
            Lane::Monitor => "Monitoring Provider",
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single ingested log row. Immutable after ingestion; the XOR distance is
/// normalized once and cached here.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub peer_id: String,
    pub kind: EventKind,
    /// Seconds since run start, monotone per peer and lane in practice.
    pub time: f64,
    pub has_error: bool,
    pub error: Option<String>,
    pub extra: Option<String>,
    /// XOR distance to the target key, normalized to [0, 1].
    pub distance_norm: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_go_type_tags() {
        assert_eq!(
            EventKind::parse("*main.DialStart"),
            Some(EventKind::DialStart)
        );
        assert_eq!(
            EventKind::parse("*main.ConnectedEvent"),
            Some(EventKind::Connected)
        );
        assert_eq!(
            EventKind::parse("*main.MonitorProviderEnd"),
            Some(EventKind::MonitorProviderEnd)
        );
    }

    #[test]
    fn test_parse_bare_tags() {
        assert_eq!(EventKind::parse("DialEnd"), Some(EventKind::DialEnd));
        assert_eq!(
            EventKind::parse("SendRequestStart"),
            Some(EventKind::SendRequestStart)
        );
    }

    #[test]
    fn test_parse_unknown_tag() {
        assert_eq!(EventKind::parse("*main.NoSuchEvent"), None);
        assert_eq!(EventKind::parse(""), None);
    }

    #[test]
    fn test_pairing_covers_all_paired_kinds() {
        assert_eq!(
            EventKind::DialStart.pairing(),
            Some((Lane::Dial, Role::Start))
        );
        assert_eq!(EventKind::DialEnd.pairing(), Some((Lane::Dial, Role::End)));
        assert_eq!(
            EventKind::SendMessageEnd.pairing(),
            Some((Lane::Message, Role::End))
        );
        assert_eq!(
            EventKind::MonitorProviderStart.pairing(),
            Some((Lane::Monitor, Role::Start))
        );
    }

    #[test]
    fn test_ancillary_kinds_have_no_pairing() {
        assert_eq!(EventKind::Connected.pairing(), None);
        assert_eq!(EventKind::Disconnected.pairing(), None);
        assert_eq!(EventKind::OpenedStream.pairing(), None);
        assert_eq!(EventKind::ClosedStream.pairing(), None);
        assert_eq!(EventKind::DiscoveredPeer.pairing(), None);
    }

    #[test]
    fn test_is_monitor() {
        assert!(EventKind::MonitorProviderStart.is_monitor());
        assert!(EventKind::MonitorProviderEnd.is_monitor());
        assert!(!EventKind::DialStart.is_monitor());
    }

    #[test]
    fn test_lane_names() {
        assert_eq!(Lane::Dial.name(), "Dialing Peer");
        assert_eq!(Lane::Request.name(), "Finding Closer Nodes");
        assert_eq!(Lane::Monitor.to_string(), "Monitoring Provider");
    }
}
