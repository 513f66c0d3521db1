//! kadline - Interval correlation and timeline layout for DHT crawl event logs
//!
//! This library pairs the start/end network-operation events recorded during
//! a DHT provide/crawl run (dials, stream opens, message sends, requests,
//! provider monitoring) into discrete per-peer intervals, derives a stable
//! vertical ordering of peers, and emits a renderer-agnostic timeline
//! structure. It performs no rendering itself.

pub mod cli;
pub mod config;
pub mod correlator;
pub mod csv_output;
pub mod distance;
pub mod event;
pub mod ingest;
pub mod json_output;
pub mod ranking;
pub mod record;
pub mod timeline;
