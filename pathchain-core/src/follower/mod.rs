//! Follower-side chain progress
//!
//! The chain is passive; this module tracks where a follower is along it.

pub mod tracker;

pub use tracker::{ChainEvent, ChainTracker, Events, TrackerPhase, MAX_EVENTS};
