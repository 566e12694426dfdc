//! Chain progress tracker
//!
//! Tracks which path of a chain is being followed, fires callbacks when
//! their triggers are met, and advances through the chain. Generates events
//! for the follower to act on.

use heapless::Vec;

use crate::callback::{CallbackContext, PathCallback, TriggeredCallback};
use crate::path::{Path, PathChain, MAX_CALLBACKS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum events produced by a single update
///
/// Every callback can fire at most once per update, plus path and chain
/// completion.
pub const MAX_EVENTS: usize = MAX_CALLBACKS + 2;

/// Events from one tracker update
pub type Events = Vec<ChainEvent, MAX_EVENTS>;

/// Tracker phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TrackerPhase {
    /// Not following a chain
    Idle,
    /// Following a path of the chain
    Following,
    /// Paused by the follower
    Paused,
    /// Reached the end of the chain
    Complete,
}

/// Progress events for the follower
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChainEvent {
    /// Following started at the first path
    Started,
    /// Callback at this position in the chain's callback list fired
    CallbackFired(usize),
    /// Path at this index was completed
    PathCompleted(usize),
    /// Last path completed
    ChainComplete,
}

/// Progress through a [`PathChain`]
///
/// The tracker holds no reference to the chain; pass the same chain to
/// every call between [`Self::start`] and completion.
#[derive(Debug, Clone)]
pub struct ChainTracker {
    /// Current phase
    phase: TrackerPhase,
    /// Index of the current path
    path_index: usize,
    /// Parametric progress along the current path
    t: f64,
    /// Time on the current path (ms)
    path_elapsed_ms: u32,
    /// Time since start (ms)
    total_elapsed_ms: u32,
}

impl Default for ChainTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainTracker {
    /// Create an idle tracker
    pub const fn new() -> Self {
        Self {
            phase: TrackerPhase::Idle,
            path_index: 0,
            t: 0.0,
            path_elapsed_ms: 0,
            total_elapsed_ms: 0,
        }
    }

    /// Get the current phase
    pub fn phase(&self) -> TrackerPhase {
        self.phase
    }

    /// Index of the path being followed
    pub fn path_index(&self) -> usize {
        self.path_index
    }

    /// Parametric progress along the current path
    pub fn t(&self) -> f64 {
        self.t
    }

    /// Time since start in milliseconds
    pub fn elapsed_ms(&self) -> u32 {
        self.total_elapsed_ms
    }

    /// Check if the chain has been completed
    pub fn is_complete(&self) -> bool {
        self.phase == TrackerPhase::Complete
    }

    /// Progress presented to callbacks
    pub fn context(&self) -> CallbackContext {
        CallbackContext {
            path_index: self.path_index,
            t: self.t,
            path_elapsed_ms: self.path_elapsed_ms,
        }
    }

    /// Start (or restart) following a chain
    ///
    /// Rearms every callback on the chain. An empty chain completes
    /// immediately.
    pub fn start<P: Path, C: PathCallback>(&mut self, chain: &mut PathChain<P, C>) -> Events {
        chain.reset_callbacks();
        *self = Self::new();

        let mut events = Events::new();
        record(&mut events, ChainEvent::Started);

        if chain.is_empty() {
            self.phase = TrackerPhase::Complete;
            record(&mut events, ChainEvent::ChainComplete);
        } else {
            self.phase = TrackerPhase::Following;
        }

        info!("Chain started: {} paths", chain.size());
        events
    }

    /// Update with the follower's progress
    ///
    /// Call this once per control tick.
    ///
    /// # Arguments
    /// - `chain`: The chain passed to [`Self::start`]
    /// - `t`: Parametric progress along the current path, clamped to `[0, 1]`
    /// - `delta_ms`: Time since the previous update
    ///
    /// # Returns
    /// Events in the order they occurred; empty unless following
    pub fn update<P: Path, C: TriggeredCallback>(
        &mut self,
        chain: &mut PathChain<P, C>,
        t: f64,
        delta_ms: u32,
    ) -> Events {
        let mut events = Events::new();
        if self.phase != TrackerPhase::Following {
            return events;
        }

        self.t = if t.is_nan() { self.t } else { t.clamp(0.0, 1.0) };
        self.path_elapsed_ms = self.path_elapsed_ms.saturating_add(delta_ms);
        self.total_elapsed_ms = self.total_elapsed_ms.saturating_add(delta_ms);

        self.fire_due(chain, &mut events);

        if self.t >= 1.0 {
            self.finish_path(chain, &mut events);
        }

        events
    }

    /// Pause following
    ///
    /// Returns false if not following.
    pub fn pause(&mut self) -> bool {
        if self.phase != TrackerPhase::Following {
            return false;
        }
        self.phase = TrackerPhase::Paused;
        true
    }

    /// Resume after a pause
    ///
    /// Returns false if not paused.
    pub fn resume(&mut self) -> bool {
        if self.phase != TrackerPhase::Paused {
            return false;
        }
        self.phase = TrackerPhase::Following;
        true
    }

    /// Abandon the chain
    ///
    /// Callbacks are left as they are; the next [`Self::start`] rearms them.
    pub fn abort(&mut self) {
        if self.phase != TrackerPhase::Idle {
            warn!("Chain aborted at path {}", self.path_index);
        }
        *self = Self::new();
    }

    /// Distance travelled along the chain
    pub fn distance_travelled<P: Path, C: PathCallback>(&self, chain: &PathChain<P, C>) -> f64 {
        match self.phase {
            TrackerPhase::Idle => 0.0,
            TrackerPhase::Complete => chain.length(),
            TrackerPhase::Following | TrackerPhase::Paused => {
                let before = chain.start_distance(self.path_index).unwrap_or(0.0);
                let within = chain
                    .path(self.path_index)
                    .map(|path| path.distance_at(self.t))
                    .unwrap_or(0.0);
                before + within
            }
        }
    }

    /// Distance left to the end of the chain
    pub fn remaining<P: Path, C: PathCallback>(&self, chain: &PathChain<P, C>) -> f64 {
        (chain.length() - self.distance_travelled(chain)).max(0.0)
    }

    /// Fraction of the deceleration zone covered so far
    ///
    /// Returns None when the chain has no zone or the robot has not
    /// reached it yet.
    pub fn deceleration_progress<P: Path, C: PathCallback>(
        &self,
        chain: &PathChain<P, C>,
    ) -> Option<f64> {
        let zone = chain.deceleration_zone()?;
        let distance = self.distance_travelled(chain);
        zone.contains(distance).then(|| zone.progress(distance))
    }

    /// Fire every due callback, in insertion order
    fn fire_due<P: Path, C: TriggeredCallback>(
        &self,
        chain: &mut PathChain<P, C>,
        events: &mut Events,
    ) {
        let ctx = self.context();
        for (i, callback) in chain.callbacks_mut().iter_mut().enumerate() {
            if callback.should_fire(&ctx) {
                callback.fire();
                debug!("Callback {} fired on path {}", i, ctx.path_index);
                record(events, ChainEvent::CallbackFired(i));
            }
        }
    }

    /// Complete the current path and advance
    fn finish_path<P: Path, C: TriggeredCallback>(
        &mut self,
        chain: &PathChain<P, C>,
        events: &mut Events,
    ) {
        record(events, ChainEvent::PathCompleted(self.path_index));

        let next = self.path_index + 1;
        if next < chain.size() {
            trace!("Advancing to path {}", next);
            self.path_index = next;
            self.t = 0.0;
            self.path_elapsed_ms = 0;
        } else {
            info!("Chain complete after {} ms", self.total_elapsed_ms);
            self.phase = TrackerPhase::Complete;
            record(events, ChainEvent::ChainComplete);
        }
    }
}

/// Append an event to an update's output
///
/// An update records at most one event per callback plus path and chain
/// completion, which is exactly [`MAX_EVENTS`].
fn record(events: &mut Events, event: ChainEvent) {
    if events.push(event).is_err() {
        warn!("Event buffer full, dropped {:?}", event);
    }
}
