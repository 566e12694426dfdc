//! Callback trigger conditions
//!
//! A callback is bound to one path of a chain and fires once when its
//! trigger condition is met while the follower is on that path.

use core::fmt;

use super::PathCallback;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// When a callback fires, relative to the start of its path
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Trigger {
    /// Fire once parametric progress along the path reaches `t`
    Parametric {
        /// Parametric position in `[0, 1]`
        t: f64,
    },
    /// Fire once the follower has been on the path for `after_ms`
    Temporal {
        /// Delay from path start in milliseconds
        after_ms: u32,
    },
}

impl Trigger {
    /// Check if the condition holds for the given progress
    ///
    /// Only the condition itself is checked; path index matching is done
    /// by the callback.
    pub fn is_due(&self, ctx: &CallbackContext) -> bool {
        match *self {
            Trigger::Parametric { t } => ctx.t >= t,
            Trigger::Temporal { after_ms } => ctx.path_elapsed_ms >= after_ms,
        }
    }
}

/// Follower progress presented to callbacks
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CallbackContext {
    /// Index of the path being followed
    pub path_index: usize,
    /// Parametric progress along that path
    pub t: f64,
    /// Time spent on that path (ms)
    pub path_elapsed_ms: u32,
}

/// A callback the follower can evaluate and fire
pub trait TriggeredCallback: PathCallback {
    /// Index of the path this callback is bound to
    fn path_index(&self) -> usize;

    /// Check if the callback should fire now
    ///
    /// Must return false once fired, until reset.
    fn should_fire(&self, ctx: &CallbackContext) -> bool;

    /// Run the callback
    ///
    /// Firing an already-fired callback is a no-op.
    fn fire(&mut self);
}

/// One-shot callback running an action at a trigger point
///
/// The action should return quickly; it runs inside the follower's control
/// tick.
///
/// Chains hold a single callback type, so mixed actions use a shared action
/// type such as `fn()` or `&mut dyn FnMut()`.
pub struct Callback<F> {
    /// Path this callback is bound to
    path_index: usize,
    /// Firing condition
    trigger: Trigger,
    /// Work to run
    action: F,
    /// Fired since last reset
    fired: bool,
}

impl<F: FnMut()> Callback<F> {
    /// Create a callback bound to `path_index`
    pub fn new(path_index: usize, trigger: Trigger, action: F) -> Self {
        Self {
            path_index,
            trigger,
            action,
            fired: false,
        }
    }

    /// Fire at parametric position `t` along the path
    pub fn parametric(path_index: usize, t: f64, action: F) -> Self {
        Self::new(path_index, Trigger::Parametric { t }, action)
    }

    /// Fire `after_ms` after the path starts
    pub fn temporal(path_index: usize, after_ms: u32, action: F) -> Self {
        Self::new(path_index, Trigger::Temporal { after_ms }, action)
    }

    /// Get the trigger condition
    pub fn trigger(&self) -> Trigger {
        self.trigger
    }
}

impl<F: FnMut()> PathCallback for Callback<F> {
    fn reset(&mut self) {
        self.fired = false;
    }

    fn has_fired(&self) -> bool {
        self.fired
    }
}

impl<F: FnMut()> TriggeredCallback for Callback<F> {
    fn path_index(&self) -> usize {
        self.path_index
    }

    fn should_fire(&self, ctx: &CallbackContext) -> bool {
        !self.fired && ctx.path_index == self.path_index && self.trigger.is_due(ctx)
    }

    fn fire(&mut self) {
        if self.fired {
            return;
        }
        self.fired = true;
        (self.action)();
    }
}

impl<F> fmt::Debug for Callback<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("path_index", &self.path_index)
            .field("trigger", &self.trigger)
            .field("fired", &self.fired)
            .finish_non_exhaustive()
    }
}
