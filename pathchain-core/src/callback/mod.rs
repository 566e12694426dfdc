//! Path callbacks
//!
//! Deferred, non-blocking work attached to points along a chain. The chain
//! itself only stores and resets callbacks; evaluating triggers and running
//! actions is the follower's job.

pub mod trigger;

pub use trigger::{Callback, CallbackContext, Trigger, TriggeredCallback};

/// A resettable callback stored on a chain
pub trait PathCallback {
    /// Return the callback to its unfired state
    fn reset(&mut self);

    /// Check if the callback has fired since the last reset
    fn has_fired(&self) -> bool;
}
