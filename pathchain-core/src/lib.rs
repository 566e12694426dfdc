//! Board-agnostic path chain sequencing
//!
//! This crate contains the data backbone a motion follower polls while it
//! drives a robot along a series of precomputed paths:
//!
//! - Path abstraction (length and pose queries)
//! - Path chains (ordered segments, aggregate length, callbacks)
//! - Callback triggers (parametric and temporal)
//! - Deceleration policy and zones
//! - Chain progress tracking for followers
//! - Follower configuration defaults

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod callback;
pub mod config;
pub mod follower;
pub mod motion;
pub mod path;

pub use callback::{Callback, CallbackContext, PathCallback, Trigger, TriggeredCallback};
pub use config::FollowerConstants;
pub use follower::{ChainEvent, ChainTracker, TrackerPhase};
pub use motion::{DecelerationType, DecelerationZone};
pub use path::{ChainError, Path, PathChain, PathChainBuilder, Pose};
