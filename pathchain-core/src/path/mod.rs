//! Path segments and chains
//!
//! A [`Path`] is an opaque geometric segment owned by the caller. This
//! module only depends on its length and pose queries; curve math lives
//! elsewhere.

pub mod builder;
pub mod chain;

pub use builder::PathChainBuilder;
pub use chain::{Callbacks, ChainError, PathChain, Segments, MAX_CALLBACKS, MAX_PATHS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Robot pose on the field
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pose {
    /// X position
    pub x: f64,
    /// Y position
    pub y: f64,
    /// Heading in radians
    pub heading: f64,
}

impl Pose {
    /// Create a new pose
    pub const fn new(x: f64, y: f64, heading: f64) -> Self {
        Self { x, y, heading }
    }
}

/// A single immutable motion segment
///
/// Progress along a path is expressed as a parametric value `t` in
/// `[0, 1]`, where 0 is the start of the segment and 1 is its end.
pub trait Path {
    /// Arc length of the segment
    ///
    /// Must be non-negative and must not change while the path is part of
    /// a chain.
    fn length(&self) -> f64;

    /// Pose at parametric position `t`
    fn pose_at(&self, t: f64) -> Pose;

    /// Distance travelled along the segment at parametric position `t`
    ///
    /// The default assumes `t` is arc-length parameterized.
    fn distance_at(&self, t: f64) -> f64 {
        t.clamp(0.0, 1.0) * self.length()
    }
}

impl<T: Path + ?Sized> Path for &T {
    fn length(&self) -> f64 {
        (**self).length()
    }

    fn pose_at(&self, t: f64) -> Pose {
        (**self).pose_at(t)
    }

    fn distance_at(&self, t: f64) -> f64 {
        (**self).distance_at(t)
    }
}
