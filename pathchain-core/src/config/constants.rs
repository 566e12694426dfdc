//! Follower constants
//!
//! Defaults a chain copies at construction. Passed explicitly rather than
//! read from global state, so a chain never changes when the defaults do.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::motion::DecelerationType;

/// Default fraction of the relevant distance to decelerate over
pub const DEFAULT_DECELERATION_START_MULTIPLIER: f64 = 1.0;

/// Follower-wide defaults
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FollowerConstants {
    /// Initial deceleration policy for new chains
    pub deceleration_type: DecelerationType,
    /// Initial deceleration start multiplier for new chains
    pub deceleration_start_multiplier: f64,
}

impl Default for FollowerConstants {
    fn default() -> Self {
        Self::new(DEFAULT_DECELERATION_START_MULTIPLIER)
    }
}

impl FollowerConstants {
    /// Create constants with a custom deceleration start multiplier
    ///
    /// The deceleration policy defaults to [`DecelerationType::LastPath`].
    pub const fn new(deceleration_start_multiplier: f64) -> Self {
        Self {
            deceleration_type: DecelerationType::LastPath,
            deceleration_start_multiplier,
        }
    }

    /// Set the deceleration policy
    pub const fn with_deceleration_type(mut self, deceleration_type: DecelerationType) -> Self {
        self.deceleration_type = deceleration_type;
        self
    }

    /// Check that the multiplier lies in `(0, 1]`
    pub fn is_valid(&self) -> bool {
        self.deceleration_start_multiplier > 0.0 && self.deceleration_start_multiplier <= 1.0
    }
}
