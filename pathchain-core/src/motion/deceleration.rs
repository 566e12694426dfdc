//! Deceleration policy
//!
//! Selects which stretch of a chain the follower slows down over as it
//! approaches the end.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the follower shapes velocity near the end of a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DecelerationType {
    /// No shaping from the chain; the follower uses its own behavior
    None,
    /// Decelerate relative to the whole chain's remaining length
    Global,
    /// Decelerate relative to the final path's remaining length
    #[default]
    LastPath,
}

impl DecelerationType {
    /// Parse from a configuration name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "none" => Some(DecelerationType::None),
            "global" => Some(DecelerationType::Global),
            "last_path" => Some(DecelerationType::LastPath),
            _ => None,
        }
    }

    /// Configuration name
    pub const fn name(self) -> &'static str {
        match self {
            DecelerationType::None => "none",
            DecelerationType::Global => "global",
            DecelerationType::LastPath => "last_path",
        }
    }
}

/// Stretch of a chain, in distance from its start, where deceleration
/// applies
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecelerationZone {
    /// Distance at which deceleration begins
    start: f64,
    /// End of the chain
    end: f64,
}

impl DecelerationZone {
    /// Compute the zone for a chain
    ///
    /// # Arguments
    /// - `deceleration_type`: Policy to apply
    /// - `multiplier`: Fraction of the relevant span to decelerate over,
    ///   clamped to `[0, 1]`
    /// - `chain_length`: Total chain length
    /// - `last_path_length`: Length of the final path
    ///
    /// # Returns
    /// The zone, or None for [`DecelerationType::None`]
    pub fn new(
        deceleration_type: DecelerationType,
        multiplier: f64,
        chain_length: f64,
        last_path_length: f64,
    ) -> Option<Self> {
        let span = match deceleration_type {
            DecelerationType::None => return None,
            DecelerationType::Global => chain_length,
            DecelerationType::LastPath => last_path_length,
        };

        // NaN collapses to an empty zone at the end
        let multiplier = if multiplier.is_nan() {
            0.0
        } else {
            multiplier.clamp(0.0, 1.0)
        };

        Some(Self {
            start: chain_length - span * multiplier,
            end: chain_length,
        })
    }

    /// Distance at which deceleration begins
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Distance at which the chain ends
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Length of the zone
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// Check if a chain distance lies inside the zone
    pub fn contains(&self, distance: f64) -> bool {
        distance >= self.start && distance <= self.end
    }

    /// Fraction of the zone covered at `distance`
    ///
    /// 0 at the zone start, 1 at the chain end. A zero-length zone reports
    /// 1 once reached.
    pub fn progress(&self, distance: f64) -> f64 {
        let span = self.span();
        if span <= 0.0 {
            return if distance >= self.end { 1.0 } else { 0.0 };
        }
        ((distance - self.start) / span).clamp(0.0, 1.0)
    }
}
