//! Path chains
//!
//! A chain is an ordered run of paths a follower executes as one continuous
//! motion, together with the callbacks attached along it and the
//! deceleration policy used near its end.

use heapless::Vec;

use super::Path;
use crate::callback::PathCallback;
use crate::config::FollowerConstants;
use crate::motion::{DecelerationType, DecelerationZone};

/// Maximum paths per chain
pub const MAX_PATHS: usize = 32;

/// Maximum callbacks per chain
pub const MAX_CALLBACKS: usize = 16;

/// Ordered path storage
pub type Segments<P> = Vec<P, MAX_PATHS>;

/// Ordered callback storage
pub type Callbacks<C> = Vec<C, MAX_CALLBACKS>;

/// Errors from chain operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChainError {
    /// Path index outside `[0, size)`
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of paths in the chain
        size: usize,
    },
    /// More than [`MAX_PATHS`] paths
    TooManyPaths,
    /// More than [`MAX_CALLBACKS`] callbacks
    TooManyCallbacks,
}

/// An ordered sequence of paths run as one continuous unit
///
/// The chain is passive: it holds no traversal position and never evaluates
/// callback triggers. A follower polls it by index and owns all progress
/// state (see [`crate::follower::ChainTracker`]).
///
/// IMPORTANT: order matters. Paths are traversed in the order they were
/// given, and callbacks keep their insertion order.
#[derive(Debug, Clone)]
pub struct PathChain<P, C> {
    /// Paths in traversal order
    segments: Segments<P>,
    /// Sum of segment lengths, fixed at construction
    length: f64,
    /// Callbacks in insertion order
    callbacks: Callbacks<C>,
    /// Deceleration policy
    deceleration_type: DecelerationType,
    /// Fraction of the relevant distance over which to decelerate
    deceleration_start_multiplier: f64,
}

impl<P: Path, C: PathCallback> PathChain<P, C> {
    /// Create a chain from paths in traversal order
    ///
    /// The deceleration policy and start multiplier are copied from
    /// `constants`; later changes to `constants` do not affect this chain.
    ///
    /// An empty iterator produces a valid empty chain.
    pub fn new<I>(paths: I, constants: &FollowerConstants) -> Result<Self, ChainError>
    where
        I: IntoIterator<Item = P>,
    {
        let mut segments = Vec::new();
        for path in paths {
            segments.push(path).map_err(|_| ChainError::TooManyPaths)?;
        }
        Ok(Self::from_segments(segments, constants))
    }

    /// Create a chain that adopts a pre-built sequence of paths
    pub fn from_segments(segments: Segments<P>, constants: &FollowerConstants) -> Self {
        // Summed in traversal order so both constructors round identically
        let length = total_length(&segments);

        Self {
            segments,
            length,
            callbacks: Vec::new(),
            deceleration_type: constants.deceleration_type,
            deceleration_start_multiplier: constants.deceleration_start_multiplier,
        }
    }

    /// Get the path at `index`
    pub fn path(&self, index: usize) -> Result<&P, ChainError> {
        self.segments.get(index).ok_or(ChainError::IndexOutOfRange {
            index,
            size: self.segments.len(),
        })
    }

    /// Get the final path, if any
    pub fn last_path(&self) -> Option<&P> {
        self.segments.last()
    }

    /// Iterate over paths in traversal order
    pub fn paths(&self) -> core::slice::Iter<'_, P> {
        self.segments.iter()
    }

    /// Number of paths
    pub fn size(&self) -> usize {
        self.segments.len()
    }

    /// Check if the chain has no paths
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total length of all paths
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Distance along the chain at which path `index` starts
    pub fn start_distance(&self, index: usize) -> Result<f64, ChainError> {
        self.path(index)?;
        Ok(total_length(&self.segments[..index]))
    }

    /// Append callbacks after the existing ones, in the order given
    ///
    /// Either all callbacks are appended or, on overflow, none are.
    pub fn append_callbacks<I>(&mut self, callbacks: I) -> Result<(), ChainError>
    where
        I: IntoIterator<Item = C>,
    {
        let original_len = self.callbacks.len();
        for callback in callbacks {
            if self.callbacks.push(callback).is_err() {
                self.callbacks.truncate(original_len);
                return Err(ChainError::TooManyCallbacks);
            }
        }
        Ok(())
    }

    /// Replace the whole callback collection
    ///
    /// Previously attached callbacks are dropped.
    pub fn replace_callbacks(&mut self, callbacks: Callbacks<C>) {
        self.callbacks = callbacks;
    }

    /// Callbacks in insertion order
    pub fn callbacks(&self) -> &[C] {
        &self.callbacks
    }

    /// Mutable access to the callbacks in insertion order
    pub fn callbacks_mut(&mut self) -> &mut [C] {
        &mut self.callbacks
    }

    /// Return every callback to its unfired state, in order
    pub fn reset_callbacks(&mut self) {
        for callback in self.callbacks.iter_mut() {
            callback.reset();
        }
    }

    /// Set the deceleration policy
    pub fn set_deceleration_type(&mut self, deceleration_type: DecelerationType) {
        self.deceleration_type = deceleration_type;
    }

    /// Get the deceleration policy
    pub fn deceleration_type(&self) -> DecelerationType {
        self.deceleration_type
    }

    /// Set the deceleration start multiplier
    ///
    /// Not validated here. Values outside `(0, 1]` are the caller's
    /// responsibility; [`Self::deceleration_zone`] clamps them.
    pub fn set_deceleration_start_multiplier(&mut self, multiplier: f64) {
        self.deceleration_start_multiplier = multiplier;
    }

    /// Get the deceleration start multiplier
    pub fn deceleration_start_multiplier(&self) -> f64 {
        self.deceleration_start_multiplier
    }

    /// Region of the chain where the follower should decelerate
    ///
    /// Returns `None` when the policy is [`DecelerationType::None`] or the
    /// chain is empty.
    pub fn deceleration_zone(&self) -> Option<DecelerationZone> {
        let last_length = self.last_path()?.length();
        DecelerationZone::new(
            self.deceleration_type,
            self.deceleration_start_multiplier,
            self.length,
            last_length,
        )
    }
}

/// Sum of path lengths in order, starting from `+0.0`
fn total_length<P: Path>(paths: &[P]) -> f64 {
    paths.iter().fold(0.0, |acc, path| acc + path.length())
}
