//! Fluent chain construction
//!
//! Paths are appended in traversal order. Convenience callbacks attach to
//! the most recently added path.

use super::chain::{Callbacks, ChainError, PathChain, Segments};
use super::Path;
use crate::callback::{Callback, PathCallback};
use crate::config::FollowerConstants;
use crate::motion::DecelerationType;

/// Builder for [`PathChain`]
///
/// Errors are latched: the first failure is kept and reported by
/// [`Self::build`], and later calls are ignored.
#[derive(Debug)]
pub struct PathChainBuilder<P, C> {
    segments: Segments<P>,
    callbacks: Callbacks<C>,
    constants: FollowerConstants,
    error: Option<ChainError>,
}

impl<P: Path, C: PathCallback> PathChainBuilder<P, C> {
    /// Start an empty chain using `constants` for defaults
    pub fn new(constants: &FollowerConstants) -> Self {
        Self {
            segments: Segments::new(),
            callbacks: Callbacks::new(),
            constants: *constants,
            error: None,
        }
    }

    /// Append a path
    pub fn add_path(mut self, path: P) -> Self {
        if self.error.is_none() && self.segments.push(path).is_err() {
            self.error = Some(ChainError::TooManyPaths);
        }
        self
    }

    /// Append several paths in order
    pub fn add_paths<I>(self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
    {
        paths.into_iter().fold(self, Self::add_path)
    }

    /// Append a callback
    pub fn add_callback(mut self, callback: C) -> Self {
        if self.error.is_none() && self.callbacks.push(callback).is_err() {
            self.error = Some(ChainError::TooManyCallbacks);
        }
        self
    }

    /// Override the deceleration policy for this chain
    pub fn deceleration_type(mut self, deceleration_type: DecelerationType) -> Self {
        self.constants.deceleration_type = deceleration_type;
        self
    }

    /// Decelerate over the whole chain
    pub fn global_deceleration(self) -> Self {
        self.deceleration_type(DecelerationType::Global)
    }

    /// Decelerate over the final path only
    pub fn last_path_deceleration(self) -> Self {
        self.deceleration_type(DecelerationType::LastPath)
    }

    /// Disable chain deceleration shaping
    pub fn no_deceleration(self) -> Self {
        self.deceleration_type(DecelerationType::None)
    }

    /// Override the deceleration start multiplier for this chain
    pub fn deceleration_start_multiplier(mut self, multiplier: f64) -> Self {
        self.constants.deceleration_start_multiplier = multiplier;
        self
    }

    /// Finish the chain
    pub fn build(self) -> Result<PathChain<P, C>, ChainError> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let mut chain = PathChain::from_segments(self.segments, &self.constants);
        chain.replace_callbacks(self.callbacks);
        Ok(chain)
    }

    /// Index of the most recently added path
    fn last_index(&self) -> Result<usize, ChainError> {
        self.segments
            .len()
            .checked_sub(1)
            .ok_or(ChainError::IndexOutOfRange { index: 0, size: 0 })
    }
}

impl<P: Path, F: FnMut()> PathChainBuilder<P, Callback<F>> {
    /// Fire `action` at parametric position `t` along the last added path
    pub fn parametric_callback(self, t: f64, action: F) -> Self {
        self.bind_callback(|index| Callback::parametric(index, t, action))
    }

    /// Fire `action` `after_ms` after the last added path starts
    pub fn temporal_callback(self, after_ms: u32, action: F) -> Self {
        self.bind_callback(|index| Callback::temporal(index, after_ms, action))
    }

    fn bind_callback(mut self, make: impl FnOnce(usize) -> Callback<F>) -> Self {
        match self.last_index() {
            Ok(index) => self.add_callback(make(index)),
            Err(error) => {
                self.error.get_or_insert(error);
                self
            }
        }
    }
}
