//! Configuration types
//!
//! Follower defaults read once when a chain is constructed, and the
//! postcard-serialized record used to persist them.

pub mod constants;
pub mod stored;

pub use constants::*;
pub use stored::*;
