//! Motion shaping
//!
//! Deceleration policy a follower applies near the end of a chain.

pub mod deceleration;

pub use deceleration::{DecelerationType, DecelerationZone};
