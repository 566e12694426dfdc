//! Persisted follower constants
//!
//! Wraps [`FollowerConstants`] with a header so stale or foreign data in
//! storage is rejected on load.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::constants::FollowerConstants;

/// Magic number to identify valid follower data
pub const FOLLOWER_MAGIC: u32 = 0x50434846; // "PCHF"

/// Current follower data version
pub const FOLLOWER_VERSION: u8 = 2;

/// Follower constants as stored in binary form
///
/// This struct is serialized using postcard.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StoredConstants {
    /// Magic number for validation
    pub magic: u32,
    /// Data format version
    pub version: u8,
    /// Stored constants
    pub constants: FollowerConstants,
}

impl StoredConstants {
    /// Wrap constants with the current header
    pub const fn new(constants: FollowerConstants) -> Self {
        Self {
            magic: FOLLOWER_MAGIC,
            version: FOLLOWER_VERSION,
            constants,
        }
    }

    /// Check if the header matches the current format
    pub fn is_valid(&self) -> bool {
        self.magic == FOLLOWER_MAGIC && self.version == FOLLOWER_VERSION
    }
}

impl Default for StoredConstants {
    fn default() -> Self {
        Self::new(FollowerConstants::default())
    }
}
