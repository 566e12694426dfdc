//! Follower configuration loading and persistence
//!
//! Loads [`FollowerConstants`] from a key-value store. TOML text is tried
//! first, then a versioned postcard record; both are validated before use.
//!
//! [`FollowerConstants`]: pathchain_core::FollowerConstants

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod loader;
pub mod store;
pub mod toml;

pub use loader::{ConfigError, ConfigPersistence};
pub use store::{ConfigStore, MemoryStore, StorageKey, StoreError};
pub use self::toml::{parse_constants, ParseError};
