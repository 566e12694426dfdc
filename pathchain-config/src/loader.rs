//! Configuration persistence
//!
//! Loads follower constants from a [`ConfigStore`].
//! Falls back from TOML text to the binary postcard record.

use core::str;

use pathchain_core::config::{FollowerConstants, StoredConstants};

use crate::store::{ConfigStore, StorageKey, StoreError};
use crate::toml::{parse_constants, ParseError};

/// Maximum serialized record size (binary)
const MAX_BINARY_SIZE: usize = 64;

/// Maximum TOML config size
const MAX_TOML_SIZE: usize = 1024;

/// Configuration persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Storage operation failed
    Store(StoreError),
    /// Serialization failed
    Serialize,
    /// Deserialization failed
    Deserialize,
    /// TOML parsing failed
    TomlParse(ParseError),
    /// Invalid UTF-8 in TOML data
    InvalidUtf8,
    /// Stored record header mismatch
    VersionMismatch,
    /// Stored constants out of range
    InvalidValue,
}

impl From<StoreError> for ConfigError {
    fn from(e: StoreError) -> Self {
        ConfigError::Store(e)
    }
}

impl From<ParseError> for ConfigError {
    fn from(e: ParseError) -> Self {
        ConfigError::TomlParse(e)
    }
}

/// Configuration persistence manager
pub struct ConfigPersistence<S> {
    store: S,
}

impl<S: ConfigStore> ConfigPersistence<S> {
    /// Create a new config persistence manager
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Consume this persistence manager and return the underlying store
    pub fn into_store(self) -> S {
        self.store
    }

    /// Load follower constants
    ///
    /// Tries TOML first, falls back to the binary record.
    pub async fn load(&mut self) -> Result<FollowerConstants, ConfigError> {
        info!("Loading follower constants...");

        match self.load_toml().await {
            Ok(constants) => {
                info!("Loaded follower constants from TOML");
                return Ok(constants);
            }
            Err(ConfigError::Store(StoreError::NotFound)) => {
                debug!("No TOML config found, trying binary format");
            }
            Err(e) => {
                warn!("Failed to load TOML config: {:?}, trying binary", e);
            }
        }

        self.load_binary().await
    }

    /// Load follower constants, or defaults if none are stored
    pub async fn load_or_default(&mut self) -> FollowerConstants {
        match self.load().await {
            Ok(constants) => constants,
            Err(e) => {
                warn!("Using default follower constants: {:?}", e);
                FollowerConstants::default()
            }
        }
    }

    /// Store constants as a binary record
    pub async fn save(&mut self, constants: &FollowerConstants) -> Result<(), ConfigError> {
        if !constants.is_valid() {
            return Err(ConfigError::InvalidValue);
        }

        let mut buffer = [0u8; MAX_BINARY_SIZE];
        let bytes = postcard::to_slice(&StoredConstants::new(*constants), &mut buffer)
            .map_err(|_| ConfigError::Serialize)?;

        self.store
            .write(StorageKey::FollowerConstants, bytes)
            .await?;
        debug!("Wrote {} bytes of binary config", bytes.len());
        Ok(())
    }

    /// Store TOML text after checking that it parses
    pub async fn save_toml(&mut self, input: &str) -> Result<(), ConfigError> {
        parse_constants(input)?;
        self.store
            .write(StorageKey::FollowerConstantsToml, input.as_bytes())
            .await?;
        Ok(())
    }

    /// Load follower constants from TOML
    async fn load_toml(&mut self) -> Result<FollowerConstants, ConfigError> {
        let mut buffer = [0u8; MAX_TOML_SIZE];
        let len = self
            .store
            .read(StorageKey::FollowerConstantsToml, &mut buffer)
            .await?;

        debug!("Read {} bytes of TOML", len);

        let text = str::from_utf8(&buffer[..len]).map_err(|_| ConfigError::InvalidUtf8)?;
        let constants = parse_constants(text)?;

        log_constants(&constants);
        Ok(constants)
    }

    /// Load follower constants from the binary record
    async fn load_binary(&mut self) -> Result<FollowerConstants, ConfigError> {
        let mut buffer = [0u8; MAX_BINARY_SIZE];
        let len = self
            .store
            .read(StorageKey::FollowerConstants, &mut buffer)
            .await?;

        debug!("Read {} bytes of binary config", len);

        let stored: StoredConstants =
            postcard::from_bytes(&buffer[..len]).map_err(|_| ConfigError::Deserialize)?;

        if !stored.is_valid() {
            warn!(
                "Config header mismatch: magic {=u32:x}, version {}",
                stored.magic, stored.version
            );
            return Err(ConfigError::VersionMismatch);
        }
        if !stored.constants.is_valid() {
            return Err(ConfigError::InvalidValue);
        }

        log_constants(&stored.constants);
        Ok(stored.constants)
    }
}

/// Log the loaded constants
fn log_constants(constants: &FollowerConstants) {
    debug!("  deceleration_type = {}", constants.deceleration_type.name());
    debug!(
        "  deceleration_start_multiplier = {}",
        constants.deceleration_start_multiplier
    );
}
