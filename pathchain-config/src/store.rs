//! Configuration storage abstraction
//!
//! Key-value storage for configuration records. Board crates implement
//! [`ConfigStore`] over their flash; [`MemoryStore`] keeps records in RAM
//! for hosts and tests.

use heapless::Vec;

/// Storage keys for configuration data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// Follower constants (binary postcard format)
    FollowerConstants = 0,
    /// Follower constants as TOML text
    FollowerConstantsToml = 1,
}

impl StorageKey {
    /// Number of keys
    pub const COUNT: usize = 2;

    /// Get the key as a byte value
    ///
    /// Stores that address records by a raw byte, such as a flash map,
    /// use this as the record key.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create a key from a byte value read back from such a store
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(StorageKey::FollowerConstants),
            1 => Some(StorageKey::FollowerConstantsToml),
            _ => None,
        }
    }
}

/// Errors from storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Underlying storage failed
    Storage,
    /// Key not found
    NotFound,
    /// Buffer too small for the data
    BufferTooSmall,
    /// Storage is full
    Full,
}

/// Key-value configuration storage
pub trait ConfigStore {
    /// Read a value by key into the provided buffer
    ///
    /// # Returns
    /// The number of bytes read, or an error.
    fn read(
        &mut self,
        key: StorageKey,
        buffer: &mut [u8],
    ) -> impl core::future::Future<Output = Result<usize, StoreError>>;

    /// Write a value by key, replacing any previous value
    fn write(
        &mut self,
        key: StorageKey,
        data: &[u8],
    ) -> impl core::future::Future<Output = Result<(), StoreError>>;

    /// Check if a key exists in storage
    fn exists(&mut self, key: StorageKey) -> impl core::future::Future<Output = bool>;

    /// Erase all stored data
    fn erase_all(&mut self) -> impl core::future::Future<Output = Result<(), StoreError>>;
}

/// Maximum record size held by [`MemoryStore`]
pub const MAX_RECORD_SIZE: usize = 1024;

/// In-memory configuration store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: [Option<Vec<u8, MAX_RECORD_SIZE>>; StorageKey::COUNT],
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryStore {
    async fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, StoreError> {
        let record = self.records[usize::from(key.as_u8())]
            .as_ref()
            .ok_or(StoreError::NotFound)?;
        let target = buffer
            .get_mut(..record.len())
            .ok_or(StoreError::BufferTooSmall)?;
        target.copy_from_slice(record);
        Ok(record.len())
    }

    async fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), StoreError> {
        let record = Vec::from_slice(data).map_err(|_| StoreError::Full)?;
        self.records[usize::from(key.as_u8())] = Some(record);
        Ok(())
    }

    async fn exists(&mut self, key: StorageKey) -> bool {
        self.records[usize::from(key.as_u8())].is_some()
    }

    async fn erase_all(&mut self) -> Result<(), StoreError> {
        self.records = Default::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    #[test]
    fn test_key_round_trip() {
        for key in [StorageKey::FollowerConstants, StorageKey::FollowerConstantsToml] {
            assert_eq!(StorageKey::from_u8(key.as_u8()), Some(key));
        }
        assert_eq!(StorageKey::from_u8(2), None);
    }

    #[test]
    fn test_read_write() {
        let mut store = MemoryStore::new();
        let mut buffer = [0u8; 8];

        assert_eq!(
            block_on(store.read(StorageKey::FollowerConstants, &mut buffer)),
            Err(StoreError::NotFound)
        );

        block_on(store.write(StorageKey::FollowerConstants, &[1, 2, 3])).unwrap();
        assert!(block_on(store.exists(StorageKey::FollowerConstants)));
        assert!(!block_on(store.exists(StorageKey::FollowerConstantsToml)));

        let len = block_on(store.read(StorageKey::FollowerConstants, &mut buffer)).unwrap();
        assert_eq!(&buffer[..len], &[1, 2, 3]);
    }

    #[test]
    fn test_buffer_too_small() {
        let mut store = MemoryStore::new();
        block_on(store.write(StorageKey::FollowerConstantsToml, b"abcdef")).unwrap();

        let mut buffer = [0u8; 4];
        assert_eq!(
            block_on(store.read(StorageKey::FollowerConstantsToml, &mut buffer)),
            Err(StoreError::BufferTooSmall)
        );
    }

    #[test]
    fn test_record_too_large() {
        let mut store = MemoryStore::new();
        let data = [0u8; MAX_RECORD_SIZE + 1];
        assert_eq!(
            block_on(store.write(StorageKey::FollowerConstants, &data)),
            Err(StoreError::Full)
        );
    }

    #[test]
    fn test_erase_all() {
        let mut store = MemoryStore::new();
        block_on(store.write(StorageKey::FollowerConstants, &[9])).unwrap();
        block_on(store.erase_all()).unwrap();
        assert!(!block_on(store.exists(StorageKey::FollowerConstants)));
    }
}
