//! Persisted configuration store trait

use crate::config::BadgeConfig;

/// Errors from the configuration store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Backing storage failed
    Storage,
    /// Record could not be serialized
    Encode,
    /// Stored bytes are not a valid record
    Decode,
}

/// Storage for the owner record
pub trait ConfigStore {
    /// Load the stored record, `Ok(None)` when nothing has been saved
    fn load(&mut self) -> Result<Option<BadgeConfig>, StoreError>;

    /// Replace the stored record
    fn save(&mut self, config: &BadgeConfig) -> Result<(), StoreError>;
}
