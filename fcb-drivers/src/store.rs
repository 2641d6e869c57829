//! Owner record persisted in flash
//!
//! The runtime's store is synchronous; the record is small and only touched
//! at boot and at the end of setup, so flash futures are driven to
//! completion in place.

use embassy_futures::block_on;
use fcb_core::config::{BadgeConfig, MAX_ENCODED_LEN};
use fcb_core::traits::{ConfigStore, StoreError};
use fcb_hal::{FlashError, FlashStorage, StorageKey};

pub struct FlashConfigStore<F> {
    flash: F,
}

impl<F: FlashStorage> FlashConfigStore<F> {
    pub fn new(flash: F) -> Self {
        Self { flash }
    }

    /// Drop the stored record
    pub fn clear(&mut self) -> Result<(), StoreError> {
        block_on(self.flash.erase_all()).map_err(|e| {
            warn!("Config erase failed: {:?}", e);
            StoreError::Storage
        })
    }

    /// Release the underlying flash
    pub fn release(self) -> F {
        self.flash
    }
}

impl<F: FlashStorage> ConfigStore for FlashConfigStore<F> {
    fn load(&mut self) -> Result<Option<BadgeConfig>, StoreError> {
        let mut buf = [0u8; MAX_ENCODED_LEN];
        let len = match block_on(self.flash.read(StorageKey::BadgeConfig, &mut buf)) {
            Ok(len) => len,
            Err(FlashError::NotFound) => return Ok(None),
            Err(e) => {
                warn!("Config read failed: {:?}", e);
                return Err(StoreError::Storage);
            }
        };
        BadgeConfig::decode(&buf[..len]).map(Some)
    }

    fn save(&mut self, config: &BadgeConfig) -> Result<(), StoreError> {
        let mut buf = [0u8; MAX_ENCODED_LEN];
        let bytes = config.encode(&mut buf)?;
        block_on(self.flash.write(StorageKey::BadgeConfig, bytes)).map_err(|e| {
            warn!("Config write failed: {:?}", e);
            StoreError::Storage
        })?;
        info!("Config saved ({} bytes)", bytes.len());
        Ok(())
    }
}
