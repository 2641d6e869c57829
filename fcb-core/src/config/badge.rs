//! Owner record collected by the setup flow
//!
//! Stored in flash as postcard-serialized binary data under a single key.

use heapless::String;
use serde::{Deserialize, Serialize};

use crate::traits::StoreError;

/// Maximum length of each field, in bytes
pub const MAX_FIELD_LEN: usize = 48;

/// Upper bound on the encoded size of a [`BadgeConfig`]
///
/// Three length-prefixed strings; each prefix fits one varint byte.
pub const MAX_ENCODED_LEN: usize = 3 * (MAX_FIELD_LEN + 1);

/// Badge owner configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BadgeConfig {
    /// Display name
    pub name: String<MAX_FIELD_LEN>,
    /// Social media handle, may be empty
    pub social_handle: String<MAX_FIELD_LEN>,
    /// Conference ticket identifier
    pub ticket_id: String<MAX_FIELD_LEN>,
}

impl BadgeConfig {
    /// Build a record, truncating fields that exceed [`MAX_FIELD_LEN`]
    pub fn new(name: &str, social_handle: &str, ticket_id: &str) -> Self {
        Self {
            name: truncated(name),
            social_handle: truncated(social_handle),
            ticket_id: truncated(ticket_id),
        }
    }

    /// Check if the record can drive the home screen
    ///
    /// A name and a ticket id are required; the social handle is optional.
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && !self.ticket_id.is_empty()
    }

    /// Serialize into `buf`, returning the used prefix
    pub fn encode<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], StoreError> {
        postcard::to_slice(self, buf).map_err(|_| StoreError::Encode)
    }

    /// Deserialize a record previously written by [`encode`](Self::encode)
    pub fn decode(bytes: &[u8]) -> Result<Self, StoreError> {
        postcard::from_bytes(bytes).map_err(|_| StoreError::Decode)
    }
}

/// Copy as many whole characters of `s` as fit
pub fn truncated<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    for ch in s.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity() {
        assert!(BadgeConfig::new("Alice", "@alice", "T-1").is_valid());
        assert!(BadgeConfig::new("Alice", "", "T-1").is_valid());
        assert!(!BadgeConfig::new("", "@alice", "T-1").is_valid());
        assert!(!BadgeConfig::new("Alice", "@alice", "").is_valid());
        assert!(!BadgeConfig::default().is_valid());
    }

    #[test]
    fn test_encode_decode() {
        let config = BadgeConfig::new("Alice", "@alice", "T-42");
        let mut buf = [0u8; MAX_ENCODED_LEN];
        let used = config.encode(&mut buf).unwrap().len();
        assert_eq!(BadgeConfig::decode(&buf[..used]), Ok(config));
    }

    #[test]
    fn test_max_size_fits() {
        let long = "x".repeat(MAX_FIELD_LEN);
        let config = BadgeConfig::new(&long, &long, &long);
        let mut buf = [0u8; MAX_ENCODED_LEN];
        assert!(config.encode(&mut buf).is_ok());
    }

    #[test]
    fn test_garbage_rejected() {
        assert_eq!(BadgeConfig::decode(&[0xFF]), Err(StoreError::Decode));
        assert_eq!(BadgeConfig::decode(&[]), Err(StoreError::Decode));
    }

    #[test]
    fn test_truncation() {
        let long = "y".repeat(MAX_FIELD_LEN + 10);
        let config = BadgeConfig::new(&long, "", "T");
        assert_eq!(config.name.len(), MAX_FIELD_LEN);
    }
}
