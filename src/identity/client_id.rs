//! Anonymous client identifier (`cid`).

use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;
use uuid::{Builder, Uuid, Variant};

/// A client identifier as sent in the `cid` field.
///
/// Freshly generated ids are random version-4 UUIDs. Ids read back from a
/// store are kept exactly as stored.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClientId(String);

impl ClientId {
    /// Generate a new id from 16 bytes of OS randomness.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 16];
        OsRng.fill_bytes(&mut bytes);
        Self::from_random_bytes(bytes)
    }

    /// Format 16 random bytes as a v4 UUID.
    ///
    /// Byte 6 gets version nibble `0100`, byte 8 gets variant bits `10`.
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        let uuid = Builder::from_random_bytes(bytes).into_uuid();
        ClientId(uuid.hyphenated().to_string())
    }

    /// Wrap a previously persisted value without inspecting it.
    pub fn from_stored(value: impl Into<String>) -> Self {
        ClientId(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Whether the value is a lowercase hyphenated version-4 UUID.
    ///
    /// Stored values are not checked automatically; callers that distrust
    /// their store can use this to decide whether to regenerate.
    pub fn is_valid_v4(&self) -> bool {
        if self.0.len() != 36 || self.0.chars().any(|c| c.is_ascii_uppercase()) {
            return false;
        }
        match Uuid::parse_str(&self.0) {
            Ok(uuid) => uuid.get_version_num() == 4 && uuid.get_variant() == Variant::RFC4122,
            Err(_) => false,
        }
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<ClientId> for String {
    fn from(id: ClientId) -> String {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_and_variant_bits_forced() {
        let id = ClientId::from_random_bytes([0xff; 16]);
        assert_eq!(id.as_str(), "ffffffff-ffff-4fff-bfff-ffffffffffff");

        let id = ClientId::from_random_bytes([0x00; 16]);
        assert_eq!(id.as_str(), "00000000-0000-4000-8000-000000000000");
    }

    #[test]
    fn test_generated_ids_are_valid_and_distinct() {
        let a = ClientId::generate();
        let b = ClientId::generate();
        assert!(a.is_valid_v4());
        assert!(b.is_valid_v4());
        assert_ne!(a, b);
    }

    #[test]
    fn test_stored_value_passes_through() {
        let id = ClientId::from_stored("not-a-uuid");
        assert_eq!(id.as_str(), "not-a-uuid");
        assert!(!id.is_valid_v4());
    }

    #[test]
    fn test_uppercase_or_v1_rejected() {
        assert!(!ClientId::from_stored("FFFFFFFF-FFFF-4FFF-BFFF-FFFFFFFFFFFF").is_valid_v4());
        assert!(!ClientId::from_stored("ffffffff-ffff-1fff-bfff-ffffffffffff").is_valid_v4());
    }
}
