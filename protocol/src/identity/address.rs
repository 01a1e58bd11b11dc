//! # Stela Addresses
//!
//! The human-facing identity of a ledger participant, derived from an
//! Ed25519 public key:
//!
//! ```text
//! public_key (32 bytes)
//!     -> BLAKE3(public_key) -> 32 bytes
//!     -> Bech32("stela", hash) -> stela1qw508d6qe...
//! ```
//!
//! Bech32 gives addresses a recognizable prefix and built-in error
//! detection, which matters when users copy-paste them into payment fields.
//! Only the key hash is recoverable from an address string; the key itself
//! travels separately (in a reveal datum) when a signature must be checked.

use bech32::{Bech32, Hrp};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::ADDRESS_HRP;
use crate::crypto::{blake3_hash, StelaPublicKey};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from parsing an address string.
#[derive(Debug, Error)]
pub enum AddressError {
    /// The Bech32 string could not be decoded (bad charset, bad checksum).
    #[error("bech32 decode error: {0}")]
    Bech32Decode(String),

    /// The decoded address has an unexpected human-readable prefix.
    #[error("invalid HRP: expected '{expected}', got '{got}'")]
    InvalidHrp { expected: String, got: String },

    /// The decoded data has an unexpected length.
    #[error("invalid address data length: expected {expected} bytes, got {got}")]
    InvalidDataLength { expected: usize, got: usize },
}

// ---------------------------------------------------------------------------
// StelaId
// ---------------------------------------------------------------------------

/// A Stela address: the BLAKE3 hash of a public key, rendered as Bech32.
///
/// # Examples
///
/// ```
/// use stela_protocol::crypto::StelaKeypair;
/// use stela_protocol::identity::StelaId;
///
/// let kp = StelaKeypair::generate();
/// let id = StelaId::from_public_key(&kp.public_key());
/// let address = id.to_address();
/// assert!(address.starts_with("stela1"));
///
/// let recovered = StelaId::from_address(&address).unwrap();
/// assert_eq!(id, recovered);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StelaId {
    key_hash: [u8; 32],
}

impl StelaId {
    /// Derive the address identity for a public key.
    pub fn from_public_key(pk: &StelaPublicKey) -> Self {
        Self::from_key_bytes(pk.as_bytes())
    }

    /// Derive the address identity from raw public key bytes.
    ///
    /// No curve-point validation happens here: an address is a hash, and the
    /// entry parser needs to name a signer slot's address even when its key
    /// bytes turn out not to verify.
    pub fn from_key_bytes(key_bytes: &[u8; 32]) -> Self {
        Self {
            key_hash: blake3_hash(key_bytes),
        }
    }

    /// Render this identity as a Bech32 address string.
    pub fn to_address(&self) -> String {
        let hrp = Hrp::parse(ADDRESS_HRP).expect("static HRP is valid");
        bech32::encode::<Bech32>(hrp, &self.key_hash)
            .expect("encoding a 32-byte payload should never fail")
    }

    /// Parse an address string back into a [`StelaId`].
    ///
    /// Validates the HRP, checksum, and data length.
    pub fn from_address(addr: &str) -> Result<Self, AddressError> {
        let (hrp, data) =
            bech32::decode(addr).map_err(|e| AddressError::Bech32Decode(e.to_string()))?;

        let expected_hrp = Hrp::parse(ADDRESS_HRP).expect("static HRP is valid");
        if hrp != expected_hrp {
            return Err(AddressError::InvalidHrp {
                expected: ADDRESS_HRP.to_string(),
                got: hrp.to_string(),
            });
        }

        if data.len() != 32 {
            return Err(AddressError::InvalidDataLength {
                expected: 32,
                got: data.len(),
            });
        }

        let mut key_hash = [0u8; 32];
        key_hash.copy_from_slice(&data);
        Ok(Self { key_hash })
    }

    /// `true` if the string parses as a well-formed Stela address.
    ///
    /// This is the structural check transaction validation runs on every
    /// input and transfer address.
    pub fn is_valid(addr: &str) -> bool {
        Self::from_address(addr).is_ok()
    }

    /// The raw 32-byte key hash underlying this address.
    pub fn key_hash(&self) -> &[u8; 32] {
        &self.key_hash
    }
}

impl fmt::Display for StelaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_address())
    }
}

impl fmt::Debug for StelaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StelaId({})", self.to_address())
    }
}

impl Serialize for StelaId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_address())
    }
}

impl<'de> Deserialize<'de> for StelaId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        StelaId::from_address(&s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::StelaKeypair;

    #[test]
    fn address_starts_with_stela1() {
        let kp = StelaKeypair::generate();
        let addr = StelaId::from_public_key(&kp.public_key()).to_address();
        assert!(addr.starts_with("stela1"), "address was: {}", addr);
    }

    #[test]
    fn address_roundtrip() {
        let kp = StelaKeypair::generate();
        let id = StelaId::from_public_key(&kp.public_key());
        let recovered = StelaId::from_address(&id.to_address()).unwrap();
        assert_eq!(id, recovered);
    }

    #[test]
    fn key_bytes_and_public_key_agree() {
        let kp = StelaKeypair::generate();
        let via_key = StelaId::from_public_key(&kp.public_key());
        let via_bytes = StelaId::from_key_bytes(&kp.public_key_bytes());
        assert_eq!(via_key, via_bytes);
    }

    #[test]
    fn different_keys_different_addresses() {
        let a = StelaId::from_key_bytes(&StelaKeypair::generate().public_key_bytes());
        let b = StelaId::from_key_bytes(&StelaKeypair::generate().public_key_bytes());
        assert_ne!(a.to_address(), b.to_address());
    }

    #[test]
    fn invalid_hrp_rejected() {
        let hrp = Hrp::parse("atlas").unwrap();
        let encoded = bech32::encode::<Bech32>(hrp, &[0u8; 32]).unwrap();
        let err = StelaId::from_address(&encoded).unwrap_err();
        assert!(matches!(err, AddressError::InvalidHrp { .. }));
    }

    #[test]
    fn corrupted_address_rejected() {
        let kp = StelaKeypair::generate();
        let mut addr = StelaId::from_public_key(&kp.public_key()).to_address();
        let mid = addr.len() / 2;
        let original = addr.as_bytes()[mid];
        let replacement = if original == b'q' { b'p' } else { b'q' };
        unsafe {
            addr.as_bytes_mut()[mid] = replacement;
        }
        assert!(!StelaId::is_valid(&addr));
    }

    #[test]
    fn is_valid_matches_parse() {
        let kp = StelaKeypair::generate();
        let addr = StelaId::from_public_key(&kp.public_key()).to_address();
        assert!(StelaId::is_valid(&addr));
        assert!(!StelaId::is_valid("not an address"));
        assert!(!StelaId::is_valid(""));
    }

    #[test]
    fn serde_roundtrip_as_string() {
        let kp = StelaKeypair::generate();
        let id = StelaId::from_public_key(&kp.public_key());
        let json = serde_json::to_string(&id).unwrap();
        assert!(json.starts_with("\"stela1"));
        let recovered: StelaId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, recovered);
    }
}
