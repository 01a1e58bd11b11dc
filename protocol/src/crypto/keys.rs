//! # Key Management
//!
//! Ed25519 keypair handling for batch signers.
//!
//! Every authorization on the ledger traces back to one of these keypairs.
//! The module is a thin, type-safe layer over `ed25519-dalek`; nothing here
//! reimplements curve arithmetic.
//!
//! ## Security considerations
//!
//! - Key generation uses the OS RNG (`OsRng`).
//! - Secret key bytes are never logged and never appear in `Debug` output.
//! - `StelaKeypair` deliberately does not implement `Serialize`. Exporting a
//!   secret key is an explicit `secret_key_bytes()` call, not something a
//!   stray `serde_json::to_string` can do by accident.

use ed25519_dalek::{
    Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey, SECRET_KEY_LENGTH,
};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors during key construction.
///
/// Intentionally vague about which byte was wrong. Error messages that
/// describe key material are a leak waiting to happen.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid secret key bytes: wrong length or not valid hex")]
    InvalidSecretKey,

    #[error("invalid public key bytes: not a valid Ed25519 point")]
    InvalidPublicKey,
}

/// A signing keypair for batch authorization.
///
/// Holds the Ed25519 secret key; the public half is derived on demand.
/// A batch borrows these only for the duration of `sign()` and no key
/// material ends up in the produced entry.
pub struct StelaKeypair {
    signing_key: SigningKey,
}

/// The public half of a signer identity. Safe to share; it is what reveal
/// datums carry on the wire.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StelaPublicKey {
    bytes: [u8; 32],
}

/// An Ed25519 signature. Always exactly 64 bytes.
///
/// Stored as `Vec<u8>` for serde compatibility. A signature that somehow
/// isn't 64 bytes simply fails verification; no panics.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StelaSignature {
    bytes: Vec<u8>,
}

impl StelaKeypair {
    /// Generate a fresh keypair from the OS cryptographic RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Construct a keypair deterministically from a 32-byte seed.
    ///
    /// In Ed25519 the 32-byte secret key *is* the seed. A weak seed makes a
    /// weak key; feed this from a CSPRNG or KDF only.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Reconstruct a keypair from a hex-encoded secret key.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str).map_err(|_| KeyError::InvalidSecretKey)?;
        if bytes.len() != SECRET_KEY_LENGTH {
            return Err(KeyError::InvalidSecretKey);
        }
        let mut seed = [0u8; SECRET_KEY_LENGTH];
        seed.copy_from_slice(&bytes);
        Ok(Self::from_seed(&seed))
    }

    /// The public key associated with this keypair.
    pub fn public_key(&self) -> StelaPublicKey {
        StelaPublicKey {
            bytes: self.signing_key.verifying_key().to_bytes(),
        }
    }

    /// Raw public key bytes (32 bytes). This is what a reveal datum carries.
    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Sign a message. Ed25519 signing is deterministic: the same key and
    /// message always produce the same 64-byte signature.
    pub fn sign(&self, message: &[u8]) -> StelaSignature {
        StelaSignature {
            bytes: self.signing_key.sign(message).to_bytes().to_vec(),
        }
    }

    /// Verify a signature against this keypair's own public key.
    pub fn verify(&self, message: &[u8], signature: &StelaSignature) -> bool {
        self.public_key().verify(message, signature)
    }

    /// Export the raw 32-byte secret key material.
    ///
    /// Handle with care. This is the only secret standing between an
    /// attacker and the associated identity.
    pub fn secret_key_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }
}

impl Clone for StelaKeypair {
    fn clone(&self) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&self.signing_key.to_bytes()),
        }
    }
}

impl fmt::Debug for StelaKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print secret material, not even "partially".
        write!(f, "StelaKeypair(pub={})", self.public_key().to_hex())
    }
}

impl PartialEq for StelaKeypair {
    /// Equality by public key. Comparing secret material in non-constant
    /// time is a habit this crate does not have.
    fn eq(&self, other: &Self) -> bool {
        self.public_key_bytes() == other.public_key_bytes()
    }
}

impl Eq for StelaKeypair {}

// ---------------------------------------------------------------------------
// StelaPublicKey
// ---------------------------------------------------------------------------

impl StelaPublicKey {
    /// Wrap raw bytes as a public key without point validation.
    ///
    /// Verification will fail later if the bytes are not a canonical
    /// Ed25519 point; see [`StelaPublicKey::verify`].
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Parse a hex-encoded public key string.
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(s).map_err(|_| KeyError::InvalidPublicKey)?;
        if bytes.len() != 32 {
            return Err(KeyError::InvalidPublicKey);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self { bytes: arr })
    }

    /// The raw key bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Verify a signature against this public key.
    ///
    /// Returns `false` for any failure: wrong message, wrong key, malformed
    /// signature bytes, or bytes that are not a valid curve point. Callers
    /// that need the distinction should not be given one; a detailed
    /// failure oracle helps nobody but the attacker.
    pub fn verify(&self, message: &[u8], signature: &StelaSignature) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.bytes) else {
            return false;
        };
        let sig_bytes: [u8; 64] = match signature.bytes.as_slice().try_into() {
            Ok(b) => b,
            Err(_) => return false,
        };
        let dalek_sig = DalekSignature::from_bytes(&sig_bytes);
        verifying_key.verify(message, &dalek_sig).is_ok()
    }

    /// Hex-encoded representation, 64 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl fmt::Display for StelaPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for StelaPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StelaPublicKey({})", &self.to_hex()[..16])
    }
}

// ---------------------------------------------------------------------------
// StelaSignature
// ---------------------------------------------------------------------------

impl StelaSignature {
    /// Wrap a raw 64-byte signature.
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }

    /// The raw signature bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Hex-encoded signature, 128 characters for a well-formed signature.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

impl fmt::Display for StelaSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for StelaSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = self.to_hex();
        if hex_str.len() >= 128 {
            write!(f, "StelaSignature({}...{})", &hex_str[..8], &hex_str[120..])
        } else {
            write!(f, "StelaSignature({})", hex_str)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
