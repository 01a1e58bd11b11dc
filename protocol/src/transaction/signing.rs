//! The per-signer authorization scheme.
//!
//! Every signer of a batch signs the SHA-512 digest of
//!
//! ```text
//! ascii(position) || timestamp || TRANSACTION_NAMESPACE || content
//! ```
//!
//! Binding the signer's position into the message means a signature
//! collected for slot 2 is worthless in slot 0: shuffling (reveal,
//! signature) pairs, or replaying a pair into a differently assembled
//! batch, breaks verification. The namespace constant pins the signature
//! to this ledger's transaction chain and nothing else.

use crate::config::{REVEAL_DATUM_LENGTH, REVEAL_TAG, TRANSACTION_NAMESPACE};
use crate::crypto::{sha512_multi, StelaPublicKey};

/// Compute the digest signer `position` signs (and a verifier checks) for
/// the given timestamp and content bytes.
///
/// The position is rendered as ASCII decimal, matching the wire convention
/// for the timestamp token. Public so that external signing flows (hardware
/// signers, remote custody) can produce compatible signatures without going
/// through [`super::Batch::sign`].
pub fn signing_digest(position: usize, timestamp: &[u8], content: &[u8]) -> [u8; 64] {
    sha512_multi(&[
        position.to_string().as_bytes(),
        timestamp,
        &TRANSACTION_NAMESPACE,
        content,
    ])
}

/// Build the 33-byte reveal datum for a signer: the type-1 scheme tag
/// followed by the public key bytes.
pub fn reveal_datum(public_key: &StelaPublicKey) -> [u8; REVEAL_DATUM_LENGTH] {
    let mut datum = [0u8; REVEAL_DATUM_LENGTH];
    datum[0] = REVEAL_TAG;
    datum[1..].copy_from_slice(public_key.as_bytes());
    datum
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
