//! # Protocol Constants
//!
//! Every magic number in Stela lives here. If you're hardcoding a constant
//! somewhere else, you're doing it wrong and you owe the team coffee.
//!
//! These values are shared by every signer and verifier of ledger entries.
//! Changing any of them invalidates every signature ever produced, so the
//! bar for edits is "new protocol", not "refactor".

// ---------------------------------------------------------------------------
// Domain Separation
// ---------------------------------------------------------------------------

/// The 32-byte namespace identifier for the transaction chain.
///
/// Mixed into every signing digest so that a signature produced for a Stela
/// transaction batch can never be replayed as a signature for any other
/// protocol or chain context. Signer and verifier must agree on this value
/// byte-for-byte.
pub const TRANSACTION_NAMESPACE: [u8; 32] = [
    0xcf, 0xfc, 0xe0, 0xf4, 0x09, 0xeb, 0xba, 0x4e, 0xd2, 0x36, 0xd4, 0x9d, 0x89, 0xc7, 0x0e,
    0x4b, 0xd1, 0xf1, 0x36, 0x7d, 0x86, 0x40, 0x2a, 0x33, 0x63, 0x36, 0x66, 0x83, 0x26, 0x5a,
    0x24, 0x2d,
];

// ---------------------------------------------------------------------------
// Wire Entry Format
// ---------------------------------------------------------------------------

/// Scheme tag prefixed to every reveal datum. Identifies the slot as a
/// type-1 (single Ed25519 key) authorization.
pub const REVEAL_TAG: u8 = 0x01;

/// Total length of a reveal datum: one tag byte plus a 32-byte public key.
pub const REVEAL_DATUM_LENGTH: usize = 33;

/// Ed25519 public key length in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 signature length. Always 64 bytes. If yours isn't, something
/// has gone terribly wrong.
pub const SIGNATURE_LENGTH: usize = 64;

/// Version emitted in the canonical content encoding of a transaction batch.
pub const CONTENT_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

/// Human-readable prefix for Stela addresses (Bech32 HRP).
pub const ADDRESS_HRP: &str = "stela";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_matches_published_hex() {
        assert_eq!(
            hex::encode(TRANSACTION_NAMESPACE),
            "cffce0f409ebba4ed236d49d89c70e4bd1f1367d86402a3363366683265a242d"
        );
    }

    #[test]
    fn reveal_datum_length_is_tag_plus_key() {
        assert_eq!(REVEAL_DATUM_LENGTH, 1 + PUBLIC_KEY_LENGTH);
    }
}
