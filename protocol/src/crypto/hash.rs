//! # Hashing Utilities
//!
//! Two hash functions, two jobs, nothing else:
//!
//! - **SHA-512** — the digest every authorization signature covers. The
//!   signed message (position, timestamp, namespace, content) is hashed once
//!   and the 64-byte digest is what gets signed.
//! - **BLAKE3** — address derivation. A Stela address encodes the BLAKE3
//!   hash of the owner's public key, not the key itself.

use sha2::{Digest, Sha512};

/// Compute the SHA-512 hash of the input data. Returns the 64-byte digest.
pub fn sha512(data: &[u8]) -> [u8; 64] {
    let mut hasher = Sha512::new();
    hasher.update(data);
    let mut output = [0u8; 64];
    output.copy_from_slice(&hasher.finalize());
    output
}

/// SHA-512 over multiple byte slices fed sequentially into the hasher.
///
/// Same result as hashing the concatenation, without allocating a buffer to
/// concatenate into. The signing path hashes `(position || timestamp ||
/// namespace || content)` this way.
pub fn sha512_multi(parts: &[&[u8]]) -> [u8; 64] {
    let mut hasher = Sha512::new();
    for part in parts {
        hasher.update(part);
    }
    let mut output = [0u8; 64];
    output.copy_from_slice(&hasher.finalize());
    output
}

/// Compute the BLAKE3 hash of the input data. Returns the 32-byte digest.
pub fn blake3_hash(data: &[u8]) -> [u8; 32] {
    *blake3::hash(data).as_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha512_known_vector() {
        // SHA-512 of the empty string, straight from FIPS 180-4.
        let hash = sha512(b"");
        let expected = hex::decode(
            "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce\
             47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e",
        )
        .unwrap();
        assert_eq!(hash.as_slice(), expected.as_slice());
    }

    #[test]
    fn sha512_deterministic() {
        assert_eq!(sha512(b"stela"), sha512(b"stela"));
        assert_ne!(sha512(b"stela"), sha512(b"Stela"));
    }

    #[test]
    fn sha512_multi_matches_concatenation() {
        let multi = sha512_multi(&[b"0", b"1000", b"content"]);
        let single = sha512(b"01000content");
        assert_eq!(multi, single);
    }

    #[test]
    fn sha512_multi_empty_parts() {
        assert_eq!(sha512_multi(&[]), sha512(b""));
        assert_eq!(sha512_multi(&[b"", b"abc", b""]), sha512(b"abc"));
    }

    #[test]
    fn blake3_deterministic() {
        let a = blake3_hash(b"stela");
        let b = blake3_hash(b"stela");
        assert_eq!(a, b);
        assert_eq!(a.len(), 32);
    }
}
