//! # Cryptographic Primitives
//!
//! Everything security-related in the toolkit flows through here: Ed25519
//! keypairs for batch signers, SHA-512 for authorization digests, BLAKE3 for
//! address derivation.
//!
//! We deliberately chose boring, well-audited cryptography and thin wrappers
//! over it. If you're tempted to optimize these functions, go read about
//! timing attacks and come back when you've lost the urge.

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::{blake3_hash, sha512, sha512_multi};
pub use keys::{KeyError, StelaKeypair, StelaPublicKey, StelaSignature};
pub use signatures::{sign, verify, verify_raw};
