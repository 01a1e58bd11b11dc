//! # Digital Signatures
//!
//! Free-function sign/verify over the key types in [`super::keys`]. This is
//! the one polymorphic boundary the batch codec talks to: `sign` during
//! entry construction, `verify_raw` when checking (public key, signature)
//! pairs lifted straight off the wire.

use ed25519_dalek::{Signature as DalekSignature, Verifier, VerifyingKey};

use super::keys::{StelaKeypair, StelaPublicKey, StelaSignature};

/// Sign a message with a keypair. Produces a deterministic 64-byte Ed25519
/// signature (RFC 8032).
pub fn sign(keypair: &StelaKeypair, message: &[u8]) -> StelaSignature {
    keypair.sign(message)
}

/// Verify a signature against a public key and message. Returns `true` only
/// for a valid signature; every failure mode is just `false`.
pub fn verify(public_key: &StelaPublicKey, message: &[u8], signature: &StelaSignature) -> bool {
    public_key.verify(message, signature)
}

/// Verify using raw byte components straight off the wire.
///
/// Parses the public key and signature bytes, then verifies. Bytes that do
/// not decode to a canonical Ed25519 point count as verification failure,
/// not as a distinct error. Callers in the entry-parsing path only need a
/// yes/no answer.
pub fn verify_raw(public_key_bytes: &[u8; 32], message: &[u8], signature_bytes: &[u8; 64]) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(public_key_bytes) else {
        return false;
    };
    let signature = DalekSignature::from_bytes(signature_bytes);
    verifying_key.verify(message, &signature).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_and_verify() {
        let kp = StelaKeypair::generate();
        let msg = b"authorize batch 7";
        let sig = sign(&kp, msg);
        assert!(verify(&kp.public_key(), msg, &sig));
    }

    #[test]
    fn verify_raw_roundtrip() {
        let kp = StelaKeypair::generate();
        let msg = b"raw bytes off the wire";
        let sig = sign(&kp, msg);
        let mut sig_arr = [0u8; 64];
        sig_arr.copy_from_slice(sig.as_bytes());
        assert!(verify_raw(&kp.public_key_bytes(), msg, &sig_arr));
    }

    #[test]
    fn verify_raw_rejects_invalid_point() {
        // The all-zero encoding is a small-order point and must be rejected.
        assert!(!verify_raw(&[0u8; 32], b"msg", &[0u8; 64]));
    }

    #[test]
    fn verify_raw_rejects_wrong_message() {
        let kp = StelaKeypair::generate();
        let sig = sign(&kp, b"original");
        let mut sig_arr = [0u8; 64];
        sig_arr.copy_from_slice(sig.as_bytes());
        assert!(!verify_raw(&kp.public_key_bytes(), b"tampered", &sig_arr));
    }
}
