//! Untrusted entry parsing and validation.
//!
//! [`Batch::from_entry`] is the inverse of [`Batch::sign`], run against
//! input that must be assumed hostile: an entry read back off the ledger
//! was produced by an arbitrary party. The checks run in a strict order,
//! cheapest first, and the first failure terminates with a typed rejection.
//! There is no partial output; the caller gets a fully validated batch or
//! an [`EntryError`] naming exactly what was wrong.
//!
//! Check order:
//!
//! 1. token count is `1 + 2N`, `N >= 1`
//! 2. the timestamp token decodes as UTF-8
//! 3. every reveal datum is 33 tagged bytes, every signature 64 bytes
//! 4. the content parses as JSON with a `transactions` array
//! 5. every transaction decodes, validates, and has a signer for its input
//! 6. every signature verifies against its position-bound digest
//!
//! Signature verification runs last on purpose: it is the most expensive
//! check, and an entry that is going to be rejected for a malformed slot or
//! an unsigned input should not cost N curve operations first.

use std::collections::HashSet;

use thiserror::Error;
use tracing::debug;

use crate::config::{PUBLIC_KEY_LENGTH, REVEAL_DATUM_LENGTH, REVEAL_TAG, SIGNATURE_LENGTH};
use crate::crypto::verify_raw;
use crate::identity::StelaId;

use super::batch::Batch;
use super::codec::Entry;
use super::signing::signing_digest;
use super::types::Transaction;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why an entry was rejected.
///
/// Terminal, non-retryable outcomes. Each variant maps to one validation
/// state so callers and tests can distinguish an under-signed entry from a
/// tampered one without string-matching messages.
#[derive(Debug, Error)]
pub enum EntryError {
    /// The token list does not have the `1 + 2N` shape, or the timestamp
    /// token is not valid UTF-8.
    #[error("malformed envelope: {reason}")]
    MalformedEnvelope { reason: String },

    /// A reveal datum or signature token has the wrong length or tag.
    #[error("malformed signature slot at position {position}: {reason}")]
    MalformedSignatureSlot { position: usize, reason: String },

    /// The content bytes are not decodable, or the top level lacks a
    /// `transactions` array.
    #[error("malformed content: {reason}")]
    MalformedContent { reason: String },

    /// A transaction in the content failed to decode or violated a
    /// structural rule.
    #[error("invalid transaction at index {index}: {reason}")]
    InvalidTransaction { index: usize, reason: String },

    /// A transaction's input address has no corresponding reveal datum:
    /// the entry claims a spend by someone who did not sign.
    #[error("missing signature for input address {address} (transaction {index})")]
    MissingSignature { index: usize, address: String },

    /// A signature did not verify against its slot's public key and
    /// position-bound digest.
    #[error("signature verification failed at position {position}")]
    SignatureVerificationFailed { position: usize },
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// A signer slot lifted off the wire: raw key bytes and signature, kept in
/// slot order until the final verification pass.
struct ObservedSigner {
    key_bytes: [u8; PUBLIC_KEY_LENGTH],
    signature: [u8; SIGNATURE_LENGTH],
}

impl Batch {
    /// Parse and fully validate a serialized ledger entry.
    ///
    /// On success the returned batch carries the entry's timestamp and its
    /// validated transactions, in order. It carries no signer keys; private
    /// key material is not recoverable from an entry.
    ///
    /// # Errors
    ///
    /// Returns the first failing check as an [`EntryError`]; see the module
    /// docs for the check order.
    pub fn from_entry(entry: &Entry) -> Result<Batch, EntryError> {
        let tokens = &entry.auth_tokens;

        debug!(
            tokens = tokens.len(),
            content_bytes = entry.content.len(),
            "parsing ledger entry"
        );

        // 1. Shape: one timestamp token plus at least one (reveal,
        //    signature) pair.
        if tokens.len() < 3 || tokens.len() % 2 == 0 {
            return Err(EntryError::MalformedEnvelope {
                reason: format!(
                    "expected 1 + 2N authorization tokens with N >= 1, got {}",
                    tokens.len()
                ),
            });
        }

        // 2. Timestamp. Digests are computed over the raw bytes, but the
        //    batch timestamp is a string, so the token must decode.
        let timestamp_bytes = tokens[0].as_slice();
        let timestamp =
            std::str::from_utf8(timestamp_bytes).map_err(|_| EntryError::MalformedEnvelope {
                reason: "timestamp token is not valid UTF-8".to_string(),
            })?;

        // 3. Signer slots: fixed lengths, type-1 tag, addresses derived
        //    from the revealed keys.
        let mut observed = Vec::with_capacity(tokens.len() / 2);
        let mut signer_addresses: HashSet<String> = HashSet::new();
        for (position, pair) in tokens[1..].chunks_exact(2).enumerate() {
            let reveal = pair[0].as_slice();
            let signature = pair[1].as_slice();

            if reveal.len() != REVEAL_DATUM_LENGTH {
                return Err(EntryError::MalformedSignatureSlot {
                    position,
                    reason: format!(
                        "reveal datum must be {} bytes, got {}",
                        REVEAL_DATUM_LENGTH,
                        reveal.len()
                    ),
                });
            }
            if reveal[0] != REVEAL_TAG {
                return Err(EntryError::MalformedSignatureSlot {
                    position,
                    reason: format!("unsupported reveal scheme tag 0x{:02x}", reveal[0]),
                });
            }
            if signature.len() != SIGNATURE_LENGTH {
                return Err(EntryError::MalformedSignatureSlot {
                    position,
                    reason: format!(
                        "signature must be {} bytes, got {}",
                        SIGNATURE_LENGTH,
                        signature.len()
                    ),
                });
            }

            let mut key_bytes = [0u8; PUBLIC_KEY_LENGTH];
            key_bytes.copy_from_slice(&reveal[1..]);
            let mut sig_bytes = [0u8; SIGNATURE_LENGTH];
            sig_bytes.copy_from_slice(signature);

            signer_addresses.insert(StelaId::from_key_bytes(&key_bytes).to_address());
            observed.push(ObservedSigner {
                key_bytes,
                signature: sig_bytes,
            });
        }

        // 4. Content must be JSON carrying a `transactions` array.
        let payload: serde_json::Value = serde_json::from_slice(&entry.content)
            .map_err(|e| EntryError::MalformedContent {
                reason: e.to_string(),
            })?;
        let raw_transactions = payload
            .get("transactions")
            .and_then(serde_json::Value::as_array)
            .ok_or_else(|| EntryError::MalformedContent {
                reason: "missing top-level transactions array".to_string(),
            })?;

        // 5. Every transaction must decode, pass structural validation, and
        //    have its spender among the revealed signers.
        let mut transactions = Vec::with_capacity(raw_transactions.len());
        for (index, raw) in raw_transactions.iter().enumerate() {
            let tx: Transaction = serde_json::from_value(raw.clone()).map_err(|e| {
                EntryError::InvalidTransaction {
                    index,
                    reason: e.to_string(),
                }
            })?;
            tx.validate().map_err(|e| EntryError::InvalidTransaction {
                index,
                reason: e.to_string(),
            })?;
            if !signer_addresses.contains(&tx.input.address) {
                return Err(EntryError::MissingSignature {
                    index,
                    address: tx.input.address.clone(),
                });
            }
            transactions.push(tx);
        }

        // 6. Every signature must verify against its own slot's key and the
        //    digest bound to its position. Non-canonical key bytes fail
        //    here, the same as a wrong signature.
        for (position, signer) in observed.iter().enumerate() {
            let digest = signing_digest(position, timestamp_bytes, &entry.content);
            if !verify_raw(&signer.key_bytes, &digest, &signer.signature) {
                return Err(EntryError::SignatureVerificationFailed { position });
            }
        }

        // 7. Accept.
        Ok(Batch::from_parts(timestamp.to_string(), transactions))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetId;
    use crate::crypto::StelaKeypair;
    use crate::transaction::TransactionBuilder;

    fn signed_entry() -> (Batch, Entry) {
        let key = StelaKeypair::generate();
        let address = StelaId::from_public_key(&key.public_key()).to_address();
        let tx = TransactionBuilder::new()
            .input(&address, AssetId::PFct, 10_000)
            .conversion(AssetId::PUsd)
            .build()
            .unwrap();
        let mut batch = Batch::with_timestamp("1000");
        batch.add_transaction(tx);
        batch.add_signer(key);
        let entry = batch.sign().unwrap();
        (batch, entry)
    }

    #[test]
    fn roundtrip_preserves_timestamp_and_transactions() {
        let (batch, entry) = signed_entry();
        let parsed = Batch::from_entry(&entry).unwrap();
        assert_eq!(parsed.timestamp(), batch.timestamp());
        assert_eq!(parsed.transactions(), batch.transactions());
        assert_eq!(parsed.signer_count(), 0);
    }

    #[test]
    fn rejects_too_few_tokens() {
        let (_, mut entry) = signed_entry();
        entry.auth_tokens.truncate(2);
        assert!(matches!(
            Batch::from_entry(&entry),
            Err(EntryError::MalformedEnvelope { .. })
        ));
    }

    #[test]
    fn rejects_even_token_count() {
        let (_, mut entry) = signed_entry();
        entry.auth_tokens.push(vec![0u8; 33]);
        assert!(matches!(
            Batch::from_entry(&entry),
            Err(EntryError::MalformedEnvelope { .. })
        ));
    }

    #[test]
    fn rejects_non_utf8_timestamp() {
        let (_, mut entry) = signed_entry();
        entry.auth_tokens[0] = vec![0xFF, 0xFE];
        assert!(matches!(
            Batch::from_entry(&entry),
            Err(EntryError::MalformedEnvelope { .. })
        ));
    }

    #[test]
    fn rejects_short_reveal_datum() {
        let (_, mut entry) = signed_entry();
        entry.auth_tokens[1].pop();
        assert!(matches!(
            Batch::from_entry(&entry),
            Err(EntryError::MalformedSignatureSlot { position: 0, .. })
        ));
    }

    #[test]
    fn rejects_wrong_reveal_tag() {
        let (_, mut entry) = signed_entry();
        entry.auth_tokens[1][0] = 0x02;
        assert!(matches!(
            Batch::from_entry(&entry),
            Err(EntryError::MalformedSignatureSlot { position: 0, .. })
        ));
    }

    #[test]
    fn rejects_short_signature() {
        let (_, mut entry) = signed_entry();
        entry.auth_tokens[2].truncate(63);
        assert!(matches!(
            Batch::from_entry(&entry),
            Err(EntryError::MalformedSignatureSlot { position: 0, .. })
        ));
    }

    #[test]
    fn rejects_garbage_content() {
        let (_, mut entry) = signed_entry();
        entry.content = b"not json at all".to_vec();
        assert!(matches!(
            Batch::from_entry(&entry),
            Err(EntryError::MalformedContent { .. })
        ));
    }

    #[test]
    fn rejects_content_without_transactions_array() {
        let (_, mut entry) = signed_entry();
        entry.content = br#"{"version":1}"#.to_vec();
        assert!(matches!(
            Batch::from_entry(&entry),
            Err(EntryError::MalformedContent { .. })
        ));

        entry.content = br#"{"version":1,"transactions":"nope"}"#.to_vec();
        assert!(matches!(
            Batch::from_entry(&entry),
            Err(EntryError::MalformedContent { .. })
        ));
    }

    #[test]
    fn rejects_tampered_content() {
        let (_, mut entry) = signed_entry();
        // Flip one bit inside the content. The transaction list still
        // decodes (10000 becomes a different digit string or the tamper
        // lands in an address), but every digest changes.
        let idx = entry.content.len() / 2;
        entry.content[idx] ^= 0x01;
        assert!(Batch::from_entry(&entry).is_err());
    }

    #[test]
    fn rejects_swapped_signer_slots() {
        // Two individually valid (reveal, signature) pairs, swapped. Each
        // signature is genuine for its original position, so this must die
        // in step 6, not earlier.
        let key_a = StelaKeypair::generate();
        let key_b = StelaKeypair::generate();
        let addr_a = StelaId::from_public_key(&key_a.public_key()).to_address();
        let addr_b = StelaId::from_public_key(&key_b.public_key()).to_address();

        let mut batch = Batch::with_timestamp("1000");
        batch.add_transaction(
            TransactionBuilder::new()
                .input(&addr_a, AssetId::PUsd, 5)
                .conversion(AssetId::PEur)
                .build()
                .unwrap(),
        );
        batch.add_transaction(
            TransactionBuilder::new()
                .input(&addr_b, AssetId::PUsd, 5)
                .conversion(AssetId::PEur)
                .build()
                .unwrap(),
        );
        batch.add_signer(key_a);
        batch.add_signer(key_b);

        let mut entry = batch.sign().unwrap();
        entry.auth_tokens.swap(1, 3);
        entry.auth_tokens.swap(2, 4);

        assert!(matches!(
            Batch::from_entry(&entry),
            Err(EntryError::SignatureVerificationFailed { position: 0 })
        ));
    }

    #[test]
    fn rejects_unsigned_spender() {
        // The entry's only signer is not the transaction's input address.
        let signer = StelaKeypair::generate();
        let stranger = StelaKeypair::generate();
        let stranger_addr = StelaId::from_public_key(&stranger.public_key()).to_address();

        let mut batch = Batch::with_timestamp("1000");
        batch.add_transaction(
            TransactionBuilder::new()
                .input(&stranger_addr, AssetId::PUsd, 5)
                .conversion(AssetId::PEur)
                .build()
                .unwrap(),
        );
        batch.add_signer(signer);

        let entry = batch.sign().unwrap();
        assert!(matches!(
            Batch::from_entry(&entry),
            Err(EntryError::MissingSignature { index: 0, .. })
        ));
    }
}
