//! Wire encoding of transactions and entries.
//!
//! Two jobs live here:
//!
//! 1. **Canonical content encoding.** A batch's transactions serialize to a
//!    compact JSON object `{"version":1,"transactions":[...]}` with a fixed
//!    key order per transaction (`input`, `transfers`, `conversion`,
//!    `metadata`, absent keys omitted). The encoding is deterministic
//!    byte-for-byte; signatures cover these exact bytes, so two independent
//!    encoders of the same logical batch must agree on every byte.
//! 2. **The [`Entry`] type.** The (authorization tokens, content) pair that
//!    actually lands on the ledger, produced by signing and consumed by
//!    entry parsing.
//!
//! The wire form of a transaction is flat optional keys; the in-memory form
//! is the [`TransactionMode`] variant. Conversion between the two happens
//! in the `Serialize`/`Deserialize` impls below, and a wire object carrying
//! both `transfers` and `conversion` fails the conversion rather than
//! producing an ambiguous value.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::assets::AssetId;
use crate::config::CONTENT_VERSION;

use super::types::{Input, Transaction, TransactionError, TransactionMode, Transfer};

// ---------------------------------------------------------------------------
// Transaction wire form
// ---------------------------------------------------------------------------

/// Borrowed serialization view of a transaction. Field order here is the
/// canonical key order on the wire.
#[derive(Serialize)]
struct WireTransactionRef<'a> {
    input: &'a Input,
    #[serde(skip_serializing_if = "Option::is_none")]
    transfers: Option<&'a [Transfer]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    conversion: Option<AssetId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<&'a str>,
}

/// Owned deserialization form of a transaction as it appears on the wire.
#[derive(Deserialize)]
struct WireTransaction {
    input: Input,
    #[serde(default)]
    transfers: Option<Vec<Transfer>>,
    #[serde(default)]
    conversion: Option<AssetId>,
    #[serde(default)]
    metadata: Option<String>,
}

impl Serialize for Transaction {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (transfers, conversion) = match &self.mode {
            // An empty transfer list is omitted, the same as absent.
            TransactionMode::Transfer(t) if t.is_empty() => (None, None),
            TransactionMode::Transfer(t) => (Some(t.as_slice()), None),
            TransactionMode::Conversion(asset) => (None, Some(*asset)),
        };
        WireTransactionRef {
            input: &self.input,
            transfers,
            conversion,
            metadata: self.metadata.as_deref(),
        }
        .serialize(serializer)
    }
}

impl TryFrom<WireTransaction> for Transaction {
    type Error = TransactionError;

    fn try_from(wire: WireTransaction) -> Result<Self, Self::Error> {
        let mode = match (wire.transfers, wire.conversion) {
            // Mutually exclusive even when the transfer list is empty: a
            // present `transfers` key claims transfer mode.
            (Some(_), Some(_)) => return Err(TransactionError::AmbiguousMode),
            (Some(transfers), None) => TransactionMode::Transfer(transfers),
            (None, Some(asset)) => TransactionMode::Conversion(asset),
            (None, None) => return Err(TransactionError::MissingMode),
        };
        Ok(Transaction {
            input: wire.input,
            mode,
            metadata: wire.metadata,
        })
    }
}

impl<'de> Deserialize<'de> for Transaction {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireTransaction::deserialize(deserializer)?;
        Transaction::try_from(wire).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Canonical content
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ContentPayload<'a> {
    version: u32,
    transactions: &'a [Transaction],
}

/// Encode a transaction list into the canonical content bytes every
/// signature covers.
///
/// Compact JSON, struct-ordered keys, integer-only numbers; transaction
/// order is preserved and significant.
pub fn canonical_content(transactions: &[Transaction]) -> Vec<u8> {
    serde_json::to_vec(&ContentPayload {
        version: CONTENT_VERSION,
        transactions,
    })
    .expect("canonical content serialization cannot fail")
}

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

/// A serialized ledger entry: the ordered authorization tokens plus the
/// canonical content bytes.
///
/// Token layout for `N` signers (`N >= 1`):
///
/// ```text
/// [0]        timestamp bytes (UTF-8 decimal seconds)
/// [2k + 1]   reveal datum for signer k: 0x01 || public key   (33 bytes)
/// [2k + 2]   signature for signer k                          (64 bytes)
/// ```
///
/// An `Entry` never contains private key material.
#[derive(Clone, PartialEq, Eq)]
pub struct Entry {
    /// Authorization tokens, `1 + 2N` of them.
    pub auth_tokens: Vec<Vec<u8>>,
    /// Canonical content bytes.
    pub content: Vec<u8>,
}

impl Entry {
    pub fn new(auth_tokens: Vec<Vec<u8>>, content: Vec<u8>) -> Self {
        Self {
            auth_tokens,
            content,
        }
    }

    /// Number of (reveal, signature) pairs carried by this entry.
    pub fn signer_count(&self) -> usize {
        self.auth_tokens.len().saturating_sub(1) / 2
    }

    /// Hex rendering of every authorization token, for display and logging.
    pub fn auth_tokens_hex(&self) -> Vec<String> {
        self.auth_tokens.iter().map(hex::encode).collect()
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("auth_tokens", &self.auth_tokens_hex())
            .field("content", &String::from_utf8_lossy(&self.content))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::TransactionBuilder;

    fn conversion_tx() -> Transaction {
        TransactionBuilder::new()
            .input("stela1aaaa", AssetId::PFct, 10_000)
            .conversion(AssetId::PUsd)
            .build()
            .unwrap()
    }

    #[test]
    fn canonical_bytes_exact() {
        let content = canonical_content(&[conversion_tx()]);
        assert_eq!(
            String::from_utf8(content).unwrap(),
            r#"{"version":1,"transactions":[{"input":{"address":"stela1aaaa","type":"pFCT","amount":10000},"conversion":"pUSD"}]}"#
        );
    }

    #[test]
    fn transfer_keys_in_canonical_order() {
        let tx = TransactionBuilder::new()
            .input("stela1aaaa", AssetId::PUsd, 900)
            .transfer("stela1bbbb", 900)
            .metadata("note")
            .build()
            .unwrap();
        let json = serde_json::to_string(&tx).unwrap();
        assert_eq!(
            json,
            r#"{"input":{"address":"stela1aaaa","type":"pUSD","amount":900},"transfers":[{"address":"stela1bbbb","amount":900}],"metadata":"note"}"#
        );
    }

    #[test]
    fn absent_keys_are_omitted() {
        let json = serde_json::to_string(&conversion_tx()).unwrap();
        assert!(!json.contains("transfers"));
        assert!(!json.contains("metadata"));
    }

    #[test]
    fn encoding_is_deterministic() {
        let txs = vec![conversion_tx(), conversion_tx()];
        assert_eq!(canonical_content(&txs), canonical_content(&txs.clone()));
    }

    #[test]
    fn serde_roundtrip() {
        let tx = TransactionBuilder::new()
            .input("stela1aaaa", AssetId::PUsd, 900)
            .transfer("stela1bbbb", 600)
            .transfer("stela1cccc", 300)
            .metadata("note")
            .build()
            .unwrap();
        let json = serde_json::to_string(&tx).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(tx, back);
    }

    #[test]
    fn decode_rejects_both_modes() {
        let json = r#"{"input":{"address":"stela1aaaa","type":"pUSD","amount":1},
                       "transfers":[{"address":"stela1bbbb","amount":1}],
                       "conversion":"pEUR"}"#;
        assert!(serde_json::from_str::<Transaction>(json).is_err());
    }

    #[test]
    fn decode_rejects_empty_transfers_with_conversion() {
        let json = r#"{"input":{"address":"stela1aaaa","type":"pUSD","amount":1},
                       "transfers":[],"conversion":"pEUR"}"#;
        assert!(serde_json::from_str::<Transaction>(json).is_err());
    }

    #[test]
    fn decode_rejects_missing_mode() {
        let json = r#"{"input":{"address":"stela1aaaa","type":"pUSD","amount":1}}"#;
        assert!(serde_json::from_str::<Transaction>(json).is_err());
    }

    #[test]
    fn decode_rejects_unregistered_asset() {
        let json = r#"{"input":{"address":"stela1aaaa","type":"pDOGE","amount":1},
                       "conversion":"pUSD"}"#;
        assert!(serde_json::from_str::<Transaction>(json).is_err());
    }

    #[test]
    fn decode_rejects_negative_amount() {
        let json = r#"{"input":{"address":"stela1aaaa","type":"pUSD","amount":-5},
                       "conversion":"pEUR"}"#;
        assert!(serde_json::from_str::<Transaction>(json).is_err());
    }

    #[test]
    fn null_transfers_reads_as_absent() {
        let json = r#"{"input":{"address":"stela1aaaa","type":"pUSD","amount":1},
                       "transfers":null,"conversion":"pEUR"}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.conversion(), Some(AssetId::PEur));
    }

    #[test]
    fn entry_signer_count() {
        let entry = Entry::new(vec![vec![0]; 5], vec![]);
        assert_eq!(entry.signer_count(), 2);
        let empty = Entry::new(vec![], vec![]);
        assert_eq!(empty.signer_count(), 0);
    }
}
