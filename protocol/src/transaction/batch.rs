//! Batch assembly and signing.
//!
//! A [`Batch`] is signing-side state only: transactions plus the keypairs
//! that will authorize them. It is not itself a wire format; `sign()`
//! produces the [`Entry`] that goes to the ledger, and nothing in that
//! entry can reproduce the signer keys.
//!
//! The timestamp is fixed when the batch is created because it prefixes
//! every signed message. Mutating it between signers would produce an entry
//! whose signatures disagree about what they cover.

use chrono::Utc;
use thiserror::Error;
use tracing::debug;

use crate::crypto::StelaKeypair;

use super::codec::{canonical_content, Entry};
use super::signing::{reveal_datum, signing_digest};
use super::types::{Transaction, TransactionError};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Illegal-state errors on the signing path.
///
/// These are caller bugs surfaced at the API boundary, deliberately a
/// different type from the entry-parsing rejections in
/// [`super::verification::EntryError`]: an under-assembled batch is a
/// programming error, not untrusted input.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The batch has no transactions to sign.
    #[error("batch has no transactions")]
    EmptyBatch,

    /// The batch has no signers; an entry needs at least one.
    #[error("batch has no signers")]
    NoSigners,

    /// A transaction failed structural validation before signing.
    #[error("transaction {index} is not valid: {source}")]
    InvalidTransaction {
        index: usize,
        #[source]
        source: TransactionError,
    },
}

// ---------------------------------------------------------------------------
// Batch
// ---------------------------------------------------------------------------

/// An ordered set of transactions plus the keys that authorize them.
///
/// Transaction order is significant: it is part of the canonical encoding
/// and therefore of every signature. Signer order is significant too; each
/// signer's position is bound into the digest it signs.
///
/// # Examples
///
/// ```
/// use stela_protocol::assets::AssetId;
/// use stela_protocol::crypto::StelaKeypair;
/// use stela_protocol::identity::StelaId;
/// use stela_protocol::transaction::{Batch, TransactionBuilder};
///
/// let key = StelaKeypair::generate();
/// let address = StelaId::from_public_key(&key.public_key()).to_address();
///
/// let tx = TransactionBuilder::new()
///     .input(&address, AssetId::PFct, 10_000)
///     .conversion(AssetId::PUsd)
///     .build()
///     .unwrap();
///
/// let mut batch = Batch::new();
/// batch.add_transaction(tx);
/// batch.add_signer(key);
/// let entry = batch.sign().unwrap();
/// assert_eq!(entry.signer_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Batch {
    timestamp: String,
    transactions: Vec<Transaction>,
    signers: Vec<StelaKeypair>,
}

impl Batch {
    /// Create an empty batch stamped with the current Unix time in seconds.
    pub fn new() -> Self {
        Self::with_timestamp(Utc::now().timestamp().to_string())
    }

    /// Create an empty batch with an explicit timestamp string.
    ///
    /// The ledger expects decimal Unix seconds here; this constructor exists
    /// for deterministic tests and for replaying externally chosen stamps.
    pub fn with_timestamp(timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            transactions: Vec::new(),
            signers: Vec::new(),
        }
    }

    /// Used by entry parsing: a batch reconstructed from the wire has a
    /// timestamp and transactions but no signer keys.
    pub(crate) fn from_parts(timestamp: String, transactions: Vec<Transaction>) -> Self {
        Self {
            timestamp,
            transactions,
            signers: Vec::new(),
        }
    }

    /// The batch timestamp (decimal Unix seconds as a string).
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// The transactions, in the order they were added.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Number of signer keys attached.
    pub fn signer_count(&self) -> usize {
        self.signers.len()
    }

    /// Append a transaction. Order is preserved into the canonical encoding.
    pub fn add_transaction(&mut self, tx: Transaction) {
        self.transactions.push(tx);
    }

    /// Append a signer key. One (reveal, signature) pair per signer will be
    /// emitted, in this order. Every input address across the batch's
    /// transactions must be covered by some signer for the resulting entry
    /// to verify.
    pub fn add_signer(&mut self, key: StelaKeypair) {
        self.signers.push(key);
    }

    /// Sign the batch, producing the ledger entry.
    ///
    /// Runs structural validation on every transaction first, then encodes
    /// the canonical content and folds over `(position, signer)` pairs to
    /// emit one reveal datum and one 64-byte signature per signer, each
    /// signature covering the SHA-512 digest of
    /// `position || timestamp || namespace || content`.
    ///
    /// The batch is not consumed; signing the same batch twice yields
    /// byte-identical entries (Ed25519 is deterministic).
    pub fn sign(&self) -> Result<Entry, BatchError> {
        if self.transactions.is_empty() {
            return Err(BatchError::EmptyBatch);
        }
        if self.signers.is_empty() {
            return Err(BatchError::NoSigners);
        }
        for (index, tx) in self.transactions.iter().enumerate() {
            tx.validate()
                .map_err(|source| BatchError::InvalidTransaction { index, source })?;
        }

        let content = canonical_content(&self.transactions);
        let timestamp_bytes = self.timestamp.as_bytes();

        debug!(
            transactions = self.transactions.len(),
            signers = self.signers.len(),
            content_bytes = content.len(),
            "signing batch"
        );

        let slots = self.signers.iter().enumerate().flat_map(|(position, key)| {
            let digest = signing_digest(position, timestamp_bytes, &content);
            let signature = key.sign(&digest);
            [
                reveal_datum(&key.public_key()).to_vec(),
                signature.as_bytes().to_vec(),
            ]
        });

        let auth_tokens = std::iter::once(timestamp_bytes.to_vec())
            .chain(slots)
            .collect();

        Ok(Entry::new(auth_tokens, content))
    }
}

impl Default for Batch {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
