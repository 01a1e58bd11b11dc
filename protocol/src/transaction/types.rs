//! Core transaction types and structural validation.
//!
//! A transaction moves value from exactly one input to exactly one of two
//! destinations: a list of transfer outputs, or a conversion into another
//! registered asset. The two are mutually exclusive, and the exclusivity is
//! encoded in [`TransactionMode`] rather than checked after the fact, so a
//! transaction carrying both can never be constructed in this crate. Such a
//! shape can still arrive off the wire, where it is rejected during
//! decoding (see [`super::codec`]).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assets::AssetId;
use crate::identity::StelaId;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Structural rule violations for a single transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// The transaction has no input side.
    #[error("transaction has no input")]
    MissingInput,

    /// The input address does not parse as a Stela address.
    #[error("invalid input address: {address}")]
    InvalidInputAddress { address: String },

    /// A transfer output address does not parse as a Stela address.
    #[error("invalid transfer address: {address}")]
    InvalidTransferAddress { address: String },

    /// The transaction is in transfer mode but its transfer list is empty.
    #[error("transfer list is empty")]
    EmptyTransfers,

    /// Both transfer outputs and a conversion target were supplied.
    #[error("transfers and conversion are mutually exclusive")]
    AmbiguousMode,

    /// Neither transfer outputs nor a conversion target were supplied.
    #[error("transaction has neither transfers nor a conversion target")]
    MissingMode,
}

// ---------------------------------------------------------------------------
// Value types
// ---------------------------------------------------------------------------

/// The funding side of a transaction: who spends, which asset, how much.
///
/// `amount` is an integer in the asset's smallest unit. No floating point
/// anywhere near money.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    /// The spender's address.
    pub address: String,
    /// The asset being spent. Wire key is `type`.
    #[serde(rename = "type")]
    pub asset: AssetId,
    /// Amount in the asset's smallest unit.
    pub amount: u64,
}

impl Input {
    pub fn new(address: impl Into<String>, asset: AssetId, amount: u64) -> Self {
        Self {
            address: address.into(),
            asset,
            amount,
        }
    }
}

/// A single transfer output: receiving address and amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub address: String,
    pub amount: u64,
}

impl Transfer {
    pub fn new(address: impl Into<String>, amount: u64) -> Self {
        Self {
            address: address.into(),
            amount,
        }
    }
}

/// What the input is spent on. Exactly one of the two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionMode {
    /// Send the input asset to one or more receiving addresses.
    Transfer(Vec<Transfer>),
    /// Convert the input amount into another registered asset.
    Conversion(AssetId),
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A single transfer or conversion instruction.
///
/// Standalone value: a transaction knows nothing about the batch that will
/// carry it. Build one with [`super::TransactionBuilder`], which enforces
/// the mode exclusivity at construction time.
///
/// Addresses are plain strings until [`Transaction::validate`] runs; the
/// builder performs no address validation, so a transaction can be staged
/// before its addresses are known to be well-formed. Validation is the
/// single authoritative structural check and runs both before signing and
/// on every transaction decoded from an untrusted entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// The funding side.
    pub input: Input,
    /// Transfer outputs or conversion target.
    pub mode: TransactionMode,
    /// Optional opaque note, carried verbatim in the canonical encoding.
    pub metadata: Option<String>,
}

impl Transaction {
    /// Check every structural rule. Pure predicate; no ledger state, no
    /// balances, no rates.
    ///
    /// Rules the type system does not already enforce:
    /// - the input address must parse as a Stela address;
    /// - in transfer mode the list must be non-empty and every transfer
    ///   address must parse.
    ///
    /// Registry membership of assets and non-negativity of amounts are
    /// guaranteed by `AssetId` and `u64` respectively.
    pub fn validate(&self) -> Result<(), TransactionError> {
        if !StelaId::is_valid(&self.input.address) {
            return Err(TransactionError::InvalidInputAddress {
                address: self.input.address.clone(),
            });
        }

        match &self.mode {
            TransactionMode::Transfer(transfers) => {
                if transfers.is_empty() {
                    return Err(TransactionError::EmptyTransfers);
                }
                for transfer in transfers {
                    if !StelaId::is_valid(&transfer.address) {
                        return Err(TransactionError::InvalidTransferAddress {
                            address: transfer.address.clone(),
                        });
                    }
                }
            }
            TransactionMode::Conversion(_) => {}
        }

        Ok(())
    }

    /// Boolean convenience over [`Transaction::validate`].
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// The transfer outputs, if this is a transfer transaction.
    pub fn transfers(&self) -> Option<&[Transfer]> {
        match &self.mode {
            TransactionMode::Transfer(transfers) => Some(transfers),
            TransactionMode::Conversion(_) => None,
        }
    }

    /// The conversion target, if this is a conversion transaction.
    pub fn conversion(&self) -> Option<AssetId> {
        match &self.mode {
            TransactionMode::Transfer(_) => None,
            TransactionMode::Conversion(asset) => Some(*asset),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
