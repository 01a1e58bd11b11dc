//! Transaction construction via the builder pattern.
//!
//! The builder is where the mode exclusivity rule is enforced: staging both
//! transfer outputs and a conversion target is representable while building,
//! but `build()` refuses to produce a [`Transaction`] from it. Address
//! strings are accepted unchecked here; format validation is deferred to
//! [`Transaction::validate`], which runs before signing.

use crate::assets::AssetId;

use super::types::{Input, Transaction, TransactionError, TransactionMode, Transfer};

/// Fluent builder for [`Transaction`] values.
///
/// # Usage
///
/// ```
/// use stela_protocol::assets::AssetId;
/// use stela_protocol::transaction::TransactionBuilder;
///
/// let tx = TransactionBuilder::new()
///     .input("stela1...", AssetId::PFct, 10_000)
///     .conversion(AssetId::PUsd)
///     .build()
///     .unwrap();
/// assert_eq!(tx.conversion(), Some(AssetId::PUsd));
/// ```
#[derive(Debug, Default)]
pub struct TransactionBuilder {
    input: Option<Input>,
    transfers: Vec<Transfer>,
    conversion: Option<AssetId>,
    metadata: Option<String>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the funding side. Overwrites any previously set input.
    pub fn input(mut self, address: impl Into<String>, asset: AssetId, amount: u64) -> Self {
        self.input = Some(Input::new(address, asset, amount));
        self
    }

    /// Append a transfer output. Order is preserved into the canonical
    /// encoding.
    pub fn transfer(mut self, address: impl Into<String>, amount: u64) -> Self {
        self.transfers.push(Transfer::new(address, amount));
        self
    }

    /// Set the conversion target asset.
    pub fn conversion(mut self, asset: AssetId) -> Self {
        self.conversion = Some(asset);
        self
    }

    /// Attach an opaque metadata note.
    pub fn metadata(mut self, metadata: impl Into<String>) -> Self {
        self.metadata = Some(metadata.into());
        self
    }

    /// Produce the transaction, enforcing that exactly one of transfers or
    /// conversion was supplied.
    pub fn build(self) -> Result<Transaction, TransactionError> {
        let input = self.input.ok_or(TransactionError::MissingInput)?;

        let mode = match (self.transfers.is_empty(), self.conversion) {
            (false, Some(_)) => return Err(TransactionError::AmbiguousMode),
            (false, None) => TransactionMode::Transfer(self.transfers),
            (true, Some(asset)) => TransactionMode::Conversion(asset),
            (true, None) => return Err(TransactionError::MissingMode),
        };

        Ok(Transaction {
            input,
            mode,
            metadata: self.metadata,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_conversion() {
        let tx = TransactionBuilder::new()
            .input("stela1aaaa", AssetId::PFct, 10_000)
            .conversion(AssetId::PUsd)
            .build()
            .unwrap();
        assert_eq!(tx.conversion(), Some(AssetId::PUsd));
        assert_eq!(tx.input.amount, 10_000);
    }

    #[test]
    fn builds_multi_transfer_in_order() {
        let tx = TransactionBuilder::new()
            .input("stela1aaaa", AssetId::PUsd, 900)
            .transfer("stela1bbbb", 600)
            .transfer("stela1cccc", 300)
            .build()
            .unwrap();
        let transfers = tx.transfers().unwrap();
        assert_eq!(transfers.len(), 2);
        assert_eq!(transfers[0].address, "stela1bbbb");
        assert_eq!(transfers[1].address, "stela1cccc");
    }

    #[test]
    fn rejects_both_transfers_and_conversion() {
        let err = TransactionBuilder::new()
            .input("stela1aaaa", AssetId::PUsd, 100)
            .transfer("stela1bbbb", 100)
            .conversion(AssetId::PEur)
            .build()
            .unwrap_err();
        assert_eq!(err, TransactionError::AmbiguousMode);
    }

    #[test]
    fn rejects_neither_mode() {
        let err = TransactionBuilder::new()
            .input("stela1aaaa", AssetId::PUsd, 100)
            .build()
            .unwrap_err();
        assert_eq!(err, TransactionError::MissingMode);
    }

    #[test]
    fn rejects_missing_input() {
        let err = TransactionBuilder::new()
            .conversion(AssetId::PUsd)
            .build()
            .unwrap_err();
        assert_eq!(err, TransactionError::MissingInput);
    }

    #[test]
    fn metadata_is_carried() {
        let tx = TransactionBuilder::new()
            .input("stela1aaaa", AssetId::Peg, 1)
            .conversion(AssetId::PUsd)
            .metadata("invoice 42")
            .build()
            .unwrap();
        assert_eq!(tx.metadata.as_deref(), Some("invoice 42"));
    }

    #[test]
    fn input_overwrites() {
        let tx = TransactionBuilder::new()
            .input("stela1aaaa", AssetId::Peg, 1)
            .input("stela1bbbb", AssetId::PUsd, 2)
            .conversion(AssetId::PEur)
            .build()
            .unwrap();
        assert_eq!(tx.input.address, "stela1bbbb");
        assert_eq!(tx.input.asset, AssetId::PUsd);
    }
}
