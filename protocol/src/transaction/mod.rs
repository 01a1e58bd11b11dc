//! # Transaction Module
//!
//! Construction, canonical encoding, multi-signer authorization, and
//! untrusted parsing of transaction batches.
//!
//! ## Architecture
//!
//! ```text
//! types.rs        — Input, Transfer, TransactionMode, Transaction + validation
//! builder.rs      — Fluent TransactionBuilder with mode exclusivity
//! codec.rs        — Canonical content encoding and the Entry wire type
//! signing.rs      — Position-bound SHA-512 digests and reveal datums
//! batch.rs        — Batch assembly and the signing fold
//! verification.rs — Adversarial entry parsing with typed rejections
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Build** — assemble transactions with [`TransactionBuilder`].
//! 2. **Batch** — add transactions and signer keys to a [`Batch`].
//! 3. **Sign** — [`Batch::sign`] emits the [`Entry`] for submission.
//! 4. **Parse** — [`Batch::from_entry`] validates an entry read back from
//!    the ledger, or rejects it with an [`EntryError`].
//!
//! ## Design Decisions
//!
//! - Transfer outputs and conversion targets are a tagged variant, not two
//!   optional fields. A transaction carrying both is unrepresentable in
//!   memory and rejected at the wire boundary.
//! - Each signature covers its signer's position as well as the content,
//!   so authorization tokens cannot be reordered or replayed into a
//!   different slot.
//! - The parse path assumes hostile input: strict state order, typed
//!   rejection per state, no partial results.

pub mod batch;
pub mod builder;
pub mod codec;
pub mod signing;
pub mod types;
pub mod verification;

pub use batch::{Batch, BatchError};
pub use builder::TransactionBuilder;
pub use codec::{canonical_content, Entry};
pub use signing::{reveal_datum, signing_digest};
pub use types::{Input, Transaction, TransactionError, TransactionMode, Transfer};
pub use verification::EntryError;
