// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Stela Protocol — Client Toolkit
//!
//! Build, sign, and verify entries for the Stela pegged-asset ledger: an
//! append-only chain of opaque entries, each carrying a batch of transfer
//! and conversion instructions authorized by the spenders' Ed25519 keys.
//!
//! This crate is the client side only. It produces entries ready for
//! submission and validates entries read back off the ledger; it does not
//! talk to the network, track balances, or decide whether the ledger
//! accepted anything. Transport lives in whatever daemon client wraps this.
//!
//! ## Architecture
//!
//! - **assets** — The registry of recognized asset tickers and their
//!   grading order.
//! - **crypto** — Ed25519 keypairs, SHA-512 digests, BLAKE3. Don't roll
//!   your own.
//! - **identity** — Bech32 addresses derived from public keys.
//! - **transaction** — The core: transaction construction, canonical
//!   encoding, the multi-signer authorization protocol, and adversarial
//!   entry parsing.
//! - **config** — Protocol constants and the signing namespace.
//!
//! ## Design Philosophy
//!
//! 1. Parsing is adversarial: an entry is hostile until every check passes.
//! 2. Invalid states are unrepresentable where the type system can manage
//!    it, and rejected with a typed error where it can't.
//! 3. If it touches money, it has tests. Plural.

pub mod assets;
pub mod config;
pub mod crypto;
pub mod identity;
pub mod transaction;
