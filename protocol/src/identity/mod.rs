//! # Identity Module
//!
//! Address handling for ledger participants. An identity is an Ed25519
//! keypair; its address is the Bech32 rendering of the BLAKE3 hash of the
//! public key, with the `stela` human-readable prefix.
//!
//! The address codec is the boundary the transaction layer leans on: it
//! validates address strings during structural checks and derives signer
//! addresses from the public keys carried in reveal datums.

pub mod address;

pub use address::{AddressError, StelaId};
