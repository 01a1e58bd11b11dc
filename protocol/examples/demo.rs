//! Offline walkthrough of the entry lifecycle: create an identity, build a
//! conversion transaction, sign the batch, and re-parse the produced entry
//! the way a verifier would.
//!
//! Run with:
//!   cargo run --example demo

use stela_protocol::assets::AssetId;
use stela_protocol::crypto::StelaKeypair;
use stela_protocol::identity::StelaId;
use stela_protocol::transaction::{Batch, TransactionBuilder};

fn main() {
    // A fresh signer identity.
    let key = StelaKeypair::generate();
    let address = StelaId::from_public_key(&key.public_key()).to_address();
    println!("signer address : {}", address);

    // Convert 10000 pFCT (smallest units) into pUSD.
    let tx = TransactionBuilder::new()
        .input(&address, AssetId::PFct, 10_000)
        .conversion(AssetId::PUsd)
        .metadata("demo conversion")
        .build()
        .expect("exactly one mode was set");

    let mut batch = Batch::new();
    batch.add_transaction(tx);
    batch.add_signer(key);

    // Sign: this is what gets handed to the transport for submission.
    let entry = batch.sign().expect("batch has a transaction and a signer");
    println!("timestamp      : {}", batch.timestamp());
    println!("content        : {}", String::from_utf8_lossy(&entry.content));
    for (i, token) in entry.auth_tokens_hex().iter().enumerate() {
        println!("auth token [{}] : {}", i, token);
    }

    // Parse: the adversarial path a verifier runs on entries off the ledger.
    let parsed = Batch::from_entry(&entry).expect("freshly signed entry verifies");
    let parsed_tx = &parsed.transactions()[0];
    println!(
        "parsed         : {} {} -> {}",
        parsed_tx.input.amount,
        parsed_tx.input.asset,
        parsed_tx.conversion().expect("conversion transaction")
    );
}
