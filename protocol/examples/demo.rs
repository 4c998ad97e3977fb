//! Walkthrough of the transaction lifecycle, entirely offline.
//!
//! Derives keys, builds a multi-operation transaction, collects two
//! signatures, prints its Txrep form, wraps it in a fee bump paid by a
//! third account, and parses the submission payload back. The output uses
//! ANSI escape codes for colored terminal rendering.
//!
//! Run with:
//!   cargo run --example demo

use std::error::Error;
use std::time::Instant;

use stellar_base::config::Network;
use stellar_base::crypto::KeyPair;
use stellar_base::transaction::{operations, Account, Envelope, FeeBumpBuilder, TransactionBuilder};
use stellar_base::xdr::{Asset, Memo};

// ---------------------------------------------------------------------------
// ANSI color constants
// ---------------------------------------------------------------------------

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

fn section(num: u32, title: &str) {
    println!();
    println!("{BOLD}{CYAN}===[{YELLOW} Step {num} {CYAN}]======================================================{RESET}");
    println!("{BOLD}{WHITE}  {title}{RESET}");
}

fn success(text: &str) {
    println!("{GREEN}  [OK] {text}{RESET}");
}

fn info(label: &str, value: &str) {
    println!("{WHITE}  {BOLD}{label}:{RESET} {YELLOW}{value}{RESET}");
}

fn timing(label: &str, elapsed: std::time::Duration) {
    let ms = elapsed.as_secs_f64() * 1000.0;
    println!("{DIM}  [{label}: {ms:.2} ms]{RESET}");
}

fn main() -> Result<(), Box<dyn Error>> {
    let network = Network::testnet();

    section(1, "Keys");
    let alice = KeyPair::from_raw_seed(&[1; 32]);
    let bob = KeyPair::from_raw_seed(&[2; 32]);
    let sponsor = KeyPair::from_raw_seed(&[3; 32]);
    info("alice", &alice.account_id());
    info("bob", &bob.account_id());
    info("sponsor", &sponsor.account_id());

    section(2, "Build");
    let usd = Asset::credit("USD", &bob.account_id())?;
    let mut account = Account::new(&alice.account_id(), 4_294_967_296)?;
    let start = Instant::now();
    let mut tx = TransactionBuilder::new(&mut account, network.clone())
        .add_operation(operations::change_trust(usd.clone().into(), None)?)
        .add_operation(operations::with_source(
            operations::payment(&alice.account_id(), &usd, "250.75")?,
            &bob.account_id(),
        )?)
        .memo(Memo::text("invoice 1729")?)
        .timeout(300)
        .build()?;
    timing("build", start.elapsed());
    info("sequence", &tx.sequence_number().to_string());
    info("fee", &tx.fee().to_string());
    info("next sequence", &account.sequence_number().to_string());

    section(3, "Sign");
    tx.sign(&alice)?;
    tx.sign(&bob)?;
    info("hash", &tx.hash_hex()?);
    let candidates = [alice.to_public_only(), bob.to_public_only(), sponsor.to_public_only()];
    let verified = tx.verify_signatures(&candidates)?;
    success(&format!("{} of {} signatures verified", verified.len(), tx.signatures().len()));

    section(4, "Txrep");
    let envelope = Envelope::from(tx.clone());
    for line in envelope.to_txrep().lines() {
        println!("{DIM}  {line}{RESET}");
    }

    section(5, "Fee bump");
    let mut bump = FeeBumpBuilder::new(&tx)
        .fee_source(&sponsor.account_id())
        .base_fee(500)
        .build()?;
    bump.sign(&sponsor)?;
    info("fee", &bump.fee().to_string());
    info("hash", &bump.hash_hex()?);

    section(6, "Submit payload");
    let payload = bump.to_xdr_base64()?;
    info("base64", &payload);
    let decoded = Envelope::from_xdr_base64(&payload, network)?;
    assert_eq!(decoded.to_xdr_base64()?, payload);
    success("payload parses back to the same bytes");

    println!();
    Ok(())
}
