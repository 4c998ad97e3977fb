// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Stellar Base — Core Library
//!
//! Everything a client needs to produce a transaction the Stellar network
//! will accept, and nothing that needs a network connection: the XDR wire
//! format, the typed protocol model on top of it, StrKey addresses, the
//! transaction builder, signing and the Txrep text form.
//!
//! ## Architecture
//!
//! - **xdr**: the byte codec (RFC 4506, strict decoding with depth and size
//!   limits) and the protocol types: keys, assets, operations, transactions,
//!   envelopes, ledger entries, results and Soroban values.
//! - **strkey**: checksummed base32 addresses (`G…`, `S…`, `M…`, `C…`, ...).
//! - **crypto**: Ed25519 key pairs, signature hints and SHA-256.
//! - **transaction**: builder, fee bumps, signing, Soroban authorization.
//! - **txrep**: the line-oriented `key: value` rendering of envelopes.
//! - **config**: network passphrases and protocol limits.
//!
//! ## Quick start
//!
//! ```
//! use stellar_base::config::Network;
//! use stellar_base::crypto::KeyPair;
//! use stellar_base::transaction::{operations, Account, Envelope, TransactionBuilder};
//! use stellar_base::xdr::Asset;
//!
//! let source = KeyPair::random();
//! let mut account = Account::new(&source.account_id(), 100).unwrap();
//!
//! let mut tx = TransactionBuilder::new(&mut account, Network::testnet())
//!     .add_operation(operations::payment(&source.account_id(), &Asset::native(), "10").unwrap())
//!     .build()
//!     .unwrap();
//! tx.sign(&source).unwrap();
//!
//! let submission = Envelope::from(tx).to_xdr_base64().unwrap();
//! assert!(!submission.is_empty());
//! ```
//!
//! ## Design Philosophy
//!
//! 1. Decoding is strict. Anything a validator would reject, we reject.
//! 2. No global state. The network is always an explicit argument.
//! 3. Validation happens before signing, and signing never half-applies.
//! 4. Every public type round-trips through XDR and Txrep unchanged.

pub mod config;
pub mod crypto;
pub mod strkey;
pub mod transaction;
pub mod txrep;
pub mod xdr;
