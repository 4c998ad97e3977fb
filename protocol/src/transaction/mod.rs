//! # Transaction Module
//!
//! Building, signing and wrapping transactions for submission.
//!
//! ## Architecture
//!
//! ```text
//! account.rs    — (account id, sequence) snapshot the builder increments
//! types.rs      — Amount (stroops) and decimal price approximation
//! memo.rs       — validated Memo constructors
//! operations.rs — one constructor per operation kind
//! builder.rs    — TransactionBuilder: validation, fee policy, preconditions
//! envelope.rs   — Transaction, FeeBumpTransaction and the Envelope sum type
//! fee_bump.rs   — FeeBumpBuilder
//! signing.rs    — signature base, hashes, signature checks
//! soroban.rs    — authorization entry signing and contract ids
//! error.rs      — BuildError and SigningError
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Build**: [`TransactionBuilder`] validates the inputs and bumps the
//!    source [`Account`]'s sequence by exactly one.
//! 2. **Sign**: [`Transaction::sign`] appends a decorated signature over the
//!    transaction hash. Any number of keys can sign; thresholds are the
//!    network's business.
//! 3. **Wrap** (optional): [`FeeBumpBuilder`] wraps a built transaction
//!    with a higher fee paid by another account, leaving the inner envelope
//!    untouched.
//! 4. **Encode**: [`Envelope::to_xdr_base64`] produces the submission
//!    payload. [`Envelope::from_xdr_base64`] is the inverse.
//!
//! ## Design Decisions
//!
//! - The network is an explicit argument everywhere it matters. Nothing here
//!   reads global state.
//! - Validation happens before any cryptographic work, and a failed signing
//!   call never leaves a half-appended signature behind.
//! - Signing is deterministic: the same network, transaction bytes and key
//!   always produce the same signature, so a signed envelope can be resent
//!   as is.

pub mod account;
pub mod builder;
pub mod envelope;
pub mod error;
pub mod fee_bump;
pub mod memo;
pub mod operations;
pub mod signing;
pub mod soroban;
pub mod types;

pub use account::Account;
pub use builder::{FeePolicy, TransactionBuilder};
pub use envelope::{Envelope, FeeBumpTransaction, Transaction};
pub use error::{BuildError, SigningError};
pub use fee_bump::FeeBumpBuilder;
pub use signing::verify_signatures;
pub use soroban::{authorize_entry, contract_id};
pub use types::Amount;
