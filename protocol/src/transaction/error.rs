//! Errors raised while building and signing transactions.
//!
//! Both enums are deterministic: the same input always fails the same way,
//! so retrying without changing the input never helps. Neither ever carries
//! secret key material.

use thiserror::Error;

use crate::crypto::KeyError;
use crate::strkey::StrKeyError;
use crate::xdr::XdrError;

/// Rejected builder input. Raised before any cryptographic work.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// Operation count outside `[1, 100]`.
    #[error("a transaction needs between {min} and {max} operations, got {count}")]
    OperationCount { count: usize, min: usize, max: usize },

    #[error("memo text is {len} bytes; the limit is {max}")]
    MemoTooLong { len: usize, max: usize },

    /// `min_time > max_time` with a bounded max.
    #[error("time bounds are inverted: min {min} > max {max}")]
    InvalidTimeBounds { min: u64, max: u64 },

    #[error("ledger bounds are inverted: min {min} > max {max}")]
    InvalidLedgerBounds { min: u32, max: u32 },

    /// `timeout` and an explicit max time both set.
    #[error("a timeout cannot be combined with an explicit max time")]
    ConflictingTimeout,

    #[error("at most {max} extra signers are allowed, got {count}")]
    TooManyExtraSigners { count: usize, max: usize },

    /// Fee arithmetic did not fit the fee field.
    #[error("fee overflow: {0}")]
    FeeOverflow(String),

    #[error("sequence number {0} cannot be incremented")]
    SequenceOverflow(i64),

    /// A fee bump's base fee below the network minimum or the inner rate.
    #[error("fee bump base fee {base_fee} is below the minimum {min}")]
    FeeTooLow { base_fee: i64, min: i64 },

    #[error("invalid amount `{0}`")]
    InvalidAmount(String),

    #[error("invalid price `{0}`")]
    InvalidPrice(String),

    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    #[error("a fee bump needs a fee source account")]
    MissingFeeSource,

    #[error(transparent)]
    StrKey(#[from] StrKeyError),

    #[error(transparent)]
    Xdr(#[from] XdrError),
}

/// A signing call that cannot proceed. The envelope is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SigningError {
    /// The key pair only holds a public key.
    #[error("key pair has no secret key")]
    MissingSecretKey,

    /// The transaction is the inner view of a fee bump.
    #[error("the inner transaction of a fee bump cannot be modified")]
    InnerTransactionFrozen,

    #[error("an envelope carries at most {max} signatures")]
    TooManySignatures { max: usize },

    /// A supplied signature does not verify against the supplied key.
    #[error("signature does not verify for {0}")]
    InvalidSignature(String),

    /// The signer does not match the address an authorization entry names.
    #[error("signer {signer} does not match credential address {address}")]
    CredentialMismatch { signer: String, address: String },

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Xdr(#[from] XdrError),
}
