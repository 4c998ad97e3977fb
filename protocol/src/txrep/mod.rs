//! # Txrep — Transactions as Text
//!
//! A line-oriented, human-editable rendering of a transaction envelope. Each
//! scalar field becomes one `key: value` line whose key mirrors the XDR
//! field path:
//!
//! ```text
//! type: ENVELOPE_TYPE_TX
//! tx.sourceAccount: GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF
//! tx.fee: 100
//! tx.seqNum: 101
//! tx.cond.type: PRECOND_NONE
//! tx.memo.type: MEMO_NONE
//! tx.operations.len: 1
//! tx.operations[0].sourceAccount._present: false
//! tx.operations[0].body.type: PAYMENT
//! tx.operations[0].body.paymentOp.destination: G…
//! tx.operations[0].body.paymentOp.asset: XLM
//! tx.operations[0].body.paymentOp.amount: 100000000
//! tx.ext.v: 0
//! signatures.len: 0
//! ```
//!
//! Conventions:
//!
//! - lists emit `key.len` and then `key[i]` per element;
//! - optionals emit `key._present` and, when true, the value at `key`;
//! - unions emit their discriminant at `key.type` (`key.v` for extension
//!   points) and the active arm under its field name;
//! - opaque data is lowercase hex, strings are JSON string literals, keys
//!   and addresses are StrKeys, assets are `XLM` or `CODE:ISSUER`.
//!
//! Parsing is the exact inverse: `from_txrep(&to_txrep(&e)) == e` for every
//! valid envelope. Unknown keys are ignored, trailing text after a value is
//! a comment.
//!
//! The per-type rules live with the types: the XDR macros generate
//! [`Txrep`] for structs, unions and enums, and the `impls` module covers the
//! primitives and the types with a compact textual form.

mod document;
mod impls;

use thiserror::Error;

use crate::xdr::TransactionEnvelope;

pub use document::{index_key, join_key, TxrepDocument, TxrepWriter, MAX_KEY_DEPTH};

/// Errors from parsing the text form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxrepError {
    /// A field the type requires is absent.
    #[error("missing field `{0}`")]
    MissingField(String),

    /// A field is present but its value does not fit the type.
    #[error("invalid value for `{key}`: {reason}")]
    InvalidValue { key: String, reason: String },

    /// A non-blank line that is not `key: value`.
    #[error("line {line} is malformed: {content}")]
    MalformedLine { line: usize, content: String },

    #[error("line {line}: key nests deeper than {max} segments")]
    KeyTooDeep { line: usize, max: usize },

    #[error("key `{0}` appears more than once")]
    DuplicateKey(String),
}

impl TxrepError {
    pub(crate) fn invalid(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// A type with a text-form rendering rooted at some key.
pub trait Txrep: Sized {
    /// Appends this value's lines under `key`.
    fn to_txrep(&self, key: &str, out: &mut TxrepWriter);

    /// Reads this value back from the lines under `key`.
    fn from_txrep(key: &str, doc: &TxrepDocument) -> Result<Self, TxrepError>;
}

/// Renders an envelope as text.
pub fn to_txrep(envelope: &TransactionEnvelope) -> String {
    let mut out = TxrepWriter::new();
    envelope.to_txrep("", &mut out);
    out.finish()
}

/// Parses the text form back into an envelope.
pub fn from_txrep(text: &str) -> Result<TransactionEnvelope, TxrepError> {
    let doc = TxrepDocument::parse(text)?;
    let envelope = TransactionEnvelope::from_txrep("", &doc)?;
    tracing::trace!(keys = doc.len(), "parsed txrep document");
    Ok(envelope)
}
