//! Errors raised by the XDR codec and the type model built on it.

use thiserror::Error;

use crate::strkey::StrKeyError;

/// Everything that can go wrong while encoding or decoding XDR.
///
/// Decoding is strict: every variant here is a hard failure. There is no
/// "lenient" mode, because a node on the other end of the wire will not be
/// lenient either.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XdrError {
    /// The input ended before a value was complete.
    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    /// Alignment padding after opaque data or a string was not all zeroes.
    #[error("non-zero padding byte at offset {offset}")]
    NonZeroPadding { offset: usize },

    /// A boolean was encoded as something other than 0 or 1.
    #[error("invalid boolean value {0}")]
    InvalidBool(u32),

    /// A union or enum discriminant outside the set this type accepts.
    #[error("unknown discriminant {value} for {type_name}")]
    UnknownDiscriminant {
        type_name: &'static str,
        value: i32,
    },

    /// A length prefix (or a value being encoded) exceeds the type's bound.
    #[error("length {len} exceeds maximum {max}")]
    LengthExceedsMax { len: usize, max: usize },

    /// A length prefix claims more data than the buffer holds.
    #[error("declared length {len} exceeds remaining input ({remaining} bytes)")]
    LengthExceedsBuffer { len: usize, remaining: usize },

    /// A string field did not hold valid UTF-8.
    #[error("string is not valid UTF-8")]
    InvalidUtf8,

    /// A top-level decode finished with bytes left over.
    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),

    /// Top-level input whose length is not a multiple of four.
    #[error("input length {0} is not a multiple of 4")]
    Misaligned(usize),

    /// Nested values went deeper than the configured limit.
    #[error("nesting depth limit of {0} exceeded")]
    DepthLimitExceeded(u32),

    /// Input larger than the configured size limit.
    #[error("input of {len} bytes exceeds the {max} byte limit")]
    InputTooLarge { len: usize, max: usize },

    /// The base64 wrapper around the XDR bytes was malformed.
    #[error("invalid base64: {0}")]
    Base64(String),

    /// A value that is structurally encodable but semantically invalid,
    /// e.g. an asset code with characters outside `[A-Za-z0-9]`.
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// A key string embedded in a value failed StrKey decoding.
    #[error(transparent)]
    StrKey(#[from] StrKeyError),
}
