//! # XDR Byte Codec
//!
//! Primitive readers and writers for RFC 4506 External Data Representation.
//!
//! The rules are short and unforgiving:
//!
//! - Every integer is big-endian. 32-bit values occupy 4 bytes, hypers 8.
//! - Booleans are 32-bit integers that must be exactly 0 or 1.
//! - Opaque data and strings are padded with zero bytes to a multiple of 4.
//!   Variable-length forms are preceded by a `uint32` length.
//! - Optionals are a boolean flag followed by the value when present.
//! - Fixed arrays have no prefix; variable arrays carry a `uint32` count.
//!
//! This layer knows nothing about Stellar. Types in the sibling modules
//! describe themselves through the [`XdrCodec`] trait and call down into
//! [`XdrWriter`] / [`XdrReader`].
//!
//! ## Strictness
//!
//! Padding bytes are checked, declared lengths are checked against both the
//! type's bound and the bytes actually remaining, nesting depth is bounded,
//! and a top-level decode must consume its input exactly. Anything else is an
//! [`XdrError`].

use base64::{engine::general_purpose::STANDARD, Engine as _};

use super::error::XdrError;
use crate::config::{DEFAULT_XDR_DEPTH_LIMIT, DEFAULT_XDR_LEN_LIMIT};

/// Number of zero bytes needed to pad `len` up to a 4-byte boundary.
#[inline]
pub fn padding_len(len: usize) -> usize {
    (4 - len % 4) % 4
}

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Decoding limits, passed explicitly into every top-level decode.
///
/// `depth` bounds how many composite values may nest inside each other
/// (the contract value tree is recursive, and so are claim predicates and
/// authorization invocations). `len` bounds the total input size.
///
/// The default depth is [`DEFAULT_XDR_DEPTH_LIMIT`], which keeps recursive
/// decoding inside a spawned thread's default stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XdrLimits {
    /// Maximum nesting depth of composite values.
    pub depth: u32,
    /// Maximum accepted input length in bytes.
    pub len: usize,
}

impl XdrLimits {
    /// Limits with no practical bound. Only use on trusted input.
    pub fn none() -> Self {
        Self {
            depth: u32::MAX,
            len: usize::MAX,
        }
    }
}

impl Default for XdrLimits {
    fn default() -> Self {
        Self {
            depth: DEFAULT_XDR_DEPTH_LIMIT,
            len: DEFAULT_XDR_LEN_LIMIT,
        }
    }
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// Growable big-endian output buffer.
#[derive(Debug, Default, Clone)]
pub struct XdrWriter {
    buf: Vec<u8>,
}

impl XdrWriter {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_bool(&mut self, value: bool) {
        self.write_u32(u32::from(value));
    }

    /// Fixed-length opaque data: the bytes themselves plus zero padding.
    pub fn write_fixed_opaque(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
        self.write_padding(bytes.len());
    }

    /// Variable-length opaque data: `uint32` length, bytes, zero padding.
    pub fn write_var_opaque(&mut self, bytes: &[u8], max: usize) -> Result<(), XdrError> {
        self.write_length(bytes.len(), max)?;
        self.write_fixed_opaque(bytes);
        Ok(())
    }

    /// Strings are variable-length opaque data over their UTF-8 bytes.
    pub fn write_string(&mut self, value: &str, max: usize) -> Result<(), XdrError> {
        self.write_var_opaque(value.as_bytes(), max)
    }

    /// Optional value: presence flag, then the value if present.
    pub fn write_optional<T: XdrCodec>(&mut self, value: Option<&T>) -> Result<(), XdrError> {
        match value {
            Some(inner) => {
                self.write_bool(true);
                inner.encode(self)
            }
            None => {
                self.write_bool(false);
                Ok(())
            }
        }
    }

    /// Fixed-length array: the elements back to back, no count.
    pub fn write_array<T: XdrCodec>(&mut self, values: &[T]) -> Result<(), XdrError> {
        for value in values {
            value.encode(self)?;
        }
        Ok(())
    }

    /// Variable-length array: `uint32` count, then the elements.
    pub fn write_list<T: XdrCodec>(&mut self, values: &[T], max: usize) -> Result<(), XdrError> {
        self.write_length(values.len(), max)?;
        self.write_array(values)
    }

    fn write_length(&mut self, len: usize, max: usize) -> Result<(), XdrError> {
        if len > max {
            return Err(XdrError::LengthExceedsMax { len, max });
        }
        let len32 = u32::try_from(len).map_err(|_| XdrError::LengthExceedsMax {
            len,
            max: u32::MAX as usize,
        })?;
        self.write_u32(len32);
        Ok(())
    }

    fn write_padding(&mut self, len: usize) {
        let pad = padding_len(len);
        self.buf.extend_from_slice(&[0u8; 3][..pad]);
    }
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// Cursor over an XDR byte slice.
///
/// A reader is owned by exactly one decode call. It tracks nesting depth so
/// recursive types can't blow the stack on hostile input.
#[derive(Debug)]
pub struct XdrReader<'a> {
    input: &'a [u8],
    pos: usize,
    depth: u32,
    limits: XdrLimits,
}

impl<'a> XdrReader<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_limits(input, XdrLimits::default())
    }

    pub fn with_limits(input: &'a [u8], limits: XdrLimits) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
            limits,
        }
    }

    /// Current offset from the start of the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Fails unless every input byte has been consumed.
    pub fn finish(&self) -> Result<(), XdrError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(XdrError::TrailingBytes(n)),
        }
    }

    /// Marks entry into a composite value. Pair with [`leave`](Self::leave).
    pub fn enter(&mut self) -> Result<(), XdrError> {
        if self.depth >= self.limits.depth {
            return Err(XdrError::DepthLimitExceeded(self.limits.depth));
        }
        self.depth += 1;
        Ok(())
    }

    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], XdrError> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(XdrError::UnexpectedEof {
                needed: n,
                remaining,
            });
        }
        let slice = &self.input[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], XdrError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn read_u32(&mut self) -> Result<u32, XdrError> {
        Ok(u32::from_be_bytes(self.take_array()?))
    }

    pub fn read_i32(&mut self) -> Result<i32, XdrError> {
        Ok(i32::from_be_bytes(self.take_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64, XdrError> {
        Ok(u64::from_be_bytes(self.take_array()?))
    }

    pub fn read_i64(&mut self) -> Result<i64, XdrError> {
        Ok(i64::from_be_bytes(self.take_array()?))
    }

    pub fn read_bool(&mut self) -> Result<bool, XdrError> {
        match self.read_u32()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(XdrError::InvalidBool(other)),
        }
    }

    /// Fixed-length opaque data of exactly `N` bytes, padding checked.
    pub fn read_fixed_opaque<const N: usize>(&mut self) -> Result<[u8; N], XdrError> {
        let bytes = self.take_array::<N>()?;
        self.read_padding(N)?;
        Ok(bytes)
    }

    /// Variable-length opaque data no longer than `max`.
    pub fn read_var_opaque(&mut self, max: usize) -> Result<Vec<u8>, XdrError> {
        let len = self.read_length(max, 1)?;
        let bytes = self.take(len)?.to_vec();
        self.read_padding(len)?;
        Ok(bytes)
    }

    /// UTF-8 string no longer than `max` bytes.
    pub fn read_string(&mut self, max: usize) -> Result<String, XdrError> {
        let bytes = self.read_var_opaque(max)?;
        String::from_utf8(bytes).map_err(|_| XdrError::InvalidUtf8)
    }

    pub fn read_optional<T: XdrCodec>(&mut self) -> Result<Option<T>, XdrError> {
        if self.read_bool()? {
            Ok(Some(T::decode(self)?))
        } else {
            Ok(None)
        }
    }

    pub fn read_array<T: XdrCodec>(&mut self, count: usize) -> Result<Vec<T>, XdrError> {
        let mut values = Vec::with_capacity(count.min(self.remaining() / 4));
        for _ in 0..count {
            values.push(T::decode(self)?);
        }
        Ok(values)
    }

    /// Variable-length array no longer than `max` elements.
    pub fn read_list<T: XdrCodec>(&mut self, max: usize) -> Result<Vec<T>, XdrError> {
        // Every XDR value occupies at least four bytes, so a count larger than
        // remaining / 4 cannot possibly be satisfied.
        let count = self.read_length(max, 4)?;
        self.read_array(count)
    }

    fn read_length(&mut self, max: usize, min_element_size: usize) -> Result<usize, XdrError> {
        let len = self.read_u32()? as usize;
        if len > max {
            return Err(XdrError::LengthExceedsMax { len, max });
        }
        let remaining = self.remaining();
        if len.saturating_mul(min_element_size) > remaining {
            return Err(XdrError::LengthExceedsBuffer { len, remaining });
        }
        Ok(len)
    }

    fn read_padding(&mut self, len: usize) -> Result<(), XdrError> {
        let pad = padding_len(len);
        let offset = self.pos;
        let bytes = self.take(pad)?;
        if let Some(i) = bytes.iter().position(|b| *b != 0) {
            return Err(XdrError::NonZeroPadding { offset: offset + i });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// XdrCodec
// ---------------------------------------------------------------------------

/// A type with a canonical XDR encoding.
///
/// Implementations only need [`encode`](Self::encode) and
/// [`decode`](Self::decode); the byte-vector and base64 helpers are provided.
pub trait XdrCodec: Sized {
    fn encode(&self, w: &mut XdrWriter) -> Result<(), XdrError>;

    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError>;

    /// Encodes into a fresh byte vector.
    fn to_xdr(&self) -> Result<Vec<u8>, XdrError> {
        let mut w = XdrWriter::new();
        self.encode(&mut w)?;
        Ok(w.into_bytes())
    }

    /// Decodes a complete value with the default [`XdrLimits`].
    fn from_xdr(bytes: &[u8]) -> Result<Self, XdrError> {
        Self::from_xdr_with_limits(bytes, XdrLimits::default())
    }

    /// Decodes a complete value: the input must be 4-byte aligned, within
    /// `limits.len`, and fully consumed.
    fn from_xdr_with_limits(bytes: &[u8], limits: XdrLimits) -> Result<Self, XdrError> {
        if bytes.len() > limits.len {
            return Err(XdrError::InputTooLarge {
                len: bytes.len(),
                max: limits.len,
            });
        }
        if bytes.len() % 4 != 0 {
            return Err(XdrError::Misaligned(bytes.len()));
        }
        let mut r = XdrReader::with_limits(bytes, limits);
        let value = Self::decode(&mut r)?;
        r.finish()?;
        Ok(value)
    }

    /// Standard padded base64 of the XDR encoding.
    fn to_xdr_base64(&self) -> Result<String, XdrError> {
        Ok(STANDARD.encode(self.to_xdr()?))
    }

    fn from_xdr_base64(encoded: &str) -> Result<Self, XdrError> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| XdrError::Base64(e.to_string()))?;
        Self::from_xdr(&bytes)
    }
}

/// Discriminant types usable as union tags.
pub trait XdrDiscriminant: Copy + PartialEq {
    fn as_i32(self) -> i32;
}

impl XdrDiscriminant for i32 {
    fn as_i32(self) -> i32 {
        self
    }
}

impl XdrCodec for u32 {
    fn encode(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.write_u32(*self);
        Ok(())
    }

    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        r.read_u32()
    }
}

impl XdrCodec for i32 {
    fn encode(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.write_i32(*self);
        Ok(())
    }

    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        r.read_i32()
    }
}

impl XdrCodec for u64 {
    fn encode(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.write_u64(*self);
        Ok(())
    }

    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        r.read_u64()
    }
}

impl XdrCodec for i64 {
    fn encode(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.write_i64(*self);
        Ok(())
    }

    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        r.read_i64()
    }
}

impl XdrCodec for bool {
    fn encode(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.write_bool(*self);
        Ok(())
    }

    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        r.read_bool()
    }
}

/// Fixed-length opaque data.
impl<const N: usize> XdrCodec for [u8; N] {
    fn encode(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.write_fixed_opaque(self);
        Ok(())
    }

    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        r.read_fixed_opaque::<N>()
    }
}

impl<T: XdrCodec> XdrCodec for Option<T> {
    fn encode(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.write_optional(self.as_ref())
    }

    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        r.read_optional()
    }
}

impl<T: XdrCodec> XdrCodec for Box<T> {
    fn encode(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        self.as_ref().encode(w)
    }

    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Box::new(T::decode(r)?))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_are_big_endian() {
        let mut w = XdrWriter::new();
        w.write_u32(1);
        w.write_i32(-2);
        w.write_u64(0x0102_0304_0506_0708);
        w.write_i64(-1);
        assert_eq!(
            w.as_bytes(),
            &[
                0, 0, 0, 1, 0xff, 0xff, 0xff, 0xfe, 1, 2, 3, 4, 5, 6, 7, 8, 0xff, 0xff, 0xff,
                0xff, 0xff, 0xff, 0xff, 0xff
            ]
        );

        let mut r = XdrReader::new(w.as_bytes());
        assert_eq!(r.read_u32().unwrap(), 1);
        assert_eq!(r.read_i32().unwrap(), -2);
        assert_eq!(r.read_u64().unwrap(), 0x0102_0304_0506_0708);
        assert_eq!(r.read_i64().unwrap(), -1);
        assert!(r.finish().is_ok());
    }

    #[test]
    fn var_opaque_is_length_prefixed_and_padded() {
        let mut w = XdrWriter::new();
        w.write_var_opaque(b"abcde", 64).unwrap();
        assert_eq!(w.as_bytes(), &[0, 0, 0, 5, b'a', b'b', b'c', b'd', b'e', 0, 0, 0]);

        let mut r = XdrReader::new(w.as_bytes());
        assert_eq!(r.read_var_opaque(64).unwrap(), b"abcde");
        assert!(r.is_empty());
    }

    #[test]
    fn string_encoding_matches_opaque() {
        let mut w = XdrWriter::new();
        w.write_string("hi", 28).unwrap();
        assert_eq!(w.as_bytes(), &[0, 0, 0, 2, b'h', b'i', 0, 0]);
    }

    #[test]
    fn non_zero_padding_is_rejected() {
        let bytes = [0, 0, 0, 1, b'x', 0, 1, 0];
        let mut r = XdrReader::new(&bytes);
        assert_eq!(
            r.read_var_opaque(16),
            Err(XdrError::NonZeroPadding { offset: 6 })
        );
    }

    #[test]
    fn declared_length_larger_than_buffer_is_rejected() {
        let bytes = [0, 0, 0, 9, 1, 2, 3, 4];
        let mut r = XdrReader::new(&bytes);
        assert_eq!(
            r.read_var_opaque(64),
            Err(XdrError::LengthExceedsBuffer {
                len: 9,
                remaining: 4
            })
        );
    }

    #[test]
    fn declared_length_above_bound_is_rejected() {
        let bytes = [0, 0, 0, 30, 0, 0, 0, 0];
        let mut r = XdrReader::new(&bytes);
        assert_eq!(
            r.read_string(28),
            Err(XdrError::LengthExceedsMax { len: 30, max: 28 })
        );
    }

    #[test]
    fn oversized_list_count_is_rejected_before_allocation() {
        let bytes = [0xff, 0xff, 0xff, 0xff];
        let mut r = XdrReader::new(&bytes);
        let err = r.read_list::<u32>(usize::MAX).unwrap_err();
        assert!(matches!(err, XdrError::LengthExceedsBuffer { .. }));
    }

    #[test]
    fn booleans_must_be_zero_or_one() {
        let mut r = XdrReader::new(&[0, 0, 0, 2]);
        assert_eq!(r.read_bool(), Err(XdrError::InvalidBool(2)));
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let bytes = [0, 0, 0, 2, 0xc3, 0x28, 0, 0];
        let mut r = XdrReader::new(&bytes);
        assert_eq!(r.read_string(64), Err(XdrError::InvalidUtf8));
    }

    #[test]
    fn truncated_input_reports_eof() {
        let mut r = XdrReader::new(&[0, 0]);
        assert_eq!(
            r.read_u32(),
            Err(XdrError::UnexpectedEof {
                needed: 4,
                remaining: 2
            })
        );
    }

    #[test]
    fn optional_roundtrip() {
        let mut w = XdrWriter::new();
        w.write_optional(Some(&7u32)).unwrap();
        w.write_optional::<u32>(None).unwrap();
        assert_eq!(w.as_bytes(), &[0, 0, 0, 1, 0, 0, 0, 7, 0, 0, 0, 0]);

        let mut r = XdrReader::new(w.as_bytes());
        assert_eq!(r.read_optional::<u32>().unwrap(), Some(7));
        assert_eq!(r.read_optional::<u32>().unwrap(), None);
    }

    #[test]
    fn fixed_opaque_pads_odd_lengths() {
        let value = [1u8, 2, 3];
        let bytes = value.to_xdr().unwrap();
        assert_eq!(bytes, vec![1, 2, 3, 0]);
        assert_eq!(<[u8; 3]>::from_xdr(&bytes).unwrap(), value);
    }

    #[test]
    fn top_level_decode_rejects_trailing_and_misaligned_input() {
        assert_eq!(
            u32::from_xdr(&[0, 0, 0, 1, 0, 0, 0, 0]),
            Err(XdrError::TrailingBytes(4))
        );
        assert_eq!(u32::from_xdr(&[0, 0, 0, 1, 0]), Err(XdrError::Misaligned(5)));
    }

    #[test]
    fn input_size_limit_is_enforced() {
        let limits = XdrLimits { depth: 8, len: 4 };
        assert_eq!(
            u64::from_xdr_with_limits(&[0; 8], limits),
            Err(XdrError::InputTooLarge { len: 8, max: 4 })
        );
    }

    #[test]
    fn depth_guard_trips_at_limit() {
        let bytes = [0u8; 4];
        let mut r = XdrReader::with_limits(&bytes, XdrLimits { depth: 2, len: 64 });
        assert!(r.enter().is_ok());
        assert!(r.enter().is_ok());
        assert_eq!(r.enter(), Err(XdrError::DepthLimitExceeded(2)));
        r.leave();
        assert!(r.enter().is_ok());
    }

    #[test]
    fn base64_wrapper_roundtrip() {
        let encoded = 42u32.to_xdr_base64().unwrap();
        assert_eq!(encoded, "AAAAKg==");
        assert_eq!(u32::from_xdr_base64(&encoded).unwrap(), 42);
        assert!(matches!(
            u32::from_xdr_base64("not base64!"),
            Err(XdrError::Base64(_))
        ));
    }
}
