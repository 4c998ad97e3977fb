//! Length-bounded containers.
//!
//! XDR declares variable-length data with an optional upper bound
//! (`opaque signature<64>`, `Operation operations<100>`, `string text<28>`).
//! These wrappers carry the bound in the type, check it on construction and
//! on decode, and encode with the `uint32` length prefix.

use std::fmt;
use std::ops::Deref;

use super::codec::{XdrCodec, XdrReader, XdrWriter};
use super::error::XdrError;

/// Variable-length array of at most `MAX` elements.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VecM<T, const MAX: u32 = { u32::MAX }>(Vec<T>);

/// Variable-length opaque data of at most `MAX` bytes.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct BytesM<const MAX: u32 = { u32::MAX }>(Vec<u8>);

/// UTF-8 string of at most `MAX` bytes.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct StringM<const MAX: u32 = { u32::MAX }>(String);

fn check_len(len: usize, max: u32) -> Result<(), XdrError> {
    if len > max as usize {
        return Err(XdrError::LengthExceedsMax {
            len,
            max: max as usize,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// VecM
// ---------------------------------------------------------------------------

impl<T, const MAX: u32> VecM<T, MAX> {
    pub const MAX_LEN: usize = MAX as usize;

    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends an element, failing if the bound would be exceeded.
    pub fn push(&mut self, value: T) -> Result<(), XdrError> {
        check_len(self.0.len() + 1, MAX)?;
        self.0.push(value);
        Ok(())
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.0
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T, const MAX: u32> Default for VecM<T, MAX> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const MAX: u32> Deref for VecM<T, MAX> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T, const MAX: u32> TryFrom<Vec<T>> for VecM<T, MAX> {
    type Error = XdrError;

    fn try_from(value: Vec<T>) -> Result<Self, XdrError> {
        check_len(value.len(), MAX)?;
        Ok(Self(value))
    }
}

impl<T, const MAX: u32> From<VecM<T, MAX>> for Vec<T> {
    fn from(value: VecM<T, MAX>) -> Self {
        value.0
    }
}

impl<'a, T, const MAX: u32> IntoIterator for &'a VecM<T, MAX> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T: XdrCodec, const MAX: u32> XdrCodec for VecM<T, MAX> {
    fn encode(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.write_list(&self.0, MAX as usize)
    }

    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self(r.read_list(MAX as usize)?))
    }
}

// ---------------------------------------------------------------------------
// BytesM
// ---------------------------------------------------------------------------

impl<const MAX: u32> BytesM<MAX> {
    pub const MAX_LEN: usize = MAX as usize;

    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl<const MAX: u32> Deref for BytesM<MAX> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl<const MAX: u32> TryFrom<Vec<u8>> for BytesM<MAX> {
    type Error = XdrError;

    fn try_from(value: Vec<u8>) -> Result<Self, XdrError> {
        check_len(value.len(), MAX)?;
        Ok(Self(value))
    }
}

impl<const MAX: u32> TryFrom<&[u8]> for BytesM<MAX> {
    type Error = XdrError;

    fn try_from(value: &[u8]) -> Result<Self, XdrError> {
        Self::try_from(value.to_vec())
    }
}

impl<const MAX: u32> fmt::Debug for BytesM<MAX> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BytesM({})", self.to_hex())
    }
}

impl<const MAX: u32> XdrCodec for BytesM<MAX> {
    fn encode(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.write_var_opaque(&self.0, MAX as usize)
    }

    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self(r.read_var_opaque(MAX as usize)?))
    }
}

// ---------------------------------------------------------------------------
// StringM
// ---------------------------------------------------------------------------

impl<const MAX: u32> StringM<MAX> {
    pub const MAX_LEN: usize = MAX as usize;

    pub fn new() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl<const MAX: u32> Deref for StringM<MAX> {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl<const MAX: u32> TryFrom<String> for StringM<MAX> {
    type Error = XdrError;

    fn try_from(value: String) -> Result<Self, XdrError> {
        check_len(value.len(), MAX)?;
        Ok(Self(value))
    }
}

impl<const MAX: u32> TryFrom<&str> for StringM<MAX> {
    type Error = XdrError;

    fn try_from(value: &str) -> Result<Self, XdrError> {
        Self::try_from(value.to_string())
    }
}

impl<const MAX: u32> fmt::Debug for StringM<MAX> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl<const MAX: u32> fmt::Display for StringM<MAX> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<const MAX: u32> XdrCodec for StringM<MAX> {
    fn encode(&self, w: &mut XdrWriter) -> Result<(), XdrError> {
        w.write_string(&self.0, MAX as usize)
    }

    fn decode(r: &mut XdrReader<'_>) -> Result<Self, XdrError> {
        Ok(Self(r.read_string(MAX as usize)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vecm_enforces_bound_on_construction_and_push() {
        let mut v: VecM<u32, 2> = vec![1, 2].try_into().unwrap();
        assert!(v.push(3).is_err());
        assert_eq!(v.len(), 2);
        assert!(VecM::<u32, 2>::try_from(vec![1, 2, 3]).is_err());
    }

    #[test]
    fn vecm_decode_rejects_count_over_bound() {
        let bytes = [0, 0, 0, 3, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 3];
        assert_eq!(
            VecM::<u32, 2>::from_xdr(&bytes),
            Err(XdrError::LengthExceedsMax { len: 3, max: 2 })
        );
        let ok = VecM::<u32, 3>::from_xdr(&bytes).unwrap();
        assert_eq!(ok.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn stringm_counts_bytes_not_chars() {
        // "é" is two bytes in UTF-8.
        assert!(StringM::<3>::try_from("éé").is_err());
        assert!(StringM::<4>::try_from("éé").is_ok());
    }

    #[test]
    fn bytesm_roundtrip_with_padding() {
        let b: BytesM<64> = vec![9u8; 5].try_into().unwrap();
        let xdr = b.to_xdr().unwrap();
        assert_eq!(xdr.len(), 4 + 8);
        assert_eq!(BytesM::<64>::from_xdr(&xdr).unwrap(), b);
    }
}
