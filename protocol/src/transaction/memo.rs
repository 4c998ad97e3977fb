//! Validated [`Memo`] constructors.
//!
//! A transaction carries at most one memo: text up to 28 bytes, a `u64` id,
//! or a 32-byte hash (plain or "return" hash for refunds).

use super::error::BuildError;
use crate::config::MEMO_TEXT_MAX;
use crate::xdr::{Hash, Memo};

impl Memo {
    /// A text memo. The limit is 28 bytes of UTF-8, not 28 characters.
    pub fn text(text: &str) -> Result<Self, BuildError> {
        if text.len() > MEMO_TEXT_MAX {
            return Err(BuildError::MemoTooLong {
                len: text.len(),
                max: MEMO_TEXT_MAX,
            });
        }
        Ok(Self::Text(text.try_into()?))
    }

    pub fn id(id: u64) -> Self {
        Self::Id(id)
    }

    pub fn hash(hash: [u8; 32]) -> Self {
        Self::Hash(Hash(hash))
    }

    pub fn return_hash(hash: [u8; 32]) -> Self {
        Self::Return(Hash(hash))
    }

    /// A hash memo from 64 hex characters.
    pub fn hash_hex(hex: &str) -> Result<Self, BuildError> {
        Ok(Self::Hash(Hash::from_hex(hex)?))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xdr::{MemoType, XdrCodec};

    #[test]
    fn text_limit_is_in_bytes() {
        assert!(Memo::text(&"a".repeat(28)).is_ok());
        assert_eq!(
            Memo::text(&"a".repeat(29)),
            Err(BuildError::MemoTooLong { len: 29, max: 28 })
        );
        // 10 three-byte characters: 10 chars, 30 bytes.
        assert!(matches!(
            Memo::text(&"€".repeat(10)),
            Err(BuildError::MemoTooLong { len: 30, .. })
        ));
    }

    #[test]
    fn constructors_pick_the_right_arm() {
        assert_eq!(Memo::id(7).discriminant(), MemoType::Id);
        assert_eq!(Memo::hash([1; 32]).discriminant(), MemoType::Hash);
        assert_eq!(Memo::return_hash([1; 32]).discriminant(), MemoType::Return);
        assert!(Memo::default().is_none());
    }

    #[test]
    fn text_memo_encoding() {
        let memo = Memo::text("hi").unwrap();
        assert_eq!(
            memo.to_xdr().unwrap(),
            vec![0, 0, 0, 1, 0, 0, 0, 2, b'h', b'i', 0, 0]
        );
    }

    #[test]
    fn hash_hex_requires_32_bytes() {
        assert!(Memo::hash_hex(&"ab".repeat(32)).is_ok());
        assert!(Memo::hash_hex("abcd").is_err());
    }
}
