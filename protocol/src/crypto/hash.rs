//! # Hashing Utilities
//!
//! SHA-256 is the only hash the protocol uses: network ids, transaction
//! hashes, hash-x signer preimages, claimable balance ids, contract ids and
//! Soroban authorization payloads are all SHA-256 digests.

use sha2::{Digest, Sha256};

use crate::xdr::{Hash, XdrCodec, XdrError};

/// SHA-256 of the input.
///
/// # Example
///
/// ```
/// use stellar_base::crypto::sha256;
///
/// let digest = sha256(b"abc");
/// assert_eq!(digest[0], 0xba);
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// SHA-256 over several slices, as if they were concatenated.
pub fn sha256_concat(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// SHA-256 of a value's XDR encoding. This is how every protocol-level id
/// (transaction hash, claimable balance id, contract id) is derived.
pub fn xdr_hash<T: XdrCodec>(value: &T) -> Result<Hash, XdrError> {
    Ok(Hash(sha256(&value.to_xdr()?)))
}
