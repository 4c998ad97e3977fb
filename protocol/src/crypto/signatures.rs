//! # Digital Signatures
//!
//! Ed25519 verification and signature hints.
//!
//! A decorated signature carries a 4-byte hint next to the 64 signature
//! bytes: the last four bytes of the signer's public key. Verifiers use it to
//! pick the candidate key before doing any curve arithmetic. Signed-payload
//! signers XOR the last four payload bytes into the hint.
//!
//! Verification is strict (`verify_strict`): small-order keys and
//! non-canonical signature encodings are rejected.

use ed25519_dalek::{Signature as DalekSignature, VerifyingKey};
use thiserror::Error;

use crate::xdr::SignatureHint;

/// Errors during signature verification.
///
/// Intentionally coarse: we don't tell callers why a signature was bad.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("signature verification failed")]
    VerificationFailed,

    #[error("invalid signature bytes: expected 64 bytes, got {0}")]
    InvalidSignatureLength(usize),

    #[error("invalid public key")]
    InvalidPublicKey,
}

/// Verify a signature using raw byte components.
pub fn verify_raw(
    public_key: &[u8; 32],
    message: &[u8],
    signature: &[u8],
) -> Result<(), SignatureError> {
    let signature: [u8; 64] = signature
        .try_into()
        .map_err(|_| SignatureError::InvalidSignatureLength(signature.len()))?;
    let verifying_key =
        VerifyingKey::from_bytes(public_key).map_err(|_| SignatureError::InvalidPublicKey)?;
    verifying_key
        .verify_strict(message, &DalekSignature::from_bytes(&signature))
        .map_err(|_| SignatureError::VerificationFailed)
}

/// Boolean form of [`verify_raw`].
pub fn verify(public_key: &[u8; 32], message: &[u8], signature: &[u8]) -> bool {
    verify_raw(public_key, message, signature).is_ok()
}

/// The last four bytes of a public key.
pub fn signature_hint(public_key: &[u8; 32]) -> SignatureHint {
    let mut hint = [0u8; 4];
    hint.copy_from_slice(&public_key[28..]);
    SignatureHint(hint)
}

/// Hint for a signed-payload signer: the key hint XOR the payload's last
/// four bytes. Payloads shorter than four bytes are zero padded on the right.
pub fn signed_payload_hint(public_key: &[u8; 32], payload: &[u8]) -> SignatureHint {
    let mut payload_tail = [0u8; 4];
    let tail = &payload[payload.len().saturating_sub(4)..];
    payload_tail[..tail.len()].copy_from_slice(tail);

    let SignatureHint(mut hint) = signature_hint(public_key);
    for (h, p) in hint.iter_mut().zip(payload_tail) {
        *h ^= p;
    }
    SignatureHint(hint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};

    fn rfc8032_key() -> SigningKey {
        let seed: [u8; 32] =
            hex::decode("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60")
                .unwrap()
                .try_into()
                .unwrap();
        SigningKey::from_bytes(&seed)
    }

    #[test]
    fn test_rfc8032_empty_message_vector() {
        let key = rfc8032_key();
        let public = key.verifying_key().to_bytes();
        assert_eq!(
            hex::encode(public),
            "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a"
        );
        let sig = key.sign(b"");
        assert_eq!(
            hex::encode(sig.to_bytes()),
            "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155\
             5fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b"
        );
        assert!(verify(&public, b"", &sig.to_bytes()));
    }

    #[test]
    fn test_wrong_message_fails() {
        let key = rfc8032_key();
        let sig = key.sign(b"correct message").to_bytes();
        let public = key.verifying_key().to_bytes();
        assert_eq!(
            verify_raw(&public, b"wrong message", &sig),
            Err(SignatureError::VerificationFailed)
        );
    }

    #[test]
    fn test_wrong_length_signature_is_rejected() {
        let public = rfc8032_key().verifying_key().to_bytes();
        assert_eq!(
            verify_raw(&public, b"msg", &[0u8; 63]),
            Err(SignatureError::InvalidSignatureLength(63))
        );
    }

    #[test]
    fn test_hint_is_last_four_bytes() {
        let mut key = [0u8; 32];
        key[28..].copy_from_slice(&[1, 2, 3, 4]);
        assert_eq!(signature_hint(&key), SignatureHint([1, 2, 3, 4]));
    }

    #[test]
    fn test_signed_payload_hint_xors_payload_tail() {
        let mut key = [0u8; 32];
        key[28..].copy_from_slice(&[0xff, 0x00, 0xff, 0x00]);
        assert_eq!(
            signed_payload_hint(&key, &[9, 9, 0x0f, 0x0f, 0x0f, 0x0f]),
            SignatureHint([0xf0, 0x0f, 0xf0, 0x0f])
        );
        // Short payloads pad on the right.
        assert_eq!(
            signed_payload_hint(&key, &[0x0f, 0x0f]),
            SignatureHint([0xf0, 0x0f, 0xff, 0x00])
        );
    }
}
