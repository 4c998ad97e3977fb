//! # Key Management
//!
//! Ed25519 key pairs for accounts.
//!
//! A [`KeyPair`] either holds the secret seed or (for keys held elsewhere,
//! such as a hardware wallet or a co-signer) only the public key. Both
//! kinds can verify; only the first can sign.
//!
//! ## Security considerations
//!
//! - Secret keys are zeroized on drop (ed25519-dalek does this for us).
//! - Random keys come from the OS RNG (`OsRng`).
//! - Seeds are never logged and never appear in `Debug` output or errors.

use std::fmt;

use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use thiserror::Error;

use super::signatures::{signature_hint, signed_payload_hint, verify};
use crate::strkey::{self, StrKeyError};
use crate::transaction::SigningError;
use crate::xdr::{
    AccountId, DecoratedSignature, MuxedAccount, SignatureHint, SignerKey, Uint256,
};

/// Errors that can occur while constructing a key pair.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// The `S…` or `G…` string failed StrKey decoding.
    #[error("invalid key string: {0}")]
    InvalidStrKey(#[from] StrKeyError),

    /// The bytes are not a valid Ed25519 point.
    #[error("invalid public key bytes: not a valid Ed25519 point")]
    InvalidPublicKey,
}

/// An Ed25519 key pair, or just the public half.
///
/// # Examples
///
/// ```
/// use stellar_base::crypto::KeyPair;
///
/// let kp = KeyPair::random();
/// let sig = kp.sign(b"payload").unwrap();
/// assert!(kp.verify(b"payload", &sig));
///
/// let watcher = KeyPair::from_account_id(&kp.account_id()).unwrap();
/// assert!(!watcher.can_sign());
/// assert!(watcher.verify(b"payload", &sig));
/// ```
#[derive(Clone)]
pub struct KeyPair {
    public: [u8; 32],
    signing_key: Option<SigningKey>,
}

impl KeyPair {
    /// Fresh key pair from the OS RNG.
    pub fn random() -> Self {
        Self::from_signing_key(SigningKey::generate(&mut OsRng))
    }

    /// Key pair from a raw 32-byte Ed25519 seed.
    pub fn from_raw_seed(seed: &[u8; 32]) -> Self {
        Self::from_signing_key(SigningKey::from_bytes(seed))
    }

    /// Key pair from an `S…` secret seed.
    pub fn from_secret_seed(seed: &str) -> Result<Self, KeyError> {
        let raw = strkey::decode_secret_seed(seed)?;
        Ok(Self::from_raw_seed(&raw))
    }

    /// Public-only key pair from a `G…` account id.
    pub fn from_account_id(account_id: &str) -> Result<Self, KeyError> {
        let raw = strkey::decode_account_id(account_id)?;
        Self::from_public_key_bytes(raw)
    }

    /// Public-only key pair from raw key bytes. The bytes must be a valid
    /// curve point.
    pub fn from_public_key_bytes(public: [u8; 32]) -> Result<Self, KeyError> {
        VerifyingKey::from_bytes(&public).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self {
            public,
            signing_key: None,
        })
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        Self {
            public: signing_key.verifying_key().to_bytes(),
            signing_key: Some(signing_key),
        }
    }

    /// Drops the secret half.
    pub fn to_public_only(&self) -> Self {
        Self {
            public: self.public,
            signing_key: None,
        }
    }

    pub fn public_key_bytes(&self) -> &[u8; 32] {
        &self.public
    }

    /// The `G…` account id.
    pub fn account_id(&self) -> String {
        strkey::encode_account_id(&self.public)
    }

    /// The `S…` seed, or `None` for a public-only key pair.
    pub fn secret_seed(&self) -> Option<String> {
        self.raw_secret_seed()
            .map(|seed| strkey::encode_secret_seed(&seed))
    }

    pub fn raw_secret_seed(&self) -> Option<[u8; 32]> {
        self.signing_key.as_ref().map(SigningKey::to_bytes)
    }

    pub fn can_sign(&self) -> bool {
        self.signing_key.is_some()
    }

    /// Last four bytes of the public key.
    pub fn signature_hint(&self) -> SignatureHint {
        signature_hint(&self.public)
    }

    // -- XDR views -----------------------------------------------------------

    pub fn xdr_account_id(&self) -> AccountId {
        AccountId::from_bytes(self.public)
    }

    pub fn xdr_muxed_account(&self, id: Option<u64>) -> MuxedAccount {
        match id {
            Some(id) => MuxedAccount::muxed(&self.xdr_account_id(), id),
            None => MuxedAccount::Ed25519(Uint256(self.public)),
        }
    }

    pub fn xdr_signer_key(&self) -> SignerKey {
        SignerKey::Ed25519(Uint256(self.public))
    }

    // -- Signing -------------------------------------------------------------

    /// Signs `data`. Fails when only the public key is held.
    pub fn sign(&self, data: &[u8]) -> Result<[u8; 64], SigningError> {
        let key = self
            .signing_key
            .as_ref()
            .ok_or(SigningError::MissingSecretKey)?;
        Ok(key.sign(data).to_bytes())
    }

    /// Signs `data` and attaches this key's hint.
    pub fn sign_decorated(&self, data: &[u8]) -> Result<DecoratedSignature, SigningError> {
        let signature = self.sign(data)?;
        Ok(DecoratedSignature {
            hint: self.signature_hint(),
            signature: signature.to_vec().try_into()?,
        })
    }

    /// Signs `payload` for a signed-payload signer. The hint is the key hint
    /// XOR the payload's last four bytes.
    pub fn sign_payload_decorated(
        &self,
        payload: &[u8],
    ) -> Result<DecoratedSignature, SigningError> {
        let signature = self.sign(payload)?;
        Ok(DecoratedSignature {
            hint: signed_payload_hint(&self.public, payload),
            signature: signature.to_vec().try_into()?,
        })
    }

    pub fn verify(&self, data: &[u8], signature: &[u8]) -> bool {
        verify(&self.public, data, signature)
    }

    /// Checks the hint first, then the signature.
    pub fn verify_decorated(&self, data: &[u8], signature: &DecoratedSignature) -> bool {
        signature.hint == self.signature_hint() && self.verify(data, &signature.signature)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print secret key material, not even partially.
        write!(
            f,
            "KeyPair({}, can_sign={})",
            self.account_id(),
            self.can_sign()
        )
    }
}

impl PartialEq for KeyPair {
    /// Equal when the public keys match and both (or neither) can sign.
    fn eq(&self, other: &Self) -> bool {
        self.public == other.public && self.can_sign() == other.can_sign()
    }
}

impl Eq for KeyPair {}
