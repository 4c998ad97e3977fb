//! Keys, accounts, signers and signatures.
//!
//! An account is identified by a 32-byte ed25519 public key. A *muxed*
//! account adds a 64-bit sub-id on top; it verifies signatures with exactly
//! the same key bytes and only differs in how it is written down (`M…`
//! instead of `G…`).

use super::bounded::BytesM;
use super::error::XdrError;
use crate::strkey::{self, SignedPayload, StrKey, VersionByte};

xdr_opaque! {
    /// A SHA-256 digest.
    pub struct Hash([u8; 32]);
}

xdr_opaque! {
    /// A raw 256-bit value, usually an ed25519 public key.
    pub struct Uint256([u8; 32]);
}

xdr_opaque! {
    /// Last four bytes of the signing key, letting a verifier skip keys
    /// that cannot have produced a signature.
    pub struct SignatureHint([u8; 4]);
}

xdr_opaque! {
    /// Master weight and low/medium/high thresholds, one byte each.
    pub struct Thresholds([u8; 4]);
}

/// An ed25519 signature (the XDR type allows up to 64 bytes).
pub type Signature = BytesM<64>;

/// A liquidity pool id.
pub type PoolId = Hash;

/// A contract id.
pub type ContractId = Hash;

xdr_enum! {
    pub enum CryptoKeyType {
        Ed25519 = 0 => "KEY_TYPE_ED25519",
        PreAuthTx = 1 => "KEY_TYPE_PRE_AUTH_TX",
        HashX = 2 => "KEY_TYPE_HASH_X",
        Ed25519SignedPayload = 3 => "KEY_TYPE_ED25519_SIGNED_PAYLOAD",
        MuxedEd25519 = 256 => "KEY_TYPE_MUXED_ED25519",
    }
}

xdr_enum! {
    pub enum PublicKeyType {
        Ed25519 = 0 => "PUBLIC_KEY_TYPE_ED25519",
    }
}

xdr_enum! {
    pub enum SignerKeyType {
        Ed25519 = 0 => "SIGNER_KEY_TYPE_ED25519",
        PreAuthTx = 1 => "SIGNER_KEY_TYPE_PRE_AUTH_TX",
        HashX = 2 => "SIGNER_KEY_TYPE_HASH_X",
        Ed25519SignedPayload = 3 => "SIGNER_KEY_TYPE_ED25519_SIGNED_PAYLOAD",
    }
}

// ---------------------------------------------------------------------------
// Public keys and account ids
// ---------------------------------------------------------------------------

xdr_union! {
    @codec
    /// A public key. Only ed25519 exists.
    pub enum PublicKey(PublicKeyType, "type") {
        PublicKeyType::Ed25519 => Ed25519(Uint256, "ed25519"),
    }
}

/// Accounts are named by their public key.
pub type AccountId = PublicKey;

impl PublicKey {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self::Ed25519(Uint256(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        match self {
            Self::Ed25519(key) => &key.0,
        }
    }

    /// The `G…` form.
    pub fn to_strkey(&self) -> String {
        strkey::encode_account_id(self.as_bytes())
    }

    pub fn from_strkey(s: &str) -> Result<Self, XdrError> {
        Ok(Self::from_bytes(strkey::decode_account_id(s)?))
    }
}

impl std::fmt::Display for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_strkey())
    }
}

impl std::str::FromStr for PublicKey {
    type Err = XdrError;

    fn from_str(s: &str) -> Result<Self, XdrError> {
        Self::from_strkey(s)
    }
}

// ---------------------------------------------------------------------------
// Muxed accounts
// ---------------------------------------------------------------------------

xdr_struct! {
    @codec
    pub struct MuxedAccountMed25519 {
        pub id: u64 => "id",
        pub ed25519: Uint256 => "ed25519",
    }
}

xdr_union! {
    @codec
    /// A plain account, or an account plus a 64-bit sub-id.
    pub enum MuxedAccount(CryptoKeyType, "type") {
        CryptoKeyType::Ed25519 => Ed25519(Uint256, "ed25519"),
        CryptoKeyType::MuxedEd25519 => MuxedEd25519(MuxedAccountMed25519, "med25519"),
    }
}

impl MuxedAccount {
    pub fn muxed(account: &AccountId, id: u64) -> Self {
        Self::MuxedEd25519(MuxedAccountMed25519 {
            id,
            ed25519: Uint256(*account.as_bytes()),
        })
    }

    /// The underlying account, with the sub-id (if any) dropped.
    pub fn account_id(&self) -> AccountId {
        PublicKey::from_bytes(*self.ed25519())
    }

    pub fn ed25519(&self) -> &[u8; 32] {
        match self {
            Self::Ed25519(key) => &key.0,
            Self::MuxedEd25519(m) => &m.ed25519.0,
        }
    }

    pub fn id(&self) -> Option<u64> {
        match self {
            Self::Ed25519(_) => None,
            Self::MuxedEd25519(m) => Some(m.id),
        }
    }

    /// `G…` for plain accounts, `M…` for muxed ones.
    pub fn to_strkey(&self) -> String {
        match self {
            Self::Ed25519(key) => strkey::encode_account_id(&key.0),
            Self::MuxedEd25519(m) => StrKey::MuxedAccount {
                ed25519: m.ed25519.0,
                id: m.id,
            }
            .to_string(),
        }
    }

    /// Accepts both `G…` and `M…`.
    pub fn from_strkey(s: &str) -> Result<Self, XdrError> {
        match s.parse::<StrKey>()? {
            StrKey::AccountId(key) => Ok(Self::Ed25519(Uint256(key))),
            StrKey::MuxedAccount { ed25519, id } => Ok(Self::MuxedEd25519(MuxedAccountMed25519 {
                id,
                ed25519: Uint256(ed25519),
            })),
            other => Err(XdrError::InvalidValue(format!(
                "expected an account or muxed account, found a {} key",
                other.version()
            ))),
        }
    }
}

impl From<AccountId> for MuxedAccount {
    fn from(account: AccountId) -> Self {
        Self::Ed25519(Uint256(*account.as_bytes()))
    }
}

impl std::fmt::Display for MuxedAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_strkey())
    }
}

impl std::str::FromStr for MuxedAccount {
    type Err = XdrError;

    fn from_str(s: &str) -> Result<Self, XdrError> {
        Self::from_strkey(s)
    }
}

// ---------------------------------------------------------------------------
// Signer keys
// ---------------------------------------------------------------------------

xdr_struct! {
    @codec
    pub struct SignerKeyEd25519SignedPayload {
        pub ed25519: Uint256 => "ed25519",
        pub payload: BytesM<64> => "payload",
    }
}

xdr_union! {
    @codec
    /// Anything an account can list as a signer.
    pub enum SignerKey(SignerKeyType, "type") {
        SignerKeyType::Ed25519 => Ed25519(Uint256, "ed25519"),
        SignerKeyType::PreAuthTx => PreAuthTx(Uint256, "preAuthTx"),
        SignerKeyType::HashX => HashX(Uint256, "hashX"),
        SignerKeyType::Ed25519SignedPayload => Ed25519SignedPayload(SignerKeyEd25519SignedPayload, "ed25519SignedPayload"),
    }
}

impl SignerKey {
    /// `G…`, `T…`, `X…` or `P…` depending on the arm.
    pub fn to_strkey(&self) -> Result<String, XdrError> {
        let key = match self {
            Self::Ed25519(k) => StrKey::AccountId(k.0),
            Self::PreAuthTx(k) => StrKey::PreAuthTx(k.0),
            Self::HashX(k) => StrKey::Sha256Hash(k.0),
            Self::Ed25519SignedPayload(sp) => StrKey::SignedPayload(SignedPayload::new(
                sp.ed25519.0,
                sp.payload.to_vec(),
            )?),
        };
        Ok(key.to_string())
    }

    pub fn from_strkey(s: &str) -> Result<Self, XdrError> {
        match s.parse::<StrKey>()? {
            StrKey::AccountId(k) => Ok(Self::Ed25519(Uint256(k))),
            StrKey::PreAuthTx(k) => Ok(Self::PreAuthTx(Uint256(k))),
            StrKey::Sha256Hash(k) => Ok(Self::HashX(Uint256(k))),
            StrKey::SignedPayload(sp) => {
                Ok(Self::Ed25519SignedPayload(SignerKeyEd25519SignedPayload {
                    ed25519: Uint256(*sp.ed25519()),
                    payload: sp.payload().try_into()?,
                }))
            }
            other => Err(XdrError::StrKey(strkey::StrKeyError::UnexpectedVersion {
                expected: VersionByte::AccountId,
                found: other.version(),
            })),
        }
    }
}

xdr_struct! {
    /// A signer on an account and its weight.
    pub struct Signer {
        pub key: SignerKey => "key",
        pub weight: u32 => "weight",
    }
}

xdr_struct! {
    /// A signature plus the hint identifying the key that made it.
    pub struct DecoratedSignature {
        pub hint: SignatureHint => "hint",
        pub signature: Signature => "signature",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xdr::XdrCodec;

    const ZERO_ACCOUNT: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

    #[test]
    fn account_id_strkey_roundtrip() {
        let account = AccountId::from_strkey(ZERO_ACCOUNT).unwrap();
        assert_eq!(account.as_bytes(), &[0u8; 32]);
        assert_eq!(account.to_string(), ZERO_ACCOUNT);
        assert_eq!(account.to_xdr().unwrap(), vec![0u8; 36]);
    }

    #[test]
    fn muxed_account_keeps_key_bytes() {
        let account = PublicKey::from_bytes([7u8; 32]);
        let muxed = MuxedAccount::muxed(&account, 420);
        assert!(muxed.to_strkey().starts_with('M'));
        assert_eq!(muxed.account_id(), account);
        assert_eq!(muxed.id(), Some(420));
        assert_eq!(MuxedAccount::from_strkey(&muxed.to_strkey()).unwrap(), muxed);

        let bytes = muxed.to_xdr().unwrap();
        // discriminant 0x100, id, key
        assert_eq!(&bytes[..4], &[0, 0, 1, 0]);
        assert_eq!(bytes.len(), 4 + 8 + 32);
        assert_eq!(MuxedAccount::from_xdr(&bytes).unwrap(), muxed);
    }

    #[test]
    fn muxed_account_rejects_other_key_kinds() {
        let seed = strkey::encode_secret_seed(&[1u8; 32]);
        assert!(MuxedAccount::from_strkey(&seed).is_err());
    }

    #[test]
    fn signer_key_strkey_forms() {
        let keys = [
            SignerKey::Ed25519(Uint256([1; 32])),
            SignerKey::PreAuthTx(Uint256([2; 32])),
            SignerKey::HashX(Uint256([3; 32])),
            SignerKey::Ed25519SignedPayload(SignerKeyEd25519SignedPayload {
                ed25519: Uint256([4; 32]),
                payload: vec![1, 2, 3].try_into().unwrap(),
            }),
        ];
        let prefixes = ['G', 'T', 'X', 'P'];
        for (key, prefix) in keys.iter().zip(prefixes) {
            let s = key.to_strkey().unwrap();
            assert!(s.starts_with(prefix));
            assert_eq!(&SignerKey::from_strkey(&s).unwrap(), key);
        }
    }

    #[test]
    fn unknown_public_key_type_is_rejected() {
        let mut bytes = vec![0, 0, 0, 1];
        bytes.extend_from_slice(&[0u8; 32]);
        assert_eq!(
            PublicKey::from_xdr(&bytes),
            Err(XdrError::UnknownDiscriminant {
                type_name: "PublicKeyType",
                value: 1
            })
        );
    }
}
