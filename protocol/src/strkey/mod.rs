//! # StrKey — Checksummed Key Strings
//!
//! Human-facing encoding for keys, hashes and contract ids:
//!
//! ```text
//! base32( version_byte || payload || crc16_xmodem(version_byte || payload) )
//! ```
//!
//! Base32 uses the RFC 4648 alphabet without padding; the CRC is appended
//! little-endian. The version byte picks the leading character (`G`, `S`,
//! `M`, `C`, …), so the kind of a key is visible at a glance.
//!
//! ## Strictness
//!
//! Decoding rejects every string that is not the unique canonical encoding
//! of a well-formed payload: unknown version bytes, wrong payload size for
//! the version, checksum mismatch, padding characters, lowercase, non-zero
//! trailing bits, and malformed signed payloads. A single flipped character
//! always fails.
//!
//! This module has no dependency on the XDR types; they depend on it.

mod checksum;
mod version;

use std::fmt;
use std::str::FromStr;

use data_encoding::BASE32_NOPAD;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

pub use checksum::crc16_xmodem;
pub use version::{PayloadLen, VersionByte};

/// Maximum payload carried by a signed-payload signer.
pub const MAX_SIGNED_PAYLOAD_LEN: usize = 64;

/// Errors from StrKey encoding and decoding.
///
/// None of these include the input string: it may well be a secret seed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrKeyError {
    /// Not canonical unpadded RFC 4648 base32.
    #[error("invalid base32 encoding")]
    InvalidEncoding,

    /// The decoded version byte is not one we know.
    #[error("unknown version byte {0:#04x}")]
    UnknownVersion(u8),

    /// A valid key, but of the wrong kind for this call site.
    #[error("expected {expected} key, found {found}")]
    UnexpectedVersion {
        expected: VersionByte,
        found: VersionByte,
    },

    /// Payload size does not match the version.
    #[error("invalid payload length {len} for {version}")]
    InvalidLength { version: VersionByte, len: usize },

    /// CRC16 did not match.
    #[error("checksum mismatch")]
    InvalidChecksum,

    /// A signed payload or claimable balance payload is malformed.
    #[error("invalid payload: {0}")]
    InvalidPayload(&'static str),
}

// ---------------------------------------------------------------------------
// Raw encode / decode
// ---------------------------------------------------------------------------

/// Encodes `payload` under `version`, validating the payload length.
pub fn encode(version: VersionByte, payload: &[u8]) -> Result<String, StrKeyError> {
    if !version.payload_len().accepts(payload.len()) {
        return Err(StrKeyError::InvalidLength {
            version,
            len: payload.len(),
        });
    }
    Ok(encode_unchecked(version, payload))
}

fn encode_unchecked(version: VersionByte, payload: &[u8]) -> String {
    let mut raw = Vec::with_capacity(1 + payload.len() + 2);
    raw.push(version.byte());
    raw.extend_from_slice(payload);
    let crc = checksum::checksum_bytes(&raw);
    raw.extend_from_slice(&crc);
    BASE32_NOPAD.encode(&raw)
}

/// Decodes any StrKey into its version and raw payload.
pub fn decode(encoded: &str) -> Result<(VersionByte, Vec<u8>), StrKeyError> {
    let raw = BASE32_NOPAD
        .decode(encoded.as_bytes())
        .map_err(|_| StrKeyError::InvalidEncoding)?;
    // Belt and braces on canonical form: the decoder already checks trailing
    // bits, but a re-encode comparison leaves no room for doubt.
    if BASE32_NOPAD.encode(&raw) != encoded {
        return Err(StrKeyError::InvalidEncoding);
    }
    if raw.len() < 3 {
        return Err(StrKeyError::InvalidEncoding);
    }

    let version = VersionByte::from_byte(raw[0]).ok_or(StrKeyError::UnknownVersion(raw[0]))?;
    let (body, crc) = raw.split_at(raw.len() - 2);
    let payload = &body[1..];
    if !version.payload_len().accepts(payload.len()) {
        return Err(StrKeyError::InvalidLength {
            version,
            len: payload.len(),
        });
    }
    if checksum::checksum_bytes(body) != [crc[0], crc[1]] {
        return Err(StrKeyError::InvalidChecksum);
    }
    Ok((version, payload.to_vec()))
}

/// Decodes a StrKey that must be of the given kind.
pub fn decode_as(expected: VersionByte, encoded: &str) -> Result<Vec<u8>, StrKeyError> {
    let (found, payload) = decode(encoded)?;
    if found != expected {
        return Err(StrKeyError::UnexpectedVersion { expected, found });
    }
    Ok(payload)
}

fn decode_32(expected: VersionByte, encoded: &str) -> Result<[u8; 32], StrKeyError> {
    let payload = decode_as(expected, encoded)?;
    to_array(expected, &payload)
}

fn to_array(version: VersionByte, payload: &[u8]) -> Result<[u8; 32], StrKeyError> {
    payload
        .try_into()
        .map_err(|_| StrKeyError::InvalidLength {
            version,
            len: payload.len(),
        })
}

pub fn encode_account_id(key: &[u8; 32]) -> String {
    encode_unchecked(VersionByte::AccountId, key)
}

pub fn decode_account_id(encoded: &str) -> Result<[u8; 32], StrKeyError> {
    decode_32(VersionByte::AccountId, encoded)
}

pub fn encode_secret_seed(seed: &[u8; 32]) -> String {
    encode_unchecked(VersionByte::SecretSeed, seed)
}

pub fn decode_secret_seed(encoded: &str) -> Result<[u8; 32], StrKeyError> {
    decode_32(VersionByte::SecretSeed, encoded)
}

pub fn encode_contract(id: &[u8; 32]) -> String {
    encode_unchecked(VersionByte::Contract, id)
}

pub fn decode_contract(encoded: &str) -> Result<[u8; 32], StrKeyError> {
    decode_32(VersionByte::Contract, encoded)
}

// ---------------------------------------------------------------------------
// Signed payloads
// ---------------------------------------------------------------------------

/// An ed25519 key plus 1–64 bytes of payload that it must sign.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SignedPayload {
    ed25519: [u8; 32],
    payload: Vec<u8>,
}

impl SignedPayload {
    pub fn new(ed25519: [u8; 32], payload: Vec<u8>) -> Result<Self, StrKeyError> {
        if payload.is_empty() || payload.len() > MAX_SIGNED_PAYLOAD_LEN {
            return Err(StrKeyError::InvalidPayload("signed payload must be 1..=64 bytes"));
        }
        Ok(Self { ed25519, payload })
    }

    pub fn ed25519(&self) -> &[u8; 32] {
        &self.ed25519
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    fn to_raw(&self) -> Vec<u8> {
        let pad = (4 - self.payload.len() % 4) % 4;
        let mut raw = Vec::with_capacity(32 + 4 + self.payload.len() + pad);
        raw.extend_from_slice(&self.ed25519);
        raw.extend_from_slice(&(self.payload.len() as u32).to_be_bytes());
        raw.extend_from_slice(&self.payload);
        raw.extend(std::iter::repeat(0u8).take(pad));
        raw
    }

    fn from_raw(raw: &[u8]) -> Result<Self, StrKeyError> {
        if raw.len() < 36 {
            return Err(StrKeyError::InvalidPayload("signed payload too short"));
        }
        let mut ed25519 = [0u8; 32];
        ed25519.copy_from_slice(&raw[..32]);
        let mut len_bytes = [0u8; 4];
        len_bytes.copy_from_slice(&raw[32..36]);
        let len = u32::from_be_bytes(len_bytes) as usize;
        if len == 0 || len > MAX_SIGNED_PAYLOAD_LEN {
            return Err(StrKeyError::InvalidPayload("signed payload must be 1..=64 bytes"));
        }
        let pad = (4 - len % 4) % 4;
        if raw.len() != 36 + len + pad {
            return Err(StrKeyError::InvalidPayload("signed payload length mismatch"));
        }
        if raw[36 + len..].iter().any(|b| *b != 0) {
            return Err(StrKeyError::InvalidPayload("signed payload padding is not zero"));
        }
        Ok(Self {
            ed25519,
            payload: raw[36..36 + len].to_vec(),
        })
    }
}

// ---------------------------------------------------------------------------
// Typed StrKey
// ---------------------------------------------------------------------------

/// A decoded StrKey, one variant per kind.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum StrKey {
    AccountId([u8; 32]),
    SecretSeed([u8; 32]),
    PreAuthTx([u8; 32]),
    Sha256Hash([u8; 32]),
    MuxedAccount { ed25519: [u8; 32], id: u64 },
    SignedPayload(SignedPayload),
    Contract([u8; 32]),
    LiquidityPool([u8; 32]),
    /// A v0 claimable balance id (the only kind defined so far).
    ClaimableBalance([u8; 32]),
}

impl StrKey {
    pub fn version(&self) -> VersionByte {
        match self {
            Self::AccountId(_) => VersionByte::AccountId,
            Self::SecretSeed(_) => VersionByte::SecretSeed,
            Self::PreAuthTx(_) => VersionByte::PreAuthTx,
            Self::Sha256Hash(_) => VersionByte::Sha256Hash,
            Self::MuxedAccount { .. } => VersionByte::MuxedAccount,
            Self::SignedPayload(_) => VersionByte::SignedPayload,
            Self::Contract(_) => VersionByte::Contract,
            Self::LiquidityPool(_) => VersionByte::LiquidityPool,
            Self::ClaimableBalance(_) => VersionByte::ClaimableBalance,
        }
    }

    fn payload(&self) -> Vec<u8> {
        match self {
            Self::AccountId(k)
            | Self::SecretSeed(k)
            | Self::PreAuthTx(k)
            | Self::Sha256Hash(k)
            | Self::Contract(k)
            | Self::LiquidityPool(k) => k.to_vec(),
            Self::MuxedAccount { ed25519, id } => {
                let mut raw = ed25519.to_vec();
                raw.extend_from_slice(&id.to_be_bytes());
                raw
            }
            Self::SignedPayload(sp) => sp.to_raw(),
            Self::ClaimableBalance(hash) => {
                let mut raw = Vec::with_capacity(33);
                raw.push(0);
                raw.extend_from_slice(hash);
                raw
            }
        }
    }

    /// Builds the typed value from a version and a length-checked payload.
    pub fn from_payload(version: VersionByte, payload: &[u8]) -> Result<Self, StrKeyError> {
        if !version.payload_len().accepts(payload.len()) {
            return Err(StrKeyError::InvalidLength {
                version,
                len: payload.len(),
            });
        }
        Ok(match version {
            VersionByte::AccountId => Self::AccountId(to_array(version, payload)?),
            VersionByte::SecretSeed => Self::SecretSeed(to_array(version, payload)?),
            VersionByte::PreAuthTx => Self::PreAuthTx(to_array(version, payload)?),
            VersionByte::Sha256Hash => Self::Sha256Hash(to_array(version, payload)?),
            VersionByte::Contract => Self::Contract(to_array(version, payload)?),
            VersionByte::LiquidityPool => Self::LiquidityPool(to_array(version, payload)?),
            VersionByte::MuxedAccount => {
                let ed25519 = to_array(version, &payload[..32])?;
                let mut id = [0u8; 8];
                id.copy_from_slice(&payload[32..40]);
                Self::MuxedAccount {
                    ed25519,
                    id: u64::from_be_bytes(id),
                }
            }
            VersionByte::SignedPayload => Self::SignedPayload(SignedPayload::from_raw(payload)?),
            VersionByte::ClaimableBalance => {
                if payload[0] != 0 {
                    return Err(StrKeyError::InvalidPayload("unknown claimable balance id type"));
                }
                Self::ClaimableBalance(to_array(version, &payload[1..])?)
            }
        })
    }
}

impl fmt::Display for StrKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode_unchecked(self.version(), &self.payload()))
    }
}

impl fmt::Debug for StrKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SecretSeed(_) => f.write_str("StrKey(S…redacted)"),
            other => write!(f, "StrKey({other})"),
        }
    }
}

impl FromStr for StrKey {
    type Err = StrKeyError;

    fn from_str(s: &str) -> Result<Self, StrKeyError> {
        let (version, payload) = decode(s)?;
        Self::from_payload(version, &payload)
    }
}

impl Serialize for StrKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StrKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
