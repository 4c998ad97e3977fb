//! Version bytes: the first decoded byte of a StrKey, which also fixes the
//! leading character of the encoded string.

use std::fmt;

/// Expected payload size for a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadLen {
    Exact(usize),
    /// Inclusive bounds, used by signed payloads.
    Range(usize, usize),
}

impl PayloadLen {
    pub fn accepts(self, len: usize) -> bool {
        match self {
            Self::Exact(n) => len == n,
            Self::Range(min, max) => (min..=max).contains(&len),
        }
    }
}

/// Every StrKey kind this crate understands.
///
/// The byte value is `index << 3`, which makes the base32 leading character
/// the same for every key of one kind (`6 << 3` always starts with `G`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionByte {
    /// `G…` — ed25519 public key / account id.
    AccountId,
    /// `S…` — ed25519 secret seed.
    SecretSeed,
    /// `T…` — pre-authorized transaction hash signer.
    PreAuthTx,
    /// `X…` — sha256 hash(x) signer.
    Sha256Hash,
    /// `M…` — multiplexed account (key + 64-bit id).
    MuxedAccount,
    /// `P…` — ed25519 signed payload signer.
    SignedPayload,
    /// `C…` — contract id.
    Contract,
    /// `L…` — liquidity pool id.
    LiquidityPool,
    /// `B…` — claimable balance id.
    ClaimableBalance,
}

impl VersionByte {
    pub const ALL: [VersionByte; 9] = [
        Self::AccountId,
        Self::SecretSeed,
        Self::PreAuthTx,
        Self::Sha256Hash,
        Self::MuxedAccount,
        Self::SignedPayload,
        Self::Contract,
        Self::LiquidityPool,
        Self::ClaimableBalance,
    ];

    /// The raw version byte.
    pub const fn byte(self) -> u8 {
        match self {
            Self::AccountId => 6 << 3,
            Self::SecretSeed => 18 << 3,
            Self::PreAuthTx => 19 << 3,
            Self::Sha256Hash => 23 << 3,
            Self::MuxedAccount => 12 << 3,
            Self::SignedPayload => 15 << 3,
            Self::Contract => 2 << 3,
            Self::LiquidityPool => 11 << 3,
            Self::ClaimableBalance => 1 << 3,
        }
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.byte() == byte)
    }

    /// Leading character of every string of this kind.
    pub const fn prefix(self) -> char {
        match self {
            Self::AccountId => 'G',
            Self::SecretSeed => 'S',
            Self::PreAuthTx => 'T',
            Self::Sha256Hash => 'X',
            Self::MuxedAccount => 'M',
            Self::SignedPayload => 'P',
            Self::Contract => 'C',
            Self::LiquidityPool => 'L',
            Self::ClaimableBalance => 'B',
        }
    }

    pub const fn payload_len(self) -> PayloadLen {
        match self {
            // 32-byte key followed by the big-endian 64-bit id.
            Self::MuxedAccount => PayloadLen::Exact(40),
            // 32-byte key, uint32 length, 1..=64 bytes padded to 4.
            Self::SignedPayload => PayloadLen::Range(32 + 4 + 4, 32 + 4 + 64),
            // One type byte, then the 32-byte hash.
            Self::ClaimableBalance => PayloadLen::Exact(33),
            _ => PayloadLen::Exact(32),
        }
    }
}

impl fmt::Display for VersionByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AccountId => "account id",
            Self::SecretSeed => "secret seed",
            Self::PreAuthTx => "pre-auth tx",
            Self::Sha256Hash => "sha256 hash",
            Self::MuxedAccount => "muxed account",
            Self::SignedPayload => "signed payload",
            Self::Contract => "contract",
            Self::LiquidityPool => "liquidity pool",
            Self::ClaimableBalance => "claimable balance",
        };
        f.write_str(name)
    }
}
