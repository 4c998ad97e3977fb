//! # Protocol Configuration & Constants
//!
//! Network passphrases and the protocol limits the builder and codec enforce.
//! If you're hardcoding one of these numbers somewhere else, move it here.
//!
//! The network is never global state. Every operation that depends on it
//! (signing, hashing, fee bumps, contract ids) takes a [`Network`] argument.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

// ---------------------------------------------------------------------------
// Networks
// ---------------------------------------------------------------------------

/// Passphrase of the public network.
pub const PUBLIC_PASSPHRASE: &str = "Public Global Stellar Network ; September 2015";

/// Passphrase of the test network.
pub const TESTNET_PASSPHRASE: &str = "Test SDF Network ; September 2015";

/// Passphrase of the future network, where upcoming protocol versions land first.
pub const FUTURENET_PASSPHRASE: &str = "Test SDF Future Network ; October 2022";

/// Passphrase used by standalone quickstart nodes.
pub const STANDALONE_PASSPHRASE: &str = "Standalone Network ; February 2017";

/// A network, identified by its passphrase.
///
/// The network id is SHA-256 of the passphrase. It prefixes every signature
/// base, so a transaction signed for one network is worthless on another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Network {
    passphrase: String,
}

impl Network {
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self {
            passphrase: passphrase.into(),
        }
    }

    pub fn public() -> Self {
        Self::new(PUBLIC_PASSPHRASE)
    }

    pub fn testnet() -> Self {
        Self::new(TESTNET_PASSPHRASE)
    }

    pub fn futurenet() -> Self {
        Self::new(FUTURENET_PASSPHRASE)
    }

    pub fn standalone() -> Self {
        Self::new(STANDALONE_PASSPHRASE)
    }

    /// Resolves `public`, `testnet`, `futurenet` or `standalone`; anything
    /// else is taken as a literal passphrase.
    pub fn from_name_or_passphrase(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "public" | "pubnet" | "mainnet" => Self::public(),
            "testnet" => Self::testnet(),
            "futurenet" => Self::futurenet(),
            "standalone" | "local" => Self::standalone(),
            _ => Self::new(value),
        }
    }

    pub fn passphrase(&self) -> &str {
        &self.passphrase
    }

    /// SHA-256 of the passphrase.
    pub fn network_id(&self) -> [u8; 32] {
        Sha256::digest(self.passphrase.as_bytes()).into()
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::testnet()
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.passphrase)
    }
}

// ---------------------------------------------------------------------------
// Fees & Amounts
// ---------------------------------------------------------------------------

/// Minimum per-operation fee in stroops.
pub const BASE_FEE: u32 = 100;

/// Stroops in one unit of any asset. Amounts carry 7 decimal places.
pub const STROOPS_PER_UNIT: i64 = 10_000_000;

/// Decimal places in a textual amount.
pub const AMOUNT_DECIMALS: usize = 7;

// ---------------------------------------------------------------------------
// Transaction Limits
// ---------------------------------------------------------------------------

/// A transaction must carry at least one operation...
pub const MIN_OPERATIONS: usize = 1;

/// ...and no more than this many.
pub const MAX_OPERATIONS: usize = 100;

/// Text memos are at most 28 bytes of UTF-8.
pub const MEMO_TEXT_MAX: usize = 28;

/// Signatures an envelope may carry.
pub const MAX_SIGNATURES: usize = 20;

/// Extra signer keys a `PRECOND_V2` precondition may require.
pub const MAX_EXTRA_SIGNERS: usize = 2;

// ---------------------------------------------------------------------------
// Decoding Limits
// ---------------------------------------------------------------------------

/// Default maximum nesting depth for XDR decoding.
///
/// Decoding recurses once per nested struct or union, so this bound also
/// bounds stack use. At this depth an unoptimized build stays well inside
/// the 2 MiB stack of a spawned thread. An envelope uses about eight levels
/// before its first contract value starts. Callers raising the bound through
/// [`XdrLimits`](crate::xdr::XdrLimits) should decode on a thread with a
/// proportionally larger stack.
pub const DEFAULT_XDR_DEPTH_LIMIT: u32 = 128;

/// Default maximum XDR input size: 16 MiB.
pub const DEFAULT_XDR_LEN_LIMIT: usize = 16 * 1024 * 1024;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_network_ids() {
        assert_eq!(
            hex::encode(Network::testnet().network_id()),
            "cee0302d59844d32bdca915c8203dd44b33fbb7edc19051ea37abedf28ecd472"
        );
        assert_eq!(
            hex::encode(Network::public().network_id()),
            "7ac33997544e3175d266bd022439b22cdb16508c01163f26e5cb2a3e1045a979"
        );
    }

    #[test]
    fn test_network_names_resolve() {
        assert_eq!(Network::from_name_or_passphrase("Testnet"), Network::testnet());
        assert_eq!(Network::from_name_or_passphrase("public"), Network::public());
        assert_eq!(
            Network::from_name_or_passphrase("My Private Net"),
            Network::new("My Private Net")
        );
    }

    #[test]
    fn test_network_serializes_as_passphrase() {
        let json = serde_json::to_string(&Network::futurenet()).unwrap();
        assert_eq!(json, format!("\"{FUTURENET_PASSPHRASE}\""));
        let back: Network = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Network::futurenet());
    }

    #[test]
    fn test_limits_sanity() {
        assert!(MIN_OPERATIONS <= MAX_OPERATIONS);
        assert_eq!(MEMO_TEXT_MAX, 28);
        assert_eq!(STROOPS_PER_UNIT, 10i64.pow(AMOUNT_DECIMALS as u32));
    }
}
