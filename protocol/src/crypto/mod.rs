//! # Cryptographic Primitives
//!
//! Everything that touches key material or digests:
//!
//! - **Ed25519** for account keys and signatures (`ed25519-dalek`).
//! - **SHA-256** for network ids, transaction hashes and derived ids (`sha2`).
//!
//! Everything here is a thin, typed wrapper around audited implementations.
//! If you're tempted to optimize these functions, please reconsider.

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::{sha256, sha256_concat, xdr_hash};
pub use keys::{KeyError, KeyPair};
pub use signatures::{signature_hint, signed_payload_hint, verify, verify_raw, SignatureError};
