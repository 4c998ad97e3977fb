//! Signature base, transaction hashes and signature checks.
//!
//! What gets signed is never the transaction bytes themselves but the
//! SHA-256 of the **signature base**:
//!
//! ```text
//! SHA256(passphrase) || envelope type (4 bytes) || XDR(transaction)
//! ```
//!
//! which is exactly the XDR of a `TransactionSignaturePayload`. The envelope
//! type is `ENVELOPE_TYPE_TX` (2) for ordinary transactions and
//! `ENVELOPE_TYPE_TX_FEE_BUMP` (5) for fee bumps, so a signature for one can
//! never be replayed as the other, and the network id prefix keeps it off
//! other networks.
//!
//! Thresholds are not evaluated here. [`verify_signatures`] only tells which
//! of a set of candidate keys have signed.

use tracing::debug;

use super::error::SigningError;
use crate::config::{Network, MAX_SIGNATURES};
use crate::crypto::{sha256, KeyPair};
use crate::xdr::{
    DecoratedSignature, Hash, SignatureHint, TransactionSignaturePayload,
    TransactionSignaturePayloadTaggedTransaction, VecM, XdrCodec, XdrError,
    MAX_ENVELOPE_SIGNATURES,
};

/// The signature list of an envelope.
pub type Signatures = VecM<DecoratedSignature, MAX_ENVELOPE_SIGNATURES>;

/// The bytes whose SHA-256 every signer signs.
pub fn signature_base(
    network: &Network,
    tagged_transaction: TransactionSignaturePayloadTaggedTransaction,
) -> Result<Vec<u8>, XdrError> {
    TransactionSignaturePayload {
        network_id: Hash(network.network_id()),
        tagged_transaction,
    }
    .to_xdr()
}

/// SHA-256 of the signature base: the transaction hash.
pub fn transaction_hash(
    network: &Network,
    tagged_transaction: TransactionSignaturePayloadTaggedTransaction,
) -> Result<Hash, XdrError> {
    Ok(Hash(sha256(&signature_base(network, tagged_transaction)?)))
}

/// The candidates that have a valid signature over `hash` in `signatures`.
///
/// Signatures are matched to keys through their hints first, so a list of
/// twenty signatures and twenty candidates does not cost four hundred curve
/// operations.
pub fn verify_signatures<'a>(
    hash: &Hash,
    signatures: &[DecoratedSignature],
    candidates: &'a [KeyPair],
) -> Vec<&'a KeyPair> {
    candidates
        .iter()
        .filter(|candidate| {
            let hint = candidate.signature_hint();
            signatures
                .iter()
                .filter(|sig| sig.hint == hint)
                .any(|sig| candidate.verify(&hash.0, &sig.signature))
        })
        .collect()
}

/// Appends after checking the list still has room. On error the list is
/// untouched.
pub(crate) fn append_signature(
    signatures: &mut Signatures,
    signature: DecoratedSignature,
) -> Result<(), SigningError> {
    ensure_room(signatures)?;
    debug!(hint = %hex::encode(signature.hint.0), "signature appended");
    signatures.push(signature)?;
    Ok(())
}

/// Fails early when a list is already full, before anything is signed.
pub(crate) fn ensure_room(signatures: &Signatures) -> Result<(), SigningError> {
    if signatures.len() >= MAX_SIGNATURES {
        return Err(SigningError::TooManySignatures {
            max: MAX_SIGNATURES,
        });
    }
    Ok(())
}

/// Signs `hash` with `signer`.
pub(crate) fn sign_hash(signer: &KeyPair, hash: &Hash) -> Result<DecoratedSignature, SigningError> {
    signer.sign_decorated(&hash.0)
}

/// A hash-x signature: the preimage itself, hinted with the last four bytes
/// of its SHA-256.
pub(crate) fn hash_x_signature(preimage: &[u8]) -> Result<DecoratedSignature, SigningError> {
    let digest = sha256(preimage);
    let mut hint = [0u8; 4];
    hint.copy_from_slice(&digest[28..]);
    Ok(DecoratedSignature {
        hint: SignatureHint(hint),
        signature: preimage.try_into()?,
    })
}

/// A signature produced elsewhere, checked against `hash` before use.
pub(crate) fn external_signature(
    public_key: &str,
    signature: &[u8],
    hash: &Hash,
) -> Result<DecoratedSignature, SigningError> {
    let key = KeyPair::from_account_id(public_key)?;
    if !key.verify(&hash.0, signature) {
        return Err(SigningError::InvalidSignature(key.account_id()));
    }
    Ok(DecoratedSignature {
        hint: key.signature_hint(),
        signature: signature.try_into()?,
    })
}
