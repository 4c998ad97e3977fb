//! Transactions bound to a network, with their signatures.
//!
//! [`Transaction`] and [`FeeBumpTransaction`] wrap the raw XDR structures
//! with the [`Network`] they are signed for and the signatures collected so
//! far. [`Envelope`] is the sum of the two and is what crosses the boundary
//! to submission code as base64.
//!
//! Legacy `ENVELOPE_TYPE_TX_V0` envelopes are read into V1 form. Their hash
//! is the hash of that V1 form (the network does the same), so their
//! signatures stay valid. They are written back as V0 as long as nothing
//! was changed that V0 cannot express.

use tracing::debug;

use super::error::{BuildError, SigningError};
use super::signing::{self, Signatures};
use crate::config::Network;
use crate::crypto::{sha256, KeyPair};
use crate::txrep::{self, TxrepError};
use crate::xdr::{
    self, ClaimableBalanceId, DecoratedSignature, FeeBumpTransactionEnvelope,
    FeeBumpTransactionInnerTx, Hash, HashIdPreimage, HashIdPreimageOperationId, Memo,
    MuxedAccount, Operation, OperationBody, Preconditions, TransactionEnvelope, TransactionExt,
    TransactionSignaturePayloadTaggedTransaction as Tagged, TransactionV0,
    TransactionV0Envelope, TransactionV0Ext, TransactionV1Envelope, XdrCodec, XdrError,
};

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A transaction, the network it is for, and its signatures.
///
/// Built by [`TransactionBuilder`](super::TransactionBuilder) or decoded
/// from an envelope. The inner transaction of a fee bump is handed out
/// *frozen*: it can be inspected and hashed, but every mutating call fails
/// with [`SigningError::InnerTransactionFrozen`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    tx: xdr::Transaction,
    signatures: Signatures,
    network: Network,
    legacy_v0: bool,
    frozen: bool,
}

impl Transaction {
    /// An unsigned transaction.
    pub fn new(tx: xdr::Transaction, network: Network) -> Self {
        Self {
            tx,
            signatures: Signatures::new(),
            network,
            legacy_v0: false,
            frozen: false,
        }
    }

    pub fn from_v1_envelope(envelope: TransactionV1Envelope, network: Network) -> Self {
        Self {
            tx: envelope.tx,
            signatures: envelope.signatures,
            network,
            legacy_v0: false,
            frozen: false,
        }
    }

    /// Lifts a V0 envelope. Signatures carry over unchanged.
    pub fn from_v0_envelope(envelope: TransactionV0Envelope, network: Network) -> Self {
        Self {
            tx: envelope.tx.into(),
            signatures: envelope.signatures,
            network,
            legacy_v0: true,
            frozen: false,
        }
    }

    // -- Accessors -----------------------------------------------------------

    pub fn as_xdr(&self) -> &xdr::Transaction {
        &self.tx
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn signatures(&self) -> &[DecoratedSignature] {
        self.signatures.as_slice()
    }

    pub fn source_account(&self) -> String {
        self.tx.source_account.to_strkey()
    }

    pub fn fee(&self) -> u32 {
        self.tx.fee
    }

    pub fn sequence_number(&self) -> i64 {
        self.tx.seq_num
    }

    pub fn memo(&self) -> &Memo {
        &self.tx.memo
    }

    pub fn preconditions(&self) -> &Preconditions {
        &self.tx.cond
    }

    pub fn operations(&self) -> &[Operation] {
        self.tx.operations.as_slice()
    }

    /// The Soroban resource fee included in [`fee`](Self::fee), 0 for
    /// classic transactions.
    pub fn resource_fee(&self) -> i64 {
        self.tx.soroban_data().map_or(0, |data| data.resource_fee)
    }

    /// True for the inner view of a fee bump.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub(crate) fn into_frozen(mut self) -> Self {
        self.frozen = true;
        self
    }

    // -- Hashing -------------------------------------------------------------

    fn tagged(&self) -> Tagged {
        Tagged::Tx(self.tx.clone())
    }

    /// `SHA256(passphrase) || ENVELOPE_TYPE_TX || XDR(tx)`.
    pub fn signature_base(&self) -> Result<Vec<u8>, XdrError> {
        signing::signature_base(&self.network, self.tagged())
    }

    /// The transaction hash: SHA-256 of the signature base.
    pub fn hash(&self) -> Result<Hash, XdrError> {
        signing::transaction_hash(&self.network, self.tagged())
    }

    pub fn hash_hex(&self) -> Result<String, XdrError> {
        Ok(self.hash()?.to_hex())
    }

    // -- Signing -------------------------------------------------------------

    fn ensure_mutable(&self) -> Result<(), SigningError> {
        if self.frozen {
            return Err(SigningError::InnerTransactionFrozen);
        }
        signing::ensure_room(&self.signatures)
    }

    /// Signs the transaction hash and appends the decorated signature.
    ///
    /// Fails without touching the envelope when the transaction is frozen,
    /// the signature list is full, or `signer` holds no secret key.
    pub fn sign(&mut self, signer: &KeyPair) -> Result<(), SigningError> {
        self.ensure_mutable()?;
        let signature = signing::sign_hash(signer, &self.hash()?)?;
        signing::append_signature(&mut self.signatures, signature)
    }

    /// Appends the preimage of a hash-x signer.
    pub fn sign_hash_x(&mut self, preimage: &[u8]) -> Result<(), SigningError> {
        self.ensure_mutable()?;
        let signature = signing::hash_x_signature(preimage)?;
        signing::append_signature(&mut self.signatures, signature)
    }

    /// Appends a signature made elsewhere (a hardware wallet, a co-signer)
    /// after checking it against `public_key` and this transaction's hash.
    pub fn add_signature(&mut self, public_key: &str, signature: &[u8]) -> Result<(), SigningError> {
        self.ensure_mutable()?;
        let signature = signing::external_signature(public_key, signature, &self.hash()?)?;
        signing::append_signature(&mut self.signatures, signature)
    }

    /// Appends an already decorated signature without checking it.
    pub fn add_decorated_signature(
        &mut self,
        signature: DecoratedSignature,
    ) -> Result<(), SigningError> {
        self.ensure_mutable()?;
        signing::append_signature(&mut self.signatures, signature)
    }

    /// The candidates whose signature is present and valid.
    pub fn verify_signatures<'a>(&self, candidates: &'a [KeyPair]) -> Result<Vec<&'a KeyPair>, XdrError> {
        Ok(signing::verify_signatures(
            &self.hash()?,
            self.signatures(),
            candidates,
        ))
    }

    // -- Derived ids ---------------------------------------------------------

    /// The id of the claimable balance created by the operation at
    /// `op_index`. Only defined for `CREATE_CLAIMABLE_BALANCE` operations.
    pub fn claimable_balance_id(&self, op_index: usize) -> Result<ClaimableBalanceId, BuildError> {
        match self.operations().get(op_index) {
            Some(Operation {
                body: OperationBody::CreateClaimableBalance(_),
                ..
            }) => {}
            _ => {
                return Err(BuildError::InvalidOperation(format!(
                    "operation {op_index} is not a claimable balance creation"
                )))
            }
        }
        let preimage = HashIdPreimage::OpId(HashIdPreimageOperationId {
            source_account: self.tx.source_account.account_id(),
            seq_num: self.tx.seq_num,
            op_num: op_index as u32,
        });
        Ok(ClaimableBalanceId::V0(Hash(sha256(&preimage.to_xdr()?))))
    }

    // -- Envelope ------------------------------------------------------------

    /// The V0 form, if this transaction came from one and still fits it.
    fn as_v0(&self) -> Option<TransactionV0> {
        if !self.legacy_v0 {
            return None;
        }
        let time_bounds = match &self.tx.cond {
            Preconditions::None => None,
            Preconditions::Time(tb) => Some(tb.clone()),
            Preconditions::V2(_) => return None,
        };
        let source = match &self.tx.source_account {
            MuxedAccount::Ed25519(key) => key.clone(),
            MuxedAccount::MuxedEd25519(_) => return None,
        };
        if !matches!(self.tx.ext, TransactionExt::V0) {
            return None;
        }
        Some(TransactionV0 {
            source_account_ed25519: source,
            fee: self.tx.fee,
            seq_num: self.tx.seq_num,
            time_bounds,
            memo: self.tx.memo.clone(),
            operations: self.tx.operations.clone(),
            ext: TransactionV0Ext::V0,
        })
    }

    /// The V1 envelope, regardless of how the transaction was read.
    pub fn to_v1_envelope(&self) -> TransactionV1Envelope {
        TransactionV1Envelope {
            tx: self.tx.clone(),
            signatures: self.signatures.clone(),
        }
    }

    pub fn to_envelope(&self) -> TransactionEnvelope {
        match self.as_v0() {
            Some(tx) => TransactionEnvelope::TxV0(TransactionV0Envelope {
                tx,
                signatures: self.signatures.clone(),
            }),
            None => TransactionEnvelope::Tx(self.to_v1_envelope()),
        }
    }

    pub fn to_xdr_base64(&self) -> Result<String, XdrError> {
        self.to_envelope().to_xdr_base64()
    }
}

// ---------------------------------------------------------------------------
// FeeBumpTransaction
// ---------------------------------------------------------------------------

/// A fee bump wrapping a V1 inner envelope.
///
/// Built by [`FeeBumpBuilder`](super::FeeBumpBuilder) or decoded. The inner
/// envelope is part of the signed data and is never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeBumpTransaction {
    tx: xdr::FeeBumpTransaction,
    signatures: Signatures,
    network: Network,
}

impl FeeBumpTransaction {
    pub fn new(tx: xdr::FeeBumpTransaction, network: Network) -> Self {
        Self {
            tx,
            signatures: Signatures::new(),
            network,
        }
    }

    pub fn from_envelope(envelope: FeeBumpTransactionEnvelope, network: Network) -> Self {
        Self {
            tx: envelope.tx,
            signatures: envelope.signatures,
            network,
        }
    }

    pub fn as_xdr(&self) -> &xdr::FeeBumpTransaction {
        &self.tx
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn signatures(&self) -> &[DecoratedSignature] {
        self.signatures.as_slice()
    }

    pub fn fee_source(&self) -> String {
        self.tx.fee_source.to_strkey()
    }

    /// Total fee the fee source pays, in stroops.
    pub fn fee(&self) -> i64 {
        self.tx.fee
    }

    /// A frozen copy of the inner transaction with its signatures.
    pub fn inner_transaction(&self) -> Transaction {
        let FeeBumpTransactionInnerTx::Tx(inner) = &self.tx.inner_tx;
        Transaction::from_v1_envelope(inner.clone(), self.network.clone()).into_frozen()
    }

    fn tagged(&self) -> Tagged {
        Tagged::TxFeeBump(self.tx.clone())
    }

    /// `SHA256(passphrase) || ENVELOPE_TYPE_TX_FEE_BUMP || XDR(fee bump)`.
    pub fn signature_base(&self) -> Result<Vec<u8>, XdrError> {
        signing::signature_base(&self.network, self.tagged())
    }

    pub fn hash(&self) -> Result<Hash, XdrError> {
        signing::transaction_hash(&self.network, self.tagged())
    }

    pub fn hash_hex(&self) -> Result<String, XdrError> {
        Ok(self.hash()?.to_hex())
    }

    /// Signs the fee bump hash. Only the outer signature list grows.
    pub fn sign(&mut self, signer: &KeyPair) -> Result<(), SigningError> {
        signing::ensure_room(&self.signatures)?;
        let signature = signing::sign_hash(signer, &self.hash()?)?;
        signing::append_signature(&mut self.signatures, signature)
    }

    pub fn sign_hash_x(&mut self, preimage: &[u8]) -> Result<(), SigningError> {
        signing::ensure_room(&self.signatures)?;
        let signature = signing::hash_x_signature(preimage)?;
        signing::append_signature(&mut self.signatures, signature)
    }

    pub fn add_signature(&mut self, public_key: &str, signature: &[u8]) -> Result<(), SigningError> {
        signing::ensure_room(&self.signatures)?;
        let signature = signing::external_signature(public_key, signature, &self.hash()?)?;
        signing::append_signature(&mut self.signatures, signature)
    }

    pub fn verify_signatures<'a>(&self, candidates: &'a [KeyPair]) -> Result<Vec<&'a KeyPair>, XdrError> {
        Ok(signing::verify_signatures(
            &self.hash()?,
            self.signatures(),
            candidates,
        ))
    }

    pub fn to_envelope(&self) -> TransactionEnvelope {
        TransactionEnvelope::TxFeeBump(FeeBumpTransactionEnvelope {
            tx: self.tx.clone(),
            signatures: self.signatures.clone(),
        })
    }

    pub fn to_xdr_base64(&self) -> Result<String, XdrError> {
        self.to_envelope().to_xdr_base64()
    }
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Any envelope that can be submitted.
///
/// ```
/// use stellar_base::config::Network;
/// use stellar_base::crypto::KeyPair;
/// use stellar_base::transaction::{operations, Account, Envelope, TransactionBuilder};
/// use stellar_base::xdr::Asset;
///
/// let source = KeyPair::random();
/// let mut account = Account::new(&source.account_id(), 100).unwrap();
/// let tx = TransactionBuilder::new(&mut account, Network::testnet())
///     .add_operation(operations::payment(&source.account_id(), &Asset::native(), "1").unwrap())
///     .build()
///     .unwrap();
///
/// let mut envelope = Envelope::from(tx);
/// envelope.sign(&source).unwrap();
/// let b64 = envelope.to_xdr_base64().unwrap();
/// assert_eq!(Envelope::from_xdr_base64(&b64, Network::testnet()).unwrap(), envelope);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope {
    Transaction(Transaction),
    FeeBump(FeeBumpTransaction),
}

impl Envelope {
    pub fn from_xdr(envelope: TransactionEnvelope, network: Network) -> Self {
        match envelope {
            TransactionEnvelope::TxV0(v0) => {
                Self::Transaction(Transaction::from_v0_envelope(v0, network))
            }
            TransactionEnvelope::Tx(v1) => {
                Self::Transaction(Transaction::from_v1_envelope(v1, network))
            }
            TransactionEnvelope::TxFeeBump(fb) => {
                Self::FeeBump(FeeBumpTransaction::from_envelope(fb, network))
            }
        }
    }

    /// Decodes a base64 envelope for `network`.
    pub fn from_xdr_base64(encoded: &str, network: Network) -> Result<Self, XdrError> {
        let envelope = TransactionEnvelope::from_xdr_base64(encoded)?;
        debug!(kind = envelope.discriminant().name(), "envelope decoded");
        Ok(Self::from_xdr(envelope, network))
    }

    pub fn to_envelope(&self) -> TransactionEnvelope {
        match self {
            Self::Transaction(tx) => tx.to_envelope(),
            Self::FeeBump(fb) => fb.to_envelope(),
        }
    }

    pub fn to_xdr_base64(&self) -> Result<String, XdrError> {
        self.to_envelope().to_xdr_base64()
    }

    pub fn network(&self) -> &Network {
        match self {
            Self::Transaction(tx) => tx.network(),
            Self::FeeBump(fb) => fb.network(),
        }
    }

    pub fn signatures(&self) -> &[DecoratedSignature] {
        match self {
            Self::Transaction(tx) => tx.signatures(),
            Self::FeeBump(fb) => fb.signatures(),
        }
    }

    pub fn signature_base(&self) -> Result<Vec<u8>, XdrError> {
        match self {
            Self::Transaction(tx) => tx.signature_base(),
            Self::FeeBump(fb) => fb.signature_base(),
        }
    }

    pub fn hash(&self) -> Result<Hash, XdrError> {
        match self {
            Self::Transaction(tx) => tx.hash(),
            Self::FeeBump(fb) => fb.hash(),
        }
    }

    pub fn sign(&mut self, signer: &KeyPair) -> Result<(), SigningError> {
        match self {
            Self::Transaction(tx) => tx.sign(signer),
            Self::FeeBump(fb) => fb.sign(signer),
        }
    }

    pub fn verify_signatures<'a>(&self, candidates: &'a [KeyPair]) -> Result<Vec<&'a KeyPair>, XdrError> {
        match self {
            Self::Transaction(tx) => tx.verify_signatures(candidates),
            Self::FeeBump(fb) => fb.verify_signatures(candidates),
        }
    }

    pub fn to_txrep(&self) -> String {
        txrep::to_txrep(&self.to_envelope())
    }

    pub fn from_txrep(text: &str, network: Network) -> Result<Self, TxrepError> {
        Ok(Self::from_xdr(txrep::from_txrep(text)?, network))
    }
}

impl From<Transaction> for Envelope {
    fn from(tx: Transaction) -> Self {
        Self::Transaction(tx)
    }
}

impl From<FeeBumpTransaction> for Envelope {
    fn from(fb: FeeBumpTransaction) -> Self {
        Self::FeeBump(fb)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
