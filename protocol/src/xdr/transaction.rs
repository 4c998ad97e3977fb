//! Transactions, envelopes and the byte strings that get hashed.

use super::bounded::{StringM, VecM};
use super::asset::Asset;
use super::keys::{AccountId, DecoratedSignature, Hash, MuxedAccount, PoolId, SignerKey, Uint256};
use super::ledger::{Duration, SequenceNumber, TimePoint};
use super::operation::Operation;
use super::soroban::{ContractIdPreimage, SorobanAuthorizedInvocation, SorobanTransactionData};

/// Maximum operations per transaction.
pub const MAX_OPS_PER_TX: u32 = 100;

/// Maximum signatures on one envelope.
pub const MAX_ENVELOPE_SIGNATURES: u32 = 20;

/// Maximum bytes of a text memo.
pub const MAX_MEMO_TEXT_LEN: u32 = 28;

xdr_enum! {
    /// Domain separation tags for everything that gets hashed or signed.
    pub enum EnvelopeType {
        TxV0 = 0 => "ENVELOPE_TYPE_TX_V0",
        Scp = 1 => "ENVELOPE_TYPE_SCP",
        Tx = 2 => "ENVELOPE_TYPE_TX",
        Auth = 3 => "ENVELOPE_TYPE_AUTH",
        ScpValue = 4 => "ENVELOPE_TYPE_SCPVALUE",
        TxFeeBump = 5 => "ENVELOPE_TYPE_TX_FEE_BUMP",
        OpId = 6 => "ENVELOPE_TYPE_OP_ID",
        PoolRevokeOpId = 7 => "ENVELOPE_TYPE_POOL_REVOKE_OP_ID",
        ContractId = 8 => "ENVELOPE_TYPE_CONTRACT_ID",
        SorobanAuthorization = 9 => "ENVELOPE_TYPE_SOROBAN_AUTHORIZATION",
    }
}

// ---------------------------------------------------------------------------
// Memo and preconditions
// ---------------------------------------------------------------------------

xdr_enum! {
    pub enum MemoType {
        None = 0 => "MEMO_NONE",
        Text = 1 => "MEMO_TEXT",
        Id = 2 => "MEMO_ID",
        Hash = 3 => "MEMO_HASH",
        Return = 4 => "MEMO_RETURN",
    }
}

xdr_union! {
    pub enum Memo(MemoType, "type") {
        MemoType::None => None,
        MemoType::Text => Text(StringM<MAX_MEMO_TEXT_LEN>, "text"),
        MemoType::Id => Id(u64, "id"),
        MemoType::Hash => Hash(Hash, "hash"),
        MemoType::Return => Return(Hash, "retHash"),
    }
}

impl Default for Memo {
    fn default() -> Self {
        Self::None
    }
}

xdr_struct! {
    /// Close-time window, in unix seconds. A max of 0 means no upper bound.
    pub struct TimeBounds {
        pub min_time: TimePoint => "minTime",
        pub max_time: TimePoint => "maxTime",
    }
}

xdr_struct! {
    /// Ledger window. A max of 0 means no upper bound.
    pub struct LedgerBounds {
        pub min_ledger: u32 => "minLedger",
        pub max_ledger: u32 => "maxLedger",
    }
}

xdr_struct! {
    pub struct PreconditionsV2 {
        pub time_bounds: Option<TimeBounds> => "timeBounds",
        pub ledger_bounds: Option<LedgerBounds> => "ledgerBounds",
        pub min_seq_num: Option<SequenceNumber> => "minSeqNum",
        pub min_seq_age: Duration => "minSeqAge",
        pub min_seq_ledger_gap: u32 => "minSeqLedgerGap",
        pub extra_signers: VecM<SignerKey, 2> => "extraSigners",
    }
}

xdr_enum! {
    pub enum PreconditionType {
        None = 0 => "PRECOND_NONE",
        Time = 1 => "PRECOND_TIME",
        V2 = 2 => "PRECOND_V2",
    }
}

xdr_union! {
    pub enum Preconditions(PreconditionType, "type") {
        PreconditionType::None => None,
        PreconditionType::Time => Time(TimeBounds, "timeBounds"),
        PreconditionType::V2 => V2(PreconditionsV2, "v2"),
    }
}

impl Preconditions {
    pub fn time_bounds(&self) -> Option<&TimeBounds> {
        match self {
            Self::None => None,
            Self::Time(tb) => Some(tb),
            Self::V2(v2) => v2.time_bounds.as_ref(),
        }
    }
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

xdr_union! {
    pub enum TransactionV0Ext(i32, "v") {
        0 => V0,
    }
}

xdr_struct! {
    /// The pre-protocol-13 transaction layout, still accepted on the wire.
    pub struct TransactionV0 {
        pub source_account_ed25519: Uint256 => "sourceAccountEd25519",
        pub fee: u32 => "fee",
        pub seq_num: SequenceNumber => "seqNum",
        pub time_bounds: Option<TimeBounds> => "timeBounds",
        pub memo: Memo => "memo",
        pub operations: VecM<Operation, MAX_OPS_PER_TX> => "operations",
        pub ext: TransactionV0Ext => "ext",
    }
}

xdr_struct! {
    pub struct TransactionV0Envelope {
        pub tx: TransactionV0 => "tx",
        pub signatures: VecM<DecoratedSignature, MAX_ENVELOPE_SIGNATURES> => "signatures",
    }
}

xdr_union! {
    pub enum TransactionExt(i32, "v") {
        0 => V0,
        1 => V1(SorobanTransactionData, "sorobanData"),
    }
}

xdr_struct! {
    pub struct Transaction {
        pub source_account: MuxedAccount => "sourceAccount",
        pub fee: u32 => "fee",
        pub seq_num: SequenceNumber => "seqNum",
        pub cond: Preconditions => "cond",
        pub memo: Memo => "memo",
        pub operations: VecM<Operation, MAX_OPS_PER_TX> => "operations",
        pub ext: TransactionExt => "ext",
    }
}

impl Transaction {
    pub fn soroban_data(&self) -> Option<&SorobanTransactionData> {
        match &self.ext {
            TransactionExt::V0 => None,
            TransactionExt::V1(data) => Some(data),
        }
    }
}

impl From<TransactionV0> for Transaction {
    /// Lifts a v0 transaction into the current layout. Field values carry
    /// over unchanged, so the v1 form hashes to the same id on the network.
    fn from(v0: TransactionV0) -> Self {
        Self {
            source_account: MuxedAccount::Ed25519(v0.source_account_ed25519),
            fee: v0.fee,
            seq_num: v0.seq_num,
            cond: match v0.time_bounds {
                Some(tb) => Preconditions::Time(tb),
                None => Preconditions::None,
            },
            memo: v0.memo,
            operations: v0.operations,
            ext: TransactionExt::V0,
        }
    }
}

xdr_struct! {
    pub struct TransactionV1Envelope {
        pub tx: Transaction => "tx",
        pub signatures: VecM<DecoratedSignature, MAX_ENVELOPE_SIGNATURES> => "signatures",
    }
}

xdr_union! {
    pub enum FeeBumpTransactionInnerTx(EnvelopeType, "type") {
        EnvelopeType::Tx => Tx(TransactionV1Envelope, "tx"),
    }
}

xdr_union! {
    pub enum FeeBumpTransactionExt(i32, "v") {
        0 => V0,
    }
}

xdr_struct! {
    pub struct FeeBumpTransaction {
        pub fee_source: MuxedAccount => "feeSource",
        pub fee: i64 => "fee",
        pub inner_tx: FeeBumpTransactionInnerTx => "innerTx",
        pub ext: FeeBumpTransactionExt => "ext",
    }
}

xdr_struct! {
    pub struct FeeBumpTransactionEnvelope {
        pub tx: FeeBumpTransaction => "tx",
        pub signatures: VecM<DecoratedSignature, MAX_ENVELOPE_SIGNATURES> => "signatures",
    }
}

xdr_union! {
    /// What actually goes over the wire.
    ///
    /// The two plain arms lay their fields out at the top level of the text
    /// form (`tx.fee`, `signatures.len`); the fee bump nests under `feeBump`.
    pub enum TransactionEnvelope(EnvelopeType, "type") {
        EnvelopeType::TxV0 => TxV0(TransactionV0Envelope, ""),
        EnvelopeType::Tx => Tx(TransactionV1Envelope, ""),
        EnvelopeType::TxFeeBump => TxFeeBump(FeeBumpTransactionEnvelope, "feeBump"),
    }
}

impl TransactionEnvelope {
    pub fn signatures(&self) -> &VecM<DecoratedSignature, MAX_ENVELOPE_SIGNATURES> {
        match self {
            Self::TxV0(e) => &e.signatures,
            Self::Tx(e) => &e.signatures,
            Self::TxFeeBump(e) => &e.signatures,
        }
    }
}

// ---------------------------------------------------------------------------
// Hash preimages
// ---------------------------------------------------------------------------

xdr_union! {
    @codec
    pub enum TransactionSignaturePayloadTaggedTransaction(EnvelopeType, "type") {
        EnvelopeType::Tx => Tx(Transaction, "tx"),
        EnvelopeType::TxFeeBump => TxFeeBump(FeeBumpTransaction, "feeBump"),
    }
}

xdr_struct! {
    @codec
    /// The signature base: network id, envelope tag, transaction.
    pub struct TransactionSignaturePayload {
        pub network_id: Hash => "networkId",
        pub tagged_transaction: TransactionSignaturePayloadTaggedTransaction => "taggedTransaction",
    }
}

xdr_struct! {
    @codec
    pub struct HashIdPreimageOperationId {
        pub source_account: AccountId => "sourceAccount",
        pub seq_num: SequenceNumber => "seqNum",
        pub op_num: u32 => "opNum",
    }
}

xdr_struct! {
    @codec
    pub struct HashIdPreimageRevokeId {
        pub source_account: AccountId => "sourceAccount",
        pub seq_num: SequenceNumber => "seqNum",
        pub op_num: u32 => "opNum",
        pub liquidity_pool_id: PoolId => "liquidityPoolID",
        pub asset: Asset => "asset",
    }
}

xdr_struct! {
    @codec
    pub struct HashIdPreimageContractId {
        pub network_id: Hash => "networkID",
        pub contract_id_preimage: ContractIdPreimage => "contractIDPreimage",
    }
}

xdr_struct! {
    @codec
    pub struct HashIdPreimageSorobanAuthorization {
        pub network_id: Hash => "networkID",
        pub nonce: i64 => "nonce",
        pub signature_expiration_ledger: u32 => "signatureExpirationLedger",
        pub invocation: SorobanAuthorizedInvocation => "invocation",
    }
}

xdr_union! {
    @codec
    /// Preimages of derived identifiers (balance ids, contract ids) and of
    /// Soroban authorization signatures.
    pub enum HashIdPreimage(EnvelopeType, "type") {
        EnvelopeType::OpId => OpId(HashIdPreimageOperationId, "operationID"),
        EnvelopeType::PoolRevokeOpId => PoolRevokeOpId(HashIdPreimageRevokeId, "revokeID"),
        EnvelopeType::ContractId => ContractId(HashIdPreimageContractId, "contractID"),
        EnvelopeType::SorobanAuthorization => SorobanAuthorization(HashIdPreimageSorobanAuthorization, "sorobanAuthorization"),
    }
}
