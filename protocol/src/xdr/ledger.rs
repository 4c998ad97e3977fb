//! Ledger entries, ledger keys and entry changes.
//!
//! Clients mostly meet these when decoding what the network sends back:
//! account snapshots, trust lines, offers, and the before/after entry
//! changes attached to transaction results. Ledger keys also show up inside
//! transactions, in Soroban footprints and revoke-sponsorship operations.
//!
//! Network configuration entries (`CONFIG_SETTING`) are keyed here but their
//! payloads are not modelled: decoding one fails with `UnknownDiscriminant`.

use super::asset::{
    Asset, Liabilities, LiquidityPoolConstantProductParameters, LiquidityPoolType, Price,
    TrustLineAsset,
};
use super::bounded::{BytesM, StringM, VecM};
use super::contract::{ScAddress, ScVal};
use super::keys::{AccountId, Hash, PoolId, Signer, Thresholds};

pub type String32 = StringM<32>;
pub type String64 = StringM<64>;
pub type DataValue = BytesM<64>;
pub type SequenceNumber = i64;
pub type TimePoint = u64;
pub type Duration = u64;

/// Maximum number of signers on one account.
pub const MAX_SIGNERS: u32 = 20;

xdr_union! {
    /// Reserved extension slot with no payload yet.
    pub enum ExtensionPoint(i32, "v") {
        0 => V0,
    }
}

xdr_enum! {
    pub enum LedgerEntryType {
        Account = 0 => "ACCOUNT",
        Trustline = 1 => "TRUSTLINE",
        Offer = 2 => "OFFER",
        Data = 3 => "DATA",
        ClaimableBalance = 4 => "CLAIMABLE_BALANCE",
        LiquidityPool = 5 => "LIQUIDITY_POOL",
        ContractData = 6 => "CONTRACT_DATA",
        ContractCode = 7 => "CONTRACT_CODE",
        ConfigSetting = 8 => "CONFIG_SETTING",
        Ttl = 9 => "TTL",
    }
}

xdr_enum! {
    /// Account flag bits.
    pub enum AccountFlags {
        AuthRequired = 1 => "AUTH_REQUIRED_FLAG",
        AuthRevocable = 2 => "AUTH_REVOCABLE_FLAG",
        AuthImmutable = 4 => "AUTH_IMMUTABLE_FLAG",
        AuthClawbackEnabled = 8 => "AUTH_CLAWBACK_ENABLED_FLAG",
    }
}

xdr_enum! {
    /// Trust line flag bits.
    pub enum TrustLineFlags {
        Authorized = 1 => "AUTHORIZED_FLAG",
        AuthorizedToMaintainLiabilities = 2 => "AUTHORIZED_TO_MAINTAIN_LIABILITIES_FLAG",
        TrustlineClawbackEnabled = 4 => "TRUSTLINE_CLAWBACK_ENABLED_FLAG",
    }
}

xdr_enum! {
    pub enum ClaimableBalanceFlags {
        ClawbackEnabled = 1 => "CLAIMABLE_BALANCE_CLAWBACK_ENABLED_FLAG",
    }
}

xdr_enum! {
    pub enum ContractDataDurability {
        Temporary = 0 => "TEMPORARY",
        Persistent = 1 => "PERSISTENT",
    }
}

xdr_enum! {
    pub enum ConfigSettingId {
        ContractMaxSizeBytes = 0 => "CONFIG_SETTING_CONTRACT_MAX_SIZE_BYTES",
        ContractComputeV0 = 1 => "CONFIG_SETTING_CONTRACT_COMPUTE_V0",
        ContractLedgerCostV0 = 2 => "CONFIG_SETTING_CONTRACT_LEDGER_COST_V0",
        ContractHistoricalDataV0 = 3 => "CONFIG_SETTING_CONTRACT_HISTORICAL_DATA_V0",
        ContractEventsV0 = 4 => "CONFIG_SETTING_CONTRACT_EVENTS_V0",
        ContractBandwidthV0 = 5 => "CONFIG_SETTING_CONTRACT_BANDWIDTH_V0",
        ContractCostParamsCpuInstructions = 6 => "CONFIG_SETTING_CONTRACT_COST_PARAMS_CPU_INSTRUCTIONS",
        ContractCostParamsMemoryBytes = 7 => "CONFIG_SETTING_CONTRACT_COST_PARAMS_MEMORY_BYTES",
        ContractDataKeySizeBytes = 8 => "CONFIG_SETTING_CONTRACT_DATA_KEY_SIZE_BYTES",
        ContractDataEntrySizeBytes = 9 => "CONFIG_SETTING_CONTRACT_DATA_ENTRY_SIZE_BYTES",
        StateArchival = 10 => "CONFIG_SETTING_STATE_ARCHIVAL",
        ContractExecutionLanes = 11 => "CONFIG_SETTING_CONTRACT_EXECUTION_LANES",
        LiveSorobanStateSizeWindow = 12 => "CONFIG_SETTING_LIVE_SOROBAN_STATE_SIZE_WINDOW",
        EvictionIterator = 13 => "CONFIG_SETTING_EVICTION_ITERATOR",
        ContractParallelComputeV0 = 14 => "CONFIG_SETTING_CONTRACT_PARALLEL_COMPUTE_V0",
        ContractLedgerCostExtV0 = 15 => "CONFIG_SETTING_CONTRACT_LEDGER_COST_EXT_V0",
        ScpTiming = 16 => "CONFIG_SETTING_SCP_TIMING",
    }
}

// ---------------------------------------------------------------------------
// Claimable balances
// ---------------------------------------------------------------------------

xdr_enum! {
    pub enum ClaimPredicateType {
        Unconditional = 0 => "CLAIM_PREDICATE_UNCONDITIONAL",
        And = 1 => "CLAIM_PREDICATE_AND",
        Or = 2 => "CLAIM_PREDICATE_OR",
        Not = 3 => "CLAIM_PREDICATE_NOT",
        BeforeAbsoluteTime = 4 => "CLAIM_PREDICATE_BEFORE_ABSOLUTE_TIME",
        BeforeRelativeTime = 5 => "CLAIM_PREDICATE_BEFORE_RELATIVE_TIME",
    }
}

xdr_union! {
    /// When a claimant may claim a balance. Recursive through and/or/not.
    pub enum ClaimPredicate(ClaimPredicateType, "type") {
        ClaimPredicateType::Unconditional => Unconditional,
        ClaimPredicateType::And => And(VecM<ClaimPredicate, 2>, "andPredicates"),
        ClaimPredicateType::Or => Or(VecM<ClaimPredicate, 2>, "orPredicates"),
        ClaimPredicateType::Not => Not(Option<Box<ClaimPredicate>>, "notPredicate"),
        ClaimPredicateType::BeforeAbsoluteTime => BeforeAbsoluteTime(i64, "absBefore"),
        ClaimPredicateType::BeforeRelativeTime => BeforeRelativeTime(i64, "relBefore"),
    }
}

xdr_enum! {
    pub enum ClaimantType {
        V0 = 0 => "CLAIMANT_TYPE_V0",
    }
}

xdr_struct! {
    pub struct ClaimantV0 {
        pub destination: AccountId => "destination",
        pub predicate: ClaimPredicate => "predicate",
    }
}

xdr_union! {
    pub enum Claimant(ClaimantType, "type") {
        ClaimantType::V0 => V0(ClaimantV0, "v0"),
    }
}

xdr_enum! {
    pub enum ClaimableBalanceIdType {
        V0 = 0 => "CLAIMABLE_BALANCE_ID_TYPE_V0",
    }
}

xdr_union! {
    pub enum ClaimableBalanceId(ClaimableBalanceIdType, "type") {
        ClaimableBalanceIdType::V0 => V0(Hash, "v0"),
    }
}

// ---------------------------------------------------------------------------
// Ledger keys
// ---------------------------------------------------------------------------

xdr_struct! {
    pub struct LedgerKeyAccount {
        pub account_id: AccountId => "accountID",
    }
}

xdr_struct! {
    pub struct LedgerKeyTrustLine {
        pub account_id: AccountId => "accountID",
        pub asset: TrustLineAsset => "asset",
    }
}

xdr_struct! {
    pub struct LedgerKeyOffer {
        pub seller_id: AccountId => "sellerID",
        pub offer_id: i64 => "offerID",
    }
}

xdr_struct! {
    pub struct LedgerKeyData {
        pub account_id: AccountId => "accountID",
        pub data_name: String64 => "dataName",
    }
}

xdr_struct! {
    pub struct LedgerKeyClaimableBalance {
        pub balance_id: ClaimableBalanceId => "balanceID",
    }
}

xdr_struct! {
    pub struct LedgerKeyLiquidityPool {
        pub liquidity_pool_id: PoolId => "liquidityPoolID",
    }
}

xdr_struct! {
    pub struct LedgerKeyContractData {
        pub contract: ScAddress => "contract",
        pub key: ScVal => "key",
        pub durability: ContractDataDurability => "durability",
    }
}

xdr_struct! {
    pub struct LedgerKeyContractCode {
        pub hash: Hash => "hash",
    }
}

xdr_struct! {
    pub struct LedgerKeyConfigSetting {
        pub config_setting_id: ConfigSettingId => "configSettingID",
    }
}

xdr_struct! {
    pub struct LedgerKeyTtl {
        pub key_hash: Hash => "keyHash",
    }
}

xdr_union! {
    /// Identifies one ledger entry.
    pub enum LedgerKey(LedgerEntryType, "type") {
        LedgerEntryType::Account => Account(LedgerKeyAccount, "account"),
        LedgerEntryType::Trustline => Trustline(LedgerKeyTrustLine, "trustLine"),
        LedgerEntryType::Offer => Offer(LedgerKeyOffer, "offer"),
        LedgerEntryType::Data => Data(LedgerKeyData, "data"),
        LedgerEntryType::ClaimableBalance => ClaimableBalance(LedgerKeyClaimableBalance, "claimableBalance"),
        LedgerEntryType::LiquidityPool => LiquidityPool(LedgerKeyLiquidityPool, "liquidityPool"),
        LedgerEntryType::ContractData => ContractData(LedgerKeyContractData, "contractData"),
        LedgerEntryType::ContractCode => ContractCode(LedgerKeyContractCode, "contractCode"),
        LedgerEntryType::ConfigSetting => ConfigSetting(LedgerKeyConfigSetting, "configSetting"),
        LedgerEntryType::Ttl => Ttl(LedgerKeyTtl, "ttl"),
    }
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

xdr_struct! {
    @codec
    pub struct AccountEntryExtensionV3 {
        pub ext: ExtensionPoint => "ext",
        pub seq_ledger: u32 => "seqLedger",
        pub seq_time: TimePoint => "seqTime",
    }
}

xdr_union! {
    @codec
    pub enum AccountEntryExtensionV2Ext(i32, "v") {
        0 => V0,
        3 => V3(AccountEntryExtensionV3, "v3"),
    }
}

xdr_struct! {
    @codec
    pub struct AccountEntryExtensionV2 {
        pub num_sponsored: u32 => "numSponsored",
        pub num_sponsoring: u32 => "numSponsoring",
        pub signer_sponsoring_ids: VecM<Option<AccountId>, MAX_SIGNERS> => "signerSponsoringIDs",
        pub ext: AccountEntryExtensionV2Ext => "ext",
    }
}

xdr_union! {
    @codec
    pub enum AccountEntryExtensionV1Ext(i32, "v") {
        0 => V0,
        2 => V2(AccountEntryExtensionV2, "v2"),
    }
}

xdr_struct! {
    @codec
    pub struct AccountEntryExtensionV1 {
        pub liabilities: Liabilities => "liabilities",
        pub ext: AccountEntryExtensionV1Ext => "ext",
    }
}

xdr_union! {
    @codec
    pub enum AccountEntryExt(i32, "v") {
        0 => V0,
        1 => V1(AccountEntryExtensionV1, "v1"),
    }
}

xdr_struct! {
    @codec
    pub struct AccountEntry {
        pub account_id: AccountId => "accountID",
        pub balance: i64 => "balance",
        pub seq_num: SequenceNumber => "seqNum",
        pub num_sub_entries: u32 => "numSubEntries",
        pub inflation_dest: Option<AccountId> => "inflationDest",
        pub flags: u32 => "flags",
        pub home_domain: String32 => "homeDomain",
        pub thresholds: Thresholds => "thresholds",
        pub signers: VecM<Signer, MAX_SIGNERS> => "signers",
        pub ext: AccountEntryExt => "ext",
    }
}

impl AccountEntry {
    /// Selling and buying liabilities, zero before the v1 extension.
    pub fn liabilities(&self) -> Liabilities {
        match &self.ext {
            AccountEntryExt::V0 => Liabilities { buying: 0, selling: 0 },
            AccountEntryExt::V1(v1) => v1.liabilities.clone(),
        }
    }

    /// Ledger and close time of the last sequence bump, when tracked.
    pub fn seq_ledger_and_time(&self) -> Option<(u32, TimePoint)> {
        let AccountEntryExt::V1(v1) = &self.ext else {
            return None;
        };
        let AccountEntryExtensionV1Ext::V2(v2) = &v1.ext else {
            return None;
        };
        match &v2.ext {
            AccountEntryExtensionV2Ext::V3(v3) => Some((v3.seq_ledger, v3.seq_time)),
            AccountEntryExtensionV2Ext::V0 => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Trust lines, offers, data
// ---------------------------------------------------------------------------

xdr_union! {
    @codec
    pub enum TrustLineEntryExtensionV2Ext(i32, "v") {
        0 => V0,
    }
}

xdr_struct! {
    @codec
    pub struct TrustLineEntryExtensionV2 {
        pub liquidity_pool_use_count: i32 => "liquidityPoolUseCount",
        pub ext: TrustLineEntryExtensionV2Ext => "ext",
    }
}

xdr_union! {
    @codec
    pub enum TrustLineEntryV1Ext(i32, "v") {
        0 => V0,
        2 => V2(TrustLineEntryExtensionV2, "v2"),
    }
}

xdr_struct! {
    @codec
    pub struct TrustLineEntryV1 {
        pub liabilities: Liabilities => "liabilities",
        pub ext: TrustLineEntryV1Ext => "ext",
    }
}

xdr_union! {
    @codec
    pub enum TrustLineEntryExt(i32, "v") {
        0 => V0,
        1 => V1(TrustLineEntryV1, "v1"),
    }
}

xdr_struct! {
    @codec
    pub struct TrustLineEntry {
        pub account_id: AccountId => "accountID",
        pub asset: TrustLineAsset => "asset",
        pub balance: i64 => "balance",
        pub limit: i64 => "limit",
        pub flags: u32 => "flags",
        pub ext: TrustLineEntryExt => "ext",
    }
}

xdr_union! {
    @codec
    pub enum OfferEntryExt(i32, "v") {
        0 => V0,
    }
}

xdr_struct! {
    @codec
    pub struct OfferEntry {
        pub seller_id: AccountId => "sellerID",
        pub offer_id: i64 => "offerID",
        pub selling: Asset => "selling",
        pub buying: Asset => "buying",
        pub amount: i64 => "amount",
        pub price: Price => "price",
        pub flags: u32 => "flags",
        pub ext: OfferEntryExt => "ext",
    }
}

xdr_union! {
    @codec
    pub enum DataEntryExt(i32, "v") {
        0 => V0,
    }
}

xdr_struct! {
    @codec
    pub struct DataEntry {
        pub account_id: AccountId => "accountID",
        pub data_name: String64 => "dataName",
        pub data_value: DataValue => "dataValue",
        pub ext: DataEntryExt => "ext",
    }
}

// ---------------------------------------------------------------------------
// Claimable balances and pools
// ---------------------------------------------------------------------------

xdr_union! {
    @codec
    pub enum ClaimableBalanceEntryExtensionV1Ext(i32, "v") {
        0 => V0,
    }
}

xdr_struct! {
    @codec
    pub struct ClaimableBalanceEntryExtensionV1 {
        pub ext: ClaimableBalanceEntryExtensionV1Ext => "ext",
        pub flags: u32 => "flags",
    }
}

xdr_union! {
    @codec
    pub enum ClaimableBalanceEntryExt(i32, "v") {
        0 => V0,
        1 => V1(ClaimableBalanceEntryExtensionV1, "v1"),
    }
}

xdr_struct! {
    @codec
    pub struct ClaimableBalanceEntry {
        pub balance_id: ClaimableBalanceId => "balanceID",
        pub claimants: VecM<Claimant, 10> => "claimants",
        pub asset: Asset => "asset",
        pub amount: i64 => "amount",
        pub ext: ClaimableBalanceEntryExt => "ext",
    }
}

xdr_struct! {
    @codec
    pub struct LiquidityPoolEntryConstantProduct {
        pub params: LiquidityPoolConstantProductParameters => "params",
        pub reserve_a: i64 => "reserveA",
        pub reserve_b: i64 => "reserveB",
        pub total_pool_shares: i64 => "totalPoolShares",
        pub pool_shares_trust_line_count: i64 => "poolSharesTrustLineCount",
    }
}

xdr_union! {
    @codec
    pub enum LiquidityPoolEntryBody(LiquidityPoolType, "type") {
        LiquidityPoolType::ConstantProduct => ConstantProduct(LiquidityPoolEntryConstantProduct, "constantProduct"),
    }
}

xdr_struct! {
    @codec
    pub struct LiquidityPoolEntry {
        pub liquidity_pool_id: PoolId => "liquidityPoolID",
        pub body: LiquidityPoolEntryBody => "body",
    }
}

// ---------------------------------------------------------------------------
// Contract storage
// ---------------------------------------------------------------------------

xdr_struct! {
    @codec
    pub struct ContractDataEntry {
        pub ext: ExtensionPoint => "ext",
        pub contract: ScAddress => "contract",
        pub key: ScVal => "key",
        pub durability: ContractDataDurability => "durability",
        pub val: ScVal => "val",
    }
}

xdr_struct! {
    @codec
    pub struct ContractCodeCostInputs {
        pub ext: ExtensionPoint => "ext",
        pub n_instructions: u32 => "nInstructions",
        pub n_functions: u32 => "nFunctions",
        pub n_globals: u32 => "nGlobals",
        pub n_table_entries: u32 => "nTableEntries",
        pub n_types: u32 => "nTypes",
        pub n_data_segments: u32 => "nDataSegments",
        pub n_elem_segments: u32 => "nElemSegments",
        pub n_imports: u32 => "nImports",
        pub n_exports: u32 => "nExports",
        pub n_data_segment_bytes: u32 => "nDataSegmentBytes",
    }
}

xdr_struct! {
    @codec
    pub struct ContractCodeEntryV1 {
        pub ext: ExtensionPoint => "ext",
        pub cost_inputs: ContractCodeCostInputs => "costInputs",
    }
}

xdr_union! {
    @codec
    pub enum ContractCodeEntryExt(i32, "v") {
        0 => V0,
        1 => V1(ContractCodeEntryV1, "v1"),
    }
}

xdr_struct! {
    @codec
    pub struct ContractCodeEntry {
        pub ext: ContractCodeEntryExt => "ext",
        pub hash: Hash => "hash",
        pub code: BytesM => "code",
    }
}

xdr_struct! {
    @codec
    pub struct TtlEntry {
        pub key_hash: Hash => "keyHash",
        pub live_until_ledger_seq: u32 => "liveUntilLedgerSeq",
    }
}

// ---------------------------------------------------------------------------
// Entries and changes
// ---------------------------------------------------------------------------

xdr_union! {
    @codec
    pub enum LedgerEntryData(LedgerEntryType, "type") {
        LedgerEntryType::Account => Account(AccountEntry, "account"),
        LedgerEntryType::Trustline => Trustline(TrustLineEntry, "trustLine"),
        LedgerEntryType::Offer => Offer(OfferEntry, "offer"),
        LedgerEntryType::Data => Data(DataEntry, "data"),
        LedgerEntryType::ClaimableBalance => ClaimableBalance(ClaimableBalanceEntry, "claimableBalance"),
        LedgerEntryType::LiquidityPool => LiquidityPool(LiquidityPoolEntry, "liquidityPool"),
        LedgerEntryType::ContractData => ContractData(ContractDataEntry, "contractData"),
        LedgerEntryType::ContractCode => ContractCode(ContractCodeEntry, "contractCode"),
        LedgerEntryType::Ttl => Ttl(TtlEntry, "ttl"),
    }
}

xdr_union! {
    @codec
    pub enum LedgerEntryExtensionV1Ext(i32, "v") {
        0 => V0,
    }
}

xdr_struct! {
    @codec
    pub struct LedgerEntryExtensionV1 {
        pub sponsoring_id: Option<AccountId> => "sponsoringID",
        pub ext: LedgerEntryExtensionV1Ext => "ext",
    }
}

xdr_union! {
    @codec
    pub enum LedgerEntryExt(i32, "v") {
        0 => V0,
        1 => V1(LedgerEntryExtensionV1, "v1"),
    }
}

xdr_struct! {
    @codec
    pub struct LedgerEntry {
        pub last_modified_ledger_seq: u32 => "lastModifiedLedgerSeq",
        pub data: LedgerEntryData => "data",
        pub ext: LedgerEntryExt => "ext",
    }
}

impl LedgerEntry {
    /// The key that names this entry.
    pub fn key(&self) -> LedgerKey {
        match &self.data {
            LedgerEntryData::Account(e) => LedgerKey::Account(LedgerKeyAccount {
                account_id: e.account_id.clone(),
            }),
            LedgerEntryData::Trustline(e) => LedgerKey::Trustline(LedgerKeyTrustLine {
                account_id: e.account_id.clone(),
                asset: e.asset.clone(),
            }),
            LedgerEntryData::Offer(e) => LedgerKey::Offer(LedgerKeyOffer {
                seller_id: e.seller_id.clone(),
                offer_id: e.offer_id,
            }),
            LedgerEntryData::Data(e) => LedgerKey::Data(LedgerKeyData {
                account_id: e.account_id.clone(),
                data_name: e.data_name.clone(),
            }),
            LedgerEntryData::ClaimableBalance(e) => {
                LedgerKey::ClaimableBalance(LedgerKeyClaimableBalance {
                    balance_id: e.balance_id.clone(),
                })
            }
            LedgerEntryData::LiquidityPool(e) => LedgerKey::LiquidityPool(LedgerKeyLiquidityPool {
                liquidity_pool_id: e.liquidity_pool_id,
            }),
            LedgerEntryData::ContractData(e) => LedgerKey::ContractData(LedgerKeyContractData {
                contract: e.contract.clone(),
                key: e.key.clone(),
                durability: e.durability,
            }),
            LedgerEntryData::ContractCode(e) => {
                LedgerKey::ContractCode(LedgerKeyContractCode { hash: e.hash })
            }
            LedgerEntryData::Ttl(e) => LedgerKey::Ttl(LedgerKeyTtl { key_hash: e.key_hash }),
        }
    }
}

xdr_enum! {
    pub enum LedgerEntryChangeType {
        Created = 0 => "LEDGER_ENTRY_CREATED",
        Updated = 1 => "LEDGER_ENTRY_UPDATED",
        Removed = 2 => "LEDGER_ENTRY_REMOVED",
        State = 3 => "LEDGER_ENTRY_STATE",
        Restored = 4 => "LEDGER_ENTRY_RESTORED",
    }
}

xdr_union! {
    @codec
    /// One entry's transition during transaction application.
    pub enum LedgerEntryChange(LedgerEntryChangeType, "type") {
        LedgerEntryChangeType::Created => Created(LedgerEntry, "created"),
        LedgerEntryChangeType::Updated => Updated(LedgerEntry, "updated"),
        LedgerEntryChangeType::Removed => Removed(LedgerKey, "removed"),
        LedgerEntryChangeType::State => State(LedgerEntry, "state"),
        LedgerEntryChangeType::Restored => Restored(LedgerEntry, "restored"),
    }
}

pub type LedgerEntryChanges = VecM<LedgerEntryChange>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xdr::{PublicKey, XdrCodec, XdrError};

    fn account_entry(ext: AccountEntryExt) -> LedgerEntry {
        LedgerEntry {
            last_modified_ledger_seq: 77,
            data: LedgerEntryData::Account(AccountEntry {
                account_id: PublicKey::from_bytes([3; 32]),
                balance: 10_000_000_000,
                seq_num: 12_884_901_888,
                num_sub_entries: 1,
                inflation_dest: None,
                flags: AccountFlags::AuthRequired.value() as u32,
                home_domain: "example.com".try_into().unwrap(),
                thresholds: Thresholds([1, 0, 0, 0]),
                signers: VecM::new(),
                ext,
            }),
            ext: LedgerEntryExt::V1(LedgerEntryExtensionV1 {
                sponsoring_id: Some(PublicKey::from_bytes([4; 32])),
                ext: LedgerEntryExtensionV1Ext::V0,
            }),
        }
    }

    #[test]
    fn account_entry_with_full_extension_chain() {
        let ext = AccountEntryExt::V1(AccountEntryExtensionV1 {
            liabilities: Liabilities { buying: 5, selling: 6 },
            ext: AccountEntryExtensionV1Ext::V2(AccountEntryExtensionV2 {
                num_sponsored: 0,
                num_sponsoring: 1,
                signer_sponsoring_ids: VecM::new(),
                ext: AccountEntryExtensionV2Ext::V3(AccountEntryExtensionV3 {
                    ext: ExtensionPoint::V0,
                    seq_ledger: 99,
                    seq_time: 1_700_000_000,
                }),
            }),
        });
        let entry = account_entry(ext);
        let bytes = entry.to_xdr().unwrap();
        let back = LedgerEntry::from_xdr(&bytes).unwrap();
        assert_eq!(back, entry);

        let LedgerEntryData::Account(account) = &back.data else {
            panic!("expected an account entry");
        };
        assert_eq!(account.liabilities().selling, 6);
        assert_eq!(account.seq_ledger_and_time(), Some((99, 1_700_000_000)));
    }

    #[test]
    fn changes_list_roundtrip_and_key_derivation() {
        let entry = account_entry(AccountEntryExt::V0);
        let changes: LedgerEntryChanges = vec![
            LedgerEntryChange::State(entry.clone()),
            LedgerEntryChange::Updated(entry.clone()),
            LedgerEntryChange::Removed(entry.key()),
        ]
        .try_into()
        .unwrap();
        let bytes = changes.to_xdr().unwrap();
        assert_eq!(LedgerEntryChanges::from_xdr(&bytes).unwrap(), changes);
    }

    #[test]
    fn invalid_extension_version_is_rejected() {
        let mut bytes = account_entry(AccountEntryExt::V0).to_xdr().unwrap();
        // The last 48 bytes are the entry extension: v1 tag, sponsor option
        // (flag + key) and the inner v0 tag. The account's own ext tag is
        // the word right before them.
        let account_ext_end = bytes.len() - 48;
        bytes[account_ext_end - 1] = 7;
        assert!(matches!(
            LedgerEntry::from_xdr(&bytes),
            Err(XdrError::UnknownDiscriminant { .. })
        ));
    }

    #[test]
    fn config_setting_entries_are_not_modelled() {
        let bytes = [0, 0, 0, 1, 0, 0, 0, 8];
        assert_eq!(
            LedgerEntry::from_xdr(&bytes),
            Err(XdrError::UnknownDiscriminant {
                type_name: "LedgerEntryData",
                value: 8
            })
        );
    }

    #[test]
    fn nested_claim_predicate_roundtrip() {
        let predicate = ClaimPredicate::And(
            vec![
                ClaimPredicate::Not(Some(Box::new(ClaimPredicate::BeforeRelativeTime(3600)))),
                ClaimPredicate::Or(
                    vec![
                        ClaimPredicate::Unconditional,
                        ClaimPredicate::BeforeAbsoluteTime(1_900_000_000),
                    ]
                    .try_into()
                    .unwrap(),
                ),
            ]
            .try_into()
            .unwrap(),
        );
        let bytes = predicate.to_xdr().unwrap();
        assert_eq!(ClaimPredicate::from_xdr(&bytes).unwrap(), predicate);
    }
}
