//! Smart contract values.
//!
//! [`ScVal`] is the universal argument and storage type for contracts: a
//! recursive tree of scalars, 128/256-bit integers, byte strings, symbols,
//! vectors, maps and addresses. The recursion is unbounded in the type, so
//! every decode goes through the reader's depth guard.

use std::fmt;

use super::bounded::{BytesM, StringM, VecM};
use super::error::XdrError;
use super::keys::{AccountId, ContractId, Hash, PoolId, PublicKey, Uint256};
use super::ledger::ClaimableBalanceId;
use crate::strkey::{self, StrKey};

xdr_enum! {
    pub enum ScValType {
        Bool = 0 => "SCV_BOOL",
        Void = 1 => "SCV_VOID",
        Error = 2 => "SCV_ERROR",
        U32 = 3 => "SCV_U32",
        I32 = 4 => "SCV_I32",
        U64 = 5 => "SCV_U64",
        I64 = 6 => "SCV_I64",
        Timepoint = 7 => "SCV_TIMEPOINT",
        Duration = 8 => "SCV_DURATION",
        U128 = 9 => "SCV_U128",
        I128 = 10 => "SCV_I128",
        U256 = 11 => "SCV_U256",
        I256 = 12 => "SCV_I256",
        Bytes = 13 => "SCV_BYTES",
        String = 14 => "SCV_STRING",
        Symbol = 15 => "SCV_SYMBOL",
        Vec = 16 => "SCV_VEC",
        Map = 17 => "SCV_MAP",
        Address = 18 => "SCV_ADDRESS",
        ContractInstance = 19 => "SCV_CONTRACT_INSTANCE",
        LedgerKeyContractInstance = 20 => "SCV_LEDGER_KEY_CONTRACT_INSTANCE",
        LedgerKeyNonce = 21 => "SCV_LEDGER_KEY_NONCE",
    }
}

xdr_enum! {
    pub enum ScErrorType {
        Contract = 0 => "SCE_CONTRACT",
        WasmVm = 1 => "SCE_WASM_VM",
        Context = 2 => "SCE_CONTEXT",
        Storage = 3 => "SCE_STORAGE",
        Object = 4 => "SCE_OBJECT",
        Crypto = 5 => "SCE_CRYPTO",
        Events = 6 => "SCE_EVENTS",
        Budget = 7 => "SCE_BUDGET",
        Value = 8 => "SCE_VALUE",
        Auth = 9 => "SCE_AUTH",
    }
}

xdr_enum! {
    pub enum ScErrorCode {
        ArithDomain = 0 => "SCEC_ARITH_DOMAIN",
        IndexBounds = 1 => "SCEC_INDEX_BOUNDS",
        InvalidInput = 2 => "SCEC_INVALID_INPUT",
        MissingValue = 3 => "SCEC_MISSING_VALUE",
        ExistingValue = 4 => "SCEC_EXISTING_VALUE",
        ExceededLimit = 5 => "SCEC_EXCEEDED_LIMIT",
        InvalidAction = 6 => "SCEC_INVALID_ACTION",
        InternalError = 7 => "SCEC_INTERNAL_ERROR",
        UnexpectedType = 8 => "SCEC_UNEXPECTED_TYPE",
        UnexpectedSize = 9 => "SCEC_UNEXPECTED_SIZE",
    }
}

xdr_union! {
    pub enum ScError(ScErrorType, "type") {
        ScErrorType::Contract => Contract(u32, "contractCode"),
        ScErrorType::WasmVm => WasmVm(ScErrorCode, "code"),
        ScErrorType::Context => Context(ScErrorCode, "code"),
        ScErrorType::Storage => Storage(ScErrorCode, "code"),
        ScErrorType::Object => Object(ScErrorCode, "code"),
        ScErrorType::Crypto => Crypto(ScErrorCode, "code"),
        ScErrorType::Events => Events(ScErrorCode, "code"),
        ScErrorType::Budget => Budget(ScErrorCode, "code"),
        ScErrorType::Value => Value(ScErrorCode, "code"),
        ScErrorType::Auth => Auth(ScErrorCode, "code"),
    }
}

// ---------------------------------------------------------------------------
// Wide integers
// ---------------------------------------------------------------------------

xdr_struct! {
    pub struct UInt128Parts {
        pub hi: u64 => "hi",
        pub lo: u64 => "lo",
    }
}

xdr_struct! {
    pub struct Int128Parts {
        pub hi: i64 => "hi",
        pub lo: u64 => "lo",
    }
}

xdr_struct! {
    pub struct UInt256Parts {
        pub hi_hi: u64 => "hi_hi",
        pub hi_lo: u64 => "hi_lo",
        pub lo_hi: u64 => "lo_hi",
        pub lo_lo: u64 => "lo_lo",
    }
}

xdr_struct! {
    pub struct Int256Parts {
        pub hi_hi: i64 => "hi_hi",
        pub hi_lo: u64 => "hi_lo",
        pub lo_hi: u64 => "lo_hi",
        pub lo_lo: u64 => "lo_lo",
    }
}

impl From<u128> for UInt128Parts {
    fn from(v: u128) -> Self {
        Self {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

impl From<UInt128Parts> for u128 {
    fn from(p: UInt128Parts) -> Self {
        (u128::from(p.hi) << 64) | u128::from(p.lo)
    }
}

impl From<i128> for Int128Parts {
    fn from(v: i128) -> Self {
        Self {
            hi: (v >> 64) as i64,
            lo: v as u64,
        }
    }
}

impl From<Int128Parts> for i128 {
    fn from(p: Int128Parts) -> Self {
        (i128::from(p.hi) << 64) | i128::from(p.lo)
    }
}

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

xdr_enum! {
    pub enum ScAddressType {
        Account = 0 => "SC_ADDRESS_TYPE_ACCOUNT",
        Contract = 1 => "SC_ADDRESS_TYPE_CONTRACT",
        MuxedAccount = 2 => "SC_ADDRESS_TYPE_MUXED_ACCOUNT",
        ClaimableBalance = 3 => "SC_ADDRESS_TYPE_CLAIMABLE_BALANCE",
        LiquidityPool = 4 => "SC_ADDRESS_TYPE_LIQUIDITY_POOL",
    }
}

xdr_struct! {
    @codec
    pub struct MuxedEd25519Account {
        pub id: u64 => "id",
        pub ed25519: Uint256 => "ed25519",
    }
}

xdr_union! {
    @codec
    /// Anything that can be authorized or hold value in a contract call.
    pub enum ScAddress(ScAddressType, "type") {
        ScAddressType::Account => Account(AccountId, "accountId"),
        ScAddressType::Contract => Contract(ContractId, "contractId"),
        ScAddressType::MuxedAccount => MuxedAccount(MuxedEd25519Account, "muxedAccount"),
        ScAddressType::ClaimableBalance => ClaimableBalance(ClaimableBalanceId, "claimableBalanceId"),
        ScAddressType::LiquidityPool => LiquidityPool(PoolId, "liquidityPoolId"),
    }
}

impl ScAddress {
    /// `G…`, `C…`, `M…`, `B…` or `L…`.
    pub fn to_strkey(&self) -> String {
        match self {
            Self::Account(account) => account.to_strkey(),
            Self::Contract(id) => strkey::encode_contract(&id.0),
            Self::MuxedAccount(m) => StrKey::MuxedAccount {
                ed25519: m.ed25519.0,
                id: m.id,
            }
            .to_string(),
            Self::ClaimableBalance(ClaimableBalanceId::V0(hash)) => {
                StrKey::ClaimableBalance(hash.0).to_string()
            }
            Self::LiquidityPool(id) => StrKey::LiquidityPool(id.0).to_string(),
        }
    }

    pub fn from_strkey(s: &str) -> Result<Self, XdrError> {
        match s.parse::<StrKey>()? {
            StrKey::AccountId(k) => Ok(Self::Account(PublicKey::from_bytes(k))),
            StrKey::Contract(k) => Ok(Self::Contract(Hash(k))),
            StrKey::MuxedAccount { ed25519, id } => Ok(Self::MuxedAccount(MuxedEd25519Account {
                id,
                ed25519: Uint256(ed25519),
            })),
            StrKey::ClaimableBalance(k) => Ok(Self::ClaimableBalance(ClaimableBalanceId::V0(Hash(k)))),
            StrKey::LiquidityPool(k) => Ok(Self::LiquidityPool(Hash(k))),
            other => Err(XdrError::InvalidValue(format!(
                "a {} key is not a contract address",
                other.version()
            ))),
        }
    }
}

impl fmt::Display for ScAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_strkey())
    }
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

pub type ScBytes = BytesM;
pub type ScString = StringM;
pub type ScSymbol = StringM<32>;
pub type ScVec = VecM<ScVal>;
pub type ScMap = VecM<ScMapEntry>;

xdr_enum! {
    pub enum ContractExecutableType {
        Wasm = 0 => "CONTRACT_EXECUTABLE_WASM",
        StellarAsset = 1 => "CONTRACT_EXECUTABLE_STELLAR_ASSET",
    }
}

xdr_union! {
    pub enum ContractExecutable(ContractExecutableType, "type") {
        ContractExecutableType::Wasm => Wasm(Hash, "wasm_hash"),
        ContractExecutableType::StellarAsset => StellarAsset,
    }
}

xdr_struct! {
    pub struct ScNonceKey {
        pub nonce: i64 => "nonce",
    }
}

xdr_struct! {
    pub struct ScContractInstance {
        pub executable: ContractExecutable => "executable",
        pub storage: Option<ScMap> => "storage",
    }
}

xdr_union! {
    /// A contract value.
    pub enum ScVal(ScValType, "type") {
        ScValType::Bool => Bool(bool, "b"),
        ScValType::Void => Void,
        ScValType::Error => Error(ScError, "error"),
        ScValType::U32 => U32(u32, "u32"),
        ScValType::I32 => I32(i32, "i32"),
        ScValType::U64 => U64(u64, "u64"),
        ScValType::I64 => I64(i64, "i64"),
        ScValType::Timepoint => Timepoint(u64, "timepoint"),
        ScValType::Duration => Duration(u64, "duration"),
        ScValType::U128 => U128(UInt128Parts, "u128"),
        ScValType::I128 => I128(Int128Parts, "i128"),
        ScValType::U256 => U256(UInt256Parts, "u256"),
        ScValType::I256 => I256(Int256Parts, "i256"),
        ScValType::Bytes => Bytes(ScBytes, "bytes"),
        ScValType::String => String(ScString, "str"),
        ScValType::Symbol => Symbol(ScSymbol, "sym"),
        ScValType::Vec => Vec(Option<ScVec>, "vec"),
        ScValType::Map => Map(Option<ScMap>, "map"),
        ScValType::Address => Address(ScAddress, "address"),
        ScValType::ContractInstance => ContractInstance(ScContractInstance, "instance"),
        ScValType::LedgerKeyContractInstance => LedgerKeyContractInstance,
        ScValType::LedgerKeyNonce => LedgerKeyNonce(ScNonceKey, "nonce_key"),
    }
}

xdr_struct! {
    pub struct ScMapEntry {
        pub key: ScVal => "key",
        pub val: ScVal => "val",
    }
}

impl ScVal {
    pub fn symbol(s: &str) -> Result<Self, XdrError> {
        Ok(Self::Symbol(s.try_into()?))
    }

    pub fn string(s: &str) -> Result<Self, XdrError> {
        Ok(Self::String(s.try_into()?))
    }

    pub fn bytes(b: &[u8]) -> Result<Self, XdrError> {
        Ok(Self::Bytes(b.try_into()?))
    }

    pub fn vec(items: Vec<ScVal>) -> Result<Self, XdrError> {
        Ok(Self::Vec(Some(items.try_into()?)))
    }

    pub fn map(entries: Vec<(ScVal, ScVal)>) -> Result<Self, XdrError> {
        let entries: Vec<ScMapEntry> = entries
            .into_iter()
            .map(|(key, val)| ScMapEntry { key, val })
            .collect();
        Ok(Self::Map(Some(entries.try_into()?)))
    }

    pub fn address(address: ScAddress) -> Self {
        Self::Address(address)
    }

    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Self::I128(parts) => Some(i128::from(parts.clone())),
            _ => None,
        }
    }

    pub fn as_u128(&self) -> Option<u128> {
        match self {
            Self::U128(parts) => Some(u128::from(parts.clone())),
            _ => None,
        }
    }
}

impl From<bool> for ScVal {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<u32> for ScVal {
    fn from(v: u32) -> Self {
        Self::U32(v)
    }
}

impl From<i32> for ScVal {
    fn from(v: i32) -> Self {
        Self::I32(v)
    }
}

impl From<u64> for ScVal {
    fn from(v: u64) -> Self {
        Self::U64(v)
    }
}

impl From<i64> for ScVal {
    fn from(v: i64) -> Self {
        Self::I64(v)
    }
}

impl From<u128> for ScVal {
    fn from(v: u128) -> Self {
        Self::U128(v.into())
    }
}

impl From<i128> for ScVal {
    fn from(v: i128) -> Self {
        Self::I128(v.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xdr::{XdrCodec, XdrLimits};

    #[test]
    fn wide_integers_split_and_join() {
        for v in [0i128, 1, -1, i128::MIN, i128::MAX, 1 << 70, -(1 << 70)] {
            assert_eq!(i128::from(Int128Parts::from(v)), v);
        }
        for v in [0u128, u128::MAX, (1 << 64) + 5] {
            assert_eq!(u128::from(UInt128Parts::from(v)), v);
        }
        assert_eq!(ScVal::from(-5i128).as_i128(), Some(-5));
    }

    #[test]
    fn nested_value_roundtrip() {
        let value = ScVal::map(vec![
            (ScVal::symbol("amount").unwrap(), ScVal::from(1_000i128)),
            (
                ScVal::symbol("to").unwrap(),
                ScVal::address(ScAddress::Contract(Hash([9; 32]))),
            ),
            (
                ScVal::symbol("memo").unwrap(),
                ScVal::vec(vec![ScVal::Void, ScVal::string("hi").unwrap()]).unwrap(),
            ),
        ])
        .unwrap();
        let bytes = value.to_xdr().unwrap();
        assert_eq!(ScVal::from_xdr(&bytes).unwrap(), value);
    }

    #[test]
    fn symbols_are_bounded() {
        assert!(ScVal::symbol(&"x".repeat(32)).is_ok());
        assert!(ScVal::symbol(&"x".repeat(33)).is_err());
    }

    #[test]
    fn deep_nesting_trips_the_depth_limit() {
        let mut value = ScVal::Void;
        for _ in 0..64 {
            value = ScVal::vec(vec![value]).unwrap();
        }
        let bytes = value.to_xdr().unwrap();
        assert!(ScVal::from_xdr(&bytes).is_ok());
        let tight = XdrLimits { depth: 16, ..XdrLimits::default() };
        assert!(matches!(
            ScVal::from_xdr_with_limits(&bytes, tight),
            Err(XdrError::DepthLimitExceeded(16))
        ));
    }

    /// `levels` single-element vectors wrapped around a void.
    fn raw_nested_vec(levels: usize) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(levels * 12 + 4);
        for _ in 0..levels {
            bytes.extend_from_slice(&[0, 0, 0, 16, 0, 0, 0, 1, 0, 0, 0, 1]);
        }
        bytes.extend_from_slice(&[0, 0, 0, 1]);
        bytes
    }

    #[test]
    fn default_depth_limit_decodes_on_a_test_thread() {
        let limit = crate::config::DEFAULT_XDR_DEPTH_LIMIT as usize;

        // The void innermost value is the last level the limit admits.
        let deepest = ScVal::from_xdr(&raw_nested_vec(limit - 1)).unwrap();
        let mut levels = 0;
        let mut cursor = &deepest;
        while let ScVal::Vec(Some(items)) = cursor {
            levels += 1;
            cursor = &items[0];
        }
        assert_eq!(levels, limit - 1);
        assert_eq!(cursor, &ScVal::Void);

        assert_eq!(
            ScVal::from_xdr(&raw_nested_vec(limit)),
            Err(XdrError::DepthLimitExceeded(limit as u32))
        );
        assert_eq!(
            ScVal::from_xdr(&raw_nested_vec(4 * limit)),
            Err(XdrError::DepthLimitExceeded(limit as u32))
        );
    }

    #[test]
    fn unknown_value_type_is_rejected() {
        assert!(matches!(
            ScVal::from_xdr(&[0, 0, 0, 22]),
            Err(XdrError::UnknownDiscriminant { .. })
        ));
    }

    #[test]
    fn address_strkeys() {
        let addresses = [
            ScAddress::Account(PublicKey::from_bytes([1; 32])),
            ScAddress::Contract(Hash([2; 32])),
            ScAddress::MuxedAccount(MuxedEd25519Account {
                id: 5,
                ed25519: Uint256([3; 32]),
            }),
            ScAddress::ClaimableBalance(ClaimableBalanceId::V0(Hash([4; 32]))),
            ScAddress::LiquidityPool(Hash([5; 32])),
        ];
        for (address, prefix) in addresses.iter().zip(['G', 'C', 'M', 'B', 'L']) {
            let s = address.to_strkey();
            assert!(s.starts_with(prefix));
            assert_eq!(&ScAddress::from_strkey(&s).unwrap(), address);
        }
    }
}
