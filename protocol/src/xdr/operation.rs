//! The 27 operation kinds.
//!
//! An [`Operation`] is an optional source account plus an [`OperationBody`],
//! a union keyed by [`OperationType`]. Amounts are in stroops (1 unit =
//! 10⁷ stroops); see `transaction::Amount` for the decimal form.

use super::asset::{Asset, AssetCode, ChangeTrustAsset, Price};
use super::bounded::VecM;
use super::keys::{AccountId, MuxedAccount, PoolId, Signer, SignerKey};
use super::ledger::{
    ClaimableBalanceId, Claimant, DataValue, ExtensionPoint, LedgerKey, SequenceNumber, String32,
    String64,
};
use super::soroban::{HostFunction, SorobanAuthorizationEntry};

xdr_enum! {
    pub enum OperationType {
        CreateAccount = 0 => "CREATE_ACCOUNT",
        Payment = 1 => "PAYMENT",
        PathPaymentStrictReceive = 2 => "PATH_PAYMENT_STRICT_RECEIVE",
        ManageSellOffer = 3 => "MANAGE_SELL_OFFER",
        CreatePassiveSellOffer = 4 => "CREATE_PASSIVE_SELL_OFFER",
        SetOptions = 5 => "SET_OPTIONS",
        ChangeTrust = 6 => "CHANGE_TRUST",
        AllowTrust = 7 => "ALLOW_TRUST",
        AccountMerge = 8 => "ACCOUNT_MERGE",
        Inflation = 9 => "INFLATION",
        ManageData = 10 => "MANAGE_DATA",
        BumpSequence = 11 => "BUMP_SEQUENCE",
        ManageBuyOffer = 12 => "MANAGE_BUY_OFFER",
        PathPaymentStrictSend = 13 => "PATH_PAYMENT_STRICT_SEND",
        CreateClaimableBalance = 14 => "CREATE_CLAIMABLE_BALANCE",
        ClaimClaimableBalance = 15 => "CLAIM_CLAIMABLE_BALANCE",
        BeginSponsoringFutureReserves = 16 => "BEGIN_SPONSORING_FUTURE_RESERVES",
        EndSponsoringFutureReserves = 17 => "END_SPONSORING_FUTURE_RESERVES",
        RevokeSponsorship = 18 => "REVOKE_SPONSORSHIP",
        Clawback = 19 => "CLAWBACK",
        ClawbackClaimableBalance = 20 => "CLAWBACK_CLAIMABLE_BALANCE",
        SetTrustLineFlags = 21 => "SET_TRUST_LINE_FLAGS",
        LiquidityPoolDeposit = 22 => "LIQUIDITY_POOL_DEPOSIT",
        LiquidityPoolWithdraw = 23 => "LIQUIDITY_POOL_WITHDRAW",
        InvokeHostFunction = 24 => "INVOKE_HOST_FUNCTION",
        ExtendFootprintTtl = 25 => "EXTEND_FOOTPRINT_TTL",
        RestoreFootprint = 26 => "RESTORE_FOOTPRINT",
    }
}

/// Maximum hops in a path payment.
pub const MAX_PATH_LEN: u32 = 5;

/// Maximum claimants on one claimable balance.
pub const MAX_CLAIMANTS: u32 = 10;

xdr_struct! {
    pub struct CreateAccountOp {
        pub destination: AccountId => "destination",
        pub starting_balance: i64 => "startingBalance",
    }
}

xdr_struct! {
    pub struct PaymentOp {
        pub destination: MuxedAccount => "destination",
        pub asset: Asset => "asset",
        pub amount: i64 => "amount",
    }
}

xdr_struct! {
    pub struct PathPaymentStrictReceiveOp {
        pub send_asset: Asset => "sendAsset",
        pub send_max: i64 => "sendMax",
        pub destination: MuxedAccount => "destination",
        pub dest_asset: Asset => "destAsset",
        pub dest_amount: i64 => "destAmount",
        pub path: VecM<Asset, MAX_PATH_LEN> => "path",
    }
}

xdr_struct! {
    pub struct PathPaymentStrictSendOp {
        pub send_asset: Asset => "sendAsset",
        pub send_amount: i64 => "sendAmount",
        pub destination: MuxedAccount => "destination",
        pub dest_asset: Asset => "destAsset",
        pub dest_min: i64 => "destMin",
        pub path: VecM<Asset, MAX_PATH_LEN> => "path",
    }
}

xdr_struct! {
    /// Offer id 0 creates a new offer; amount 0 deletes one.
    pub struct ManageSellOfferOp {
        pub selling: Asset => "selling",
        pub buying: Asset => "buying",
        pub amount: i64 => "amount",
        pub price: Price => "price",
        pub offer_id: i64 => "offerID",
    }
}

xdr_struct! {
    pub struct ManageBuyOfferOp {
        pub selling: Asset => "selling",
        pub buying: Asset => "buying",
        pub buy_amount: i64 => "buyAmount",
        pub price: Price => "price",
        pub offer_id: i64 => "offerID",
    }
}

xdr_struct! {
    pub struct CreatePassiveSellOfferOp {
        pub selling: Asset => "selling",
        pub buying: Asset => "buying",
        pub amount: i64 => "amount",
        pub price: Price => "price",
    }
}

xdr_struct! {
    /// Every field is optional; unset fields leave the account unchanged.
    pub struct SetOptionsOp {
        pub inflation_dest: Option<AccountId> => "inflationDest",
        pub clear_flags: Option<u32> => "clearFlags",
        pub set_flags: Option<u32> => "setFlags",
        pub master_weight: Option<u32> => "masterWeight",
        pub low_threshold: Option<u32> => "lowThreshold",
        pub med_threshold: Option<u32> => "medThreshold",
        pub high_threshold: Option<u32> => "highThreshold",
        pub home_domain: Option<String32> => "homeDomain",
        pub signer: Option<Signer> => "signer",
    }
}

impl Default for SetOptionsOp {
    fn default() -> Self {
        Self {
            inflation_dest: None,
            clear_flags: None,
            set_flags: None,
            master_weight: None,
            low_threshold: None,
            med_threshold: None,
            high_threshold: None,
            home_domain: None,
            signer: None,
        }
    }
}

xdr_struct! {
    /// Limit 0 removes the trust line.
    pub struct ChangeTrustOp {
        pub line: ChangeTrustAsset => "line",
        pub limit: i64 => "limit",
    }
}

xdr_struct! {
    pub struct AllowTrustOp {
        pub trustor: AccountId => "trustor",
        pub asset: AssetCode => "asset",
        pub authorize: u32 => "authorize",
    }
}

xdr_struct! {
    /// A `None` value deletes the entry.
    pub struct ManageDataOp {
        pub data_name: String64 => "dataName",
        pub data_value: Option<DataValue> => "dataValue",
    }
}

xdr_struct! {
    pub struct BumpSequenceOp {
        pub bump_to: SequenceNumber => "bumpTo",
    }
}

xdr_struct! {
    pub struct CreateClaimableBalanceOp {
        pub asset: Asset => "asset",
        pub amount: i64 => "amount",
        pub claimants: VecM<Claimant, MAX_CLAIMANTS> => "claimants",
    }
}

xdr_struct! {
    pub struct ClaimClaimableBalanceOp {
        pub balance_id: ClaimableBalanceId => "balanceID",
    }
}

xdr_struct! {
    pub struct BeginSponsoringFutureReservesOp {
        pub sponsored_id: AccountId => "sponsoredID",
    }
}

xdr_enum! {
    pub enum RevokeSponsorshipType {
        LedgerEntry = 0 => "REVOKE_SPONSORSHIP_LEDGER_ENTRY",
        Signer = 1 => "REVOKE_SPONSORSHIP_SIGNER",
    }
}

xdr_struct! {
    pub struct RevokeSponsorshipOpSigner {
        pub account_id: AccountId => "accountID",
        pub signer_key: SignerKey => "signerKey",
    }
}

xdr_union! {
    pub enum RevokeSponsorshipOp(RevokeSponsorshipType, "type") {
        RevokeSponsorshipType::LedgerEntry => LedgerEntry(LedgerKey, "ledgerKey"),
        RevokeSponsorshipType::Signer => Signer(RevokeSponsorshipOpSigner, "signer"),
    }
}

xdr_struct! {
    pub struct ClawbackOp {
        pub asset: Asset => "asset",
        pub from: MuxedAccount => "from",
        pub amount: i64 => "amount",
    }
}

xdr_struct! {
    pub struct ClawbackClaimableBalanceOp {
        pub balance_id: ClaimableBalanceId => "balanceID",
    }
}

xdr_struct! {
    pub struct SetTrustLineFlagsOp {
        pub trustor: AccountId => "trustor",
        pub asset: Asset => "asset",
        pub clear_flags: u32 => "clearFlags",
        pub set_flags: u32 => "setFlags",
    }
}

xdr_struct! {
    pub struct LiquidityPoolDepositOp {
        pub liquidity_pool_id: PoolId => "liquidityPoolID",
        pub max_amount_a: i64 => "maxAmountA",
        pub max_amount_b: i64 => "maxAmountB",
        pub min_price: Price => "minPrice",
        pub max_price: Price => "maxPrice",
    }
}

xdr_struct! {
    pub struct LiquidityPoolWithdrawOp {
        pub liquidity_pool_id: PoolId => "liquidityPoolID",
        pub amount: i64 => "amount",
        pub min_amount_a: i64 => "minAmountA",
        pub min_amount_b: i64 => "minAmountB",
    }
}

xdr_struct! {
    pub struct InvokeHostFunctionOp {
        pub host_function: HostFunction => "hostFunction",
        pub auth: VecM<SorobanAuthorizationEntry> => "auth",
    }
}

xdr_struct! {
    pub struct ExtendFootprintTtlOp {
        pub ext: ExtensionPoint => "ext",
        pub extend_to: u32 => "extendTo",
    }
}

xdr_struct! {
    pub struct RestoreFootprintOp {
        pub ext: ExtensionPoint => "ext",
    }
}

xdr_union! {
    pub enum OperationBody(OperationType, "type") {
        OperationType::CreateAccount => CreateAccount(CreateAccountOp, "createAccountOp"),
        OperationType::Payment => Payment(PaymentOp, "paymentOp"),
        OperationType::PathPaymentStrictReceive => PathPaymentStrictReceive(PathPaymentStrictReceiveOp, "pathPaymentStrictReceiveOp"),
        OperationType::ManageSellOffer => ManageSellOffer(ManageSellOfferOp, "manageSellOfferOp"),
        OperationType::CreatePassiveSellOffer => CreatePassiveSellOffer(CreatePassiveSellOfferOp, "createPassiveSellOfferOp"),
        OperationType::SetOptions => SetOptions(SetOptionsOp, "setOptionsOp"),
        OperationType::ChangeTrust => ChangeTrust(ChangeTrustOp, "changeTrustOp"),
        OperationType::AllowTrust => AllowTrust(AllowTrustOp, "allowTrustOp"),
        OperationType::AccountMerge => AccountMerge(MuxedAccount, "destination"),
        OperationType::Inflation => Inflation,
        OperationType::ManageData => ManageData(ManageDataOp, "manageDataOp"),
        OperationType::BumpSequence => BumpSequence(BumpSequenceOp, "bumpSequenceOp"),
        OperationType::ManageBuyOffer => ManageBuyOffer(ManageBuyOfferOp, "manageBuyOfferOp"),
        OperationType::PathPaymentStrictSend => PathPaymentStrictSend(PathPaymentStrictSendOp, "pathPaymentStrictSendOp"),
        OperationType::CreateClaimableBalance => CreateClaimableBalance(CreateClaimableBalanceOp, "createClaimableBalanceOp"),
        OperationType::ClaimClaimableBalance => ClaimClaimableBalance(ClaimClaimableBalanceOp, "claimClaimableBalanceOp"),
        OperationType::BeginSponsoringFutureReserves => BeginSponsoringFutureReserves(BeginSponsoringFutureReservesOp, "beginSponsoringFutureReservesOp"),
        OperationType::EndSponsoringFutureReserves => EndSponsoringFutureReserves,
        OperationType::RevokeSponsorship => RevokeSponsorship(RevokeSponsorshipOp, "revokeSponsorshipOp"),
        OperationType::Clawback => Clawback(ClawbackOp, "clawbackOp"),
        OperationType::ClawbackClaimableBalance => ClawbackClaimableBalance(ClawbackClaimableBalanceOp, "clawbackClaimableBalanceOp"),
        OperationType::SetTrustLineFlags => SetTrustLineFlags(SetTrustLineFlagsOp, "setTrustLineFlagsOp"),
        OperationType::LiquidityPoolDeposit => LiquidityPoolDeposit(LiquidityPoolDepositOp, "liquidityPoolDepositOp"),
        OperationType::LiquidityPoolWithdraw => LiquidityPoolWithdraw(LiquidityPoolWithdrawOp, "liquidityPoolWithdrawOp"),
        OperationType::InvokeHostFunction => InvokeHostFunction(InvokeHostFunctionOp, "invokeHostFunctionOp"),
        OperationType::ExtendFootprintTtl => ExtendFootprintTtl(ExtendFootprintTtlOp, "extendFootprintTTLOp"),
        OperationType::RestoreFootprint => RestoreFootprint(RestoreFootprintOp, "restoreFootprintOp"),
    }
}

xdr_struct! {
    /// One operation; without a source it acts on the transaction's source.
    pub struct Operation {
        pub source_account: Option<MuxedAccount> => "sourceAccount",
        pub body: OperationBody => "body",
    }
}

impl Operation {
    pub fn new(body: OperationBody) -> Self {
        Self {
            source_account: None,
            body,
        }
    }

    pub fn operation_type(&self) -> OperationType {
        self.body.discriminant()
    }

    /// True for the three Soroban operations, which must be alone in their
    /// transaction.
    pub fn is_soroban(&self) -> bool {
        matches!(
            self.body,
            OperationBody::InvokeHostFunction(_)
                | OperationBody::ExtendFootprintTtl(_)
                | OperationBody::RestoreFootprint(_)
        )
    }
}
