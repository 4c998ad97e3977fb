//! Transaction and operation results.
//!
//! Result unions carry a payload on success (and on a handful of failure
//! codes); every other code is a void arm. Those are modelled as dedicated
//! variants for the payload arms plus an `Error(code)` catch-all, generated
//! by `xdr_result!`.

use super::asset::Asset;
use super::bounded::VecM;
use super::keys::{AccountId, Hash, PoolId, Uint256};
use super::ledger::{ClaimableBalanceId, OfferEntry};
use super::operation::OperationType;

// ---------------------------------------------------------------------------
// Offer claims
// ---------------------------------------------------------------------------

xdr_enum! {
    pub enum ClaimAtomType {
        V0 = 0 => "CLAIM_ATOM_TYPE_V0",
        OrderBook = 1 => "CLAIM_ATOM_TYPE_ORDER_BOOK",
        LiquidityPool = 2 => "CLAIM_ATOM_TYPE_LIQUIDITY_POOL",
    }
}

xdr_struct! {
    @codec
    pub struct ClaimOfferAtomV0 {
        pub seller_ed25519: Uint256 => "sellerEd25519",
        pub offer_id: i64 => "offerID",
        pub asset_sold: Asset => "assetSold",
        pub amount_sold: i64 => "amountSold",
        pub asset_bought: Asset => "assetBought",
        pub amount_bought: i64 => "amountBought",
    }
}

xdr_struct! {
    @codec
    pub struct ClaimOfferAtom {
        pub seller_id: AccountId => "sellerID",
        pub offer_id: i64 => "offerID",
        pub asset_sold: Asset => "assetSold",
        pub amount_sold: i64 => "amountSold",
        pub asset_bought: Asset => "assetBought",
        pub amount_bought: i64 => "amountBought",
    }
}

xdr_struct! {
    @codec
    pub struct ClaimLiquidityAtom {
        pub liquidity_pool_id: PoolId => "liquidityPoolID",
        pub asset_sold: Asset => "assetSold",
        pub amount_sold: i64 => "amountSold",
        pub asset_bought: Asset => "assetBought",
        pub amount_bought: i64 => "amountBought",
    }
}

xdr_union! {
    @codec
    pub enum ClaimAtom(ClaimAtomType, "type") {
        ClaimAtomType::V0 => V0(ClaimOfferAtomV0, "v0"),
        ClaimAtomType::OrderBook => OrderBook(ClaimOfferAtom, "orderBook"),
        ClaimAtomType::LiquidityPool => LiquidityPool(ClaimLiquidityAtom, "liquidityPool"),
    }
}

// ---------------------------------------------------------------------------
// Per-operation results
// ---------------------------------------------------------------------------

xdr_enum! {
    pub enum CreateAccountResultCode {
        Success = 0 => "CREATE_ACCOUNT_SUCCESS",
        Malformed = -1 => "CREATE_ACCOUNT_MALFORMED",
        Underfunded = -2 => "CREATE_ACCOUNT_UNDERFUNDED",
        LowReserve = -3 => "CREATE_ACCOUNT_LOW_RESERVE",
        AlreadyExist = -4 => "CREATE_ACCOUNT_ALREADY_EXIST",
    }
}

xdr_result! {
    pub enum CreateAccountResult(CreateAccountResultCode) {
        Success => Success,
    }
}

xdr_enum! {
    pub enum PaymentResultCode {
        Success = 0 => "PAYMENT_SUCCESS",
        Malformed = -1 => "PAYMENT_MALFORMED",
        Underfunded = -2 => "PAYMENT_UNDERFUNDED",
        SrcNoTrust = -3 => "PAYMENT_SRC_NO_TRUST",
        SrcNotAuthorized = -4 => "PAYMENT_SRC_NOT_AUTHORIZED",
        NoDestination = -5 => "PAYMENT_NO_DESTINATION",
        NoTrust = -6 => "PAYMENT_NO_TRUST",
        NotAuthorized = -7 => "PAYMENT_NOT_AUTHORIZED",
        LineFull = -8 => "PAYMENT_LINE_FULL",
        NoIssuer = -9 => "PAYMENT_NO_ISSUER",
    }
}

xdr_result! {
    pub enum PaymentResult(PaymentResultCode) {
        Success => Success,
    }
}

xdr_struct! {
    @codec
    pub struct SimplePaymentResult {
        pub destination: AccountId => "destination",
        pub asset: Asset => "asset",
        pub amount: i64 => "amount",
    }
}

xdr_enum! {
    pub enum PathPaymentStrictReceiveResultCode {
        Success = 0 => "PATH_PAYMENT_STRICT_RECEIVE_SUCCESS",
        Malformed = -1 => "PATH_PAYMENT_STRICT_RECEIVE_MALFORMED",
        Underfunded = -2 => "PATH_PAYMENT_STRICT_RECEIVE_UNDERFUNDED",
        SrcNoTrust = -3 => "PATH_PAYMENT_STRICT_RECEIVE_SRC_NO_TRUST",
        SrcNotAuthorized = -4 => "PATH_PAYMENT_STRICT_RECEIVE_SRC_NOT_AUTHORIZED",
        NoDestination = -5 => "PATH_PAYMENT_STRICT_RECEIVE_NO_DESTINATION",
        NoTrust = -6 => "PATH_PAYMENT_STRICT_RECEIVE_NO_TRUST",
        NotAuthorized = -7 => "PATH_PAYMENT_STRICT_RECEIVE_NOT_AUTHORIZED",
        LineFull = -8 => "PATH_PAYMENT_STRICT_RECEIVE_LINE_FULL",
        NoIssuer = -9 => "PATH_PAYMENT_STRICT_RECEIVE_NO_ISSUER",
        TooFewOffers = -10 => "PATH_PAYMENT_STRICT_RECEIVE_TOO_FEW_OFFERS",
        OfferCrossSelf = -11 => "PATH_PAYMENT_STRICT_RECEIVE_OFFER_CROSS_SELF",
        OverSendmax = -12 => "PATH_PAYMENT_STRICT_RECEIVE_OVER_SENDMAX",
    }
}

xdr_struct! {
    @codec
    pub struct PathPaymentStrictReceiveResultSuccess {
        pub offers: VecM<ClaimAtom> => "offers",
        pub last: SimplePaymentResult => "last",
    }
}

xdr_result! {
    pub enum PathPaymentStrictReceiveResult(PathPaymentStrictReceiveResultCode) {
        Success => Success(PathPaymentStrictReceiveResultSuccess),
        NoIssuer => NoIssuer(Asset),
    }
}

xdr_enum! {
    pub enum PathPaymentStrictSendResultCode {
        Success = 0 => "PATH_PAYMENT_STRICT_SEND_SUCCESS",
        Malformed = -1 => "PATH_PAYMENT_STRICT_SEND_MALFORMED",
        Underfunded = -2 => "PATH_PAYMENT_STRICT_SEND_UNDERFUNDED",
        SrcNoTrust = -3 => "PATH_PAYMENT_STRICT_SEND_SRC_NO_TRUST",
        SrcNotAuthorized = -4 => "PATH_PAYMENT_STRICT_SEND_SRC_NOT_AUTHORIZED",
        NoDestination = -5 => "PATH_PAYMENT_STRICT_SEND_NO_DESTINATION",
        NoTrust = -6 => "PATH_PAYMENT_STRICT_SEND_NO_TRUST",
        NotAuthorized = -7 => "PATH_PAYMENT_STRICT_SEND_NOT_AUTHORIZED",
        LineFull = -8 => "PATH_PAYMENT_STRICT_SEND_LINE_FULL",
        NoIssuer = -9 => "PATH_PAYMENT_STRICT_SEND_NO_ISSUER",
        TooFewOffers = -10 => "PATH_PAYMENT_STRICT_SEND_TOO_FEW_OFFERS",
        OfferCrossSelf = -11 => "PATH_PAYMENT_STRICT_SEND_OFFER_CROSS_SELF",
        UnderDestmin = -12 => "PATH_PAYMENT_STRICT_SEND_UNDER_DESTMIN",
    }
}

xdr_struct! {
    @codec
    pub struct PathPaymentStrictSendResultSuccess {
        pub offers: VecM<ClaimAtom> => "offers",
        pub last: SimplePaymentResult => "last",
    }
}

xdr_result! {
    pub enum PathPaymentStrictSendResult(PathPaymentStrictSendResultCode) {
        Success => Success(PathPaymentStrictSendResultSuccess),
        NoIssuer => NoIssuer(Asset),
    }
}

xdr_enum! {
    pub enum ManageSellOfferResultCode {
        Success = 0 => "MANAGE_SELL_OFFER_SUCCESS",
        Malformed = -1 => "MANAGE_SELL_OFFER_MALFORMED",
        SellNoTrust = -2 => "MANAGE_SELL_OFFER_SELL_NO_TRUST",
        BuyNoTrust = -3 => "MANAGE_SELL_OFFER_BUY_NO_TRUST",
        SellNotAuthorized = -4 => "MANAGE_SELL_OFFER_SELL_NOT_AUTHORIZED",
        BuyNotAuthorized = -5 => "MANAGE_SELL_OFFER_BUY_NOT_AUTHORIZED",
        LineFull = -6 => "MANAGE_SELL_OFFER_LINE_FULL",
        Underfunded = -7 => "MANAGE_SELL_OFFER_UNDERFUNDED",
        CrossSelf = -8 => "MANAGE_SELL_OFFER_CROSS_SELF",
        SellNoIssuer = -9 => "MANAGE_SELL_OFFER_SELL_NO_ISSUER",
        BuyNoIssuer = -10 => "MANAGE_SELL_OFFER_BUY_NO_ISSUER",
        NotFound = -11 => "MANAGE_SELL_OFFER_NOT_FOUND",
        LowReserve = -12 => "MANAGE_SELL_OFFER_LOW_RESERVE",
    }
}

xdr_enum! {
    pub enum ManageOfferEffect {
        Created = 0 => "MANAGE_OFFER_CREATED",
        Updated = 1 => "MANAGE_OFFER_UPDATED",
        Deleted = 2 => "MANAGE_OFFER_DELETED",
    }
}

xdr_union! {
    @codec
    pub enum ManageOfferSuccessResultOffer(ManageOfferEffect, "effect") {
        ManageOfferEffect::Created => Created(OfferEntry, "offer"),
        ManageOfferEffect::Updated => Updated(OfferEntry, "offer"),
        ManageOfferEffect::Deleted => Deleted,
    }
}

xdr_struct! {
    @codec
    pub struct ManageOfferSuccessResult {
        pub offers_claimed: VecM<ClaimAtom> => "offersClaimed",
        pub offer: ManageOfferSuccessResultOffer => "offer",
    }
}

xdr_result! {
    pub enum ManageSellOfferResult(ManageSellOfferResultCode) {
        Success => Success(ManageOfferSuccessResult),
    }
}

xdr_enum! {
    pub enum ManageBuyOfferResultCode {
        Success = 0 => "MANAGE_BUY_OFFER_SUCCESS",
        Malformed = -1 => "MANAGE_BUY_OFFER_MALFORMED",
        SellNoTrust = -2 => "MANAGE_BUY_OFFER_SELL_NO_TRUST",
        BuyNoTrust = -3 => "MANAGE_BUY_OFFER_BUY_NO_TRUST",
        SellNotAuthorized = -4 => "MANAGE_BUY_OFFER_SELL_NOT_AUTHORIZED",
        BuyNotAuthorized = -5 => "MANAGE_BUY_OFFER_BUY_NOT_AUTHORIZED",
        LineFull = -6 => "MANAGE_BUY_OFFER_LINE_FULL",
        Underfunded = -7 => "MANAGE_BUY_OFFER_UNDERFUNDED",
        CrossSelf = -8 => "MANAGE_BUY_OFFER_CROSS_SELF",
        SellNoIssuer = -9 => "MANAGE_BUY_OFFER_SELL_NO_ISSUER",
        BuyNoIssuer = -10 => "MANAGE_BUY_OFFER_BUY_NO_ISSUER",
        NotFound = -11 => "MANAGE_BUY_OFFER_NOT_FOUND",
        LowReserve = -12 => "MANAGE_BUY_OFFER_LOW_RESERVE",
    }
}

xdr_result! {
    pub enum ManageBuyOfferResult(ManageBuyOfferResultCode) {
        Success => Success(ManageOfferSuccessResult),
    }
}

xdr_enum! {
    pub enum SetOptionsResultCode {
        Success = 0 => "SET_OPTIONS_SUCCESS",
        LowReserve = -1 => "SET_OPTIONS_LOW_RESERVE",
        TooManySigners = -2 => "SET_OPTIONS_TOO_MANY_SIGNERS",
        BadFlags = -3 => "SET_OPTIONS_BAD_FLAGS",
        InvalidInflation = -4 => "SET_OPTIONS_INVALID_INFLATION",
        CantChange = -5 => "SET_OPTIONS_CANT_CHANGE",
        UnknownFlag = -6 => "SET_OPTIONS_UNKNOWN_FLAG",
        ThresholdOutOfRange = -7 => "SET_OPTIONS_THRESHOLD_OUT_OF_RANGE",
        BadSigner = -8 => "SET_OPTIONS_BAD_SIGNER",
        InvalidHomeDomain = -9 => "SET_OPTIONS_INVALID_HOME_DOMAIN",
        AuthRevocableRequired = -10 => "SET_OPTIONS_AUTH_REVOCABLE_REQUIRED",
    }
}

xdr_result! {
    pub enum SetOptionsResult(SetOptionsResultCode) {
        Success => Success,
    }
}

xdr_enum! {
    pub enum ChangeTrustResultCode {
        Success = 0 => "CHANGE_TRUST_SUCCESS",
        Malformed = -1 => "CHANGE_TRUST_MALFORMED",
        NoIssuer = -2 => "CHANGE_TRUST_NO_ISSUER",
        InvalidLimit = -3 => "CHANGE_TRUST_INVALID_LIMIT",
        LowReserve = -4 => "CHANGE_TRUST_LOW_RESERVE",
        SelfNotAllowed = -5 => "CHANGE_TRUST_SELF_NOT_ALLOWED",
        TrustLineMissing = -6 => "CHANGE_TRUST_TRUST_LINE_MISSING",
        CannotDelete = -7 => "CHANGE_TRUST_CANNOT_DELETE",
        NotAuthMaintainLiabilities = -8 => "CHANGE_TRUST_NOT_AUTH_MAINTAIN_LIABILITIES",
    }
}

xdr_result! {
    pub enum ChangeTrustResult(ChangeTrustResultCode) {
        Success => Success,
    }
}

xdr_enum! {
    pub enum AllowTrustResultCode {
        Success = 0 => "ALLOW_TRUST_SUCCESS",
        Malformed = -1 => "ALLOW_TRUST_MALFORMED",
        NoTrustLine = -2 => "ALLOW_TRUST_NO_TRUST_LINE",
        TrustNotRequired = -3 => "ALLOW_TRUST_TRUST_NOT_REQUIRED",
        CantRevoke = -4 => "ALLOW_TRUST_CANT_REVOKE",
        SelfNotAllowed = -5 => "ALLOW_TRUST_SELF_NOT_ALLOWED",
        LowReserve = -6 => "ALLOW_TRUST_LOW_RESERVE",
    }
}

xdr_result! {
    pub enum AllowTrustResult(AllowTrustResultCode) {
        Success => Success,
    }
}

xdr_enum! {
    pub enum AccountMergeResultCode {
        Success = 0 => "ACCOUNT_MERGE_SUCCESS",
        Malformed = -1 => "ACCOUNT_MERGE_MALFORMED",
        NoAccount = -2 => "ACCOUNT_MERGE_NO_ACCOUNT",
        ImmutableSet = -3 => "ACCOUNT_MERGE_IMMUTABLE_SET",
        HasSubEntries = -4 => "ACCOUNT_MERGE_HAS_SUB_ENTRIES",
        SeqnumTooFar = -5 => "ACCOUNT_MERGE_SEQNUM_TOO_FAR",
        DestFull = -6 => "ACCOUNT_MERGE_DEST_FULL",
        IsSponsor = -7 => "ACCOUNT_MERGE_IS_SPONSOR",
    }
}

xdr_result! {
    pub enum AccountMergeResult(AccountMergeResultCode) {
        /// The merged account's balance at the time of the merge.
        Success => Success(i64),
    }
}

xdr_enum! {
    pub enum InflationResultCode {
        Success = 0 => "INFLATION_SUCCESS",
        NotTime = -1 => "INFLATION_NOT_TIME",
    }
}

xdr_struct! {
    @codec
    pub struct InflationPayout {
        pub destination: AccountId => "destination",
        pub amount: i64 => "amount",
    }
}

xdr_result! {
    pub enum InflationResult(InflationResultCode) {
        Success => Success(VecM<InflationPayout>),
    }
}

xdr_enum! {
    pub enum ManageDataResultCode {
        Success = 0 => "MANAGE_DATA_SUCCESS",
        NotSupportedYet = -1 => "MANAGE_DATA_NOT_SUPPORTED_YET",
        NameNotFound = -2 => "MANAGE_DATA_NAME_NOT_FOUND",
        LowReserve = -3 => "MANAGE_DATA_LOW_RESERVE",
        InvalidName = -4 => "MANAGE_DATA_INVALID_NAME",
    }
}

xdr_result! {
    pub enum ManageDataResult(ManageDataResultCode) {
        Success => Success,
    }
}

xdr_enum! {
    pub enum BumpSequenceResultCode {
        Success = 0 => "BUMP_SEQUENCE_SUCCESS",
        BadSeq = -1 => "BUMP_SEQUENCE_BAD_SEQ",
    }
}

xdr_result! {
    pub enum BumpSequenceResult(BumpSequenceResultCode) {
        Success => Success,
    }
}

xdr_enum! {
    pub enum CreateClaimableBalanceResultCode {
        Success = 0 => "CREATE_CLAIMABLE_BALANCE_SUCCESS",
        Malformed = -1 => "CREATE_CLAIMABLE_BALANCE_MALFORMED",
        LowReserve = -2 => "CREATE_CLAIMABLE_BALANCE_LOW_RESERVE",
        NoTrust = -3 => "CREATE_CLAIMABLE_BALANCE_NO_TRUST",
        NotAuthorized = -4 => "CREATE_CLAIMABLE_BALANCE_NOT_AUTHORIZED",
        Underfunded = -5 => "CREATE_CLAIMABLE_BALANCE_UNDERFUNDED",
    }
}

xdr_result! {
    pub enum CreateClaimableBalanceResult(CreateClaimableBalanceResultCode) {
        Success => Success(ClaimableBalanceId),
    }
}

xdr_enum! {
    pub enum ClaimClaimableBalanceResultCode {
        Success = 0 => "CLAIM_CLAIMABLE_BALANCE_SUCCESS",
        DoesNotExist = -1 => "CLAIM_CLAIMABLE_BALANCE_DOES_NOT_EXIST",
        CannotClaim = -2 => "CLAIM_CLAIMABLE_BALANCE_CANNOT_CLAIM",
        LineFull = -3 => "CLAIM_CLAIMABLE_BALANCE_LINE_FULL",
        NoTrust = -4 => "CLAIM_CLAIMABLE_BALANCE_NO_TRUST",
        NotAuthorized = -5 => "CLAIM_CLAIMABLE_BALANCE_NOT_AUTHORIZED",
    }
}

xdr_result! {
    pub enum ClaimClaimableBalanceResult(ClaimClaimableBalanceResultCode) {
        Success => Success,
    }
}

xdr_enum! {
    pub enum BeginSponsoringFutureReservesResultCode {
        Success = 0 => "BEGIN_SPONSORING_FUTURE_RESERVES_SUCCESS",
        Malformed = -1 => "BEGIN_SPONSORING_FUTURE_RESERVES_MALFORMED",
        AlreadySponsored = -2 => "BEGIN_SPONSORING_FUTURE_RESERVES_ALREADY_SPONSORED",
        Recursive = -3 => "BEGIN_SPONSORING_FUTURE_RESERVES_RECURSIVE",
    }
}

xdr_result! {
    pub enum BeginSponsoringFutureReservesResult(BeginSponsoringFutureReservesResultCode) {
        Success => Success,
    }
}

xdr_enum! {
    pub enum EndSponsoringFutureReservesResultCode {
        Success = 0 => "END_SPONSORING_FUTURE_RESERVES_SUCCESS",
        NotSponsored = -1 => "END_SPONSORING_FUTURE_RESERVES_NOT_SPONSORED",
    }
}

xdr_result! {
    pub enum EndSponsoringFutureReservesResult(EndSponsoringFutureReservesResultCode) {
        Success => Success,
    }
}

xdr_enum! {
    pub enum RevokeSponsorshipResultCode {
        Success = 0 => "REVOKE_SPONSORSHIP_SUCCESS",
        DoesNotExist = -1 => "REVOKE_SPONSORSHIP_DOES_NOT_EXIST",
        NotSponsor = -2 => "REVOKE_SPONSORSHIP_NOT_SPONSOR",
        LowReserve = -3 => "REVOKE_SPONSORSHIP_LOW_RESERVE",
        OnlyTransferable = -4 => "REVOKE_SPONSORSHIP_ONLY_TRANSFERABLE",
        Malformed = -5 => "REVOKE_SPONSORSHIP_MALFORMED",
    }
}

xdr_result! {
    pub enum RevokeSponsorshipResult(RevokeSponsorshipResultCode) {
        Success => Success,
    }
}

xdr_enum! {
    pub enum ClawbackResultCode {
        Success = 0 => "CLAWBACK_SUCCESS",
        Malformed = -1 => "CLAWBACK_MALFORMED",
        NotClawbackEnabled = -2 => "CLAWBACK_NOT_CLAWBACK_ENABLED",
        NoTrust = -3 => "CLAWBACK_NO_TRUST",
        Underfunded = -4 => "CLAWBACK_UNDERFUNDED",
    }
}

xdr_result! {
    pub enum ClawbackResult(ClawbackResultCode) {
        Success => Success,
    }
}

xdr_enum! {
    pub enum ClawbackClaimableBalanceResultCode {
        Success = 0 => "CLAWBACK_CLAIMABLE_BALANCE_SUCCESS",
        DoesNotExist = -1 => "CLAWBACK_CLAIMABLE_BALANCE_DOES_NOT_EXIST",
        NotIssuer = -2 => "CLAWBACK_CLAIMABLE_BALANCE_NOT_ISSUER",
        NotClawbackEnabled = -3 => "CLAWBACK_CLAIMABLE_BALANCE_NOT_CLAWBACK_ENABLED",
    }
}

xdr_result! {
    pub enum ClawbackClaimableBalanceResult(ClawbackClaimableBalanceResultCode) {
        Success => Success,
    }
}

xdr_enum! {
    pub enum SetTrustLineFlagsResultCode {
        Success = 0 => "SET_TRUST_LINE_FLAGS_SUCCESS",
        Malformed = -1 => "SET_TRUST_LINE_FLAGS_MALFORMED",
        NoTrustLine = -2 => "SET_TRUST_LINE_FLAGS_NO_TRUST_LINE",
        CantRevoke = -3 => "SET_TRUST_LINE_FLAGS_CANT_REVOKE",
        InvalidState = -4 => "SET_TRUST_LINE_FLAGS_INVALID_STATE",
        LowReserve = -5 => "SET_TRUST_LINE_FLAGS_LOW_RESERVE",
    }
}

xdr_result! {
    pub enum SetTrustLineFlagsResult(SetTrustLineFlagsResultCode) {
        Success => Success,
    }
}

xdr_enum! {
    pub enum LiquidityPoolDepositResultCode {
        Success = 0 => "LIQUIDITY_POOL_DEPOSIT_SUCCESS",
        Malformed = -1 => "LIQUIDITY_POOL_DEPOSIT_MALFORMED",
        NoTrust = -2 => "LIQUIDITY_POOL_DEPOSIT_NO_TRUST",
        NotAuthorized = -3 => "LIQUIDITY_POOL_DEPOSIT_NOT_AUTHORIZED",
        Underfunded = -4 => "LIQUIDITY_POOL_DEPOSIT_UNDERFUNDED",
        LineFull = -5 => "LIQUIDITY_POOL_DEPOSIT_LINE_FULL",
        BadPrice = -6 => "LIQUIDITY_POOL_DEPOSIT_BAD_PRICE",
        PoolFull = -7 => "LIQUIDITY_POOL_DEPOSIT_POOL_FULL",
    }
}

xdr_result! {
    pub enum LiquidityPoolDepositResult(LiquidityPoolDepositResultCode) {
        Success => Success,
    }
}

xdr_enum! {
    pub enum LiquidityPoolWithdrawResultCode {
        Success = 0 => "LIQUIDITY_POOL_WITHDRAW_SUCCESS",
        Malformed = -1 => "LIQUIDITY_POOL_WITHDRAW_MALFORMED",
        NoTrust = -2 => "LIQUIDITY_POOL_WITHDRAW_NO_TRUST",
        Underfunded = -3 => "LIQUIDITY_POOL_WITHDRAW_UNDERFUNDED",
        LineFull = -4 => "LIQUIDITY_POOL_WITHDRAW_LINE_FULL",
        UnderMinimum = -5 => "LIQUIDITY_POOL_WITHDRAW_UNDER_MINIMUM",
    }
}

xdr_result! {
    pub enum LiquidityPoolWithdrawResult(LiquidityPoolWithdrawResultCode) {
        Success => Success,
    }
}

xdr_enum! {
    pub enum InvokeHostFunctionResultCode {
        Success = 0 => "INVOKE_HOST_FUNCTION_SUCCESS",
        Malformed = -1 => "INVOKE_HOST_FUNCTION_MALFORMED",
        Trapped = -2 => "INVOKE_HOST_FUNCTION_TRAPPED",
        ResourceLimitExceeded = -3 => "INVOKE_HOST_FUNCTION_RESOURCE_LIMIT_EXCEEDED",
        EntryArchived = -4 => "INVOKE_HOST_FUNCTION_ENTRY_ARCHIVED",
        InsufficientRefundableFee = -5 => "INVOKE_HOST_FUNCTION_INSUFFICIENT_REFUNDABLE_FEE",
    }
}

xdr_result! {
    pub enum InvokeHostFunctionResult(InvokeHostFunctionResultCode) {
        /// Hash of the return value and emitted events.
        Success => Success(Hash),
    }
}

xdr_enum! {
    pub enum ExtendFootprintTtlResultCode {
        Success = 0 => "EXTEND_FOOTPRINT_TTL_SUCCESS",
        Malformed = -1 => "EXTEND_FOOTPRINT_TTL_MALFORMED",
        ResourceLimitExceeded = -2 => "EXTEND_FOOTPRINT_TTL_RESOURCE_LIMIT_EXCEEDED",
        InsufficientRefundableFee = -3 => "EXTEND_FOOTPRINT_TTL_INSUFFICIENT_REFUNDABLE_FEE",
    }
}

xdr_result! {
    pub enum ExtendFootprintTtlResult(ExtendFootprintTtlResultCode) {
        Success => Success,
    }
}

xdr_enum! {
    pub enum RestoreFootprintResultCode {
        Success = 0 => "RESTORE_FOOTPRINT_SUCCESS",
        Malformed = -1 => "RESTORE_FOOTPRINT_MALFORMED",
        ResourceLimitExceeded = -2 => "RESTORE_FOOTPRINT_RESOURCE_LIMIT_EXCEEDED",
        InsufficientRefundableFee = -3 => "RESTORE_FOOTPRINT_INSUFFICIENT_REFUNDABLE_FEE",
    }
}

xdr_result! {
    pub enum RestoreFootprintResult(RestoreFootprintResultCode) {
        Success => Success,
    }
}

// ---------------------------------------------------------------------------
// Operation and transaction results
// ---------------------------------------------------------------------------

xdr_union! {
    @codec
    pub enum OperationResultTr(OperationType, "type") {
        OperationType::CreateAccount => CreateAccount(CreateAccountResult, "createAccountResult"),
        OperationType::Payment => Payment(PaymentResult, "paymentResult"),
        OperationType::PathPaymentStrictReceive => PathPaymentStrictReceive(PathPaymentStrictReceiveResult, "pathPaymentStrictReceiveResult"),
        OperationType::ManageSellOffer => ManageSellOffer(ManageSellOfferResult, "manageSellOfferResult"),
        OperationType::CreatePassiveSellOffer => CreatePassiveSellOffer(ManageSellOfferResult, "createPassiveSellOfferResult"),
        OperationType::SetOptions => SetOptions(SetOptionsResult, "setOptionsResult"),
        OperationType::ChangeTrust => ChangeTrust(ChangeTrustResult, "changeTrustResult"),
        OperationType::AllowTrust => AllowTrust(AllowTrustResult, "allowTrustResult"),
        OperationType::AccountMerge => AccountMerge(AccountMergeResult, "accountMergeResult"),
        OperationType::Inflation => Inflation(InflationResult, "inflationResult"),
        OperationType::ManageData => ManageData(ManageDataResult, "manageDataResult"),
        OperationType::BumpSequence => BumpSequence(BumpSequenceResult, "bumpSeqResult"),
        OperationType::ManageBuyOffer => ManageBuyOffer(ManageBuyOfferResult, "manageBuyOfferResult"),
        OperationType::PathPaymentStrictSend => PathPaymentStrictSend(PathPaymentStrictSendResult, "pathPaymentStrictSendResult"),
        OperationType::CreateClaimableBalance => CreateClaimableBalance(CreateClaimableBalanceResult, "createClaimableBalanceResult"),
        OperationType::ClaimClaimableBalance => ClaimClaimableBalance(ClaimClaimableBalanceResult, "claimClaimableBalanceResult"),
        OperationType::BeginSponsoringFutureReserves => BeginSponsoringFutureReserves(BeginSponsoringFutureReservesResult, "beginSponsoringFutureReservesResult"),
        OperationType::EndSponsoringFutureReserves => EndSponsoringFutureReserves(EndSponsoringFutureReservesResult, "endSponsoringFutureReservesResult"),
        OperationType::RevokeSponsorship => RevokeSponsorship(RevokeSponsorshipResult, "revokeSponsorshipResult"),
        OperationType::Clawback => Clawback(ClawbackResult, "clawbackResult"),
        OperationType::ClawbackClaimableBalance => ClawbackClaimableBalance(ClawbackClaimableBalanceResult, "clawbackClaimableBalanceResult"),
        OperationType::SetTrustLineFlags => SetTrustLineFlags(SetTrustLineFlagsResult, "setTrustLineFlagsResult"),
        OperationType::LiquidityPoolDeposit => LiquidityPoolDeposit(LiquidityPoolDepositResult, "liquidityPoolDepositResult"),
        OperationType::LiquidityPoolWithdraw => LiquidityPoolWithdraw(LiquidityPoolWithdrawResult, "liquidityPoolWithdrawResult"),
        OperationType::InvokeHostFunction => InvokeHostFunction(InvokeHostFunctionResult, "invokeHostFunctionResult"),
        OperationType::ExtendFootprintTtl => ExtendFootprintTtl(ExtendFootprintTtlResult, "extendFootprintTTLResult"),
        OperationType::RestoreFootprint => RestoreFootprint(RestoreFootprintResult, "restoreFootprintResult"),
    }
}

xdr_enum! {
    pub enum OperationResultCode {
        OpInner = 0 => "opINNER",
        OpBadAuth = -1 => "opBAD_AUTH",
        OpNoAccount = -2 => "opNO_ACCOUNT",
        OpNotSupported = -3 => "opNOT_SUPPORTED",
        OpTooManySubentries = -4 => "opTOO_MANY_SUBENTRIES",
        OpExceededWorkLimit = -5 => "opEXCEEDED_WORK_LIMIT",
        OpTooManySponsoring = -6 => "opTOO_MANY_SPONSORING",
    }
}

xdr_result! {
    pub enum OperationResult(OperationResultCode) {
        OpInner => Inner(OperationResultTr),
    }
}

xdr_enum! {
    pub enum TransactionResultCode {
        TxFeeBumpInnerSuccess = 1 => "txFEE_BUMP_INNER_SUCCESS",
        TxSuccess = 0 => "txSUCCESS",
        TxFailed = -1 => "txFAILED",
        TxTooEarly = -2 => "txTOO_EARLY",
        TxTooLate = -3 => "txTOO_LATE",
        TxMissingOperation = -4 => "txMISSING_OPERATION",
        TxBadSeq = -5 => "txBAD_SEQ",
        TxBadAuth = -6 => "txBAD_AUTH",
        TxInsufficientBalance = -7 => "txINSUFFICIENT_BALANCE",
        TxNoAccount = -8 => "txNO_ACCOUNT",
        TxInsufficientFee = -9 => "txINSUFFICIENT_FEE",
        TxBadAuthExtra = -10 => "txBAD_AUTH_EXTRA",
        TxInternalError = -11 => "txINTERNAL_ERROR",
        TxNotSupported = -12 => "txNOT_SUPPORTED",
        TxFeeBumpInnerFailed = -13 => "txFEE_BUMP_INNER_FAILED",
        TxBadSponsorship = -14 => "txBAD_SPONSORSHIP",
        TxBadMinSeqAgeOrGap = -15 => "txBAD_MIN_SEQ_AGE_OR_GAP",
        TxMalformed = -16 => "txMALFORMED",
        TxSorobanInvalid = -17 => "txSOROBAN_INVALID",
    }
}

xdr_result! {
    /// The inner result of a fee bump. Fee-bump codes cannot nest.
    pub enum InnerTransactionResultResult(TransactionResultCode) {
        TxSuccess => TxSuccess(VecM<OperationResult>),
        TxFailed => TxFailed(VecM<OperationResult>),
    }
    reject [TxFeeBumpInnerSuccess, TxFeeBumpInnerFailed]
}

xdr_union! {
    @codec
    pub enum InnerTransactionResultExt(i32, "v") {
        0 => V0,
    }
}

xdr_struct! {
    @codec
    pub struct InnerTransactionResult {
        pub fee_charged: i64 => "feeCharged",
        pub result: InnerTransactionResultResult => "result",
        pub ext: InnerTransactionResultExt => "ext",
    }
}

xdr_struct! {
    @codec
    pub struct InnerTransactionResultPair {
        pub transaction_hash: Hash => "transactionHash",
        pub result: InnerTransactionResult => "result",
    }
}

xdr_result! {
    pub enum TransactionResultResult(TransactionResultCode) {
        TxFeeBumpInnerSuccess => FeeBumpInnerSuccess(InnerTransactionResultPair),
        TxFeeBumpInnerFailed => FeeBumpInnerFailed(InnerTransactionResultPair),
        TxSuccess => TxSuccess(VecM<OperationResult>),
        TxFailed => TxFailed(VecM<OperationResult>),
    }
}

xdr_union! {
    @codec
    pub enum TransactionResultExt(i32, "v") {
        0 => V0,
    }
}

xdr_struct! {
    @codec
    pub struct TransactionResult {
        pub fee_charged: i64 => "feeCharged",
        pub result: TransactionResultResult => "result",
        pub ext: TransactionResultExt => "ext",
    }
}

impl TransactionResult {
    pub fn is_success(&self) -> bool {
        matches!(
            self.result,
            TransactionResultResult::TxSuccess(_) | TransactionResultResult::FeeBumpInnerSuccess(_)
        )
    }

    /// Operation results, looking through a fee bump to the inner
    /// transaction. Empty when the transaction failed before applying any.
    pub fn operation_results(&self) -> &[OperationResult] {
        match &self.result {
            TransactionResultResult::TxSuccess(ops) | TransactionResultResult::TxFailed(ops) => {
                ops.as_slice()
            }
            TransactionResultResult::FeeBumpInnerSuccess(pair)
            | TransactionResultResult::FeeBumpInnerFailed(pair) => match &pair.result.result {
                InnerTransactionResultResult::TxSuccess(ops)
                | InnerTransactionResultResult::TxFailed(ops) => ops.as_slice(),
                InnerTransactionResultResult::Error(_) => &[],
            },
            TransactionResultResult::Error(_) => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xdr::{XdrCodec, XdrError};

    #[test]
    fn successful_payment_result_decodes() {
        // feeCharged 100, txSUCCESS, one op: opINNER PAYMENT PAYMENT_SUCCESS, ext v0
        let bytes = [
            0, 0, 0, 0, 0, 0, 0, 100, // fee
            0, 0, 0, 0, // txSUCCESS
            0, 0, 0, 1, // one result
            0, 0, 0, 0, // opINNER
            0, 0, 0, 1, // PAYMENT
            0, 0, 0, 0, // PAYMENT_SUCCESS
            0, 0, 0, 0, // ext
        ];
        let result = TransactionResult::from_xdr(&bytes).unwrap();
        assert!(result.is_success());
        assert_eq!(result.fee_charged, 100);
        assert_eq!(
            result.operation_results(),
            &[OperationResult::Inner(OperationResultTr::Payment(
                PaymentResult::Success
            ))]
        );
        assert_eq!(result.to_xdr().unwrap(), bytes);
    }

    #[test]
    fn void_failure_codes_roundtrip_through_error_arm() {
        let result = TransactionResult {
            fee_charged: 100,
            result: TransactionResultResult::Error(TransactionResultCode::TxBadSeq),
            ext: TransactionResultExt::V0,
        };
        let bytes = result.to_xdr().unwrap();
        assert_eq!(TransactionResult::from_xdr(&bytes).unwrap(), result);
        assert!(result.operation_results().is_empty());

        let op = OperationResult::Inner(OperationResultTr::Payment(PaymentResult::Error(
            PaymentResultCode::Underfunded,
        )));
        assert_eq!(OperationResult::from_xdr(&op.to_xdr().unwrap()).unwrap(), op);
        assert_eq!(
            OperationResult::from_xdr(&[0xff, 0xff, 0xff, 0xff]).unwrap(),
            OperationResult::Error(OperationResultCode::OpBadAuth)
        );
    }

    #[test]
    fn payload_codes_cannot_hide_in_error_arm() {
        let bogus = PaymentResult::Error(PaymentResultCode::Success);
        assert!(matches!(bogus.to_xdr(), Err(XdrError::InvalidValue(_))));
    }

    #[test]
    fn inner_result_rejects_fee_bump_codes() {
        let bytes = [0, 0, 0, 1];
        assert!(matches!(
            InnerTransactionResultResult::from_xdr(&bytes),
            Err(XdrError::UnknownDiscriminant { .. })
        ));
        let nested = InnerTransactionResultResult::Error(TransactionResultCode::TxFeeBumpInnerFailed);
        assert!(nested.to_xdr().is_err());
    }

    #[test]
    fn path_payment_no_issuer_carries_asset() {
        let result = PathPaymentStrictSendResult::NoIssuer(Asset::Native);
        let bytes = result.to_xdr().unwrap();
        assert_eq!(&bytes[..4], &(-9i32).to_be_bytes());
        assert_eq!(PathPaymentStrictSendResult::from_xdr(&bytes).unwrap(), result);
    }
}
