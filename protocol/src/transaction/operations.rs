//! Operation constructors.
//!
//! One function per operation kind. Accounts are StrKey strings, amounts are
//! decimal strings (`"10.5"`), prices are decimals approximated to a
//! fraction. Every constructor returns an operation without a source
//! account; use [`with_source`] to set one.
//!
//! ```
//! use stellar_base::transaction::operations;
//! use stellar_base::xdr::Asset;
//!
//! let op = operations::payment(
//!     "GBRPYHIL2CI3FNQ4BXLFMNDLFJUNPU2HY3ZMFSHONUCEOASW7QC7OX2H",
//!     &Asset::native(),
//!     "10",
//! ).unwrap();
//! assert!(op.source_account.is_none());
//! ```

use super::error::BuildError;
use super::types::parse_amount;
use crate::strkey::StrKey;
use crate::xdr::{
    AccountId, AllowTrustOp, Asset, AssetCode, BeginSponsoringFutureReservesOp, BumpSequenceOp,
    ChangeTrustAsset, ChangeTrustOp, ClaimClaimableBalanceOp, ClaimPredicate,
    ClaimableBalanceId, Claimant, ClaimantV0, ClawbackClaimableBalanceOp, ClawbackOp,
    ContractExecutable, ContractIdPreimage, ContractIdPreimageFromAddress, CreateAccountOp,
    CreateClaimableBalanceOp, CreateContractArgs, CreatePassiveSellOfferOp, ExtendFootprintTtlOp,
    ExtensionPoint, Hash, HostFunction, InvokeContractArgs, InvokeHostFunctionOp,
    LedgerKey, LedgerKeyAccount, LedgerKeyData, LedgerKeyTrustLine, LiquidityPoolDepositOp,
    LiquidityPoolWithdrawOp, ManageBuyOfferOp, ManageDataOp, ManageSellOfferOp, MuxedAccount,
    Operation, OperationBody, PathPaymentStrictReceiveOp, PathPaymentStrictSendOp, PaymentOp,
    PoolId, Price, RestoreFootprintOp, RevokeSponsorshipOp, RevokeSponsorshipOpSigner, ScAddress,
    ScVal, SetOptionsOp, SetTrustLineFlagsOp, Signer, SignerKey, SorobanAuthorizationEntry,
    TrustLineAsset, Uint256, XdrCodec,
};

/// Signer weights are a single byte on the ledger.
const MAX_SIGNER_WEIGHT: u32 = 255;

fn op(body: OperationBody) -> Operation {
    Operation::new(body)
}

fn account(id: &str) -> Result<AccountId, BuildError> {
    Ok(AccountId::from_strkey(id)?)
}

fn muxed(id: &str) -> Result<MuxedAccount, BuildError> {
    Ok(MuxedAccount::from_strkey(id)?)
}

fn price(value: &str) -> Result<Price, BuildError> {
    Price::from_decimal(value)
}

/// A claimable balance id as a `B…` StrKey or as the hex of its XDR
/// (`00000000` followed by the 32-byte hash).
pub fn parse_balance_id(id: &str) -> Result<ClaimableBalanceId, BuildError> {
    if let Ok(StrKey::ClaimableBalance(hash)) = id.parse::<StrKey>() {
        return Ok(ClaimableBalanceId::V0(Hash(hash)));
    }
    let bytes = hex::decode(id)
        .map_err(|_| BuildError::InvalidOperation(format!("invalid claimable balance id `{id}`")))?;
    Ok(ClaimableBalanceId::from_xdr(&bytes)?)
}

/// A liquidity pool id as an `L…` StrKey or 64 hex characters.
pub fn parse_pool_id(id: &str) -> Result<PoolId, BuildError> {
    if let Ok(StrKey::LiquidityPool(hash)) = id.parse::<StrKey>() {
        return Ok(Hash(hash));
    }
    Ok(Hash::from_hex(id)?)
}

/// Sets the operation's source account (`G…` or `M…`).
pub fn with_source(mut operation: Operation, source: &str) -> Result<Operation, BuildError> {
    operation.source_account = Some(muxed(source)?);
    Ok(operation)
}

// ---------------------------------------------------------------------------
// Accounts and payments
// ---------------------------------------------------------------------------

pub fn create_account(destination: &str, starting_balance: &str) -> Result<Operation, BuildError> {
    Ok(op(OperationBody::CreateAccount(CreateAccountOp {
        destination: account(destination)?,
        starting_balance: parse_amount(starting_balance)?,
    })))
}

pub fn payment(destination: &str, asset: &Asset, amount: &str) -> Result<Operation, BuildError> {
    Ok(op(OperationBody::Payment(PaymentOp {
        destination: muxed(destination)?,
        asset: asset.clone(),
        amount: parse_amount(amount)?,
    })))
}

/// Sends at most `send_max` of `send_asset` so that exactly `dest_amount`
/// of `dest_asset` arrives. `path` holds up to 5 intermediate assets.
pub fn path_payment_strict_receive(
    send_asset: &Asset,
    send_max: &str,
    destination: &str,
    dest_asset: &Asset,
    dest_amount: &str,
    path: &[Asset],
) -> Result<Operation, BuildError> {
    Ok(op(OperationBody::PathPaymentStrictReceive(
        PathPaymentStrictReceiveOp {
            send_asset: send_asset.clone(),
            send_max: parse_amount(send_max)?,
            destination: muxed(destination)?,
            dest_asset: dest_asset.clone(),
            dest_amount: parse_amount(dest_amount)?,
            path: path.to_vec().try_into()?,
        },
    )))
}

/// Sends exactly `send_amount` so that at least `dest_min` arrives.
pub fn path_payment_strict_send(
    send_asset: &Asset,
    send_amount: &str,
    destination: &str,
    dest_asset: &Asset,
    dest_min: &str,
    path: &[Asset],
) -> Result<Operation, BuildError> {
    Ok(op(OperationBody::PathPaymentStrictSend(PathPaymentStrictSendOp {
        send_asset: send_asset.clone(),
        send_amount: parse_amount(send_amount)?,
        destination: muxed(destination)?,
        dest_asset: dest_asset.clone(),
        dest_min: parse_amount(dest_min)?,
        path: path.to_vec().try_into()?,
    })))
}

pub fn account_merge(destination: &str) -> Result<Operation, BuildError> {
    Ok(op(OperationBody::AccountMerge(muxed(destination)?)))
}

pub fn inflation() -> Operation {
    op(OperationBody::Inflation)
}

pub fn bump_sequence(bump_to: i64) -> Operation {
    op(OperationBody::BumpSequence(BumpSequenceOp { bump_to }))
}

/// Sets, or with `None` deletes, a data entry.
pub fn manage_data(name: &str, value: Option<&[u8]>) -> Result<Operation, BuildError> {
    if name.is_empty() {
        return Err(BuildError::InvalidOperation(
            "data entry name must not be empty".into(),
        ));
    }
    Ok(op(OperationBody::ManageData(ManageDataOp {
        data_name: name.try_into()?,
        data_value: value.map(TryInto::try_into).transpose()?,
    })))
}

// ---------------------------------------------------------------------------
// Account options
// ---------------------------------------------------------------------------

pub fn set_options(options: SetOptionsOp) -> Operation {
    op(OperationBody::SetOptions(options))
}

/// Adds, reweighs or (with weight 0) removes a signer.
pub fn set_signer(signer_key: &str, weight: u32) -> Result<Operation, BuildError> {
    if weight > MAX_SIGNER_WEIGHT {
        return Err(BuildError::InvalidOperation(format!(
            "signer weight {weight} exceeds {MAX_SIGNER_WEIGHT}"
        )));
    }
    Ok(set_options(SetOptionsOp {
        signer: Some(Signer {
            key: SignerKey::from_strkey(signer_key)?,
            weight,
        }),
        ..SetOptionsOp::default()
    }))
}

pub fn set_home_domain(domain: &str) -> Result<Operation, BuildError> {
    Ok(set_options(SetOptionsOp {
        home_domain: Some(domain.try_into()?),
        ..SetOptionsOp::default()
    }))
}

// ---------------------------------------------------------------------------
// Trust
// ---------------------------------------------------------------------------

/// Creates, updates or (with a zero limit) removes a trustline. `None`
/// means the maximum limit.
pub fn change_trust(line: ChangeTrustAsset, limit: Option<&str>) -> Result<Operation, BuildError> {
    let limit = match limit {
        Some(limit) => parse_amount(limit)?,
        None => i64::MAX,
    };
    Ok(op(OperationBody::ChangeTrust(ChangeTrustOp { line, limit })))
}

/// Superseded by [`set_trust_line_flags`] but still valid on the network.
pub fn allow_trust(trustor: &str, asset_code: &str, authorize: u32) -> Result<Operation, BuildError> {
    Ok(op(OperationBody::AllowTrust(AllowTrustOp {
        trustor: account(trustor)?,
        asset: AssetCode::from_code(asset_code)?,
        authorize,
    })))
}

pub fn set_trust_line_flags(
    trustor: &str,
    asset: &Asset,
    clear_flags: u32,
    set_flags: u32,
) -> Result<Operation, BuildError> {
    Ok(op(OperationBody::SetTrustLineFlags(SetTrustLineFlagsOp {
        trustor: account(trustor)?,
        asset: asset.clone(),
        clear_flags,
        set_flags,
    })))
}

// ---------------------------------------------------------------------------
// Offers
// ---------------------------------------------------------------------------

/// `offer_id` 0 creates a new offer; an amount of `"0"` deletes one.
pub fn manage_sell_offer(
    selling: &Asset,
    buying: &Asset,
    amount: &str,
    price_decimal: &str,
    offer_id: i64,
) -> Result<Operation, BuildError> {
    Ok(op(OperationBody::ManageSellOffer(ManageSellOfferOp {
        selling: selling.clone(),
        buying: buying.clone(),
        amount: parse_amount(amount)?,
        price: price(price_decimal)?,
        offer_id,
    })))
}

pub fn manage_buy_offer(
    selling: &Asset,
    buying: &Asset,
    buy_amount: &str,
    price_decimal: &str,
    offer_id: i64,
) -> Result<Operation, BuildError> {
    Ok(op(OperationBody::ManageBuyOffer(ManageBuyOfferOp {
        selling: selling.clone(),
        buying: buying.clone(),
        buy_amount: parse_amount(buy_amount)?,
        price: price(price_decimal)?,
        offer_id,
    })))
}

pub fn create_passive_sell_offer(
    selling: &Asset,
    buying: &Asset,
    amount: &str,
    price_decimal: &str,
) -> Result<Operation, BuildError> {
    Ok(op(OperationBody::CreatePassiveSellOffer(
        CreatePassiveSellOfferOp {
            selling: selling.clone(),
            buying: buying.clone(),
            amount: parse_amount(amount)?,
            price: price(price_decimal)?,
        },
    )))
}

// ---------------------------------------------------------------------------
// Claimable balances
// ---------------------------------------------------------------------------

/// A claimant that may claim under `predicate`.
pub fn claimant(destination: &str, predicate: ClaimPredicate) -> Result<Claimant, BuildError> {
    Ok(Claimant::V0(ClaimantV0 {
        destination: account(destination)?,
        predicate,
    }))
}

pub fn create_claimable_balance(
    asset: &Asset,
    amount: &str,
    claimants: Vec<Claimant>,
) -> Result<Operation, BuildError> {
    if claimants.is_empty() {
        return Err(BuildError::InvalidOperation(
            "a claimable balance needs at least one claimant".into(),
        ));
    }
    Ok(op(OperationBody::CreateClaimableBalance(
        CreateClaimableBalanceOp {
            asset: asset.clone(),
            amount: parse_amount(amount)?,
            claimants: claimants.try_into()?,
        },
    )))
}

pub fn claim_claimable_balance(balance_id: &str) -> Result<Operation, BuildError> {
    Ok(op(OperationBody::ClaimClaimableBalance(
        ClaimClaimableBalanceOp {
            balance_id: parse_balance_id(balance_id)?,
        },
    )))
}

pub fn clawback_claimable_balance(balance_id: &str) -> Result<Operation, BuildError> {
    Ok(op(OperationBody::ClawbackClaimableBalance(
        ClawbackClaimableBalanceOp {
            balance_id: parse_balance_id(balance_id)?,
        },
    )))
}

pub fn clawback(asset: &Asset, from: &str, amount: &str) -> Result<Operation, BuildError> {
    Ok(op(OperationBody::Clawback(ClawbackOp {
        asset: asset.clone(),
        from: muxed(from)?,
        amount: parse_amount(amount)?,
    })))
}

// ---------------------------------------------------------------------------
// Sponsorship
// ---------------------------------------------------------------------------

pub fn begin_sponsoring_future_reserves(sponsored: &str) -> Result<Operation, BuildError> {
    Ok(op(OperationBody::BeginSponsoringFutureReserves(
        BeginSponsoringFutureReservesOp {
            sponsored_id: account(sponsored)?,
        },
    )))
}

pub fn end_sponsoring_future_reserves() -> Operation {
    op(OperationBody::EndSponsoringFutureReserves)
}

pub fn revoke_sponsorship(revoke: RevokeSponsorshipOp) -> Operation {
    op(OperationBody::RevokeSponsorship(revoke))
}

pub fn revoke_account_sponsorship(account_id: &str) -> Result<Operation, BuildError> {
    Ok(revoke_sponsorship(RevokeSponsorshipOp::LedgerEntry(
        LedgerKey::Account(LedgerKeyAccount {
            account_id: account(account_id)?,
        }),
    )))
}

pub fn revoke_trustline_sponsorship(
    account_id: &str,
    asset: TrustLineAsset,
) -> Result<Operation, BuildError> {
    Ok(revoke_sponsorship(RevokeSponsorshipOp::LedgerEntry(
        LedgerKey::Trustline(LedgerKeyTrustLine {
            account_id: account(account_id)?,
            asset,
        }),
    )))
}

pub fn revoke_data_sponsorship(account_id: &str, name: &str) -> Result<Operation, BuildError> {
    Ok(revoke_sponsorship(RevokeSponsorshipOp::LedgerEntry(
        LedgerKey::Data(LedgerKeyData {
            account_id: account(account_id)?,
            data_name: name.try_into()?,
        }),
    )))
}

pub fn revoke_signer_sponsorship(account_id: &str, signer_key: &str) -> Result<Operation, BuildError> {
    Ok(revoke_sponsorship(RevokeSponsorshipOp::Signer(
        RevokeSponsorshipOpSigner {
            account_id: account(account_id)?,
            signer_key: SignerKey::from_strkey(signer_key)?,
        },
    )))
}

// ---------------------------------------------------------------------------
// Liquidity pools
// ---------------------------------------------------------------------------

pub fn liquidity_pool_deposit(
    pool_id: &str,
    max_amount_a: &str,
    max_amount_b: &str,
    min_price: &str,
    max_price: &str,
) -> Result<Operation, BuildError> {
    Ok(op(OperationBody::LiquidityPoolDeposit(LiquidityPoolDepositOp {
        liquidity_pool_id: parse_pool_id(pool_id)?,
        max_amount_a: parse_amount(max_amount_a)?,
        max_amount_b: parse_amount(max_amount_b)?,
        min_price: price(min_price)?,
        max_price: price(max_price)?,
    })))
}

pub fn liquidity_pool_withdraw(
    pool_id: &str,
    amount: &str,
    min_amount_a: &str,
    min_amount_b: &str,
) -> Result<Operation, BuildError> {
    Ok(op(OperationBody::LiquidityPoolWithdraw(
        LiquidityPoolWithdrawOp {
            liquidity_pool_id: parse_pool_id(pool_id)?,
            amount: parse_amount(amount)?,
            min_amount_a: parse_amount(min_amount_a)?,
            min_amount_b: parse_amount(min_amount_b)?,
        },
    )))
}

// ---------------------------------------------------------------------------
// Soroban
// ---------------------------------------------------------------------------

pub fn invoke_host_function(
    host_function: HostFunction,
    auth: Vec<SorobanAuthorizationEntry>,
) -> Result<Operation, BuildError> {
    Ok(op(OperationBody::InvokeHostFunction(InvokeHostFunctionOp {
        host_function,
        auth: auth.try_into()?,
    })))
}

/// Calls `function` on the contract at `contract` (a `C…` address).
pub fn invoke_contract(
    contract: &str,
    function: &str,
    args: Vec<ScVal>,
) -> Result<Operation, BuildError> {
    let contract_address = ScAddress::from_strkey(contract)?;
    if !matches!(contract_address, ScAddress::Contract(_)) {
        return Err(BuildError::InvalidOperation(format!(
            "`{contract}` is not a contract address"
        )));
    }
    invoke_host_function(
        HostFunction::InvokeContract(InvokeContractArgs {
            contract_address,
            function_name: function.try_into()?,
            args: args.try_into()?,
        }),
        Vec::new(),
    )
}

pub fn upload_contract_wasm(wasm: &[u8]) -> Result<Operation, BuildError> {
    invoke_host_function(HostFunction::UploadContractWasm(wasm.try_into()?), Vec::new())
}

/// Deploys uploaded wasm (`wasm_hash`) under an id derived from the deployer
/// address and `salt`.
pub fn create_contract(
    deployer: &str,
    wasm_hash: [u8; 32],
    salt: [u8; 32],
) -> Result<Operation, BuildError> {
    invoke_host_function(
        HostFunction::CreateContract(CreateContractArgs {
            contract_id_preimage: ContractIdPreimage::FromAddress(ContractIdPreimageFromAddress {
                address: ScAddress::from_strkey(deployer)?,
                salt: Uint256(salt),
            }),
            executable: ContractExecutable::Wasm(Hash(wasm_hash)),
        }),
        Vec::new(),
    )
}

/// Deploys the built-in token contract for a classic asset.
pub fn create_stellar_asset_contract(asset: &Asset) -> Result<Operation, BuildError> {
    invoke_host_function(
        HostFunction::CreateContract(CreateContractArgs {
            contract_id_preimage: ContractIdPreimage::FromAsset(asset.clone()),
            executable: ContractExecutable::StellarAsset,
        }),
        Vec::new(),
    )
}

/// Extends the TTL of the footprint's entries to `extend_to` ledgers from now.
pub fn extend_footprint_ttl(extend_to: u32) -> Operation {
    op(OperationBody::ExtendFootprintTtl(ExtendFootprintTtlOp {
        ext: ExtensionPoint::V0,
        extend_to,
    }))
}

pub fn restore_footprint() -> Operation {
    op(OperationBody::RestoreFootprint(RestoreFootprintOp {
        ext: ExtensionPoint::V0,
    }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xdr::OperationType;

    const G: &str = "GBRPYHIL2CI3FNQ4BXLFMNDLFJUNPU2HY3ZMFSHONUCEOASW7QC7OX2H";

    fn usd() -> Asset {
        Asset::credit("USD", G).unwrap()
    }

    #[test]
    fn payment_parses_amount_and_destination() {
        let op = payment(G, &Asset::native(), "10.0000000").unwrap();
        match op.body {
            OperationBody::Payment(p) => {
                assert_eq!(p.amount, 100_000_000);
                assert_eq!(p.destination.to_strkey(), G);
            }
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn constructors_reject_bad_input() {
        assert!(matches!(
            payment(G, &Asset::native(), "1.00000001"),
            Err(BuildError::InvalidAmount(_))
        ));
        assert!(payment("GABC", &Asset::native(), "1").is_err());
        assert!(matches!(
            manage_sell_offer(&usd(), &Asset::native(), "1", "0", 0),
            Err(BuildError::InvalidPrice(_))
        ));
        assert!(set_signer(G, 256).is_err());
        assert!(manage_data("", None).is_err());
        assert!(create_claimable_balance(&usd(), "1", vec![]).is_err());
        // A G address is not a contract.
        assert!(invoke_contract(G, "hello", vec![]).is_err());
    }

    #[test]
    fn path_is_bounded() {
        let path = vec![usd(); 6];
        assert!(path_payment_strict_send(&usd(), "1", G, &usd(), "1", &path[..5]).is_ok());
        assert!(path_payment_strict_send(&usd(), "1", G, &usd(), "1", &path).is_err());
    }

    #[test]
    fn with_source_sets_source_account() {
        let op = with_source(inflation(), G).unwrap();
        assert_eq!(op.source_account.unwrap().to_strkey(), G);
    }

    #[test]
    fn change_trust_defaults_to_max_limit() {
        let op = change_trust(usd().into(), None).unwrap();
        match op.body {
            OperationBody::ChangeTrust(ct) => assert_eq!(ct.limit, i64::MAX),
            other => panic!("unexpected body {other:?}"),
        }
    }

    #[test]
    fn balance_id_accepts_hex_and_strkey() {
        let hex_id = format!("00000000{}", "ab".repeat(32));
        let from_hex = parse_balance_id(&hex_id).unwrap();
        assert_eq!(from_hex, ClaimableBalanceId::V0(Hash([0xab; 32])));

        let strkey = StrKey::ClaimableBalance([0xab; 32]).to_string();
        assert_eq!(parse_balance_id(&strkey).unwrap(), from_hex);
        assert!(parse_balance_id("zz").is_err());
    }

    #[test]
    fn every_constructor_produces_its_operation_type() {
        let cases = vec![
            (create_account(G, "1").unwrap(), OperationType::CreateAccount),
            (account_merge(G).unwrap(), OperationType::AccountMerge),
            (bump_sequence(5), OperationType::BumpSequence),
            (set_home_domain("example.com").unwrap(), OperationType::SetOptions),
            (allow_trust(G, "USD", 1).unwrap(), OperationType::AllowTrust),
            (set_trust_line_flags(G, &usd(), 0, 1).unwrap(), OperationType::SetTrustLineFlags),
            (manage_buy_offer(&usd(), &Asset::native(), "1", "0.5", 0).unwrap(), OperationType::ManageBuyOffer),
            (create_passive_sell_offer(&usd(), &Asset::native(), "1", "2").unwrap(), OperationType::CreatePassiveSellOffer),
            (path_payment_strict_receive(&usd(), "1", G, &usd(), "1", &[]).unwrap(), OperationType::PathPaymentStrictReceive),
            (
                create_claimable_balance(&usd(), "1", vec![claimant(G, ClaimPredicate::Unconditional).unwrap()]).unwrap(),
                OperationType::CreateClaimableBalance,
            ),
            (clawback(&usd(), G, "1").unwrap(), OperationType::Clawback),
            (begin_sponsoring_future_reserves(G).unwrap(), OperationType::BeginSponsoringFutureReserves),
            (end_sponsoring_future_reserves(), OperationType::EndSponsoringFutureReserves),
            (revoke_account_sponsorship(G).unwrap(), OperationType::RevokeSponsorship),
            (revoke_signer_sponsorship(G, G).unwrap(), OperationType::RevokeSponsorship),
            (revoke_data_sponsorship(G, "name").unwrap(), OperationType::RevokeSponsorship),
            (liquidity_pool_deposit(&"11".repeat(32), "1", "1", "0.5", "2").unwrap(), OperationType::LiquidityPoolDeposit),
            (liquidity_pool_withdraw(&"11".repeat(32), "1", "0", "0").unwrap(), OperationType::LiquidityPoolWithdraw),
            (upload_contract_wasm(b"\0asm").unwrap(), OperationType::InvokeHostFunction),
            (create_contract(G, [1; 32], [2; 32]).unwrap(), OperationType::InvokeHostFunction),
            (create_stellar_asset_contract(&usd()).unwrap(), OperationType::InvokeHostFunction),
            (extend_footprint_ttl(1000), OperationType::ExtendFootprintTtl),
            (restore_footprint(), OperationType::RestoreFootprint),
        ];
        for (op, expected) in cases {
            assert_eq!(op.operation_type(), expected);
            // Everything a constructor builds must encode.
            Operation::from_xdr(&op.to_xdr().unwrap()).unwrap();
        }
    }

    #[test]
    fn invoke_contract_targets_contract_address() {
        let contract = crate::strkey::encode_contract(&[3; 32]);
        let op = invoke_contract(&contract, "transfer", vec![ScVal::from(5u32)]).unwrap();
        assert!(op.is_soroban());
    }
}
