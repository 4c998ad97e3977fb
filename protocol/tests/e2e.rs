//! End-to-end integration tests for stellar-base.
//!
//! These tests drive the public API the way a wallet or a payment service
//! would: build a transaction from an account and operations, sign it,
//! serialize it for submission, parse it back, and wrap it in a fee bump.
//! They pin down the properties a network node depends on: bytes that
//! round-trip exactly, strict rejection of malformed input, deterministic
//! signatures, and inner envelopes that a fee bump never touches.
//!
//! Each test stands alone. Keys come from fixed seeds wherever the output
//! is compared across runs.

use stellar_base::config::{Network, DEFAULT_XDR_DEPTH_LIMIT};
use stellar_base::crypto::{sha256, KeyPair};
use stellar_base::strkey::{self, StrKey};
use stellar_base::transaction::{
    authorize_entry, operations, Account, Envelope, FeeBumpBuilder, SigningError, Transaction,
    TransactionBuilder,
};
use stellar_base::xdr::{
    AlphaNum12, AlphaNum4, Asset, AssetCode12, AssetCode4, Hash, InvokeContractArgs, Memo,
    ScAddress, ScVal, SorobanAddressCredentials, SorobanAuthorizationEntry,
    SorobanAuthorizedFunction, SorobanAuthorizedInvocation, SorobanCredentials,
    TransactionEnvelope, VecM, XdrCodec, XdrError,
};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

const ISSUER: &str = "GBRPYHIL2CI3FNQ4BXLFMNDLFJUNPU2HY3ZMFSHONUCEOASW7QC7OX2H";

// The fixtures below were produced by a separate encoder written directly
// against the Stellar XDR definitions, signing with an independent Ed25519
// implementation. Nothing in this crate took part in producing them.

/// Account of `fixed_key(7)`.
const REFERENCE_ACCOUNT: &str = "GDVEU3DD4KOFECV66VIHWEZOYX4ZKR3WV27L464SIIPOU2IUI3JCZA57";

/// The reference payment signed by `fixed_key(7)` on testnet.
const REFERENCE_PAYMENT_XDR: &str = "AAAAAgAAAADqSmxj4pxSCr71UHsTLsX5lUd2rr6+e5JCHuppFEbSLAAAAGQAAAAAAAAAZQAAAAAAAAAAAAAAAQAAAAAAAAABAAAAAOpKbGPinFIKvvVQexMuxfmVR3auvr57kkIe6mkURtIsAAAAAAAAAAAF9eEAAAAAAAAAAAEURtIsAAAAQFumZA9t5JxXnCiEnnXkyTkNWuIiWRkgtQNFNoh3wnDibeoD3a2lajd57TQvmSlqyhI4kOulOMfh4uTNXaHqTAI=";
const REFERENCE_PAYMENT_HASH: &str =
    "ba722f0c9c7c8b637761a556bfc79be1a8773aa81836f8f8debe00dc78dd1f54";

/// A testnet fee bump paid by `fixed_key(11)` around a transaction from a
/// muxed `fixed_key(9)` account (id 42): time bounds, a text memo and a
/// 25.5 USD payment to `ISSUER`.
const FEE_BUMP_XDR: &str = "AAAABQAAAABmvn4zLHpFMzK9nQp/fbBV9cXvGgatpm2Ys5+2gQxHOgAAAAAAAAGQAAAAAgAAAQAAAAAAAAAAKv0XJDhaoMdbZPt4zWAvodmR/ev3axPFjtcC6sg16fYYAAAAyAAAAALf3Bw1AAAAAQAAAAAAAAAAAAAAAGVT8QAAAAABAAAAB2ZpeHR1cmUAAAAAAQAAAAAAAAABAAAAAGL8HQvQkbK2HA3WVjRrKmjX00fG8sLI7m0ERwJW/AX3AAAAAVVTRAAAAAAAYvwdC9CRsrYcDdZWNGsqaNfTR8bywsjubQRHAlb8BfcAAAAADzL9wAAAAAAAAAABNen2GAAAAEC8m/18oFmFHrP4mloAeHOsgDf6PTi4afHFUXXTSiSMUwMxSBozahmsinKfc10esI9u+opheCfcAWLVC6l53UYGAAAAAAAAAAGBDEc6AAAAQJ6Y1fUUHXbG4txyoTigJKEJxFbCyGhlGW8DyzE752qgfrREDD5VDbWliuvSNsyRVMtRLoU8q14DaVtSejdmSQo=";
const FEE_BUMP_HASH: &str = "947a8de64ee6e41c34f1c6d801c46c9651887411a64954b6453bd06e0890d4ed";
const FEE_BUMP_INNER_HASH: &str =
    "c1f780a82cbaafeb880beccedf3119d8d10477358f1da96d792477b65628cdd0";
const FEE_BUMP_PAYER: &str = "GBTL47RTFR5EKMZSXWOQU735WBK7LRPPDIDK3JTNTCZZ7NUBBRDTVSK2";
const FEE_BUMP_INNER_SOURCE: &str =
    "MD6ROJBYLKQMOW3E7N4M2YBPUHMZD7PL65VRHRMO24BOVSBV5H3BQAAAAAAAAAAAFJMRW";

fn fixed_key(byte: u8) -> KeyPair {
    KeyPair::from_raw_seed(&[byte; 32])
}

/// The reference payment: sequence 100, default fee, 10 XLM to self.
fn reference_payment(source: &KeyPair) -> Transaction {
    let mut account = Account::new(&source.account_id(), 100).unwrap();
    TransactionBuilder::new(&mut account, Network::testnet())
        .add_operation(
            operations::payment(&source.account_id(), &Asset::native(), "10.0000000").unwrap(),
        )
        .build()
        .unwrap()
}

fn signed_payment(source: &KeyPair, ops: usize) -> Transaction {
    let mut account = Account::new(&source.account_id(), 41).unwrap();
    let mut tx = TransactionBuilder::new(&mut account, Network::testnet())
        .add_operations((0..ops).map(|i| {
            operations::payment(ISSUER, &Asset::native(), &format!("{}.5", i + 1)).unwrap()
        }))
        .memo(Memo::text("invoice 1729").unwrap())
        .timeout(300)
        .build()
        .unwrap();
    tx.sign(source).unwrap();
    tx
}

fn be_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

fn be_i64(bytes: &[u8], offset: usize) -> i64 {
    i64::from_be_bytes(bytes[offset..offset + 8].try_into().unwrap())
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[test]
fn reference_payment_has_the_expected_layout() {
    let source = fixed_key(7);
    let tx = reference_payment(&source);
    let bytes = tx.to_envelope().to_xdr().unwrap();
    let key = source.public_key_bytes();

    assert_eq!(be_u32(&bytes, 0), 2, "ENVELOPE_TYPE_TX");
    assert_eq!(be_u32(&bytes, 4), 0, "KEY_TYPE_ED25519 source");
    assert_eq!(&bytes[8..40], key);
    assert_eq!(be_u32(&bytes, 40), 100, "fee");
    assert_eq!(be_i64(&bytes, 44), 101, "sequence");
    assert_eq!(be_u32(&bytes, 52), 0, "PRECOND_NONE");
    assert_eq!(be_u32(&bytes, 56), 0, "MEMO_NONE");
    assert_eq!(be_u32(&bytes, 60), 1, "operation count");
    assert_eq!(be_u32(&bytes, 64), 0, "no operation source");
    assert_eq!(be_u32(&bytes, 68), 1, "PAYMENT");
    assert_eq!(be_u32(&bytes, 72), 0, "KEY_TYPE_ED25519 destination");
    assert_eq!(&bytes[76..108], key);
    assert_eq!(be_u32(&bytes, 108), 0, "ASSET_TYPE_NATIVE");
    assert_eq!(be_i64(&bytes, 112), 100_000_000, "10 XLM in stroops");
    assert_eq!(be_u32(&bytes, 120), 0, "transaction ext v0");
    assert_eq!(be_u32(&bytes, 124), 0, "no signatures");
    assert_eq!(bytes.len(), 128);
}

#[test]
fn reference_payment_is_identical_across_runs() {
    let source = fixed_key(7);
    let mut first = reference_payment(&source);
    let mut second = reference_payment(&source);
    first.sign(&source).unwrap();
    second.sign(&source).unwrap();

    let a = first.to_xdr_base64().unwrap();
    let b = second.to_xdr_base64().unwrap();
    assert_eq!(a, b);
    assert_eq!(first.hash_hex().unwrap(), second.hash_hex().unwrap());
}

#[test]
fn reference_payment_matches_an_independent_encoding() {
    let source = fixed_key(7);
    assert_eq!(source.account_id(), REFERENCE_ACCOUNT);

    let mut tx = reference_payment(&source);
    assert_eq!(tx.hash_hex().unwrap(), REFERENCE_PAYMENT_HASH);
    tx.sign(&source).unwrap();
    assert_eq!(tx.to_xdr_base64().unwrap(), REFERENCE_PAYMENT_XDR);

    let decoded = Envelope::from_xdr_base64(REFERENCE_PAYMENT_XDR, Network::testnet()).unwrap();
    assert_eq!(decoded, Envelope::from(tx));
    assert_eq!(decoded.hash().unwrap().to_hex(), REFERENCE_PAYMENT_HASH);
}

#[test]
fn independently_encoded_fee_bump_decodes_and_verifies() {
    let envelope = Envelope::from_xdr_base64(FEE_BUMP_XDR, Network::testnet()).unwrap();
    assert_eq!(envelope.to_xdr_base64().unwrap(), FEE_BUMP_XDR);
    let raw = TransactionEnvelope::from_xdr_base64(FEE_BUMP_XDR).unwrap();
    assert_eq!(raw.to_xdr_base64().unwrap(), FEE_BUMP_XDR);

    let Envelope::FeeBump(bump) = &envelope else {
        panic!("expected a fee bump, got {envelope:?}");
    };
    assert_eq!(bump.hash_hex().unwrap(), FEE_BUMP_HASH);
    assert_eq!(bump.fee_source(), FEE_BUMP_PAYER);
    assert_eq!(bump.fee(), 400);

    let inner = bump.inner_transaction();
    assert_eq!(inner.hash_hex().unwrap(), FEE_BUMP_INNER_HASH);
    assert_eq!(inner.source_account(), FEE_BUMP_INNER_SOURCE);
    assert_eq!(inner.fee(), 200);
    assert_eq!(inner.sequence_number(), 12_345_678_901);
    assert_eq!(inner.memo(), &Memo::text("fixture").unwrap());
    assert_eq!(inner.operations().len(), 1);

    let candidates = [fixed_key(11), fixed_key(9)];
    let bump_signers = envelope.verify_signatures(&candidates).unwrap();
    assert_eq!(bump_signers.len(), 1);
    assert_eq!(bump_signers[0].account_id(), FEE_BUMP_PAYER);
    let inner_signers = inner.verify_signatures(&candidates).unwrap();
    assert_eq!(inner_signers.len(), 1);
    assert_eq!(inner_signers[0].account_id(), candidates[1].account_id());

    // The text form carries the same envelope.
    let parsed = Envelope::from_txrep(&envelope.to_txrep(), Network::testnet()).unwrap();
    assert_eq!(parsed.to_xdr_base64().unwrap(), FEE_BUMP_XDR);
}

#[test]
fn envelopes_round_trip_byte_for_byte() {
    let source = KeyPair::random();
    let tx = signed_payment(&source, 3);
    let encoded = tx.to_xdr_base64().unwrap();

    let decoded = Envelope::from_xdr_base64(&encoded, Network::testnet()).unwrap();
    assert_eq!(decoded.to_xdr_base64().unwrap(), encoded);
    assert_eq!(decoded, Envelope::from(tx));

    let raw = TransactionEnvelope::from_xdr_base64(&encoded).unwrap();
    assert_eq!(raw.to_xdr_base64().unwrap(), encoded);
}

#[test]
fn malformed_envelopes_are_rejected() {
    let source = KeyPair::random();
    let bytes = signed_payment(&source, 1).to_envelope().to_xdr().unwrap();

    let truncated = &bytes[..bytes.len() - 4];
    assert!(matches!(
        TransactionEnvelope::from_xdr(truncated),
        Err(XdrError::UnexpectedEof { .. } | XdrError::LengthExceedsBuffer { .. })
    ));

    let mut trailing = bytes.clone();
    trailing.extend_from_slice(&[0; 4]);
    assert_eq!(
        TransactionEnvelope::from_xdr(&trailing),
        Err(XdrError::TrailingBytes(4))
    );

    let mut misaligned = bytes.clone();
    misaligned.push(0);
    assert!(matches!(
        TransactionEnvelope::from_xdr(&misaligned),
        Err(XdrError::Misaligned(_))
    ));

    let mut unknown = bytes.clone();
    unknown[..4].copy_from_slice(&9u32.to_be_bytes());
    assert!(matches!(
        TransactionEnvelope::from_xdr(&unknown),
        Err(XdrError::UnknownDiscriminant { .. })
    ));

    assert!(matches!(
        Envelope::from_xdr_base64("not base64!", Network::testnet()),
        Err(XdrError::Base64(_))
    ));
}

#[test]
fn short_codes_keep_their_asset_variant() {
    let issuer = stellar_base::xdr::AccountId::from_strkey(ISSUER).unwrap();
    let code4 = Asset::CreditAlphanum4(AlphaNum4 {
        asset_code: AssetCode4(*b"ABC\0"),
        issuer: issuer.clone(),
    });
    let mut padded = [0u8; 12];
    padded[..3].copy_from_slice(b"ABC");
    let code12 = Asset::CreditAlphanum12(AlphaNum12 {
        asset_code: AssetCode12(padded),
        issuer,
    });

    let bytes4 = code4.to_xdr().unwrap();
    let bytes12 = code12.to_xdr().unwrap();
    assert_ne!(bytes4, bytes12);
    assert_eq!(Asset::from_xdr(&bytes4).unwrap(), code4);
    assert_eq!(Asset::from_xdr(&bytes12).unwrap(), code12);
    assert_eq!(Asset::credit("ABC", ISSUER).unwrap(), code4);
}

// ---------------------------------------------------------------------------
// StrKey
// ---------------------------------------------------------------------------

#[test]
fn any_single_character_change_is_detected() {
    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";
    let encoded = fixed_key(3).account_id();

    for i in 0..encoded.len() {
        let original = encoded.as_bytes()[i];
        for &replacement in ALPHABET.iter().filter(|c| **c != original) {
            let mut flipped = encoded.clone().into_bytes();
            flipped[i] = replacement;
            let flipped = String::from_utf8(flipped).unwrap();
            assert!(
                strkey::decode(&flipped).is_err(),
                "accepted {flipped} (position {i})"
            );
        }
    }
}

#[test]
fn muxed_source_keeps_the_signing_key() {
    let source = fixed_key(9);
    let muxed = strkey::encode(
        strkey::VersionByte::MuxedAccount,
        &[source.public_key_bytes().as_slice(), &42u64.to_be_bytes()].concat(),
    )
    .unwrap();
    assert!(matches!(
        muxed.parse::<StrKey>().unwrap(),
        StrKey::MuxedAccount { id: 42, .. }
    ));

    let mut account = Account::new(&muxed, 5).unwrap();
    let mut tx = TransactionBuilder::new(&mut account, Network::testnet())
        .add_operation(operations::bump_sequence(100))
        .build()
        .unwrap();
    tx.sign(&source).unwrap();

    assert_eq!(tx.source_account(), muxed);
    let candidates = [source.to_public_only()];
    assert_eq!(tx.verify_signatures(&candidates).unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Signing
// ---------------------------------------------------------------------------

#[test]
fn signing_is_deterministic_and_network_bound() {
    let source = fixed_key(11);
    let mut account = Account::new(&source.account_id(), 1).unwrap();
    let template = TransactionBuilder::new(&mut account, Network::testnet())
        .add_operation(operations::bump_sequence(5))
        .build()
        .unwrap();

    let mut a = template.clone();
    let mut b = template.clone();
    a.sign(&source).unwrap();
    b.sign(&source).unwrap();
    assert_eq!(a.signatures(), b.signatures());

    let mut public = Transaction::new(template.as_xdr().clone(), Network::public());
    public.sign(&source).unwrap();
    assert_ne!(public.signatures(), a.signatures());
    assert_ne!(public.hash().unwrap(), a.hash().unwrap());
}

#[test]
fn signatures_accumulate_and_verify() {
    let source = KeyPair::random();
    let cosigner = KeyPair::random();
    let stranger = KeyPair::random();
    let mut tx = signed_payment(&source, 1);
    tx.sign(&cosigner).unwrap();

    assert_eq!(tx.signatures().len(), 2);
    let candidates = [
        stranger.to_public_only(),
        cosigner.to_public_only(),
        source.to_public_only(),
    ];
    let verified = tx.verify_signatures(&candidates).unwrap();
    assert_eq!(verified.len(), 2);
    assert!(!verified.contains(&&candidates[0]));

    // Survives a trip through the wire format.
    let decoded =
        Envelope::from_xdr_base64(&tx.to_xdr_base64().unwrap(), Network::testnet()).unwrap();
    assert_eq!(decoded.verify_signatures(&candidates).unwrap().len(), 2);
}

#[test]
fn public_only_keys_cannot_sign() {
    let source = KeyPair::random();
    let mut tx = reference_payment(&source);
    assert_eq!(
        tx.sign(&source.to_public_only()),
        Err(SigningError::MissingSecretKey)
    );
    assert!(tx.signatures().is_empty());
}

#[test]
fn hash_x_signatures_carry_the_preimage() {
    let source = KeyPair::random();
    let mut tx = reference_payment(&source);
    let preimage = b"open sesame";
    tx.sign_hash_x(preimage).unwrap();

    let sig = &tx.signatures()[0];
    assert_eq!(&sig.signature[..], preimage);
    assert_eq!(sig.hint.0, sha256(preimage)[28..]);
}

// ---------------------------------------------------------------------------
// Fee bumps
// ---------------------------------------------------------------------------

#[test]
fn fee_bump_leaves_the_inner_envelope_alone() {
    let source = KeyPair::random();
    let payer = KeyPair::random();
    let inner = signed_payment(&source, 2);
    let inner_bytes = inner.to_envelope().to_xdr().unwrap();

    let mut bump = FeeBumpBuilder::new(&inner)
        .fee_source(&payer.account_id())
        .base_fee(250)
        .build()
        .unwrap();
    bump.sign(&payer).unwrap();
    assert_eq!(bump.fee(), 750);

    let wrapped = bump.inner_transaction();
    assert_eq!(wrapped.to_envelope().to_xdr().unwrap(), inner_bytes);
    assert!(wrapped.is_frozen());
    assert_eq!(
        wrapped.verify_signatures(&[source.to_public_only()]).unwrap().len(),
        1
    );

    let round_trip =
        Envelope::from_xdr_base64(&bump.to_xdr_base64().unwrap(), Network::testnet()).unwrap();
    let Envelope::FeeBump(decoded) = round_trip else {
        panic!("fee bump decoded as a plain transaction");
    };
    assert_eq!(decoded.inner_transaction().to_envelope().to_xdr().unwrap(), inner_bytes);
    assert_eq!(decoded.verify_signatures(&[payer]).unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Txrep
// ---------------------------------------------------------------------------

#[test]
fn txrep_round_trips_signed_envelopes() {
    let source = KeyPair::random();
    let tx = signed_payment(&source, 2);
    let envelope = Envelope::from(tx);

    let text = envelope.to_txrep();
    assert!(text.contains("tx.operations[1].body.type: PAYMENT"));
    let parsed = Envelope::from_txrep(&text, Network::testnet()).unwrap();
    assert_eq!(parsed, envelope);
    assert_eq!(parsed.to_txrep(), text);
}

#[test]
fn txrep_round_trips_fee_bumps() {
    let source = KeyPair::random();
    let inner = signed_payment(&source, 1);
    let mut bump = FeeBumpBuilder::new(&inner)
        .fee_source(&source.account_id())
        .build()
        .unwrap();
    bump.sign(&source).unwrap();
    let envelope = Envelope::from(bump);

    let parsed = Envelope::from_txrep(&envelope.to_txrep(), Network::testnet()).unwrap();
    assert_eq!(parsed.to_xdr_base64().unwrap(), envelope.to_xdr_base64().unwrap());
}

#[test]
fn txrep_round_trips_contract_arguments_nested_to_the_xdr_limit() {
    // Txrep conversion recurses once per level, like XDR decoding does.
    let worker = std::thread::Builder::new()
        .stack_size(16 * 1024 * 1024)
        .spawn(|| {
            // Envelope, transaction, operation, body, host function op, host
            // function and call arguments come before the first contract
            // value. The innermost void takes the last admitted level.
            let levels = DEFAULT_XDR_DEPTH_LIMIT as usize - 8 - 1;
            let mut arg = ScVal::Void;
            for _ in 0..levels {
                arg = ScVal::vec(vec![arg]).unwrap();
            }

            let source = fixed_key(5);
            let contract = ScAddress::Contract(Hash([2; 32])).to_strkey();
            let mut account = Account::new(&source.account_id(), 10).unwrap();
            let mut tx = TransactionBuilder::new(&mut account, Network::testnet())
                .add_operation(operations::invoke_contract(&contract, "deep", vec![arg]).unwrap())
                .build()
                .unwrap();
            tx.sign(&source).unwrap();
            let envelope = Envelope::from(tx);

            let encoded = envelope.to_xdr_base64().unwrap();
            let decoded = Envelope::from_xdr_base64(&encoded, Network::testnet()).unwrap();
            assert_eq!(decoded, envelope);

            let text = envelope.to_txrep();
            let parsed = Envelope::from_txrep(&text, Network::testnet()).unwrap();
            assert_eq!(parsed, envelope);
            assert_eq!(parsed.to_xdr_base64().unwrap(), encoded);
        })
        .unwrap();
    worker.join().unwrap();
}

// ---------------------------------------------------------------------------
// Soroban
// ---------------------------------------------------------------------------

#[test]
fn authorization_entries_sign_and_serialize() {
    let signer = KeyPair::random();
    let entry = SorobanAuthorizationEntry {
        credentials: SorobanCredentials::Address(SorobanAddressCredentials {
            address: ScAddress::Account(signer.xdr_account_id()),
            nonce: 7,
            signature_expiration_ledger: 0,
            signature: ScVal::Void,
        }),
        root_invocation: SorobanAuthorizedInvocation {
            function: SorobanAuthorizedFunction::ContractFn(InvokeContractArgs {
                contract_address: ScAddress::Contract(Hash([2; 32])),
                function_name: "transfer".try_into().unwrap(),
                args: VecM::new(),
            }),
            sub_invocations: VecM::new(),
        },
    };

    let signed = authorize_entry(&entry, &signer, 5_000, &Network::testnet()).unwrap();
    assert_ne!(signed, entry);
    let bytes = signed.to_xdr().unwrap();
    assert_eq!(SorobanAuthorizationEntry::from_xdr(&bytes).unwrap(), signed);

    // Same inputs, same signature.
    assert_eq!(
        authorize_entry(&entry, &signer, 5_000, &Network::testnet()).unwrap(),
        signed
    );
}
