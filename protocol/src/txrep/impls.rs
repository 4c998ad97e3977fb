//! Txrep for primitives, containers and the types with a compact text form.
//!
//! Keys, addresses and assets render on one line (`G…`, `C…`, `XLM`,
//! `USDC:G…`). A handful of values have no canonical compact form (an
//! alphanum-12 code shorter than five characters, a signed-payload signer
//! with an empty payload); those fall back to the structured layout with a
//! `type` line and per-field lines, and parsing accepts either.

use super::{index_key, join_key, Txrep, TxrepDocument, TxrepError, TxrepWriter};
use crate::xdr::{
    AccountId, AlphaNum12, AlphaNum4, Asset, AssetCode, AssetCode12, AssetCode4, AssetType,
    BytesM, ChangeTrustAsset, LiquidityPoolParameters, MuxedAccount, PoolId, ScAddress,
    SignerKey, SignerKeyEd25519SignedPayload, SignerKeyType, StringM, TrustLineAsset, Uint256,
    VecM, XdrError,
};

fn xdr_invalid(key: &str, err: XdrError) -> TxrepError {
    TxrepError::invalid(key, err.to_string())
}

// ---------------------------------------------------------------------------
// Primitives
// ---------------------------------------------------------------------------

macro_rules! txrep_display_fromstr {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Txrep for $ty {
                fn to_txrep(&self, key: &str, out: &mut TxrepWriter) {
                    out.push(key, self.to_string());
                }

                fn from_txrep(key: &str, doc: &TxrepDocument) -> Result<Self, TxrepError> {
                    doc.parse_value(key)
                }
            }
        )+
    };
}

txrep_display_fromstr!(u32, i32, u64, i64, bool);

impl<T: Txrep> Txrep for Option<T> {
    fn to_txrep(&self, key: &str, out: &mut TxrepWriter) {
        let present = join_key(key, "_present");
        match self {
            Some(value) => {
                out.push(&present, "true");
                value.to_txrep(key, out);
            }
            None => out.push(&present, "false"),
        }
    }

    fn from_txrep(key: &str, doc: &TxrepDocument) -> Result<Self, TxrepError> {
        let present: bool = doc.parse_value(&join_key(key, "_present"))?;
        if present {
            Ok(Some(T::from_txrep(key, doc)?))
        } else {
            Ok(None)
        }
    }
}

impl<T: Txrep> Txrep for Box<T> {
    fn to_txrep(&self, key: &str, out: &mut TxrepWriter) {
        self.as_ref().to_txrep(key, out);
    }

    fn from_txrep(key: &str, doc: &TxrepDocument) -> Result<Self, TxrepError> {
        Ok(Box::new(T::from_txrep(key, doc)?))
    }
}

impl<T: Txrep, const MAX: u32> Txrep for VecM<T, MAX> {
    fn to_txrep(&self, key: &str, out: &mut TxrepWriter) {
        out.push(&join_key(key, "len"), self.len().to_string());
        for (i, item) in self.iter().enumerate() {
            item.to_txrep(&index_key(key, i), out);
        }
    }

    fn from_txrep(key: &str, doc: &TxrepDocument) -> Result<Self, TxrepError> {
        let len_key = join_key(key, "len");
        let len: usize = doc.parse_value(&len_key)?;
        if len > Self::MAX_LEN {
            return Err(TxrepError::invalid(
                &len_key,
                format!("{len} elements exceeds the maximum of {}", Self::MAX_LEN),
            ));
        }
        let items = (0..len)
            .map(|i| T::from_txrep(&index_key(key, i), doc))
            .collect::<Result<Vec<_>, _>>()?;
        Self::try_from(items).map_err(|e| xdr_invalid(key, e))
    }
}

/// Opaque data as lowercase hex. An empty value is written as `0`, since a
/// blank value would not survive the line format.
impl<const MAX: u32> Txrep for BytesM<MAX> {
    fn to_txrep(&self, key: &str, out: &mut TxrepWriter) {
        if self.is_empty() {
            out.push(key, "0");
        } else {
            out.push(key, self.to_hex());
        }
    }

    fn from_txrep(key: &str, doc: &TxrepDocument) -> Result<Self, TxrepError> {
        let raw = doc.get(key)?;
        let bytes = if raw == "0" {
            Vec::new()
        } else {
            hex::decode(raw).map_err(|e| TxrepError::invalid(key, format!("hex: {e}")))?
        };
        Self::try_from(bytes).map_err(|e| xdr_invalid(key, e))
    }
}

impl<const MAX: u32> Txrep for StringM<MAX> {
    fn to_txrep(&self, key: &str, out: &mut TxrepWriter) {
        out.push_quoted(key, self.as_str());
    }

    fn from_txrep(key: &str, doc: &TxrepDocument) -> Result<Self, TxrepError> {
        Self::try_from(doc.get(key)?).map_err(|e| xdr_invalid(key, e))
    }
}

// ---------------------------------------------------------------------------
// Keys and addresses
// ---------------------------------------------------------------------------

impl Txrep for AccountId {
    fn to_txrep(&self, key: &str, out: &mut TxrepWriter) {
        out.push(key, self.to_strkey());
    }

    fn from_txrep(key: &str, doc: &TxrepDocument) -> Result<Self, TxrepError> {
        AccountId::from_strkey(doc.get(key)?).map_err(|e| xdr_invalid(key, e))
    }
}

impl Txrep for MuxedAccount {
    fn to_txrep(&self, key: &str, out: &mut TxrepWriter) {
        out.push(key, self.to_strkey());
    }

    fn from_txrep(key: &str, doc: &TxrepDocument) -> Result<Self, TxrepError> {
        MuxedAccount::from_strkey(doc.get(key)?).map_err(|e| xdr_invalid(key, e))
    }
}

impl Txrep for ScAddress {
    fn to_txrep(&self, key: &str, out: &mut TxrepWriter) {
        out.push(key, self.to_strkey());
    }

    fn from_txrep(key: &str, doc: &TxrepDocument) -> Result<Self, TxrepError> {
        ScAddress::from_strkey(doc.get(key)?).map_err(|e| xdr_invalid(key, e))
    }
}

impl Txrep for SignerKey {
    fn to_txrep(&self, key: &str, out: &mut TxrepWriter) {
        match (self.to_strkey(), self) {
            (Ok(encoded), _) => out.push(key, encoded),
            // Only an empty signed payload has no StrKey.
            (Err(_), SignerKey::Ed25519SignedPayload(sp)) => {
                let arm = join_key(key, "ed25519SignedPayload");
                self.discriminant().to_txrep(&join_key(key, "type"), out);
                sp.ed25519.to_txrep(&join_key(&arm, "ed25519"), out);
                sp.payload.to_txrep(&join_key(&arm, "payload"), out);
            }
            (Err(_), _) => {}
        }
    }

    fn from_txrep(key: &str, doc: &TxrepDocument) -> Result<Self, TxrepError> {
        if doc.contains(key) {
            return SignerKey::from_strkey(doc.get(key)?).map_err(|e| xdr_invalid(key, e));
        }
        let type_key = join_key(key, "type");
        match SignerKeyType::from_txrep(&type_key, doc)? {
            SignerKeyType::Ed25519SignedPayload => {
                let arm = join_key(key, "ed25519SignedPayload");
                Ok(SignerKey::Ed25519SignedPayload(SignerKeyEd25519SignedPayload {
                    ed25519: Uint256::from_txrep(&join_key(&arm, "ed25519"), doc)?,
                    payload: BytesM::from_txrep(&join_key(&arm, "payload"), doc)?,
                }))
            }
            other => Err(TxrepError::invalid(
                &type_key,
                format!("{other} signers are written as a StrKey"),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Assets
// ---------------------------------------------------------------------------

/// Whether the code reads back into the same variant it came from.
fn code4_is_canonical(code: &AssetCode4) -> bool {
    AssetCode4::from_code(&code.code()).map_or(false, |c| c == *code)
}

fn code12_is_canonical(code: &AssetCode12) -> bool {
    AssetCode12::from_code(&code.code()).map_or(false, |c| c == *code)
}

fn asset_is_compact(asset: &Asset) -> bool {
    match asset {
        Asset::Native => true,
        Asset::CreditAlphanum4(a) => code4_is_canonical(&a.asset_code),
        Asset::CreditAlphanum12(a) => code12_is_canonical(&a.asset_code),
    }
}

fn compact_asset(asset: &Asset) -> String {
    match asset {
        Asset::Native => "XLM".to_string(),
        other => other.to_canonical(),
    }
}

fn write_structured_asset(asset: &Asset, key: &str, out: &mut TxrepWriter) {
    asset.discriminant().to_txrep(&join_key(key, "type"), out);
    match asset {
        Asset::Native => {}
        Asset::CreditAlphanum4(a) => {
            let arm = join_key(key, "alphaNum4");
            a.asset_code.to_txrep(&join_key(&arm, "assetCode"), out);
            a.issuer.to_txrep(&join_key(&arm, "issuer"), out);
        }
        Asset::CreditAlphanum12(a) => {
            let arm = join_key(key, "alphaNum12");
            a.asset_code.to_txrep(&join_key(&arm, "assetCode"), out);
            a.issuer.to_txrep(&join_key(&arm, "issuer"), out);
        }
    }
}

/// Reads the structured layout for the plain asset arms. `None` when the
/// type line names a pool share, which only the callers know how to read.
fn read_structured_asset(key: &str, doc: &TxrepDocument) -> Result<Option<Asset>, TxrepError> {
    let asset = match AssetType::from_txrep(&join_key(key, "type"), doc)? {
        AssetType::Native => Asset::Native,
        AssetType::CreditAlphanum4 => {
            let arm = join_key(key, "alphaNum4");
            Asset::CreditAlphanum4(AlphaNum4 {
                asset_code: AssetCode4::from_txrep(&join_key(&arm, "assetCode"), doc)?,
                issuer: AccountId::from_txrep(&join_key(&arm, "issuer"), doc)?,
            })
        }
        AssetType::CreditAlphanum12 => {
            let arm = join_key(key, "alphaNum12");
            Asset::CreditAlphanum12(AlphaNum12 {
                asset_code: AssetCode12::from_txrep(&join_key(&arm, "assetCode"), doc)?,
                issuer: AccountId::from_txrep(&join_key(&arm, "issuer"), doc)?,
            })
        }
        AssetType::PoolShare => return Ok(None),
    };
    Ok(Some(asset))
}

fn read_compact_asset(key: &str, doc: &TxrepDocument) -> Result<Asset, TxrepError> {
    Asset::from_canonical(doc.get(key)?).map_err(|e| xdr_invalid(key, e))
}

impl Txrep for Asset {
    fn to_txrep(&self, key: &str, out: &mut TxrepWriter) {
        if asset_is_compact(self) {
            out.push(key, compact_asset(self));
        } else {
            write_structured_asset(self, key, out);
        }
    }

    fn from_txrep(key: &str, doc: &TxrepDocument) -> Result<Self, TxrepError> {
        if doc.contains(key) {
            return read_compact_asset(key, doc);
        }
        read_structured_asset(key, doc)?.ok_or_else(|| {
            TxrepError::invalid(&join_key(key, "type"), "pool shares are not plain assets")
        })
    }
}

impl Txrep for ChangeTrustAsset {
    fn to_txrep(&self, key: &str, out: &mut TxrepWriter) {
        match (self, self.as_asset()) {
            (ChangeTrustAsset::PoolShare(params), _) => {
                self.discriminant().to_txrep(&join_key(key, "type"), out);
                params.to_txrep(&join_key(key, "liquidityPool"), out);
            }
            (_, Some(asset)) => asset.to_txrep(key, out),
            (_, None) => {}
        }
    }

    fn from_txrep(key: &str, doc: &TxrepDocument) -> Result<Self, TxrepError> {
        if doc.contains(key) {
            return read_compact_asset(key, doc).map(ChangeTrustAsset::from);
        }
        match read_structured_asset(key, doc)? {
            Some(asset) => Ok(asset.into()),
            None => Ok(ChangeTrustAsset::PoolShare(
                LiquidityPoolParameters::from_txrep(&join_key(key, "liquidityPool"), doc)?,
            )),
        }
    }
}

impl Txrep for TrustLineAsset {
    fn to_txrep(&self, key: &str, out: &mut TxrepWriter) {
        match (self, self.as_asset()) {
            (TrustLineAsset::PoolShare(pool_id), _) => {
                self.discriminant().to_txrep(&join_key(key, "type"), out);
                pool_id.to_txrep(&join_key(key, "liquidityPoolID"), out);
            }
            (_, Some(asset)) => asset.to_txrep(key, out),
            (_, None) => {}
        }
    }

    fn from_txrep(key: &str, doc: &TxrepDocument) -> Result<Self, TxrepError> {
        if doc.contains(key) {
            return read_compact_asset(key, doc).map(TrustLineAsset::from);
        }
        match read_structured_asset(key, doc)? {
            Some(asset) => Ok(asset.into()),
            None => Ok(TrustLineAsset::PoolShare(PoolId::from_txrep(
                &join_key(key, "liquidityPoolID"),
                doc,
            )?)),
        }
    }
}

/// Allow-trust codes: the bare code, or the structured layout when the code
/// would read back as the other width.
impl Txrep for AssetCode {
    fn to_txrep(&self, key: &str, out: &mut TxrepWriter) {
        let compact = match self {
            AssetCode::CreditAlphanum4(c) => code4_is_canonical(c),
            AssetCode::CreditAlphanum12(c) => code12_is_canonical(c),
        };
        if compact {
            out.push(key, self.code());
            return;
        }
        self.discriminant().to_txrep(&join_key(key, "type"), out);
        match self {
            AssetCode::CreditAlphanum4(c) => c.to_txrep(&join_key(key, "assetCode4"), out),
            AssetCode::CreditAlphanum12(c) => c.to_txrep(&join_key(key, "assetCode12"), out),
        }
    }

    fn from_txrep(key: &str, doc: &TxrepDocument) -> Result<Self, TxrepError> {
        if doc.contains(key) {
            return AssetCode::from_code(doc.get(key)?).map_err(|e| xdr_invalid(key, e));
        }
        let type_key = join_key(key, "type");
        match AssetType::from_txrep(&type_key, doc)? {
            AssetType::CreditAlphanum4 => Ok(AssetCode::CreditAlphanum4(AssetCode4::from_txrep(
                &join_key(key, "assetCode4"),
                doc,
            )?)),
            AssetType::CreditAlphanum12 => Ok(AssetCode::CreditAlphanum12(
                AssetCode12::from_txrep(&join_key(key, "assetCode12"), doc)?,
            )),
            other => Err(TxrepError::invalid(
                &type_key,
                format!("{other} has no asset code"),
            )),
        }
    }
}
