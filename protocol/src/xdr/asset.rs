//! Assets, prices and liquidity pool parameters.
//!
//! A credit asset's code lives in either a 4-byte or a 12-byte field. The
//! two are different types on the wire: `ABC` in a 4-byte code and `ABC` in
//! a 12-byte code encode differently, hash differently and compare unequal.
//! [`Asset::credit`] picks the variant from the code length (1–4 or 5–12).

use std::fmt;

use super::error::XdrError;
use super::keys::{AccountId, PoolId};

xdr_opaque! {
    pub struct AssetCode4([u8; 4]);
}

xdr_opaque! {
    pub struct AssetCode12([u8; 12]);
}

xdr_enum! {
    pub enum AssetType {
        Native = 0 => "ASSET_TYPE_NATIVE",
        CreditAlphanum4 = 1 => "ASSET_TYPE_CREDIT_ALPHANUM4",
        CreditAlphanum12 = 2 => "ASSET_TYPE_CREDIT_ALPHANUM12",
        PoolShare = 3 => "ASSET_TYPE_POOL_SHARE",
    }
}

fn validate_code(code: &str, min: usize, max: usize) -> Result<(), XdrError> {
    if code.len() < min || code.len() > max {
        return Err(XdrError::InvalidValue(format!(
            "asset code `{code}` must be {min}-{max} characters"
        )));
    }
    if !code.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(XdrError::InvalidValue(format!(
            "asset code `{code}` must be alphanumeric"
        )));
    }
    Ok(())
}

fn code_from_bytes(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

impl AssetCode4 {
    /// A 1–4 character code, zero padded.
    pub fn from_code(code: &str) -> Result<Self, XdrError> {
        validate_code(code, 1, 4)?;
        let mut bytes = [0u8; 4];
        bytes[..code.len()].copy_from_slice(code.as_bytes());
        Ok(Self(bytes))
    }

    pub fn code(&self) -> String {
        code_from_bytes(&self.0)
    }
}

impl AssetCode12 {
    /// A 5–12 character code, zero padded.
    pub fn from_code(code: &str) -> Result<Self, XdrError> {
        validate_code(code, 5, 12)?;
        let mut bytes = [0u8; 12];
        bytes[..code.len()].copy_from_slice(code.as_bytes());
        Ok(Self(bytes))
    }

    pub fn code(&self) -> String {
        code_from_bytes(&self.0)
    }
}

xdr_struct! {
    @codec
    pub struct AlphaNum4 {
        pub asset_code: AssetCode4 => "assetCode",
        pub issuer: AccountId => "issuer",
    }
}

xdr_struct! {
    @codec
    pub struct AlphaNum12 {
        pub asset_code: AssetCode12 => "assetCode",
        pub issuer: AccountId => "issuer",
    }
}

xdr_union! {
    @codec
    pub enum Asset(AssetType, "type") {
        AssetType::Native => Native,
        AssetType::CreditAlphanum4 => CreditAlphanum4(AlphaNum4, "alphaNum4"),
        AssetType::CreditAlphanum12 => CreditAlphanum12(AlphaNum12, "alphaNum12"),
    }
}

impl Asset {
    pub fn native() -> Self {
        Self::Native
    }

    /// A credit asset; 1–4 character codes get the short variant, 5–12 the
    /// long one.
    pub fn credit(code: &str, issuer: &str) -> Result<Self, XdrError> {
        let issuer = AccountId::from_strkey(issuer)?;
        Self::credit_with_issuer(code, issuer)
    }

    pub fn credit_with_issuer(code: &str, issuer: AccountId) -> Result<Self, XdrError> {
        if code.len() <= 4 {
            Ok(Self::CreditAlphanum4(AlphaNum4 {
                asset_code: AssetCode4::from_code(code)?,
                issuer,
            }))
        } else {
            Ok(Self::CreditAlphanum12(AlphaNum12 {
                asset_code: AssetCode12::from_code(code)?,
                issuer,
            }))
        }
    }

    /// Parses `native`, `XLM` or `CODE:ISSUER`.
    pub fn from_canonical(s: &str) -> Result<Self, XdrError> {
        match s {
            "native" | "XLM" => Ok(Self::Native),
            _ => {
                let (code, issuer) = s.split_once(':').ok_or_else(|| {
                    XdrError::InvalidValue(format!("`{s}` is not `CODE:ISSUER`"))
                })?;
                Self::credit(code, issuer)
            }
        }
    }

    /// `native` or `CODE:ISSUER`.
    pub fn to_canonical(&self) -> String {
        match self {
            Self::Native => "native".to_string(),
            other => format!(
                "{}:{}",
                other.code().unwrap_or_default(),
                other.issuer().map(|i| i.to_strkey()).unwrap_or_default()
            ),
        }
    }

    pub fn code(&self) -> Option<String> {
        match self {
            Self::Native => None,
            Self::CreditAlphanum4(a) => Some(a.asset_code.code()),
            Self::CreditAlphanum12(a) => Some(a.asset_code.code()),
        }
    }

    pub fn issuer(&self) -> Option<&AccountId> {
        match self {
            Self::Native => None,
            Self::CreditAlphanum4(a) => Some(&a.issuer),
            Self::CreditAlphanum12(a) => Some(&a.issuer),
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native)
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical())
    }
}

xdr_union! {
    @codec
    /// An asset code without issuer, used by allow-trust.
    pub enum AssetCode(AssetType, "type") {
        AssetType::CreditAlphanum4 => CreditAlphanum4(AssetCode4, "assetCode4"),
        AssetType::CreditAlphanum12 => CreditAlphanum12(AssetCode12, "assetCode12"),
    }
}

impl AssetCode {
    pub fn from_code(code: &str) -> Result<Self, XdrError> {
        if code.len() <= 4 {
            Ok(Self::CreditAlphanum4(AssetCode4::from_code(code)?))
        } else {
            Ok(Self::CreditAlphanum12(AssetCode12::from_code(code)?))
        }
    }

    pub fn code(&self) -> String {
        match self {
            Self::CreditAlphanum4(c) => c.code(),
            Self::CreditAlphanum12(c) => c.code(),
        }
    }
}

xdr_struct! {
    /// A rational price `n / d`.
    pub struct Price {
        pub n: i32 => "n",
        pub d: i32 => "d",
    }
}

xdr_struct! {
    @codec
    pub struct Liabilities {
        pub buying: i64 => "buying",
        pub selling: i64 => "selling",
    }
}

// ---------------------------------------------------------------------------
// Liquidity pools
// ---------------------------------------------------------------------------

/// Pool fee in basis points; the only value the network accepts.
pub const LIQUIDITY_POOL_FEE_V18: i32 = 30;

xdr_enum! {
    pub enum LiquidityPoolType {
        ConstantProduct = 0 => "LIQUIDITY_POOL_CONSTANT_PRODUCT",
    }
}

xdr_struct! {
    pub struct LiquidityPoolConstantProductParameters {
        pub asset_a: Asset => "assetA",
        pub asset_b: Asset => "assetB",
        pub fee: i32 => "fee",
    }
}

xdr_union! {
    pub enum LiquidityPoolParameters(LiquidityPoolType, "type") {
        LiquidityPoolType::ConstantProduct => ConstantProduct(LiquidityPoolConstantProductParameters, "constantProduct"),
    }
}

xdr_union! {
    @codec
    /// The asset of a change-trust operation: a plain asset or a pool share.
    pub enum ChangeTrustAsset(AssetType, "type") {
        AssetType::Native => Native,
        AssetType::CreditAlphanum4 => CreditAlphanum4(AlphaNum4, "alphaNum4"),
        AssetType::CreditAlphanum12 => CreditAlphanum12(AlphaNum12, "alphaNum12"),
        AssetType::PoolShare => PoolShare(LiquidityPoolParameters, "liquidityPool"),
    }
}

impl From<Asset> for ChangeTrustAsset {
    fn from(asset: Asset) -> Self {
        match asset {
            Asset::Native => Self::Native,
            Asset::CreditAlphanum4(a) => Self::CreditAlphanum4(a),
            Asset::CreditAlphanum12(a) => Self::CreditAlphanum12(a),
        }
    }
}

impl ChangeTrustAsset {
    /// The plain asset, if this is not a pool share.
    pub fn as_asset(&self) -> Option<Asset> {
        match self {
            Self::Native => Some(Asset::Native),
            Self::CreditAlphanum4(a) => Some(Asset::CreditAlphanum4(a.clone())),
            Self::CreditAlphanum12(a) => Some(Asset::CreditAlphanum12(a.clone())),
            Self::PoolShare(_) => None,
        }
    }
}

xdr_union! {
    @codec
    /// The asset of a trust line: a plain asset or a pool id.
    pub enum TrustLineAsset(AssetType, "type") {
        AssetType::Native => Native,
        AssetType::CreditAlphanum4 => CreditAlphanum4(AlphaNum4, "alphaNum4"),
        AssetType::CreditAlphanum12 => CreditAlphanum12(AlphaNum12, "alphaNum12"),
        AssetType::PoolShare => PoolShare(PoolId, "liquidityPoolID"),
    }
}

impl From<Asset> for TrustLineAsset {
    fn from(asset: Asset) -> Self {
        match asset {
            Asset::Native => Self::Native,
            Asset::CreditAlphanum4(a) => Self::CreditAlphanum4(a),
            Asset::CreditAlphanum12(a) => Self::CreditAlphanum12(a),
        }
    }
}

impl TrustLineAsset {
    pub fn as_asset(&self) -> Option<Asset> {
        match self {
            Self::Native => Some(Asset::Native),
            Self::CreditAlphanum4(a) => Some(Asset::CreditAlphanum4(a.clone())),
            Self::CreditAlphanum12(a) => Some(Asset::CreditAlphanum12(a.clone())),
            Self::PoolShare(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xdr::XdrCodec;

    const ISSUER: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

    #[test]
    fn credit_picks_variant_by_length() {
        assert!(matches!(
            Asset::credit("USD", ISSUER).unwrap(),
            Asset::CreditAlphanum4(_)
        ));
        assert!(matches!(
            Asset::credit("LONGCODE", ISSUER).unwrap(),
            Asset::CreditAlphanum12(_)
        ));
        assert!(Asset::credit("", ISSUER).is_err());
        assert!(Asset::credit("THIRTEENCHARS", ISSUER).is_err());
        assert!(Asset::credit("US-D", ISSUER).is_err());
    }

    #[test]
    fn short_and_long_code_variants_never_coincide() {
        let issuer = AccountId::from_strkey(ISSUER).unwrap();
        let short = Asset::CreditAlphanum4(AlphaNum4 {
            asset_code: AssetCode4(*b"ABC\0"),
            issuer: issuer.clone(),
        });
        let mut padded = [0u8; 12];
        padded[..3].copy_from_slice(b"ABC");
        let long = Asset::CreditAlphanum12(AlphaNum12 {
            asset_code: AssetCode12(padded),
            issuer,
        });

        assert_ne!(short, long);
        let short_bytes = short.to_xdr().unwrap();
        let long_bytes = long.to_xdr().unwrap();
        assert_ne!(short_bytes, long_bytes);
        assert_eq!(Asset::from_xdr(&short_bytes).unwrap(), short);
        assert_eq!(Asset::from_xdr(&long_bytes).unwrap(), long);
        assert_ne!(Asset::from_xdr(&long_bytes).unwrap(), short);
    }

    #[test]
    fn canonical_form() {
        let asset = Asset::from_canonical(&format!("USDC:{ISSUER}")).unwrap();
        assert_eq!(asset.code().as_deref(), Some("USDC"));
        assert_eq!(asset.to_canonical(), format!("USDC:{ISSUER}"));
        assert_eq!(Asset::from_canonical("XLM").unwrap(), Asset::Native);
        assert_eq!(Asset::native().to_canonical(), "native");
        assert!(Asset::from_canonical("USDC").is_err());
    }

    #[test]
    fn native_asset_is_just_the_discriminant() {
        assert_eq!(Asset::Native.to_xdr().unwrap(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn pool_share_is_not_a_plain_asset() {
        let bytes = [0u8, 0, 0, 3];
        assert!(matches!(
            Asset::from_xdr(&bytes),
            Err(XdrError::UnknownDiscriminant { type_name: "Asset", value: 3 })
        ));
    }
}
