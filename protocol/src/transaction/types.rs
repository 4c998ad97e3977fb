//! Amount and price value types.
//!
//! Amounts on the wire are `int64` stroops: one unit of any asset is
//! 10 000 000 stroops, so a textual amount carries at most 7 decimal places.
//! No floating point anywhere near money; parsing and formatting are exact.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::BuildError;
use crate::config::{AMOUNT_DECIMALS, STROOPS_PER_UNIT};
use crate::xdr::Price;

// ---------------------------------------------------------------------------
// Amount
// ---------------------------------------------------------------------------

/// An amount in stroops.
///
/// # Examples
///
/// ```
/// use stellar_base::transaction::Amount;
///
/// let ten: Amount = "10".parse().unwrap();
/// assert_eq!(ten.stroops(), 100_000_000);
/// assert_eq!(ten.to_string(), "10.0000000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    pub fn from_stroops(stroops: i64) -> Self {
        Self(stroops)
    }

    pub fn stroops(self) -> i64 {
        self.0
    }

    /// Parses a non-negative decimal such as `"10"`, `"0.5"` or
    /// `"922337203685.4775807"`. More than 7 decimal places, signs,
    /// exponents and values beyond `i64::MAX` stroops are rejected.
    pub fn parse(value: &str) -> Result<Self, BuildError> {
        let invalid = || BuildError::InvalidAmount(value.to_string());

        let (whole, frac) = match value.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (value, ""),
        };
        if whole.is_empty()
            || frac.len() > AMOUNT_DECIMALS
            || (value.contains('.') && frac.is_empty())
            || !whole.bytes().all(|b| b.is_ascii_digit())
            || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let whole: i64 = whole.parse().map_err(|_| invalid())?;
        let frac: i64 = if frac.is_empty() {
            0
        } else {
            let scale = 10i64.pow((AMOUNT_DECIMALS - frac.len()) as u32);
            frac.parse::<i64>().map_err(|_| invalid())? * scale
        };

        whole
            .checked_mul(STROOPS_PER_UNIT)
            .and_then(|stroops| stroops.checked_add(frac))
            .map(Self)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for Amount {
    /// Always prints all 7 decimal places.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let unit = STROOPS_PER_UNIT as u64;
        write!(
            f,
            "{sign}{}.{:0width$}",
            abs / unit,
            abs % unit,
            width = AMOUNT_DECIMALS
        )
    }
}

impl FromStr for Amount {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, BuildError> {
        Self::parse(s)
    }
}

impl From<Amount> for i64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// Parses a decimal amount straight to stroops.
pub fn parse_amount(value: &str) -> Result<i64, BuildError> {
    Amount::parse(value).map(Amount::stroops)
}

// ---------------------------------------------------------------------------
// Price
// ---------------------------------------------------------------------------

/// Longest decimal the price parser accepts, in digits.
const MAX_PRICE_DIGITS: usize = 30;

impl Price {
    pub fn new(n: i32, d: i32) -> Self {
        Self { n, d }
    }

    /// The best rational approximation of a positive decimal whose numerator
    /// and denominator both fit an `i32`.
    ///
    /// Walks the continued fraction expansion of the exact decimal value and
    /// keeps the last convergent that still fits. `"1.25"` becomes `5/4`,
    /// `"0.333"` becomes `333/1000`.
    pub fn from_decimal(value: &str) -> Result<Self, BuildError> {
        let invalid = || BuildError::InvalidPrice(value.to_string());

        let (whole, frac) = value.split_once('.').unwrap_or((value, ""));
        let digits = whole.len() + frac.len();
        if whole.is_empty()
            || digits > MAX_PRICE_DIGITS
            || !whole.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let mut num: u128 = format!("{whole}{frac}").parse().map_err(|_| invalid())?;
        let mut den: u128 = 10u128.pow(frac.len() as u32);

        let limit = i32::MAX as u128;
        // Convergents h/k with the two seeds h(-2)/k(-2) = 0/1, h(-1)/k(-1) = 1/0.
        let (mut h0, mut k0, mut h1, mut k1) = (0u128, 1u128, 1u128, 0u128);
        let mut best = None;
        loop {
            let a = num / den;
            let h = a.checked_mul(h1).and_then(|x| x.checked_add(h0));
            let k = a.checked_mul(k1).and_then(|x| x.checked_add(k0));
            let (h, k) = match (h, k) {
                (Some(h), Some(k)) if h <= limit && k <= limit => (h, k),
                _ => break,
            };
            best = Some((h, k));
            (h0, k0, h1, k1) = (h1, k1, h, k);

            let rem = num % den;
            if rem == 0 {
                break;
            }
            (num, den) = (den, rem);
        }

        match best {
            Some((n, d)) if n > 0 && d > 0 => Ok(Self {
                n: n as i32,
                d: d as i32,
            }),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.n, self.d)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_parse_and_format() {
        let amount = Amount::parse("10.0000000").unwrap();
        assert_eq!(amount.stroops(), 100_000_000);
        assert_eq!(amount.to_string(), "10.0000000");

        assert_eq!(Amount::parse("0.0000001").unwrap().stroops(), 1);
        assert_eq!(Amount::parse("1.5").unwrap().stroops(), 15_000_000);
        assert_eq!(Amount::parse("0").unwrap(), Amount::ZERO);
        assert_eq!(Amount::from_stroops(1).to_string(), "0.0000001");
        assert_eq!(Amount::from_stroops(-15_000_000).to_string(), "-1.5000000");
    }

    #[test]
    fn amount_bounds() {
        assert_eq!(
            Amount::parse("922337203685.4775807").unwrap().stroops(),
            i64::MAX
        );
        assert!(Amount::parse("922337203685.4775808").is_err());
    }

    #[test]
    fn amount_rejects_malformed_input() {
        for bad in ["", ".5", "1.", "1.00000001", "-1", "+1", "1e7", "1,5", " 1", "abc"] {
            assert!(
                matches!(Amount::parse(bad), Err(BuildError::InvalidAmount(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn amount_serde_is_transparent() {
        let json = serde_json::to_string(&Amount::from_stroops(42)).unwrap();
        assert_eq!(json, "42");
        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(back.stroops(), 42);
    }

    #[test]
    fn price_exact_fractions() {
        assert_eq!(Price::from_decimal("1.25").unwrap(), Price::new(5, 4));
        assert_eq!(Price::from_decimal("2").unwrap(), Price::new(2, 1));
        assert_eq!(Price::from_decimal("0.5").unwrap(), Price::new(1, 2));
        assert_eq!(Price::from_decimal("0.333").unwrap(), Price::new(333, 1000));
    }

    #[test]
    fn price_approximates_within_i32() {
        let price = Price::from_decimal("3.14159265358979323846").unwrap();
        assert!(price.n > 0 && price.d > 0);
        let approx = price.n as f64 / price.d as f64;
        assert!((approx - std::f64::consts::PI).abs() < 1e-15);
    }

    #[test]
    fn price_rejects_zero_and_out_of_range() {
        assert!(Price::from_decimal("0").is_err());
        assert!(Price::from_decimal("0.0000000000001").is_err());
        assert!(Price::from_decimal("2147483648").is_err());
        assert!(Price::from_decimal("-1").is_err());
        assert!(Price::from_decimal("1/2").is_err());
        assert_eq!(
            Price::from_decimal("2147483647").unwrap(),
            Price::new(i32::MAX, 1)
        );
    }
}
