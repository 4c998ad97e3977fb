//! Fee bump construction.
//!
//! A fee bump re-submits an already built (and usually already signed)
//! transaction with a higher fee paid by a possibly different account. The
//! inner envelope is copied byte for byte: its signatures stay valid because
//! nothing they cover changes.
//!
//! Fee rules:
//!
//! - the bump's per-operation rate must be at least the network minimum
//!   (100 stroops) and at least the inner transaction's own rate;
//! - the fee bump counts as one extra operation, so the total is
//!   `rate × (inner operations + 1)`, plus the inner Soroban resource fee.

use tracing::debug;

use super::envelope::{FeeBumpTransaction, Transaction};
use super::error::BuildError;
use crate::config::BASE_FEE;
use crate::xdr::{self, FeeBumpTransactionExt, FeeBumpTransactionInnerTx, MuxedAccount};

/// Builds a [`FeeBumpTransaction`] around an inner [`Transaction`].
///
/// ```
/// use stellar_base::config::Network;
/// use stellar_base::crypto::KeyPair;
/// use stellar_base::transaction::{operations, Account, FeeBumpBuilder, TransactionBuilder};
/// use stellar_base::xdr::Asset;
///
/// let payer = KeyPair::random();
/// let mut account = Account::new(&payer.account_id(), 1).unwrap();
/// let inner = TransactionBuilder::new(&mut account, Network::testnet())
///     .add_operation(operations::bump_sequence(10))
///     .build()
///     .unwrap();
///
/// let bump = FeeBumpBuilder::new(&inner)
///     .fee_source(&payer.account_id())
///     .base_fee(200)
///     .build()
///     .unwrap();
/// assert_eq!(bump.fee(), 400);
/// ```
pub struct FeeBumpBuilder<'a> {
    inner: &'a Transaction,
    fee_source: Option<String>,
    base_fee: Option<u32>,
}

impl<'a> FeeBumpBuilder<'a> {
    pub fn new(inner: &'a Transaction) -> Self {
        Self {
            inner,
            fee_source: None,
            base_fee: None,
        }
    }

    /// The account paying the fee (`G…` or `M…`).
    pub fn fee_source(mut self, account_id: &str) -> Self {
        self.fee_source = Some(account_id.to_string());
        self
    }

    /// Per-operation rate. Defaults to the smallest acceptable rate.
    pub fn base_fee(mut self, fee: u32) -> Self {
        self.base_fee = Some(fee);
        self
    }

    /// The smallest rate the network accepts for this bump.
    pub fn minimum_base_fee(&self) -> i64 {
        let ops = self.inner.operations().len().max(1) as i64;
        let inner_rate = (i64::from(self.inner.fee()) - self.inner.resource_fee()) / ops;
        inner_rate.max(i64::from(BASE_FEE))
    }

    pub fn build(self) -> Result<FeeBumpTransaction, BuildError> {
        let fee_source = self
            .fee_source
            .as_deref()
            .ok_or(BuildError::MissingFeeSource)?;
        let fee_source = MuxedAccount::from_strkey(fee_source)?;

        let min = self.minimum_base_fee();
        let base_fee = self.base_fee.map_or(min, i64::from);
        if base_fee < min {
            return Err(BuildError::FeeTooLow { base_fee, min });
        }

        let ops = self.inner.operations().len() as i64;
        let fee = base_fee
            .checked_mul(ops + 1)
            .and_then(|fee| fee.checked_add(self.inner.resource_fee()))
            .ok_or_else(|| BuildError::FeeOverflow(format!("fee bump of {base_fee} per operation")))?;

        let tx = xdr::FeeBumpTransaction {
            fee_source,
            fee,
            inner_tx: FeeBumpTransactionInnerTx::Tx(self.inner.to_v1_envelope()),
            ext: FeeBumpTransactionExt::V0,
        };
        debug!(
            fee_source = %tx.fee_source,
            fee,
            inner_signatures = self.inner.signatures().len(),
            "fee bump built"
        );
        Ok(FeeBumpTransaction::new(tx, self.inner.network().clone()))
    }
}
