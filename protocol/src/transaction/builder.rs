//! Transaction construction via the builder pattern.
//!
//! The [`TransactionBuilder`] enforces a disciplined construction flow:
//! collect operations and options, call `.build()`, and get back an unsigned
//! [`Transaction`] bound to the builder's network.
//!
//! `build()` validates everything before it touches the source account, so a
//! rejected build leaves the account's sequence number where it was. On
//! success the sequence is bumped by exactly one.
//!
//! The builder does not sign; that happens on the returned [`Transaction`].

use chrono::Utc;
use tracing::debug;

use super::account::Account;
use super::envelope::Transaction;
use super::error::BuildError;
use crate::config::{
    Network, BASE_FEE, MAX_EXTRA_SIGNERS, MAX_OPERATIONS, MIN_OPERATIONS,
};
use crate::xdr::{
    self, Duration, LedgerBounds, Memo, Operation, Preconditions, PreconditionsV2,
    SequenceNumber, SignerKey, SorobanTransactionData, TimeBounds, TimePoint, TransactionExt,
};

// ---------------------------------------------------------------------------
// FeePolicy
// ---------------------------------------------------------------------------

/// How the transaction fee is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeePolicy {
    /// Stroops per operation. The Soroban resource fee, if any, is added on
    /// top.
    PerOperation(u32),
    /// The exact fee field, resource fee included.
    Total(u32),
}

impl Default for FeePolicy {
    fn default() -> Self {
        Self::PerOperation(BASE_FEE)
    }
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for unsigned [`Transaction`]s.
///
/// # Usage
///
/// ```
/// use stellar_base::config::Network;
/// use stellar_base::transaction::{operations, Account, TransactionBuilder};
/// use stellar_base::xdr::{Asset, Memo};
///
/// let mut account = Account::new(
///     "GBRPYHIL2CI3FNQ4BXLFMNDLFJUNPU2HY3ZMFSHONUCEOASW7QC7OX2H",
///     100,
/// ).unwrap();
///
/// let tx = TransactionBuilder::new(&mut account, Network::testnet())
///     .add_operation(operations::payment(
///         "GBRPYHIL2CI3FNQ4BXLFMNDLFJUNPU2HY3ZMFSHONUCEOASW7QC7OX2H",
///         &Asset::native(),
///         "10",
///     ).unwrap())
///     .memo(Memo::text("rent").unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(tx.sequence_number(), 101);
/// assert_eq!(tx.fee(), 100);
/// assert_eq!(account.sequence_number(), 101);
/// ```
pub struct TransactionBuilder<'a> {
    source: &'a mut Account,
    network: Network,
    operations: Vec<Operation>,
    memo: Memo,
    fee_policy: FeePolicy,
    time_bounds: Option<TimeBounds>,
    timeout: Option<u64>,
    ledger_bounds: Option<LedgerBounds>,
    min_sequence_number: Option<SequenceNumber>,
    min_sequence_age: Duration,
    min_sequence_ledger_gap: u32,
    extra_signers: Vec<SignerKey>,
    soroban_data: Option<SorobanTransactionData>,
}

impl<'a> TransactionBuilder<'a> {
    /// Creates a builder drawing its sequence number from `source`.
    ///
    /// Defaults: 100 stroops per operation, no memo, no preconditions.
    pub fn new(source: &'a mut Account, network: Network) -> Self {
        Self {
            source,
            network,
            operations: Vec::new(),
            memo: Memo::None,
            fee_policy: FeePolicy::default(),
            time_bounds: None,
            timeout: None,
            ledger_bounds: None,
            min_sequence_number: None,
            min_sequence_age: 0,
            min_sequence_ledger_gap: 0,
            extra_signers: Vec::new(),
            soroban_data: None,
        }
    }

    pub fn add_operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn add_operations(mut self, operations: impl IntoIterator<Item = Operation>) -> Self {
        self.operations.extend(operations);
        self
    }

    pub fn memo(mut self, memo: Memo) -> Self {
        self.memo = memo;
        self
    }

    pub fn fee_policy(mut self, policy: FeePolicy) -> Self {
        self.fee_policy = policy;
        self
    }

    /// Shorthand for `fee_policy(FeePolicy::PerOperation(fee))`.
    pub fn base_fee(self, fee: u32) -> Self {
        self.fee_policy(FeePolicy::PerOperation(fee))
    }

    /// Absolute validity window in unix seconds. A `max_time` of 0 means no
    /// upper bound.
    pub fn time_bounds(mut self, min_time: TimePoint, max_time: TimePoint) -> Self {
        self.time_bounds = Some(TimeBounds { min_time, max_time });
        self
    }

    /// Valid until `seconds` from the moment `build()` runs. Cannot be
    /// combined with an explicit max time.
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// Ledger window. A `max_ledger` of 0 means no upper bound.
    pub fn ledger_bounds(mut self, min_ledger: u32, max_ledger: u32) -> Self {
        self.ledger_bounds = Some(LedgerBounds {
            min_ledger,
            max_ledger,
        });
        self
    }

    pub fn min_sequence_number(mut self, min: SequenceNumber) -> Self {
        self.min_sequence_number = Some(min);
        self
    }

    /// Seconds that must have passed since the source's sequence last
    /// changed.
    pub fn min_sequence_age(mut self, seconds: Duration) -> Self {
        self.min_sequence_age = seconds;
        self
    }

    pub fn min_sequence_ledger_gap(mut self, gap: u32) -> Self {
        self.min_sequence_ledger_gap = gap;
        self
    }

    /// Signers that must sign in addition to the usual thresholds. At most 2.
    pub fn extra_signers(mut self, signers: Vec<SignerKey>) -> Self {
        self.extra_signers = signers;
        self
    }

    /// Resource declaration for a Soroban transaction.
    pub fn soroban_data(mut self, data: SorobanTransactionData) -> Self {
        self.soroban_data = Some(data);
        self
    }

    // -- Validation ----------------------------------------------------------

    fn validate_operations(&self) -> Result<(), BuildError> {
        let count = self.operations.len();
        if !(MIN_OPERATIONS..=MAX_OPERATIONS).contains(&count) {
            return Err(BuildError::OperationCount {
                count,
                min: MIN_OPERATIONS,
                max: MAX_OPERATIONS,
            });
        }
        Ok(())
    }

    fn resolve_time_bounds(&self) -> Result<Option<TimeBounds>, BuildError> {
        if let Some(tb) = &self.time_bounds {
            if tb.max_time != 0 && tb.min_time > tb.max_time {
                return Err(BuildError::InvalidTimeBounds {
                    min: tb.min_time,
                    max: tb.max_time,
                });
            }
        }
        let Some(timeout) = self.timeout else {
            return Ok(self.time_bounds.clone());
        };
        if self.time_bounds.as_ref().is_some_and(|tb| tb.max_time != 0) {
            return Err(BuildError::ConflictingTimeout);
        }

        let min_time = self.time_bounds.as_ref().map_or(0, |tb| tb.min_time);
        // A zero timeout leaves the upper bound open.
        let max_time = if timeout == 0 {
            0
        } else {
            let now = u64::try_from(Utc::now().timestamp()).unwrap_or(0);
            now.saturating_add(timeout)
        };
        if max_time != 0 && min_time > max_time {
            return Err(BuildError::InvalidTimeBounds {
                min: min_time,
                max: max_time,
            });
        }
        Ok(Some(TimeBounds { min_time, max_time }))
    }

    fn validate_ledger_bounds(&self) -> Result<(), BuildError> {
        if let Some(lb) = &self.ledger_bounds {
            if lb.max_ledger != 0 && lb.min_ledger > lb.max_ledger {
                return Err(BuildError::InvalidLedgerBounds {
                    min: lb.min_ledger,
                    max: lb.max_ledger,
                });
            }
        }
        Ok(())
    }

    fn compute_fee(&self) -> Result<u32, BuildError> {
        match self.fee_policy {
            FeePolicy::Total(fee) => Ok(fee),
            FeePolicy::PerOperation(rate) => {
                let resource_fee = self.soroban_data.as_ref().map_or(0, |d| d.resource_fee);
                let resource_fee = u64::try_from(resource_fee).map_err(|_| {
                    BuildError::FeeOverflow(format!("negative resource fee {resource_fee}"))
                })?;
                let total = u64::from(rate)
                    .checked_mul(self.operations.len() as u64)
                    .and_then(|fee| fee.checked_add(resource_fee))
                    .ok_or_else(|| BuildError::FeeOverflow("fee arithmetic overflowed".into()))?;
                u32::try_from(total).map_err(|_| {
                    BuildError::FeeOverflow(format!("total fee {total} does not fit 32 bits"))
                })
            }
        }
    }

    /// The smallest precondition kind that expresses everything set.
    fn preconditions(&self, time_bounds: Option<TimeBounds>) -> Result<Preconditions, BuildError> {
        let needs_v2 = self.ledger_bounds.is_some()
            || self.min_sequence_number.is_some()
            || self.min_sequence_age != 0
            || self.min_sequence_ledger_gap != 0
            || !self.extra_signers.is_empty();

        if needs_v2 {
            return Ok(Preconditions::V2(PreconditionsV2 {
                time_bounds,
                ledger_bounds: self.ledger_bounds.clone(),
                min_seq_num: self.min_sequence_number,
                min_seq_age: self.min_sequence_age,
                min_seq_ledger_gap: self.min_sequence_ledger_gap,
                extra_signers: self.extra_signers.clone().try_into()?,
            }));
        }
        Ok(match time_bounds {
            Some(tb) => Preconditions::Time(tb),
            None => Preconditions::None,
        })
    }

    // -- Build ---------------------------------------------------------------

    /// Validates, bumps the source sequence and produces the transaction.
    pub fn build(self) -> Result<Transaction, BuildError> {
        self.validate_operations()?;
        let time_bounds = self.resolve_time_bounds()?;
        self.validate_ledger_bounds()?;
        if self.extra_signers.len() > MAX_EXTRA_SIGNERS {
            return Err(BuildError::TooManyExtraSigners {
                count: self.extra_signers.len(),
                max: MAX_EXTRA_SIGNERS,
            });
        }
        let fee = self.compute_fee()?;
        let seq_num = self.source.next_sequence()?;
        let cond = self.preconditions(time_bounds)?;

        let tx = xdr::Transaction {
            source_account: self.source.muxed_account().clone(),
            fee,
            seq_num,
            cond,
            memo: self.memo,
            operations: self.operations.try_into()?,
            ext: match self.soroban_data {
                Some(data) => TransactionExt::V1(data),
                None => TransactionExt::V0,
            },
        };

        self.source.increment_sequence()?;
        debug!(
            source = %self.source.account_id(),
            seq_num,
            fee,
            operations = tx.operations.len(),
            "transaction built"
        );
        Ok(Transaction::new(tx, self.network))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::operations;
    use crate::xdr::{
        Asset, LedgerFootprint, PreconditionType, SorobanResources, SorobanTransactionDataExt,
        VecM,
    };

    const G: &str = "GBRPYHIL2CI3FNQ4BXLFMNDLFJUNPU2HY3ZMFSHONUCEOASW7QC7OX2H";

    fn account() -> Account {
        Account::new(G, 100).unwrap()
    }

    fn pay() -> Operation {
        operations::payment(G, &Asset::native(), "10.0000000").unwrap()
    }

    fn soroban_data(resource_fee: i64) -> SorobanTransactionData {
        SorobanTransactionData {
            ext: SorobanTransactionDataExt::V0,
            resources: SorobanResources {
                footprint: LedgerFootprint {
                    read_only: VecM::new(),
                    read_write: VecM::new(),
                },
                instructions: 0,
                disk_read_bytes: 0,
                write_bytes: 0,
            },
            resource_fee,
        }
    }

    #[test]
    fn builds_with_defaults_and_bumps_sequence() {
        let mut acc = account();
        let tx = TransactionBuilder::new(&mut acc, Network::testnet())
            .add_operation(pay())
            .build()
            .unwrap();
        assert_eq!(tx.sequence_number(), 101);
        assert_eq!(tx.fee(), 100);
        assert_eq!(tx.preconditions().discriminant(), PreconditionType::None);
        assert_eq!(acc.sequence_number(), 101);
    }

    #[test]
    fn build_is_deterministic() {
        let mut a = account();
        let mut b = account();
        let tx_a = TransactionBuilder::new(&mut a, Network::testnet())
            .add_operation(pay())
            .build()
            .unwrap();
        let tx_b = TransactionBuilder::new(&mut b, Network::testnet())
            .add_operation(pay())
            .build()
            .unwrap();
        assert_eq!(tx_a.hash().unwrap(), tx_b.hash().unwrap());
    }

    #[test]
    fn operation_count_is_enforced() {
        let mut acc = account();
        let err = TransactionBuilder::new(&mut acc, Network::testnet())
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::OperationCount {
                count: 0,
                min: 1,
                max: 100
            }
        );
        assert_eq!(acc.sequence_number(), 100, "failed build must not bump");

        let err = TransactionBuilder::new(&mut acc, Network::testnet())
            .add_operations((0..101).map(|_| pay()))
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::OperationCount { count: 101, .. }));

        assert!(TransactionBuilder::new(&mut acc, Network::testnet())
            .add_operations((0..100).map(|_| pay()))
            .build()
            .is_ok());
    }

    #[test]
    fn fee_is_per_operation() {
        let mut acc = account();
        let tx = TransactionBuilder::new(&mut acc, Network::testnet())
            .add_operations(vec![pay(), pay(), pay()])
            .base_fee(250)
            .build()
            .unwrap();
        assert_eq!(tx.fee(), 750);

        let tx = TransactionBuilder::new(&mut acc, Network::testnet())
            .add_operations(vec![pay(), pay()])
            .fee_policy(FeePolicy::Total(1234))
            .build()
            .unwrap();
        assert_eq!(tx.fee(), 1234);
    }

    #[test]
    fn fee_overflow_is_rejected() {
        let mut acc = account();
        let err = TransactionBuilder::new(&mut acc, Network::testnet())
            .add_operations(vec![pay(), pay()])
            .base_fee(u32::MAX)
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::FeeOverflow(_)));
    }

    #[test]
    fn soroban_resource_fee_is_added() {
        let mut acc = account();
        let tx = TransactionBuilder::new(&mut acc, Network::testnet())
            .add_operation(operations::restore_footprint())
            .soroban_data(soroban_data(5_000))
            .build()
            .unwrap();
        assert_eq!(tx.fee(), 5_100);
        assert_eq!(tx.resource_fee(), 5_000);
    }

    #[test]
    fn time_bounds_validation() {
        let mut acc = account();
        let err = TransactionBuilder::new(&mut acc, Network::testnet())
            .add_operation(pay())
            .time_bounds(10, 5)
            .build()
            .unwrap_err();
        assert_eq!(err, BuildError::InvalidTimeBounds { min: 10, max: 5 });

        // max 0 is unbounded
        let tx = TransactionBuilder::new(&mut acc, Network::testnet())
            .add_operation(pay())
            .time_bounds(10, 0)
            .build()
            .unwrap();
        assert_eq!(tx.preconditions().discriminant(), PreconditionType::Time);
    }

    #[test]
    fn timeout_conflicts_with_max_time() {
        let mut acc = account();
        let err = TransactionBuilder::new(&mut acc, Network::testnet())
            .add_operation(pay())
            .time_bounds(0, 1_000)
            .timeout(30)
            .build()
            .unwrap_err();
        assert_eq!(err, BuildError::ConflictingTimeout);

        let before = Utc::now().timestamp() as u64;
        let tx = TransactionBuilder::new(&mut acc, Network::testnet())
            .add_operation(pay())
            .timeout(30)
            .build()
            .unwrap();
        let tb = tx.preconditions().time_bounds().unwrap();
        assert_eq!(tb.min_time, 0);
        assert!(tb.max_time >= before + 30 && tb.max_time <= before + 31 + 30);
    }

    #[test]
    fn ledger_bounds_and_v2_preconditions() {
        let mut acc = account();
        let err = TransactionBuilder::new(&mut acc, Network::testnet())
            .add_operation(pay())
            .ledger_bounds(10, 5)
            .build()
            .unwrap_err();
        assert_eq!(err, BuildError::InvalidLedgerBounds { min: 10, max: 5 });

        let tx = TransactionBuilder::new(&mut acc, Network::testnet())
            .add_operation(pay())
            .ledger_bounds(10, 0)
            .min_sequence_age(60)
            .build()
            .unwrap();
        match tx.preconditions() {
            Preconditions::V2(v2) => {
                assert_eq!(v2.min_seq_age, 60);
                assert_eq!(v2.ledger_bounds.as_ref().unwrap().min_ledger, 10);
                assert!(v2.time_bounds.is_none());
            }
            other => panic!("expected V2 preconditions, got {other:?}"),
        }
    }

    #[test]
    fn extra_signers_are_capped() {
        let key = SignerKey::from_strkey(G).unwrap();
        let mut acc = account();
        let err = TransactionBuilder::new(&mut acc, Network::testnet())
            .add_operation(pay())
            .extra_signers(vec![key.clone(), key.clone(), key.clone()])
            .build()
            .unwrap_err();
        assert_eq!(err, BuildError::TooManyExtraSigners { count: 3, max: 2 });

        let tx = TransactionBuilder::new(&mut acc, Network::testnet())
            .add_operation(pay())
            .extra_signers(vec![key])
            .build()
            .unwrap();
        assert_eq!(tx.preconditions().discriminant(), PreconditionType::V2);
    }

    #[test]
    fn sequence_overflow_is_rejected() {
        let mut acc = Account::new(G, i64::MAX).unwrap();
        let err = TransactionBuilder::new(&mut acc, Network::testnet())
            .add_operation(pay())
            .build()
            .unwrap_err();
        assert_eq!(err, BuildError::SequenceOverflow(i64::MAX));
    }
}
