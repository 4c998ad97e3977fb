//! The source account snapshot a builder draws sequence numbers from.
//!
//! Account state lives on the network. Callers fetch the current sequence
//! number however they like and hand it over as an [`Account`]; the builder
//! bumps it by one for every transaction it produces.

use std::fmt;

use super::error::BuildError;
use crate::xdr::{MuxedAccount, SequenceNumber};

/// An account id (plain or muxed) together with its current sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    account: MuxedAccount,
    sequence: SequenceNumber,
}

impl Account {
    /// Parses a `G…` or `M…` address.
    ///
    /// # Examples
    ///
    /// ```
    /// use stellar_base::transaction::Account;
    ///
    /// let mut account = Account::new(
    ///     "GBRPYHIL2CI3FNQ4BXLFMNDLFJUNPU2HY3ZMFSHONUCEOASW7QC7OX2H",
    ///     100,
    /// ).unwrap();
    /// assert_eq!(account.increment_sequence().unwrap(), 101);
    /// ```
    pub fn new(account_id: &str, sequence: SequenceNumber) -> Result<Self, BuildError> {
        let account = MuxedAccount::from_strkey(account_id)?;
        Ok(Self { account, sequence })
    }

    pub fn from_muxed(account: MuxedAccount, sequence: SequenceNumber) -> Self {
        Self { account, sequence }
    }

    /// The address as given: `G…` or `M…`.
    pub fn account_id(&self) -> String {
        self.account.to_strkey()
    }

    pub fn muxed_account(&self) -> &MuxedAccount {
        &self.account
    }

    pub fn sequence_number(&self) -> SequenceNumber {
        self.sequence
    }

    /// Advances the sequence number by one and returns the new value.
    /// The account is left unchanged on overflow.
    pub fn increment_sequence(&mut self) -> Result<SequenceNumber, BuildError> {
        self.sequence = self.next_sequence()?;
        Ok(self.sequence)
    }

    /// The number the next transaction from this account will carry.
    pub fn next_sequence(&self) -> Result<SequenceNumber, BuildError> {
        self.sequence
            .checked_add(1)
            .ok_or(BuildError::SequenceOverflow(self.sequence))
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (seq {})", self.account_id(), self.sequence)
    }
}
