//! # Stellar XDR
//!
//! The binary wire format and the typed model of every value that travels in
//! it: keys, assets, contract values, ledger entries, operations, envelopes
//! and results.
//!
//! ## Layout
//!
//! - `codec` / `bounded` / `error` — the format itself, independent of
//!   Stellar.
//! - `keys`, `asset`, `contract`, `ledger`, `soroban`, `operation`,
//!   `transaction`, `results` — the protocol definitions, each written as
//!   one macro invocation per XDR type so the binary codec and the Txrep
//!   text form stay in lockstep.
//!
//! Everything is re-exported flat from this module, mirroring how the
//! definitions share one namespace on the wire.

#[macro_use]
mod macros;

mod bounded;
mod codec;
mod error;

pub mod asset;
pub mod contract;
pub mod keys;
pub mod ledger;
pub mod operation;
pub mod results;
pub mod soroban;
pub mod transaction;

pub use bounded::{BytesM, StringM, VecM};
pub use codec::{padding_len, XdrCodec, XdrDiscriminant, XdrLimits, XdrReader, XdrWriter};
pub use error::XdrError;

pub use asset::*;
pub use contract::*;
pub use keys::*;
pub use ledger::*;
pub use operation::*;
pub use results::*;
pub use soroban::*;
pub use transaction::*;
