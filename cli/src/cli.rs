//! # CLI Interface
//!
//! Defines the command-line argument structure for `stellar-tx` using
//! `clap` derive. Envelopes are passed as base64 XDR, either as an argument
//! or on stdin (omit the argument or pass `-`).

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use stellar_base::strkey::VersionByte;

use crate::logging::LogFormat;

/// Offline tool for Stellar transaction envelopes.
///
/// Decodes, re-encodes, hashes, signs and fee-bumps envelopes without
/// talking to any server. Output goes to stdout, logs to stderr.
#[derive(Parser, Debug)]
#[command(
    name = "stellar-tx",
    about = "Decode, sign and fee-bump Stellar transaction envelopes",
    version,
    propagate_version = true
)]
pub struct StellarTxCli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand.
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Network name (public, testnet, futurenet, standalone) or passphrase.
    #[arg(long, short = 'n', global = true, env = "STELLAR_NETWORK")]
    pub network: Option<String>,

    /// Path to a JSON config file.
    #[arg(long, short = 'c', global = true, env = "STELLAR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log output format.
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a base64 envelope to Txrep or a JSON summary.
    Decode(DecodeArgs),
    /// Encode a Txrep document back to a base64 envelope.
    Encode(EncodeArgs),
    /// Sign an envelope with a secret seed.
    Sign(SignArgs),
    /// Print the transaction hash (hex) for the selected network.
    Hash(InputArgs),
    /// Wrap a transaction in a fee bump.
    FeeBump(FeeBumpArgs),
    /// Generate a random key pair.
    Keygen(KeygenArgs),
    /// Inspect or build StrKey strings.
    #[command(subcommand)]
    Strkey(StrkeyCommand),
}

/// A base64 envelope argument.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Base64 XDR envelope. Read from stdin when omitted or `-`.
    pub envelope: Option<String>,
}

/// Output format for `decode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DecodeFormat {
    #[default]
    Txrep,
    /// Hash, source, fee, sequence and signature count as JSON.
    Summary,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[arg(long, short = 'f', value_enum, default_value_t = DecodeFormat::Txrep)]
    pub format: DecodeFormat,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Txrep file. Read from stdin when omitted or `-`.
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SignArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Secret seed (`S…`) of the signer.
    ///
    /// Prefer the environment variable over the flag so the seed does not
    /// end up in shell history.
    #[arg(long, env = "STELLAR_SECRET_SEED", hide_env_values = true)]
    pub secret: String,
}

#[derive(Args, Debug)]
pub struct FeeBumpArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Account paying the fee (`G…` or `M…`).
    #[arg(long)]
    pub fee_source: String,

    /// Per-operation fee in stroops. Defaults to the config file value, then
    /// to the smallest rate the network accepts.
    #[arg(long)]
    pub base_fee: Option<u32>,

    /// Sign the fee bump with this secret seed.
    #[arg(long, env = "STELLAR_SECRET_SEED", hide_env_values = true)]
    pub secret: Option<String>,
}

#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Print the key pair as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum StrkeyCommand {
    /// Show the kind and hex payload of a StrKey.
    Decode {
        key: String,
    },
    /// Encode a hex payload as a StrKey.
    Encode {
        #[arg(long, short = 'k', value_enum)]
        kind: KeyKind,
        /// Hex payload.
        payload: String,
    },
}

/// StrKey kinds, named as on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KeyKind {
    Account,
    Seed,
    PreAuthTx,
    HashX,
    Muxed,
    SignedPayload,
    Contract,
    LiquidityPool,
    ClaimableBalance,
}

impl From<KeyKind> for VersionByte {
    fn from(kind: KeyKind) -> Self {
        match kind {
            KeyKind::Account => VersionByte::AccountId,
            KeyKind::Seed => VersionByte::SecretSeed,
            KeyKind::PreAuthTx => VersionByte::PreAuthTx,
            KeyKind::HashX => VersionByte::Sha256Hash,
            KeyKind::Muxed => VersionByte::MuxedAccount,
            KeyKind::SignedPayload => VersionByte::SignedPayload,
            KeyKind::Contract => VersionByte::Contract,
            KeyKind::LiquidityPool => VersionByte::LiquidityPool,
            KeyKind::ClaimableBalance => VersionByte::ClaimableBalance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        // Ensures the derive macros produce a valid CLI definition.
        StellarTxCli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = StellarTxCli::try_parse_from([
            "stellar-tx",
            "hash",
            "AAAA",
            "--network",
            "public",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.global.network.as_deref(), Some("public"));
        assert_eq!(cli.global.log_format, Some(LogFormat::Json));
        assert!(matches!(cli.command, Commands::Hash(InputArgs { envelope: Some(_) })));
    }

    #[test]
    fn strkey_encode_takes_kind() {
        let cli = StellarTxCli::try_parse_from([
            "stellar-tx",
            "strkey",
            "encode",
            "--kind",
            "contract",
            "00",
        ])
        .unwrap();
        let Commands::Strkey(StrkeyCommand::Encode { kind, .. }) = cli.command else {
            panic!("wrong subcommand");
        };
        assert_eq!(VersionByte::from(kind), VersionByte::Contract);
    }
}
