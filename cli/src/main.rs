// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # stellar-tx
//!
//! Entry point for the `stellar-tx` binary. Parses CLI arguments, loads the
//! optional config file, initializes logging and dispatches to one of:
//!
//! - `decode`   — base64 envelope to Txrep or a JSON summary
//! - `encode`   — Txrep to base64 envelope
//! - `sign`     — add a signature to an envelope
//! - `hash`     — print the transaction hash
//! - `fee-bump` — wrap a transaction in a fee bump
//! - `keygen`   — generate a key pair
//! - `strkey`   — inspect or build StrKey strings

mod cli;
mod config;
mod logging;

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::json;

use stellar_base::config::Network;
use stellar_base::crypto::KeyPair;
use stellar_base::strkey::{self, VersionByte};
use stellar_base::transaction::{Envelope, FeeBumpBuilder};

use cli::{Commands, DecodeFormat, StellarTxCli, StrkeyCommand};
use config::ToolConfig;

fn main() -> Result<()> {
    let cli = StellarTxCli::parse();

    let config = ToolConfig::load(cli.global.config.as_deref())?;
    logging::init_logging(config.log_level(), config.log_format(cli.global.log_format));
    let network = config.network(cli.global.network.as_deref());
    tracing::debug!(network = %network, "network selected");

    match cli.command {
        Commands::Decode(args) => decode(args, &network),
        Commands::Encode(args) => encode(args, &network),
        Commands::Sign(args) => sign(args, &network),
        Commands::Hash(args) => hash(args, &network),
        Commands::FeeBump(args) => fee_bump(args, &network, &config),
        Commands::Keygen(args) => keygen(args),
        Commands::Strkey(command) => run_strkey(command),
    }
}

// ---------------------------------------------------------------------------
// Envelope commands
// ---------------------------------------------------------------------------

fn decode(args: cli::DecodeArgs, network: &Network) -> Result<()> {
    let envelope = read_envelope(args.input.envelope.as_deref(), network)?;
    match args.format {
        DecodeFormat::Txrep => print!("{}", envelope.to_txrep()),
        DecodeFormat::Summary => {
            let summary = summarize(&envelope)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}

fn encode(args: cli::EncodeArgs, network: &Network) -> Result<()> {
    let text = match args.file.as_deref() {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        _ => read_stdin()?,
    };
    let envelope =
        Envelope::from_txrep(&text, network.clone()).context("failed to parse Txrep")?;
    println!("{}", envelope.to_xdr_base64()?);
    Ok(())
}

fn sign(args: cli::SignArgs, network: &Network) -> Result<()> {
    let mut envelope = read_envelope(args.input.envelope.as_deref(), network)?;
    let signer = KeyPair::from_secret_seed(args.secret.trim()).context("invalid secret seed")?;
    envelope
        .sign(&signer)
        .with_context(|| format!("failed to sign as {}", signer.account_id()))?;
    tracing::info!(
        signer = %signer.account_id(),
        signatures = envelope.signatures().len(),
        "envelope signed"
    );
    println!("{}", envelope.to_xdr_base64()?);
    Ok(())
}

fn hash(args: cli::InputArgs, network: &Network) -> Result<()> {
    let envelope = read_envelope(args.envelope.as_deref(), network)?;
    println!("{}", envelope.hash()?.to_hex());
    Ok(())
}

fn fee_bump(args: cli::FeeBumpArgs, network: &Network, config: &ToolConfig) -> Result<()> {
    let inner = match read_envelope(args.input.envelope.as_deref(), network)? {
        Envelope::Transaction(tx) => tx,
        Envelope::FeeBump(_) => bail!("envelope is already a fee bump"),
    };

    let mut builder = FeeBumpBuilder::new(&inner).fee_source(&args.fee_source);
    if let Some(fee) = config.base_fee(args.base_fee) {
        builder = builder.base_fee(fee);
    }
    let mut bump = builder.build().context("failed to build fee bump")?;

    if let Some(secret) = args.secret.as_deref() {
        let signer = KeyPair::from_secret_seed(secret.trim()).context("invalid secret seed")?;
        bump.sign(&signer)
            .with_context(|| format!("failed to sign as {}", signer.account_id()))?;
    }
    tracing::info!(fee = bump.fee(), fee_source = %bump.fee_source(), "fee bump built");
    println!("{}", bump.to_xdr_base64()?);
    Ok(())
}

fn summarize(envelope: &Envelope) -> Result<serde_json::Value> {
    let hash = envelope.hash()?.to_hex();
    Ok(match envelope {
        Envelope::Transaction(tx) => json!({
            "type": "transaction",
            "network": envelope.network().passphrase(),
            "hash": hash,
            "source_account": tx.source_account(),
            "fee": tx.fee(),
            "sequence_number": tx.sequence_number(),
            "memo": tx.memo().discriminant().name(),
            "operations": tx.operations().len(),
            "signatures": tx.signatures().len(),
        }),
        Envelope::FeeBump(bump) => {
            let inner = bump.inner_transaction();
            json!({
                "type": "fee_bump",
                "network": envelope.network().passphrase(),
                "hash": hash,
                "fee_source": bump.fee_source(),
                "fee": bump.fee(),
                "signatures": bump.signatures().len(),
                "inner": {
                    "hash": inner.hash()?.to_hex(),
                    "source_account": inner.source_account(),
                    "fee": inner.fee(),
                    "sequence_number": inner.sequence_number(),
                    "operations": inner.operations().len(),
                    "signatures": inner.signatures().len(),
                },
            })
        }
    })
}

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

fn keygen(args: cli::KeygenArgs) -> Result<()> {
    let keypair = KeyPair::random();
    let seed = keypair
        .secret_seed()
        .context("generated key pair has no secret")?;
    if args.json {
        let out = json!({ "account_id": keypair.account_id(), "secret_seed": seed });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("Account ID  : {}", keypair.account_id());
        println!("Secret seed : {}", seed);
    }
    Ok(())
}

fn run_strkey(command: StrkeyCommand) -> Result<()> {
    match command {
        StrkeyCommand::Decode { key } => {
            let (version, payload) = strkey::decode(key.trim()).context("invalid StrKey")?;
            if version == VersionByte::SecretSeed {
                // Only the public half is printed.
                let keypair = KeyPair::from_secret_seed(key.trim())?;
                println!("kind    : {}", version);
                println!("account : {}", keypair.account_id());
            } else {
                println!("kind    : {}", version);
                println!("payload : {}", hex::encode(payload));
            }
        }
        StrkeyCommand::Encode { kind, payload } => {
            let raw = hex::decode(payload.trim()).context("payload is not valid hex")?;
            println!("{}", strkey::encode(VersionByte::from(kind), &raw)?);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

fn read_envelope(arg: Option<&str>, network: &Network) -> Result<Envelope> {
    let encoded = match arg {
        Some(value) if value != "-" => value.to_string(),
        _ => read_stdin()?,
    };
    Envelope::from_xdr_base64(encoded.trim(), network.clone())
        .context("failed to decode transaction envelope")
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read stdin")?;
    Ok(buf)
}
