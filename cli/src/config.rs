//! # Tool Configuration
//!
//! Optional JSON file with defaults for flags that are tedious to repeat:
//!
//! ```json
//! {
//!   "network": "testnet",
//!   "base_fee": 200,
//!   "log_level": "warn",
//!   "log_format": "pretty"
//! }
//! ```
//!
//! Precedence, highest first: command-line flag, environment variable,
//! config file, built-in default. Secret seeds are never read from the file.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use stellar_base::config::Network;

use crate::logging::LogFormat;

/// Default filter when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Network name (`public`, `testnet`, ...) or a literal passphrase.
    pub network: Option<String>,
    /// Default per-operation fee for fee bumps, in stroops.
    pub base_fee: Option<u32>,
    pub log_level: Option<String>,
    pub log_format: Option<String>,
}

impl ToolConfig {
    /// Loads `path`, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    /// The network from `flag` (already merged with the environment) or the
    /// file, defaulting to testnet.
    pub fn network(&self, flag: Option<&str>) -> Network {
        flag.or(self.network.as_deref())
            .map(Network::from_name_or_passphrase)
            .unwrap_or_else(Network::testnet)
    }

    pub fn base_fee(&self, flag: Option<u32>) -> Option<u32> {
        flag.or(self.base_fee)
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_format(&self, flag: Option<LogFormat>) -> LogFormat {
        flag.or_else(|| self.log_format.as_deref().map(LogFormat::from_str_lossy))
            .unwrap_or_default()
    }
}
