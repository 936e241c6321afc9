//! Transfer parameters: chain, account, fee and memo.

use serde::Deserialize;

use crate::error::WalletError;

pub const DEFAULT_CHAIN_ID: &str = "sentinel-vpn";
pub const DEFAULT_ACCOUNT_NUMBER: u64 = 2;
pub const DEFAULT_SEQUENCE: u64 = 6;
pub const DEFAULT_GAS: u64 = 200_000;
pub const DEFAULT_FEE: &str = "0STAKE";

/// Everything about a transfer that does not come from the caller's
/// addresses, amount and mnemonic.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TxConfig {
    pub chain_id: String,
    pub account_number: u64,
    pub sequence: u64,
    pub gas: u64,
    /// A single coin such as `"0STAKE"`, or empty for no fee coin.
    pub fee: String,
    pub memo: String,
}

impl Default for TxConfig {
    fn default() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID.to_string(),
            account_number: DEFAULT_ACCOUNT_NUMBER,
            sequence: DEFAULT_SEQUENCE,
            gas: DEFAULT_GAS,
            fee: DEFAULT_FEE.to_string(),
            memo: String::new(),
        }
    }
}

impl TxConfig {
    /// Load from `COINSIGN_*` environment variables, defaulting each unset one.
    pub fn from_env() -> Result<Self, WalletError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` in place of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, WalletError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let number = |key: &str, default: u64| -> Result<u64, WalletError> {
            match lookup(key) {
                Some(v) => v
                    .trim()
                    .parse()
                    .map_err(|_| WalletError::Config(format!("{key} must be an unsigned integer"))),
                None => Ok(default),
            }
        };

        Ok(Self {
            account_number: number("COINSIGN_ACCOUNT_NUMBER", defaults.account_number)?,
            sequence: number("COINSIGN_SEQUENCE", defaults.sequence)?,
            gas: number("COINSIGN_GAS", defaults.gas)?,
            chain_id: lookup("COINSIGN_CHAIN_ID").unwrap_or(defaults.chain_id),
            fee: lookup("COINSIGN_FEE").unwrap_or(defaults.fee),
            memo: lookup("COINSIGN_MEMO").unwrap_or(defaults.memo),
        })
    }
}
