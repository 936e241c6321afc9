//! The coin transfer entry point.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::sync::Arc;
use tracing::debug;

use coinsign_core::{AccAddress, Coins, Msg, MsgSend};

use crate::builder::TxBuilder;
use crate::config::TxConfig;
use crate::error::WalletError;

/// Sign a transfer of `amount` from `from` to `to` with the default
/// [`TxConfig`] and return the base64 of the encoded transaction.
pub fn send_coins(from: &str, to: &str, amount: &str, mnemonic: &str) -> Result<String, WalletError> {
    send_coins_with(from, to, amount, mnemonic, &TxConfig::default())
}

/// [`send_coins`] with explicit transfer parameters.
pub fn send_coins_with(
    from: &str,
    to: &str,
    amount: &str,
    mnemonic: &str,
    config: &TxConfig,
) -> Result<String, WalletError> {
    let from = AccAddress::from_bech32(from)?;
    let to = AccAddress::from_bech32(to)?;
    let coins = Coins::parse(amount)?;
    debug!(%from, %to, %coins, "parsed transfer");

    let msgs: Vec<Arc<dyn Msg>> = vec![Arc::new(MsgSend::single(from, to, coins))];
    let bytes = TxBuilder::new(config.clone()).build_and_sign(mnemonic, msgs)?;
    Ok(BASE64.encode(bytes))
}
