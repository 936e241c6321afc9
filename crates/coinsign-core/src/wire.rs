//! Binary wire structs.
//!
//! Amino binary is proto3 field encoding; registered concrete types are
//! written as their 4-byte prefix followed by the struct body. These structs
//! describe the bodies only. Prefixing is done by [`crate::codec::Codec`].

use prost::Message;

use crate::coin::{Coin, Coins};
use crate::error::CodecError;

#[derive(Clone, PartialEq, Message)]
pub(crate) struct CoinWire {
    #[prost(string, tag = "1")]
    pub denom: String,
    #[prost(string, tag = "2")]
    pub amount: String,
}

#[derive(Clone, PartialEq, Message)]
pub(crate) struct IoWire {
    #[prost(bytes = "vec", tag = "1")]
    pub address: Vec<u8>,
    #[prost(message, repeated, tag = "2")]
    pub coins: Vec<CoinWire>,
}

#[derive(Clone, PartialEq, Message)]
pub(crate) struct MsgSendWire {
    #[prost(message, repeated, tag = "1")]
    pub inputs: Vec<IoWire>,
    #[prost(message, repeated, tag = "2")]
    pub outputs: Vec<IoWire>,
}

#[derive(Clone, PartialEq, Message)]
pub(crate) struct FeeWire {
    #[prost(message, repeated, tag = "1")]
    pub amount: Vec<CoinWire>,
    #[prost(uint64, tag = "2")]
    pub gas: u64,
}

#[derive(Clone, PartialEq, Message)]
pub(crate) struct SignatureWire {
    /// Amino-encoded public key (prefix, length byte, point).
    #[prost(bytes = "vec", tag = "1")]
    pub pub_key: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    pub signature: Vec<u8>,
}

#[derive(Clone, PartialEq, Message)]
pub(crate) struct StdTxWire {
    /// Each entry is a registered prefix followed by the message body.
    #[prost(bytes = "vec", repeated, tag = "1")]
    pub msgs: Vec<Vec<u8>>,
    #[prost(message, optional, tag = "2")]
    pub fee: Option<FeeWire>,
    #[prost(message, repeated, tag = "3")]
    pub signatures: Vec<SignatureWire>,
    #[prost(string, tag = "4")]
    pub memo: String,
}

pub(crate) fn coins_to_wire(coins: &Coins) -> Vec<CoinWire> {
    coins
        .iter()
        .map(|c| CoinWire {
            denom: c.denom.clone(),
            amount: c.amount.to_string(),
        })
        .collect()
}

/// Rebuild coins exactly as they were written, zero entries included.
pub(crate) fn coins_from_wire(wire: Vec<CoinWire>) -> Result<Coins, CodecError> {
    let coins = wire
        .into_iter()
        .map(|w| {
            let amount = w
                .amount
                .parse()
                .map_err(|e| CodecError::Decode(format!("coin amount: {e}")))?;
            Coin::new(w.denom, amount).map_err(|e| CodecError::Decode(e.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Coins::from_raw(coins))
}
