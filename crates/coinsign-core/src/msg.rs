//! The message contract and the coin transfer message.

use prost::Message;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::address::AccAddress;
use crate::canonical;
use crate::coin::Coins;
use crate::constants::{BANK_ROUTE, MSG_SEND_NAME};
use crate::error::{CodecError, TxError};
use crate::wire::{self, IoWire, MsgSendWire};

/// A state transition carried by a transaction.
///
/// Implementors provide their own canonical sign bytes and signer list; the
/// transaction layer never inspects their shape. `amino_name` ties the type
/// to its registration in a [`Codec`](crate::codec::Codec).
pub trait Msg: fmt::Debug + Send + Sync {
    /// Module that handles the message.
    fn route(&self) -> &str;

    fn msg_type(&self) -> &str;

    /// Registered concrete type name, e.g. `cosmos-sdk/Send`.
    fn amino_name(&self) -> &'static str;

    /// Stateless sanity checks.
    fn validate_basic(&self) -> Result<(), TxError>;

    /// Canonical JSON bytes this message contributes to the sign document.
    fn sign_bytes(&self) -> Result<Vec<u8>, CodecError>;

    /// Addresses whose signatures are required, in order.
    fn signers(&self) -> Vec<AccAddress>;

    /// Binary body, without the registered prefix.
    fn encode_binary(&self) -> Vec<u8>;

    /// JSON value for the `{"type", "value"}` envelope.
    fn to_json(&self) -> Result<serde_json::Value, CodecError>;

    fn as_any(&self) -> &dyn Any;
}

/// Decoder for a registered message body.
pub type MsgDecoder = fn(&[u8]) -> Result<Arc<dyn Msg>, CodecError>;

/// Source of funds in a transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    pub address: AccAddress,
    pub coins: Coins,
}

/// Destination of funds in a transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub address: AccAddress,
    pub coins: Coins,
}

impl Input {
    pub fn new(address: AccAddress, coins: Coins) -> Self {
        Self { address, coins }
    }

    fn to_wire(&self) -> IoWire {
        IoWire {
            address: self.address.as_bytes().to_vec(),
            coins: wire::coins_to_wire(&self.coins),
        }
    }
}

impl Output {
    pub fn new(address: AccAddress, coins: Coins) -> Self {
        Self { address, coins }
    }

    fn to_wire(&self) -> IoWire {
        IoWire {
            address: self.address.as_bytes().to_vec(),
            coins: wire::coins_to_wire(&self.coins),
        }
    }
}

fn io_from_wire(w: IoWire) -> Result<(AccAddress, Coins), CodecError> {
    let address = AccAddress::from_slice(&w.address).map_err(|e| CodecError::Decode(e.to_string()))?;
    Ok((address, wire::coins_from_wire(w.coins)?))
}

fn check_coins(side: &str, coins: &Coins) -> Result<(), TxError> {
    if coins.is_empty() || !coins.is_valid() {
        return Err(TxError::InvalidMessage(format!("{side} coins invalid: {coins}")));
    }
    Ok(())
}

/// Move coins from inputs to outputs.
///
/// Balance between the two sides is enforced by the ledger, not here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSend {
    pub inputs: Vec<Input>,
    pub outputs: Vec<Output>,
}

impl MsgSend {
    pub fn new(inputs: Vec<Input>, outputs: Vec<Output>) -> Self {
        Self { inputs, outputs }
    }

    /// Single sender, single recipient.
    pub fn single(from: AccAddress, to: AccAddress, coins: Coins) -> Self {
        Self {
            inputs: vec![Input::new(from, coins.clone())],
            outputs: vec![Output::new(to, coins)],
        }
    }

    /// Decode a binary body produced by [`Msg::encode_binary`].
    pub fn decode_binary(body: &[u8]) -> Result<Self, CodecError> {
        let w = MsgSendWire::decode(body).map_err(|e| CodecError::Decode(e.to_string()))?;
        let inputs = w
            .inputs
            .into_iter()
            .map(|i| io_from_wire(i).map(|(address, coins)| Input { address, coins }))
            .collect::<Result<Vec<_>, _>>()?;
        let outputs = w
            .outputs
            .into_iter()
            .map(|o| io_from_wire(o).map(|(address, coins)| Output { address, coins }))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { inputs, outputs })
    }

    pub(crate) fn decode_boxed(body: &[u8]) -> Result<Arc<dyn Msg>, CodecError> {
        Ok(Arc::new(Self::decode_binary(body)?))
    }
}

impl Msg for MsgSend {
    fn route(&self) -> &str {
        BANK_ROUTE
    }

    fn msg_type(&self) -> &str {
        "send"
    }

    fn amino_name(&self) -> &'static str {
        MSG_SEND_NAME
    }

    fn validate_basic(&self) -> Result<(), TxError> {
        if self.inputs.is_empty() {
            return Err(TxError::InvalidMessage("no inputs".into()));
        }
        if self.outputs.is_empty() {
            return Err(TxError::InvalidMessage("no outputs".into()));
        }
        for input in &self.inputs {
            check_coins("input", &input.coins)?;
        }
        for output in &self.outputs {
            check_coins("output", &output.coins)?;
        }
        Ok(())
    }

    fn sign_bytes(&self) -> Result<Vec<u8>, CodecError> {
        canonical::to_canonical_bytes(self)
    }

    fn signers(&self) -> Vec<AccAddress> {
        self.inputs.iter().map(|i| i.address).collect()
    }

    fn encode_binary(&self) -> Vec<u8> {
        MsgSendWire {
            inputs: self.inputs.iter().map(Input::to_wire).collect(),
            outputs: self.outputs.iter().map(Output::to_wire).collect(),
        }
        .encode_to_vec()
    }

    fn to_json(&self) -> Result<serde_json::Value, CodecError> {
        serde_json::to_value(self).map_err(|e| CodecError::Json(e.to_string()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
