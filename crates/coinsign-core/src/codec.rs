//! Registered concrete types and the binary transaction format.
//!
//! A [`Codec`] maps registered type names to 4-byte prefixes derived from the
//! SHA-256 of the name. A registry is an ordinary value: build one with
//! [`Codec::standard`] (or [`Codec::new`] plus `register_*`) and pass it to
//! whatever encodes or decodes.
//!
//! Encoded transaction layout:
//!
//! ```text
//! uvarint(len) | prefix("auth/StdTx") | StdTx body
//! ```
//!
//! where each message inside the body is itself `prefix | message body`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use prost::Message;
use serde_json::{Value, json};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;

use crate::constants::{MSG_SEND_NAME, PUBKEY_SECP256K1_NAME, STD_TX_NAME};
use crate::crypto::PublicKey;
use crate::error::CodecError;
use crate::msg::{Msg, MsgDecoder, MsgSend};
use crate::stdtx::{StdFee, StdSignature, StdTx};
use crate::wire::{self, FeeWire, SignatureWire, StdTxWire};

/// Length of a registered type prefix.
pub const PREFIX_LEN: usize = 4;

/// Prefix of a registered type name.
///
/// Take SHA-256 of the name, drop leading zero bytes, drop the next three
/// (disambiguation) bytes, drop any zero bytes after those, then keep four.
pub fn amino_prefix(name: &str) -> [u8; PREFIX_LEN] {
    let hash = Sha256::digest(name.as_bytes());
    let mut rest = hash
        .iter()
        .copied()
        .skip_while(|b| *b == 0)
        .skip(3)
        .skip_while(|b| *b == 0);
    let mut prefix = [0u8; PREFIX_LEN];
    for slot in prefix.iter_mut() {
        *slot = rest.next().unwrap_or(0);
    }
    prefix
}

#[derive(Clone, Debug)]
struct Registration {
    name: String,
    decoder: Option<MsgDecoder>,
}

/// Registry of concrete types.
#[derive(Clone, Debug, Default)]
pub struct Codec {
    prefixes: HashMap<String, [u8; PREFIX_LEN]>,
    types: HashMap<[u8; PREFIX_LEN], Registration>,
}

impl Codec {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the transaction, transfer message and secp256k1 key types.
    pub fn standard() -> Self {
        Self::try_standard().expect("built-in type names have distinct prefixes")
    }

    fn try_standard() -> Result<Self, CodecError> {
        let mut codec = Self::new();
        codec.register_concrete(STD_TX_NAME)?;
        codec.register_concrete(PUBKEY_SECP256K1_NAME)?;
        codec.register_msg(MSG_SEND_NAME, MsgSend::decode_boxed)?;
        Ok(codec)
    }

    /// Register a type that is encoded but never decoded as a message.
    pub fn register_concrete(&mut self, name: &str) -> Result<[u8; PREFIX_LEN], CodecError> {
        self.insert(name, None)
    }

    /// Register a message type along with its body decoder.
    pub fn register_msg(
        &mut self,
        name: &str,
        decoder: MsgDecoder,
    ) -> Result<[u8; PREFIX_LEN], CodecError> {
        self.insert(name, Some(decoder))
    }

    fn insert(
        &mut self,
        name: &str,
        decoder: Option<MsgDecoder>,
    ) -> Result<[u8; PREFIX_LEN], CodecError> {
        if self.prefixes.contains_key(name) {
            return Err(CodecError::AlreadyRegistered(name.to_string()));
        }
        let prefix = amino_prefix(name);
        if let Some(existing) = self.types.get(&prefix) {
            return Err(CodecError::AlreadyRegistered(format!(
                "{name} (prefix collides with {})",
                existing.name
            )));
        }
        self.prefixes.insert(name.to_string(), prefix);
        self.types.insert(
            prefix,
            Registration {
                name: name.to_string(),
                decoder,
            },
        );
        Ok(prefix)
    }

    pub fn prefix_of(&self, name: &str) -> Result<[u8; PREFIX_LEN], CodecError> {
        self.prefixes
            .get(name)
            .copied()
            .ok_or_else(|| CodecError::Unregistered(name.to_string()))
    }

    pub fn name_of(&self, prefix: &[u8; PREFIX_LEN]) -> Option<&str> {
        self.types.get(prefix).map(|r| r.name.as_str())
    }

    /// Length-prefixed binary encoding of a signed transaction.
    pub fn encode_tx(&self, tx: &StdTx) -> Result<Vec<u8>, CodecError> {
        self.prefix_of(PUBKEY_SECP256K1_NAME)?;
        let msgs = tx
            .msgs
            .iter()
            .map(|m| {
                let mut bytes = self.prefix_of(m.amino_name())?.to_vec();
                bytes.extend(m.encode_binary());
                Ok(bytes)
            })
            .collect::<Result<Vec<_>, CodecError>>()?;
        let body = StdTxWire {
            msgs,
            fee: Some(FeeWire {
                amount: wire::coins_to_wire(&tx.fee.amount),
                gas: tx.fee.gas,
            }),
            signatures: tx
                .signatures
                .iter()
                .map(|s| SignatureWire {
                    pub_key: s.pub_key.to_amino_bytes(),
                    signature: s.signature.clone(),
                })
                .collect(),
            memo: tx.memo.clone(),
        };

        let mut inner = self.prefix_of(STD_TX_NAME)?.to_vec();
        inner.extend(body.encode_to_vec());

        let mut out = Vec::with_capacity(inner.len() + 10);
        prost::encoding::encode_varint(inner.len() as u64, &mut out);
        out.extend(inner);
        Ok(out)
    }

    /// Inverse of [`encode_tx`](Self::encode_tx).
    pub fn decode_tx(&self, bytes: &[u8]) -> Result<StdTx, CodecError> {
        let mut buf = bytes;
        let len = prost::encoding::decode_varint(&mut buf)
            .map_err(|e| CodecError::Decode(e.to_string()))? as usize;
        if buf.len() < len {
            return Err(CodecError::Decode(format!(
                "length prefix {len} exceeds {} remaining bytes",
                buf.len()
            )));
        }
        if buf.len() > len {
            return Err(CodecError::TrailingBytes(buf.len() - len));
        }

        let (prefix, body) = split_prefix(buf)?;
        if prefix != self.prefix_of(STD_TX_NAME)? {
            return Err(CodecError::UnknownPrefix(hex::encode(prefix)));
        }
        let wire = StdTxWire::decode(body).map_err(|e| CodecError::Decode(e.to_string()))?;

        let msgs = wire
            .msgs
            .iter()
            .map(|m| self.decode_msg(m))
            .collect::<Result<Vec<_>, _>>()?;
        let fee_wire = wire.fee.unwrap_or_default();
        let fee = StdFee::new(fee_wire.gas, wire::coins_from_wire(fee_wire.amount)?);
        let signatures = wire
            .signatures
            .into_iter()
            .map(|s| {
                let pub_key = PublicKey::from_amino_bytes(&s.pub_key)
                    .map_err(|e| CodecError::Decode(e.to_string()))?;
                Ok(StdSignature {
                    pub_key,
                    signature: s.signature,
                })
            })
            .collect::<Result<Vec<_>, CodecError>>()?;

        Ok(StdTx::new(msgs, fee, signatures, wire.memo))
    }

    fn decode_msg(&self, bytes: &[u8]) -> Result<Arc<dyn Msg>, CodecError> {
        let (prefix, body) = split_prefix(bytes)?;
        let registration = self
            .types
            .get(&prefix)
            .ok_or_else(|| CodecError::UnknownPrefix(hex::encode(prefix)))?;
        let decoder = registration
            .decoder
            .ok_or_else(|| CodecError::Unregistered(format!("{} is not a message", registration.name)))?;
        decoder(body)
    }

    /// The `{"type": "auth/StdTx", "value": ...}` JSON form of a transaction.
    pub fn tx_to_json(&self, tx: &StdTx) -> Result<Value, CodecError> {
        let msgs = tx
            .msgs
            .iter()
            .map(|m| {
                self.prefix_of(m.amino_name())?;
                Ok(json!({ "type": m.amino_name(), "value": m.to_json()? }))
            })
            .collect::<Result<Vec<_>, CodecError>>()?;
        let signatures: Vec<Value> = tx
            .signatures
            .iter()
            .map(|s| {
                json!({
                    "pub_key": {
                        "type": PUBKEY_SECP256K1_NAME,
                        "value": BASE64.encode(s.pub_key.to_bytes()),
                    },
                    "signature": BASE64.encode(&s.signature),
                })
            })
            .collect();
        let fee = serde_json::to_value(&tx.fee).map_err(|e| CodecError::Json(e.to_string()))?;
        Ok(json!({
            "type": STD_TX_NAME,
            "value": {
                "msg": msgs,
                "fee": fee,
                "signatures": signatures,
                "memo": tx.memo,
            }
        }))
    }
}

fn split_prefix(bytes: &[u8]) -> Result<([u8; PREFIX_LEN], &[u8]), CodecError> {
    if bytes.len() < PREFIX_LEN {
        return Err(CodecError::Decode(format!(
            "{} bytes is too short for a type prefix",
            bytes.len()
        )));
    }
    let (head, body) = bytes.split_at(PREFIX_LEN);
    let mut prefix = [0u8; PREFIX_LEN];
    prefix.copy_from_slice(head);
    Ok((prefix, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coin::{Coin, Coins};
    use crate::crypto::PrivateKey;
    use crate::stdtx::std_sign_bytes;

    const FROM: &str = "cosmos1v0m40792sx0cf69elugcqqxmqg3rdy7ra0j9kl";
    const TO: &str = "cosmos1h7w6g8k8d2qflesnzyqap50zvldzvtgdmk7a6t";
    const PRIV_HEX: &str = "76f1cfcff220f1ca6084559471359fa707bf795c29219cd737e3a36cae21fcf3";
    const TX_B64: &str = "0AHwYl3uCkwqLIf6CiIKFGP3V/iqgZ+E6Ln/EYAA2wIiNpPDEgoKBVNUQUtFEgExEiIKFL+dpB7HaoCf5hMRAdDR4mfaJi0NEgoKBVNUQUtFEgExEhAKCgoFU1RBS0USATAQwJoMGmoKJuta6YchAiHNyQjIUA99h2twp8nljvkuEQ72MYFaHl76aRrB4KAsEkAsKdgK7s+snttf1U1M8In75wapkjRKlVR+Q1j6PFgdPjyepufDzFEtf2TPP3isWCnD77INRkZ/nwc3LZnu3l5h";

    fn signed_tx() -> StdTx {
        let bytes: [u8; 32] = hex::decode(PRIV_HEX).unwrap().try_into().unwrap();
        let key = PrivateKey::from_bytes(&bytes).unwrap();
        let msgs: Vec<Arc<dyn Msg>> = vec![Arc::new(MsgSend::single(
            FROM.parse().unwrap(),
            TO.parse().unwrap(),
            Coins::parse("1STAKE").unwrap(),
        ))];
        let fee = StdFee::single(200_000, Coin::parse("0STAKE").unwrap());
        let sign_bytes = std_sign_bytes("sentinel-vpn", 2, 6, &fee, &msgs, "").unwrap();
        let signature = StdSignature {
            pub_key: key.public_key(),
            signature: key.sign(&sign_bytes).to_vec(),
        };
        StdTx::new(msgs, fee, vec![signature], "")
    }

    #[test]
    fn known_prefixes() {
        assert_eq!(hex::encode(amino_prefix("tendermint/PubKeySecp256k1")), "eb5ae987");
        assert_eq!(hex::encode(amino_prefix("auth/StdTx")), "f0625dee");
        assert_eq!(hex::encode(amino_prefix("cosmos-sdk/Send")), "2a2c87fa");
    }

    #[test]
    fn standard_registry_lookups() {
        let codec = Codec::standard();
        let p = codec.prefix_of("auth/StdTx").unwrap();
        assert_eq!(codec.name_of(&p), Some("auth/StdTx"));
        assert_eq!(
            codec.prefix_of("cosmos-sdk/Other"),
            Err(CodecError::Unregistered("cosmos-sdk/Other".into()))
        );
    }

    #[test]
    fn double_registration_rejected() {
        let mut codec = Codec::standard();
        assert!(matches!(
            codec.register_concrete("auth/StdTx"),
            Err(CodecError::AlreadyRegistered(_))
        ));
    }

    #[test]
    fn encode_known_transaction() {
        let bytes = Codec::standard().encode_tx(&signed_tx()).unwrap();
        assert_eq!(BASE64.encode(bytes), TX_B64);
    }

    #[test]
    fn encode_requires_registration() {
        let mut codec = Codec::new();
        codec.register_concrete(STD_TX_NAME).unwrap();
        codec.register_concrete(PUBKEY_SECP256K1_NAME).unwrap();
        assert_eq!(
            codec.encode_tx(&signed_tx()).unwrap_err(),
            CodecError::Unregistered(MSG_SEND_NAME.into())
        );
    }

    #[test]
    fn decode_roundtrip() {
        let codec = Codec::standard();
        let bytes = BASE64.decode(TX_B64).unwrap();
        let tx = codec.decode_tx(&bytes).unwrap();
        assert_eq!(tx.msgs.len(), 1);
        assert_eq!(tx.fee.gas, 200_000);
        assert_eq!(tx.fee.amount.as_slice()[0], Coin::from_u64("STAKE", 0));
        assert_eq!(tx.memo, "");
        let send = tx.msgs[0].as_any().downcast_ref::<MsgSend>().unwrap();
        assert_eq!(send.inputs[0].address.to_string(), FROM);
        assert_eq!(codec.encode_tx(&tx).unwrap(), bytes);
    }

    #[test]
    fn decode_rejects_trailing_bytes() {
        let mut bytes = BASE64.decode(TX_B64).unwrap();
        bytes.push(0);
        assert_eq!(
            Codec::standard().decode_tx(&bytes).unwrap_err(),
            CodecError::TrailingBytes(1)
        );
    }

    #[test]
    fn decode_rejects_truncated() {
        let bytes = BASE64.decode(TX_B64).unwrap();
        assert!(matches!(
            Codec::standard().decode_tx(&bytes[..bytes.len() - 1]),
            Err(CodecError::Decode(_))
        ));
    }

    #[test]
    fn decode_rejects_unknown_outer_prefix() {
        let mut bytes = BASE64.decode(TX_B64).unwrap();
        bytes[2] ^= 0xff;
        assert!(matches!(
            Codec::standard().decode_tx(&bytes),
            Err(CodecError::UnknownPrefix(_))
        ));
    }

    #[test]
    fn decode_rejects_non_message_prefix() {
        let codec = Codec::standard();
        let mut inner = amino_prefix(PUBKEY_SECP256K1_NAME).to_vec();
        inner.extend([1, 2, 3]);
        assert!(matches!(codec.decode_msg(&inner), Err(CodecError::Unregistered(_))));
    }

    #[test]
    fn json_envelope() {
        let v = Codec::standard().tx_to_json(&signed_tx()).unwrap();
        assert_eq!(v["type"], "auth/StdTx");
        assert_eq!(v["value"]["msg"][0]["type"], "cosmos-sdk/Send");
        assert_eq!(v["value"]["fee"]["gas"], "200000");
        assert_eq!(
            v["value"]["signatures"][0]["pub_key"]["value"],
            "AiHNyQjIUA99h2twp8nljvkuEQ72MYFaHl76aRrB4KAs"
        );
        assert_eq!(
            v["value"]["signatures"][0]["signature"],
            "LCnYCu7PrJ7bX9VNTPCJ++cGqZI0SpVUfkNY+jxYHT48nqbnw8xRLX9kzz94rFgpw++yDUZGf58HNy2Z7t5eYQ=="
        );
    }
}
