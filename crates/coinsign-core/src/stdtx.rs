//! The standard transaction envelope and its sign document.

use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::sync::Arc;

use crate::address::AccAddress;
use crate::canonical;
use crate::coin::{Coin, Coins};
use crate::crypto::PublicKey;
use crate::error::{CodecError, CryptoError, TxError};
use crate::msg::Msg;

fn as_decimal<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Fee paid for a transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StdFee {
    pub amount: Coins,
    #[serde(serialize_with = "as_decimal")]
    pub gas: u64,
}

impl StdFee {
    pub fn new(gas: u64, amount: Coins) -> Self {
        Self { amount, gas }
    }

    /// A fee of exactly one coin, kept even when its amount is zero.
    pub fn single(gas: u64, coin: Coin) -> Self {
        Self {
            amount: Coins::from_raw(vec![coin]),
            gas,
        }
    }

    /// Canonical JSON of the fee. An empty amount renders as `[]`.
    pub fn sign_bytes(&self) -> Result<Vec<u8>, CodecError> {
        canonical::to_canonical_bytes(self)
    }
}

/// A signature together with the key that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StdSignature {
    pub pub_key: PublicKey,
    pub signature: Vec<u8>,
}

/// Flattened view of a transaction that gets signed.
///
/// Fee and messages are embedded as their own canonical fragments and the
/// whole document is sorted again when rendered.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StdSignDoc {
    #[serde(serialize_with = "as_decimal")]
    pub account_number: u64,
    pub chain_id: String,
    pub fee: serde_json::Value,
    pub memo: String,
    pub msgs: Vec<serde_json::Value>,
    #[serde(serialize_with = "as_decimal")]
    pub sequence: u64,
}

impl StdSignDoc {
    pub fn new(
        chain_id: &str,
        account_number: u64,
        sequence: u64,
        fee: &StdFee,
        msgs: &[Arc<dyn Msg>],
        memo: &str,
    ) -> Result<Self, TxError> {
        if chain_id.is_empty() {
            return Err(TxError::MissingChainId);
        }
        let fee = fragment(&fee.sign_bytes()?)?;
        let msgs = msgs
            .iter()
            .map(|m| m.sign_bytes().and_then(|b| fragment(&b)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            account_number,
            chain_id: chain_id.to_string(),
            fee,
            memo: memo.to_string(),
            msgs,
            sequence,
        })
    }

    /// The exact bytes a signature covers.
    pub fn bytes(&self) -> Result<Vec<u8>, TxError> {
        Ok(canonical::to_canonical_bytes(self)?)
    }
}

fn fragment(bytes: &[u8]) -> Result<serde_json::Value, CodecError> {
    serde_json::from_slice(bytes).map_err(|e| CodecError::Json(e.to_string()))
}

/// Build the sign bytes for a transaction in one call.
pub fn std_sign_bytes(
    chain_id: &str,
    account_number: u64,
    sequence: u64,
    fee: &StdFee,
    msgs: &[Arc<dyn Msg>],
    memo: &str,
) -> Result<Vec<u8>, TxError> {
    StdSignDoc::new(chain_id, account_number, sequence, fee, msgs, memo)?.bytes()
}

/// A signed transaction ready for encoding.
#[derive(Clone, Debug)]
pub struct StdTx {
    pub msgs: Vec<Arc<dyn Msg>>,
    pub fee: StdFee,
    pub signatures: Vec<StdSignature>,
    pub memo: String,
}

impl StdTx {
    pub fn new(
        msgs: Vec<Arc<dyn Msg>>,
        fee: StdFee,
        signatures: Vec<StdSignature>,
        memo: impl Into<String>,
    ) -> Self {
        Self {
            msgs,
            fee,
            signatures,
            memo: memo.into(),
        }
    }

    /// Required signers across all messages, first occurrence wins.
    pub fn signers(&self) -> Vec<AccAddress> {
        let mut seen = HashSet::new();
        self.msgs
            .iter()
            .flat_map(|m| m.signers())
            .filter(|addr| seen.insert(*addr))
            .collect()
    }

    /// Structural checks: at least one message, every message valid, at
    /// least one signer.
    pub fn validate_basic(&self) -> Result<(), TxError> {
        if self.msgs.is_empty() {
            return Err(TxError::NoMessages);
        }
        for msg in &self.msgs {
            msg.validate_basic()?;
        }
        if self.signers().is_empty() {
            return Err(TxError::NoSigners);
        }
        Ok(())
    }

    /// Check that each signer has a matching signature over `sign_bytes`.
    ///
    /// Signatures pair with [`signers`](Self::signers) by position and the
    /// key must hash to the signer's address.
    pub fn verify_signatures(&self, sign_bytes: &[u8]) -> Result<(), CryptoError> {
        let signers = self.signers();
        if signers.len() != self.signatures.len() {
            return Err(CryptoError::SignatureCount {
                signatures: self.signatures.len(),
                signers: signers.len(),
            });
        }
        for (signer, sig) in signers.iter().zip(&self.signatures) {
            if sig.pub_key.address() != *signer {
                return Err(CryptoError::VerificationFailed);
            }
            sig.pub_key.verify(sign_bytes, &sig.signature)?;
        }
        Ok(())
    }
}
