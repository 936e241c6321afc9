//! Transaction builder: sign document, signature, assembly and encoding.
//!
//! One signing call runs these stages in order and stops at the first error:
//! 1. Validate the chain ID, fee and messages ([`TxBuilder::build`])
//! 2. Derive the signing key from the mnemonic
//! 3. Render the canonical sign bytes and sign them
//! 4. Assemble the [`StdTx`] and encode it with the builder's [`Codec`]
//!
//! Nothing is retained between calls.

use std::sync::Arc;

use coinsign_core::coin::{Coin, Coins};
use coinsign_core::crypto::PrivateKey;
use coinsign_core::error::TxError;
use coinsign_core::{Codec, Msg, StdFee, StdSignature, StdTx, std_sign_bytes};
use tracing::{debug, info};

use crate::config::TxConfig;
use crate::error::WalletError;
use crate::keys::derive_private_key;
use crate::mnemonic::mnemonic_to_seed;

/// Everything a signature commits to.
#[derive(Debug, Clone)]
pub struct StdSignMsg {
    pub chain_id: String,
    pub account_number: u64,
    pub sequence: u64,
    pub fee: StdFee,
    pub msgs: Vec<Arc<dyn Msg>>,
    pub memo: String,
}

impl StdSignMsg {
    /// Canonical sign bytes.
    pub fn bytes(&self) -> Result<Vec<u8>, TxError> {
        std_sign_bytes(
            &self.chain_id,
            self.account_number,
            self.sequence,
            &self.fee,
            &self.msgs,
            &self.memo,
        )
    }
}

/// Builds, signs and encodes transactions for one set of [`TxConfig`] values.
///
/// # Example
/// ```ignore
/// let mut builder = TxBuilder::new(TxConfig::default());
/// builder.set_sequence(7);
/// let bytes = builder.build_and_sign(mnemonic, vec![Arc::new(msg)])?;
/// ```
#[derive(Debug, Clone)]
pub struct TxBuilder {
    config: TxConfig,
    codec: Codec,
}

impl TxBuilder {
    /// Builder over the standard codec registry.
    pub fn new(config: TxConfig) -> Self {
        Self::with_codec(config, Codec::standard())
    }

    pub fn with_codec(config: TxConfig, codec: Codec) -> Self {
        Self { config, codec }
    }

    pub fn config(&self) -> &TxConfig {
        &self.config
    }

    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    pub fn set_chain_id(&mut self, chain_id: impl Into<String>) -> &mut Self {
        self.config.chain_id = chain_id.into();
        self
    }

    pub fn set_account_number(&mut self, account_number: u64) -> &mut Self {
        self.config.account_number = account_number;
        self
    }

    pub fn set_sequence(&mut self, sequence: u64) -> &mut Self {
        self.config.sequence = sequence;
        self
    }

    pub fn set_memo(&mut self, memo: impl Into<String>) -> &mut Self {
        self.config.memo = memo.into();
        self
    }

    /// The fee described by the configuration.
    ///
    /// A configured coin is kept even when its amount is zero; an empty fee
    /// string means no fee coin at all.
    pub fn fee(&self) -> Result<StdFee, WalletError> {
        let fee = self.config.fee.trim();
        if fee.is_empty() {
            return Ok(StdFee::new(self.config.gas, Coins::empty()));
        }
        Ok(StdFee::single(self.config.gas, Coin::parse(fee)?))
    }

    /// Validate the configuration and messages into a signable message.
    pub fn build(&self, msgs: Vec<Arc<dyn Msg>>) -> Result<StdSignMsg, WalletError> {
        if self.config.chain_id.is_empty() {
            return Err(TxError::MissingChainId.into());
        }
        let fee = self.fee()?;
        if msgs.is_empty() {
            return Err(TxError::NoMessages.into());
        }
        for msg in &msgs {
            msg.validate_basic()?;
        }
        debug!(
            chain_id = %self.config.chain_id,
            msgs = msgs.len(),
            gas = fee.gas,
            "built sign message"
        );
        Ok(StdSignMsg {
            chain_id: self.config.chain_id.clone(),
            account_number: self.config.account_number,
            sequence: self.config.sequence,
            fee,
            msgs,
            memo: self.config.memo.clone(),
        })
    }

    /// Sign `msg` with `key`.
    pub fn sign(&self, msg: &StdSignMsg, key: &PrivateKey) -> Result<StdSignature, WalletError> {
        let sign_bytes = msg.bytes()?;
        debug!(len = sign_bytes.len(), "rendered sign bytes");
        let signature = key.sign(&sign_bytes);
        Ok(StdSignature {
            pub_key: key.public_key(),
            signature: signature.to_vec(),
        })
    }

    /// Derive the key for `mnemonic` and sign `msg` with it.
    pub fn sign_with_mnemonic(
        &self,
        mnemonic: &str,
        msg: &StdSignMsg,
    ) -> Result<StdSignature, WalletError> {
        let seed = mnemonic_to_seed(mnemonic)?;
        let key = derive_private_key(&seed)?;
        debug!(signer = %key.public_key().address(), "derived signing key");
        self.sign(msg, &key)
    }

    /// Combine a signed message and its signatures.
    pub fn assemble(msg: StdSignMsg, signatures: Vec<StdSignature>) -> StdTx {
        StdTx::new(msg.msgs, msg.fee, signatures, msg.memo)
    }

    /// Run the whole pipeline and return the encoded transaction.
    pub fn build_and_sign(
        &self,
        mnemonic: &str,
        msgs: Vec<Arc<dyn Msg>>,
    ) -> Result<Vec<u8>, WalletError> {
        let msg = self.build(msgs)?;
        let signature = self.sign_with_mnemonic(mnemonic, &msg)?;
        let tx = Self::assemble(msg, vec![signature]);
        let bytes = self.codec.encode_tx(&tx)?;
        info!(
            chain_id = %self.config.chain_id,
            sequence = self.config.sequence,
            bytes = bytes.len(),
            "assembled signed transaction"
        );
        Ok(bytes)
    }
}
