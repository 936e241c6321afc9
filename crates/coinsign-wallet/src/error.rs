//! Wallet error types.

use coinsign_core::error::{AddressError, CodecError, CoinError, CryptoError, TxError};
use thiserror::Error;

/// Errors that can occur while deriving keys or signing a transfer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// Mnemonic has a word count other than 12 or 24.
    #[error(
        "recovering only works with 12 word (fundraiser) or 24 word mnemonics, got: {got} words"
    )]
    InvalidMnemonicLength {
        /// Number of words supplied.
        got: usize,
    },

    /// Word count is fine but a word or the checksum is not.
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    /// Hierarchical derivation failed on a validated seed.
    #[error("key derivation: {0}")]
    KeyDerivation(String),

    /// Transfer configuration could not be read.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Coin(#[from] CoinError),

    #[error(transparent)]
    Address(#[from] AddressError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Tx(#[from] TxError),
}

impl WalletError {
    /// Whether this error means a broken internal invariant rather than bad
    /// caller input.
    ///
    /// Derivation from a seed that already passed validation and encoding of
    /// an assembled transaction are expected to always succeed.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            WalletError::KeyDerivation(_)
                | WalletError::Codec(_)
                | WalletError::Crypto(CryptoError::InvalidPrivateKey)
                | WalletError::Tx(TxError::Codec(_))
        )
    }
}
