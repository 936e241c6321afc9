//! Error types for the Coinsign core.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoinError {
    #[error("malformed amount: {0}")] MalformedAmount(String),
    #[error("invalid denomination: {0}")] InvalidDenom(String),
    #[error("invalid coin set: {0}")] InvalidCoinSet(String),
    #[error("negative result: {0}")] NegativeResult(String),
    #[error("negative coin amount: {0}")] NegativeAmount(String),
    #[error("amount overflow: result exceeds {max_bits} bits")] AmountOverflow { max_bits: u64 },
    #[error("denomination mismatch: {left} vs {right}")] DenomMismatch { left: String, right: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("invalid address: empty string")] Empty,
    #[error("invalid address: expected prefix {expected}, got {got}")] WrongPrefix { expected: String, got: String },
    #[error("invalid address: {0}")] Malformed(String),
    #[error("invalid address length: expected {expected}, got {got}")] InvalidLength { expected: usize, got: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("invalid public key bytes")] InvalidPublicKey,
    #[error("invalid private key bytes")] InvalidPrivateKey,
    #[error("invalid signature bytes")] InvalidSignature,
    #[error("signature verification failed")] VerificationFailed,
    #[error("signature count mismatch: {signatures} signatures for {signers} signers")] SignatureCount { signatures: usize, signers: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("json: {0}")] Json(String),
    #[error("binary decode: {0}")] Decode(String),
    #[error("unregistered type: {0}")] Unregistered(String),
    #[error("unknown prefix: {0}")] UnknownPrefix(String),
    #[error("type already registered: {0}")] AlreadyRegistered(String),
    #[error("trailing bytes after transaction: {0}")] TrailingBytes(usize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TxError {
    #[error("chain ID required but not specified")] MissingChainId,
    #[error("transaction has no messages")] NoMessages,
    #[error("transaction has no signers")] NoSigners,
    #[error("invalid message: {0}")] InvalidMessage(String),
    #[error(transparent)] Codec(#[from] CodecError),
}

#[derive(Error, Debug)]
pub enum CoinsignError {
    #[error(transparent)] Coin(#[from] CoinError),
    #[error(transparent)] Address(#[from] AddressError),
    #[error(transparent)] Crypto(#[from] CryptoError),
    #[error(transparent)] Codec(#[from] CodecError),
    #[error(transparent)] Tx(#[from] TxError),
}
