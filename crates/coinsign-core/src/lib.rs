//! # coinsign-core
//! Foundation types for offline transaction construction: the coin algebra,
//! account addresses, secp256k1 keys, the message contract, the standard
//! transaction envelope, canonical sign bytes and the binary codec.

pub mod address;
pub mod canonical;
pub mod codec;
pub mod coin;
pub mod constants;
pub mod crypto;
pub mod error;
pub mod int;
pub mod msg;
pub mod stdtx;
mod wire;

pub use address::AccAddress;
pub use codec::Codec;
pub use crypto::{PrivateKey, PublicKey};
pub use error::{AddressError, CodecError, CoinError, CoinsignError, CryptoError, TxError};
pub use coin::{Coin, Coins};
pub use int::Int;
pub use msg::{Input, Msg, MsgSend, Output};
pub use stdtx::{StdFee, StdSignDoc, StdSignature, StdTx, std_sign_bytes};
