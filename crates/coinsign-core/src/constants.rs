//! Protocol constants shared across the Coinsign crates.

/// Bech32 human-readable prefix for account addresses.
pub const ACCOUNT_HRP: &str = "cosmos";

/// Bech32 human-readable prefix for account public keys.
pub const PUBKEY_HRP: &str = "cosmospub";

/// Length in bytes of an account address (RIPEMD160 of SHA256 of the public key).
pub const ADDRESS_LEN: usize = 20;

/// Length in bytes of a compressed secp256k1 public key.
pub const PUBKEY_LEN: usize = 33;

/// Length in bytes of a compact `r || s` secp256k1 signature.
pub const SIGNATURE_LEN: usize = 64;

/// Maximum magnitude of an amount, in bits.
pub const MAX_AMOUNT_BITS: u64 = 255;

/// Denomination grammar: one letter, then this many alphanumerics (inclusive bounds).
pub const DENOM_TAIL_MIN: usize = 2;
pub const DENOM_TAIL_MAX: usize = 15;

/// Registered name of the signed transaction envelope.
pub const STD_TX_NAME: &str = "auth/StdTx";

/// Registered name of the coin transfer message.
pub const MSG_SEND_NAME: &str = "cosmos-sdk/Send";

/// Registered name of the secp256k1 public key.
pub const PUBKEY_SECP256K1_NAME: &str = "tendermint/PubKeySecp256k1";

/// Route shared by bank messages.
pub const BANK_ROUTE: &str = "bank";
