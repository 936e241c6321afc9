//! # coinsign-wallet: mnemonic keys and offline transfer signing.
//!
//! Derives a secp256k1 key from a BIP-39 mnemonic along the fixed
//! fundraiser path, builds the canonical sign document, signs it and
//! returns the encoded transaction. Nothing touches the network or disk.
//!
//! # Modules
//!
//! - [`error`]: `WalletError` enum
//! - [`mnemonic`]: Word-count check, seed recovery, phrase generation
//! - [`keys`]: Seed and BIP-32 derivation
//! - [`config`]: `TxConfig` transfer parameters
//! - [`builder`]: Sign, assemble and encode
//! - [`account`]: `create_account` and `recover_account`
//! - [`send`]: `send_coins`

pub mod account;
pub mod builder;
pub mod config;
pub mod error;
pub mod keys;
pub mod mnemonic;
pub mod send;

// Re-exports for convenient access
pub use account::{KeyInfo, create_account, recover_account};
pub use builder::{StdSignMsg, TxBuilder};
pub use config::TxConfig;
pub use error::WalletError;
pub use keys::{FULL_FUNDRAISER_PATH, Seed, derive_private_key};
pub use mnemonic::{generate_mnemonic, mnemonic_to_seed};
pub use send::{send_coins, send_coins_with};
