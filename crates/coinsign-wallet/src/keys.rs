//! Seed handling and hierarchical key derivation.
//!
//! Keys come from BIP-32 over secp256k1 along one fixed path: purpose 44,
//! coin type 118, account 0, external chain, index 0.

use bip32::{DerivationPath, XPrv};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use coinsign_core::crypto::PrivateKey;

use crate::error::WalletError;

/// The fundraiser derivation path.
pub const FULL_FUNDRAISER_PATH: &str = "m/44'/118'/0'/0/0";

/// A 64-byte BIP-39 seed.
///
/// Secret material is zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Seed {
    bytes: [u8; 64],
}

impl Seed {
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self { bytes }
    }

    /// Get the raw seed bytes. Handle with care.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.bytes
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seed")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Derive the signing key at [`FULL_FUNDRAISER_PATH`].
///
/// A failure here means the seed produced an out-of-range child scalar,
/// which is reported as [`WalletError::KeyDerivation`].
pub fn derive_private_key(seed: &Seed) -> Result<PrivateKey, WalletError> {
    let path: DerivationPath = FULL_FUNDRAISER_PATH
        .parse()
        .map_err(|e: bip32::Error| WalletError::KeyDerivation(e.to_string()))?;
    let xprv = XPrv::derive_from_path(seed.as_bytes(), &path)
        .map_err(|e| WalletError::KeyDerivation(e.to_string()))?;
    Ok(PrivateKey::from_signing_key(xprv.private_key().clone()))
}
