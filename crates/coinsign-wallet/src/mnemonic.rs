//! BIP-39 mnemonic generation and seed recovery.

use bip39::{Language, Mnemonic};
use rand::RngCore;
use zeroize::Zeroize;

use crate::error::WalletError;
use crate::keys::Seed;

/// Word counts accepted for recovery.
pub const ACCEPTED_WORD_COUNTS: [usize; 2] = [12, 24];

/// Collapse runs of whitespace into single spaces and lowercase the phrase.
fn normalize(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Reject phrases that are not 12 or 24 words long.
pub fn check_word_count(phrase: &str) -> Result<(), WalletError> {
    let got = phrase.split_whitespace().count();
    if !ACCEPTED_WORD_COUNTS.contains(&got) {
        return Err(WalletError::InvalidMnemonicLength { got });
    }
    Ok(())
}

/// Validate a phrase and derive its 64-byte seed with an empty passphrase.
pub fn mnemonic_to_seed(phrase: &str) -> Result<Seed, WalletError> {
    check_word_count(phrase)?;
    let normalized = normalize(phrase);
    let m = Mnemonic::parse_in(Language::English, &normalized)
        .map_err(|e| WalletError::InvalidMnemonic(e.to_string()))?;
    Ok(Seed::from_bytes(m.to_seed_normalized("")))
}

/// The 24-word phrase for 32 bytes of entropy.
pub fn entropy_to_mnemonic(entropy: &[u8; 32]) -> String {
    Mnemonic::from_entropy_in(Language::English, entropy)
        .expect("32 bytes always produces valid mnemonic")
        .to_string()
}

/// Fresh 24-word phrase from 256 bits of OS randomness.
pub fn generate_mnemonic() -> String {
    let mut entropy = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut entropy);
    let phrase = entropy_to_mnemonic(&entropy);
    entropy.zeroize();
    phrase
}
