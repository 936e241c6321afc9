//! Account creation and recovery.

use serde::Serialize;
use std::fmt;
use tracing::info;

use crate::error::WalletError;
use crate::keys::derive_private_key;
use crate::mnemonic::{generate_mnemonic, mnemonic_to_seed};

/// Public description of an account plus the phrase that recovers it.
///
/// The caller owns persisting the mnemonic; nothing here is written to disk.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct KeyInfo {
    pub name: String,
    /// `cosmos1...` account address.
    pub address: String,
    /// `cosmospub1...` public key.
    pub pub_key: String,
    pub mnemonic: String,
}

impl fmt::Debug for KeyInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyInfo")
            .field("name", &self.name)
            .field("address", &self.address)
            .field("pub_key", &self.pub_key)
            .field("mnemonic", &"[REDACTED]")
            .finish()
    }
}

/// Create a fresh account from 256 bits of entropy.
///
/// The password would protect stored key material; keys are never stored
/// here, so it is accepted and dropped.
pub fn create_account(name: &str, _password: &str) -> Result<KeyInfo, WalletError> {
    let mnemonic = generate_mnemonic();
    let info = recover_account(name, &mnemonic)?;
    info!(name, address = %info.address, "created account");
    Ok(info)
}

/// Re-derive an account from an existing mnemonic.
pub fn recover_account(name: &str, mnemonic: &str) -> Result<KeyInfo, WalletError> {
    let seed = mnemonic_to_seed(mnemonic)?;
    let pub_key = derive_private_key(&seed)?.public_key();
    Ok(KeyInfo {
        name: name.to_string(),
        address: pub_key.address().to_string(),
        pub_key: pub_key.to_bech32(),
        mnemonic: mnemonic.split_whitespace().collect::<Vec<_>>().join(" "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHRASE: &str = "sound coral chimney claim humor peasant reward vanish desk trouble army door shallow insect fence typical ice tonight change dust reduce bracket ancient embark";

    #[test]
    fn recover_known_account() {
        let info = recover_account("alice", PHRASE).unwrap();
        assert_eq!(info.name, "alice");
        assert_eq!(info.address, "cosmos1v0m40792sx0cf69elugcqqxmqg3rdy7ra0j9kl");
        assert_eq!(
            info.pub_key,
            "cosmospub1addwnpepqgsumjggepgq7lv8ddc20j093mujuygw7ccczks7tmaxjxkpuzszcftt0mh"
        );
        assert_eq!(info.mnemonic, PHRASE);
    }

    #[test]
    fn create_then_recover_matches() {
        let created = create_account("bob", "hunter2").unwrap();
        assert_eq!(created.mnemonic.split(' ').count(), 24);
        assert!(created.address.starts_with("cosmos1"));
        assert!(created.pub_key.starts_with("cosmospub1"));
        let recovered = recover_account("bob", &created.mnemonic).unwrap();
        assert_eq!(recovered, created);
    }

    #[test]
    fn recover_rejects_bad_length() {
        assert_eq!(
            recover_account("x", "abandon abandon").unwrap_err(),
            WalletError::InvalidMnemonicLength { got: 2 }
        );
    }

    #[test]
    fn debug_hides_mnemonic() {
        let info = recover_account("alice", PHRASE).unwrap();
        let debug = format!("{info:?}");
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("coral"));
    }

    #[test]
    fn password_not_serialized() {
        let info = create_account("carol", "s3cret-pass").unwrap();
        let json = serde_json::to_string(&info).unwrap();
        assert!(!json.contains("s3cret-pass"));
    }

    #[test]
    fn empty_password_accepted() {
        let info = create_account("dave", "").unwrap();
        assert_eq!(info.name, "dave");
        assert_eq!(recover_account("dave", &info.mnemonic).unwrap(), info);
    }
}
