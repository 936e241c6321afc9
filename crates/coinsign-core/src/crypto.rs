//! secp256k1 keys, signatures and address derivation.
//!
//! Signing hashes the message with SHA-256 and produces a deterministic
//! (RFC 6979), low-S normalized ECDSA signature in compact `r || s` form.
//! Callers pass the raw sign bytes; the hash is owned by the primitive.
//!
//! Account addresses are RIPEMD160(SHA256(compressed public key)). Public keys
//! travel in their amino form: the registered 4-byte prefix of
//! `tendermint/PubKeySecp256k1`, a length byte, then the 33 compressed bytes.

use k256::ecdsa::signature::{Signer, Verifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use std::fmt;

use crate::address::{self, AccAddress};
use crate::codec::amino_prefix;
use crate::constants::{PUBKEY_HRP, PUBKEY_LEN, PUBKEY_SECP256K1_NAME, SIGNATURE_LEN};
use crate::error::{AddressError, CryptoError};

/// A secp256k1 signing key.
///
/// The scalar is zeroized on drop by the underlying library.
#[derive(Clone)]
pub struct PrivateKey {
    signing_key: SigningKey,
}

impl PrivateKey {
    /// Create a key from a 32-byte big-endian scalar.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CryptoError> {
        let signing_key =
            SigningKey::from_slice(bytes).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    pub fn from_signing_key(signing_key: SigningKey) -> Self {
        Self { signing_key }
    }

    /// The 32-byte scalar. Handle with care.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.signing_key.to_bytes());
        out
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            verifying_key: *self.signing_key.verifying_key(),
        }
    }

    /// Sign `message`, returning the compact 64-byte signature.
    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_LEN] {
        let signature: Signature = self.signing_key.sign(message);
        let mut out = [0u8; SIGNATURE_LEN];
        out.copy_from_slice(&signature.to_bytes());
        out
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public_key", &self.public_key())
            .field("scalar", &"[REDACTED]")
            .finish()
    }
}

/// A secp256k1 public key.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    verifying_key: VerifyingKey,
}

impl PublicKey {
    /// Parse a SEC1-encoded point (compressed or uncompressed).
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let verifying_key =
            VerifyingKey::from_sec1_bytes(bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self { verifying_key })
    }

    /// The 33-byte compressed point.
    pub fn to_bytes(&self) -> [u8; PUBKEY_LEN] {
        let point = self.verifying_key.to_encoded_point(true);
        let mut out = [0u8; PUBKEY_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Account address owned by this key.
    pub fn address(&self) -> AccAddress {
        AccAddress::from_bytes(hash160(&self.to_bytes()))
    }

    /// Amino encoding: registered prefix, length byte, compressed point.
    pub fn to_amino_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + 1 + PUBKEY_LEN);
        out.extend_from_slice(&amino_prefix(PUBKEY_SECP256K1_NAME));
        out.push(PUBKEY_LEN as u8);
        out.extend_from_slice(&self.to_bytes());
        out
    }

    /// Inverse of [`to_amino_bytes`](Self::to_amino_bytes).
    pub fn from_amino_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let prefix = amino_prefix(PUBKEY_SECP256K1_NAME);
        let rest = bytes
            .strip_prefix(prefix.as_slice())
            .ok_or(CryptoError::InvalidPublicKey)?;
        match rest.split_first() {
            Some((&len, key)) if len as usize == PUBKEY_LEN && key.len() == PUBKEY_LEN => {
                Self::from_sec1_bytes(key)
            }
            _ => Err(CryptoError::InvalidPublicKey),
        }
    }

    /// The `cosmospub1...` string form.
    pub fn to_bech32(&self) -> String {
        address::encode(PUBKEY_HRP, &self.to_amino_bytes())
            .expect("static HRP and fixed-size payload always encode")
    }

    pub fn from_bech32(s: &str) -> Result<Self, AddressError> {
        let bytes = address::decode(s, PUBKEY_HRP)?;
        Self::from_amino_bytes(&bytes)
            .map_err(|e| AddressError::Malformed(e.to_string()))
    }

    /// Verify a compact signature over `message`.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<(), CryptoError> {
        let sig = Signature::from_slice(signature).map_err(|_| CryptoError::InvalidSignature)?;
        self.verifying_key
            .verify(message, &sig)
            .map_err(|_| CryptoError::VerificationFailed)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", hex::encode(self.to_bytes()))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.to_bytes()))
    }
}

/// RIPEMD160(SHA256(data)).
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(data);
    let mut out = [0u8; 20];
    out.copy_from_slice(&Ripemd160::digest(sha));
    out
}
