//! Account addresses and their Bech32 string form.
//!
//! An account address is the 20-byte RIPEMD160(SHA256(pubkey)) digest. Its
//! display form is classic Bech32 ([BIP-173]) under the `cosmos` prefix;
//! public keys use the `cosmospub` prefix over their amino encoding.
//!
//! [BIP-173]: https://github.com/bitcoin/bips/blob/master/bip-0173.mediawiki

use bech32::primitives::decode::CheckedHrpstring;
use bech32::{Bech32, Hrp};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::constants::{ACCOUNT_HRP, ADDRESS_LEN};
use crate::error::AddressError;

/// Bech32-encode `data` under the human-readable prefix `hrp`.
pub fn encode(hrp: &str, data: &[u8]) -> Result<String, AddressError> {
    let hrp = Hrp::parse(hrp).map_err(|e| AddressError::Malformed(e.to_string()))?;
    bech32::encode::<Bech32>(hrp, data).map_err(|e| AddressError::Malformed(e.to_string()))
}

/// Decode a Bech32 string, requiring the prefix `expected_hrp`.
///
/// Rejects empty input, bad checksums (including Bech32m), characters outside
/// the Bech32 alphabet, mixed case and a prefix other than the expected one.
pub fn decode(s: &str, expected_hrp: &str) -> Result<Vec<u8>, AddressError> {
    if s.trim().is_empty() {
        return Err(AddressError::Empty);
    }
    let checked = CheckedHrpstring::new::<Bech32>(s)
        .map_err(|e| AddressError::Malformed(e.to_string()))?;
    let hrp = checked.hrp();
    if !hrp.as_str().eq_ignore_ascii_case(expected_hrp) {
        return Err(AddressError::WrongPrefix {
            expected: expected_hrp.to_string(),
            got: hrp.to_string(),
        });
    }
    Ok(checked.byte_iter().collect())
}

/// A 20-byte account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccAddress([u8; ADDRESS_LEN]);

impl AccAddress {
    pub fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Build an address from a byte slice of exactly [`ADDRESS_LEN`] bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AddressError> {
        let arr: [u8; ADDRESS_LEN] = bytes.try_into().map_err(|_| AddressError::InvalidLength {
            expected: ADDRESS_LEN,
            got: bytes.len(),
        })?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Parse a `cosmos1...` string.
    pub fn from_bech32(s: &str) -> Result<Self, AddressError> {
        let bytes = decode(s, ACCOUNT_HRP)?;
        Self::from_slice(&bytes)
    }

    /// The `cosmos1...` string form.
    pub fn to_bech32(&self) -> String {
        encode(ACCOUNT_HRP, &self.0).expect("static HRP and 20-byte payload always encode")
    }
}

impl fmt::Display for AccAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bech32())
    }
}

impl fmt::Debug for AccAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccAddress({})", self.to_bech32())
    }
}

impl FromStr for AccAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bech32(s)
    }
}

impl AsRef<[u8]> for AccAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for AccAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_bech32())
    }
}

impl<'de> Deserialize<'de> for AccAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_bech32(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PUBKEY_HRP;

    const FROM: &str = "cosmos1v0m40792sx0cf69elugcqqxmqg3rdy7ra0j9kl";
    const FROM_HEX: &str = "63f757f8aa819f84e8b9ff118000db02223693c3";
    const TO: &str = "cosmos1h7w6g8k8d2qflesnzyqap50zvldzvtgdmk7a6t";
    const TO_HEX: &str = "bf9da41ec76a809fe6131101d0d1e267da262d0d";

    fn sample() -> AccAddress {
        AccAddress::from_bytes([0xAA; ADDRESS_LEN])
    }

    // --- Known vectors ---

    #[test]
    fn decode_known_addresses() {
        assert_eq!(hex::encode(AccAddress::from_bech32(FROM).unwrap().as_bytes()), FROM_HEX);
        assert_eq!(hex::encode(AccAddress::from_bech32(TO).unwrap().as_bytes()), TO_HEX);
    }

    #[test]
    fn encode_known_address() {
        let bytes: [u8; 20] = hex::decode(FROM_HEX).unwrap().try_into().unwrap();
        assert_eq!(AccAddress::from_bytes(bytes).to_bech32(), FROM);
    }

    // --- Encoding ---

    #[test]
    fn encode_starts_with_prefix() {
        assert!(sample().to_bech32().starts_with("cosmos1"));
    }

    #[test]
    fn encode_is_lowercase() {
        let s = sample().to_bech32();
        assert_eq!(s, s.to_ascii_lowercase());
    }

    #[test]
    fn encode_length() {
        // "cosmos" (6) + "1" + 32 data chars + 6 checksum
        assert_eq!(sample().to_bech32().len(), 45);
    }

    // --- Decoding ---

    #[test]
    fn roundtrip_generic() {
        let data = [0u8, 1, 2, 3, 250, 251, 252];
        let s = encode("cosmos", &data).unwrap();
        assert_eq!(decode(&s, "cosmos").unwrap(), data);
    }

    #[test]
    fn decode_uppercase_valid() {
        let upper = FROM.to_ascii_uppercase();
        assert_eq!(decode(&upper, ACCOUNT_HRP).unwrap(), hex::decode(FROM_HEX).unwrap());
    }

    #[test]
    fn decode_mixed_case_fails() {
        let mut mixed = FROM.to_string();
        mixed.replace_range(7..8, &FROM[7..8].to_ascii_uppercase());
        assert!(matches!(decode(&mixed, ACCOUNT_HRP), Err(AddressError::Malformed(_))));
    }

    #[test]
    fn decode_bad_checksum() {
        let mut s = FROM.to_string();
        let last = s.pop().unwrap();
        s.push(if last == 'q' { 'p' } else { 'q' });
        assert!(matches!(decode(&s, ACCOUNT_HRP), Err(AddressError::Malformed(_))));
    }

    #[test]
    fn decode_invalid_character() {
        // 'b' is not in the Bech32 alphabet
        let bad = format!("{}b{}", &FROM[..7], &FROM[8..]);
        assert!(matches!(decode(&bad, ACCOUNT_HRP), Err(AddressError::Malformed(_))));
    }

    #[test]
    fn decode_wrong_prefix() {
        let s = encode(PUBKEY_HRP, &[1u8; 20]).unwrap();
        assert_eq!(
            decode(&s, ACCOUNT_HRP).unwrap_err(),
            AddressError::WrongPrefix {
                expected: "cosmos".into(),
                got: "cosmospub".into()
            }
        );
    }

    #[test]
    fn decode_empty() {
        assert_eq!(decode("", ACCOUNT_HRP).unwrap_err(), AddressError::Empty);
        assert_eq!(AccAddress::from_bech32("  ").unwrap_err(), AddressError::Empty);
    }

    #[test]
    fn decode_rejects_bech32m() {
        let hrp = Hrp::parse("cosmos").unwrap();
        let s = bech32::encode::<bech32::Bech32m>(hrp, &[7u8; 20]).unwrap();
        assert!(decode(&s, ACCOUNT_HRP).is_err());
    }

    #[test]
    fn acc_address_wrong_length() {
        let s = encode(ACCOUNT_HRP, &[1u8; 32]).unwrap();
        assert_eq!(
            AccAddress::from_bech32(&s).unwrap_err(),
            AddressError::InvalidLength { expected: 20, got: 32 }
        );
    }

    // --- Roundtrips ---

    #[test]
    fn roundtrip_many() {
        for i in 0u8..=10 {
            let addr = AccAddress::from_bytes([i.wrapping_mul(37); ADDRESS_LEN]);
            assert_eq!(AccAddress::from_bech32(&addr.to_bech32()).unwrap(), addr);
        }
    }

    // --- Display / FromStr / Serde ---

    #[test]
    fn display_and_from_str() {
        let addr: AccAddress = FROM.parse().unwrap();
        assert_eq!(addr.to_string(), FROM);
        assert!(format!("{addr:?}").contains(FROM));
    }

    #[test]
    fn serde_json_as_string() {
        let addr: AccAddress = TO.parse().unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{TO}\""));
        let back: AccAddress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}
