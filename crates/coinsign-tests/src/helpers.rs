//! Shared fixtures for integration tests.

use std::sync::Arc;

use coinsign_core::{AccAddress, Coin, Coins, Msg, MsgSend, PrivateKey, StdFee};

/// 24-word phrase behind [`FROM_ADDRESS`].
pub const MNEMONIC: &str = "sound coral chimney claim humor peasant reward vanish desk trouble army door shallow insect fence typical ice tonight change dust reduce bracket ancient embark";

pub const FROM_ADDRESS: &str = "cosmos1v0m40792sx0cf69elugcqqxmqg3rdy7ra0j9kl";
pub const TO_ADDRESS: &str = "cosmos1h7w6g8k8d2qflesnzyqap50zvldzvtgdmk7a6t";

/// Key derived from [`MNEMONIC`] at the fundraiser path.
pub const PRIVATE_KEY_HEX: &str =
    "76f1cfcff220f1ca6084559471359fa707bf795c29219cd737e3a36cae21fcf3";
pub const PUBLIC_KEY_HEX: &str =
    "0221cdc908c8500f7d876b70a7c9e58ef92e110ef631815a1e5efa691ac1e0a02c";
pub const PUBLIC_KEY_BECH32: &str =
    "cosmospub1addwnpepqgsumjggepgq7lv8ddc20j093mujuygw7ccczks7tmaxjxkpuzszcftt0mh";

/// Sign bytes for a `1STAKE` transfer under the default transfer parameters.
pub const SIGN_BYTES: &str = r#"{"account_number":"2","chain_id":"sentinel-vpn","fee":{"amount":[{"amount":"0","denom":"STAKE"}],"gas":"200000"},"memo":"","msgs":[{"inputs":[{"address":"cosmos1v0m40792sx0cf69elugcqqxmqg3rdy7ra0j9kl","coins":[{"amount":"1","denom":"STAKE"}]}],"outputs":[{"address":"cosmos1h7w6g8k8d2qflesnzyqap50zvldzvtgdmk7a6t","coins":[{"amount":"1","denom":"STAKE"}]}]}],"sequence":"6"}"#;

pub const SIGNATURE_B64: &str = "LCnYCu7PrJ7bX9VNTPCJ++cGqZI0SpVUfkNY+jxYHT48nqbnw8xRLX9kzz94rFgpw++yDUZGf58HNy2Z7t5eYQ==";

/// Encoded signed transaction for the same transfer.
pub const SIGNED_TX_B64: &str = "0AHwYl3uCkwqLIf6CiIKFGP3V/iqgZ+E6Ln/EYAA2wIiNpPDEgoKBVNUQUtFEgExEiIKFL+dpB7HaoCf5hMRAdDR4mfaJi0NEgoKBVNUQUtFEgExEhAKCgoFU1RBS0USATAQwJoMGmoKJuta6YchAiHNyQjIUA99h2twp8nljvkuEQ72MYFaHl76aRrB4KAsEkAsKdgK7s+snttf1U1M8In75wapkjRKlVR+Q1j6PFgdPjyepufDzFEtf2TPP3isWCnD77INRkZ/nwc3LZnu3l5h";

/// Address with every byte set to `seed`.
pub fn addr(seed: u8) -> AccAddress {
    AccAddress::from_bytes([seed; 20])
}

/// Parse a coin list, panicking on bad input.
pub fn coins(text: &str) -> Coins {
    Coins::parse(text).unwrap_or_else(|e| panic!("bad coins {text:?}: {e}"))
}

/// The `0STAKE` fee with 200000 gas.
pub fn default_fee() -> StdFee {
    StdFee::single(200_000, Coin::from_u64("STAKE", 0))
}

/// Single-input, single-output transfer.
pub fn send_msg(from: AccAddress, to: AccAddress, amount: &str) -> Arc<dyn Msg> {
    Arc::new(MsgSend::single(from, to, coins(amount)))
}

/// The key behind [`FROM_ADDRESS`].
pub fn known_key() -> PrivateKey {
    let bytes: [u8; 32] = hex::decode(PRIVATE_KEY_HEX)
        .unwrap_or_else(|e| panic!("bad key hex: {e}"))
        .try_into()
        .unwrap_or_else(|v: Vec<u8>| panic!("key must be 32 bytes, got {}", v.len()));
    PrivateKey::from_bytes(&bytes).unwrap_or_else(|e| panic!("bad key: {e}"))
}
