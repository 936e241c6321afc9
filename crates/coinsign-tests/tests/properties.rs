//! Property tests for the coin algebra, addresses and canonical JSON.

use coinsign_core::canonical::to_canonical_bytes;
use coinsign_core::{AccAddress, Coin, Coins, Int};
use proptest::prelude::*;

/// Valid denominations: a letter then 2..=15 alphanumerics, either case.
fn denom() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9]{2,15}"
}

/// Positive amounts, from small values up to the full `u128` range.
fn amount() -> impl Strategy<Value = Int> {
    prop_oneof![
        1u128..1_000,
        (u64::MAX as u128 - 1_000)..(u64::MAX as u128 + 1_000),
        1u128..=u128::MAX,
    ]
    .prop_map(|a| a.to_string().parse::<Int>().unwrap())
}

/// A valid coin set with up to six distinct denominations.
fn coin_set() -> impl Strategy<Value = Coins> {
    prop::collection::btree_map(denom(), amount(), 0..6).prop_map(|m| {
        let coins = m
            .into_iter()
            .map(|(d, a)| Coin::new(d, a).unwrap())
            .collect();
        Coins::new(coins).unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // ------------------------------------------------------------------
    // Coin algebra
    // ------------------------------------------------------------------

    #[test]
    fn prop_add_is_commutative(a in coin_set(), b in coin_set()) {
        let ab = a.add(&b).unwrap();
        let ba = b.add(&a).unwrap();
        prop_assert_eq!(&ab, &ba);
        prop_assert!(ab.is_valid());
    }

    #[test]
    fn prop_add_then_sub_restores(a in coin_set(), b in coin_set()) {
        let sum = a.add(&b).unwrap();
        let back = sum.sub(&b).unwrap();
        prop_assert_eq!(back, a);
    }

    #[test]
    fn prop_sum_dominates_parts(a in coin_set(), b in coin_set()) {
        let sum = a.add(&b).unwrap();
        prop_assert!(sum.all_gte(&a));
        prop_assert!(sum.all_gte(&b));
    }

    #[test]
    fn prop_sub_self_is_empty(a in coin_set()) {
        prop_assert!(a.sub(&a).unwrap().is_empty());
    }

    #[test]
    fn prop_amount_of_matches_entries(a in coin_set(), other in denom()) {
        for coin in &a {
            prop_assert_eq!(a.amount_of(&coin.denom), coin.amount.clone());
        }
        if a.iter().all(|c| c.denom != other) {
            prop_assert_eq!(a.amount_of(&other), Int::zero());
        }
    }

    #[test]
    fn prop_denoms_sorted_bytewise(a in coin_set()) {
        let denoms: Vec<&str> = a.iter().map(|c| c.denom.as_str()).collect();
        prop_assert!(denoms.windows(2).all(|w| w[0].as_bytes() < w[1].as_bytes()));
    }

    #[test]
    fn prop_parse_ignores_order(a in coin_set()) {
        let forward = a.to_string();
        let reversed = a
            .iter()
            .rev()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        prop_assert_eq!(Coins::parse(&forward).unwrap(), a.clone());
        prop_assert_eq!(Coins::parse(&reversed).unwrap(), a);
    }

    #[test]
    fn prop_is_equal_matches_eq(a in coin_set(), b in coin_set()) {
        prop_assert_eq!(a.is_equal(&b), a == b);
    }

    // ------------------------------------------------------------------
    // Addresses
    // ------------------------------------------------------------------

    #[test]
    fn prop_address_bech32_roundtrip(bytes in prop::array::uniform20(any::<u8>())) {
        let addr = AccAddress::from_bytes(bytes);
        let text = addr.to_bech32();
        prop_assert!(text.starts_with("cosmos1"));
        let back: AccAddress = text.parse().unwrap();
        prop_assert_eq!(back, addr);
    }

    #[test]
    fn prop_uppercase_address_parses(bytes in prop::array::uniform20(any::<u8>())) {
        let addr = AccAddress::from_bytes(bytes);
        let upper = addr.to_bech32().to_uppercase();
        prop_assert_eq!(upper.parse::<AccAddress>().unwrap(), addr);
    }

    // ------------------------------------------------------------------
    // Canonical JSON
    // ------------------------------------------------------------------

    #[test]
    fn prop_canonical_ignores_key_order(
        entries in prop::collection::btree_map("[a-z]{1,6}", any::<u32>(), 1..8)
    ) {
        let mut forward = serde_json::Map::new();
        for (k, v) in &entries {
            forward.insert(k.clone(), serde_json::json!(v));
        }
        let mut reversed = serde_json::Map::new();
        for (k, v) in entries.iter().rev() {
            reversed.insert(k.clone(), serde_json::json!(v));
        }
        let a = to_canonical_bytes(&serde_json::Value::Object(forward)).unwrap();
        let b = to_canonical_bytes(&serde_json::Value::Object(reversed)).unwrap();
        prop_assert_eq!(a, b);
    }
}
