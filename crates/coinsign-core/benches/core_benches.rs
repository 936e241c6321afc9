//! Criterion benchmarks for coinsign-core hot paths.
//!
//! Covers: coin-set merge arithmetic, `amount_of` lookup, secp256k1
//! signing, sign-byte construction and binary transaction encoding.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use coinsign_core::{
    std_sign_bytes, AccAddress, Codec, Coin, Coins, Msg, MsgSend, PrivateKey, StdFee,
    StdSignature, StdTx,
};

/// `n` coins with distinct, sorted denominations `dAAAA..`.
fn make_coins(n: usize, step: u64) -> Coins {
    let coins = (0..n)
        .map(|i| Coin::from_u64(format!("d{i:05}"), (i as u64 + 1) * step))
        .collect();
    Coins::new(coins).expect("generated coins are valid")
}

fn sample_msgs() -> Vec<Arc<dyn Msg>> {
    vec![Arc::new(MsgSend::single(
        AccAddress::from_bytes([0x11; 20]),
        AccAddress::from_bytes([0x22; 20]),
        make_coins(3, 7),
    ))]
}

fn bench_coin_merge(c: &mut Criterion) {
    let a = make_coins(100, 3);
    let b = make_coins(100, 5);

    c.bench_function("coins_add_100", |bch| {
        bch.iter(|| black_box(&a).add(black_box(&b)))
    });

    c.bench_function("coins_sub_100", |bch| {
        bch.iter(|| black_box(&b).sub(black_box(&a)))
    });
}

fn bench_amount_of(c: &mut Criterion) {
    let coins = make_coins(1000, 1);

    c.bench_function("amount_of_1000_present", |b| {
        b.iter(|| coins.amount_of(black_box("d00777")))
    });

    c.bench_function("amount_of_1000_absent", |b| {
        b.iter(|| coins.amount_of(black_box("zzz")))
    });
}

fn bench_secp256k1(c: &mut Criterion) {
    let key = PrivateKey::from_bytes(&[42u8; 32]).expect("valid scalar");
    let message = b"bench message";
    let signature = key.sign(message);
    let pubkey = key.public_key();

    c.bench_function("secp256k1_sign", |b| {
        b.iter(|| key.sign(black_box(message)))
    });

    c.bench_function("secp256k1_verify", |b| {
        b.iter(|| pubkey.verify(black_box(message), black_box(&signature)))
    });
}

fn bench_sign_bytes(c: &mut Criterion) {
    let msgs = sample_msgs();
    let fee = StdFee::single(200_000, Coin::from_u64("STAKE", 0));

    c.bench_function("std_sign_bytes", |b| {
        b.iter(|| std_sign_bytes("bench-chain", 2, 6, black_box(&fee), black_box(&msgs), ""))
    });
}

fn bench_encode_tx(c: &mut Criterion) {
    let key = PrivateKey::from_bytes(&[7u8; 32]).expect("valid scalar");
    let msgs = sample_msgs();
    let fee = StdFee::single(200_000, Coin::from_u64("STAKE", 0));
    let tx = StdTx::new(
        msgs,
        fee,
        vec![StdSignature {
            pub_key: key.public_key(),
            signature: key.sign(b"doc").to_vec(),
        }],
        "",
    );
    let codec = Codec::standard();
    let encoded = codec.encode_tx(&tx).expect("encode failed");

    c.bench_function("tx_encode", |b| {
        b.iter(|| codec.encode_tx(black_box(&tx)))
    });

    c.bench_function("tx_decode", |b| {
        b.iter(|| codec.decode_tx(black_box(&encoded)).expect("decode failed"))
    });
}

criterion_group!(
    benches,
    bench_coin_merge,
    bench_amount_of,
    bench_secp256k1,
    bench_sign_bytes,
    bench_encode_tx,
);
criterion_main!(benches);
