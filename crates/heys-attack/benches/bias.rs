//! Benchmarks for block encryption and bias estimation.

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use heys_attack::{estimate_bias, LinearRelation};
use heys_core::{Block, HeysCipher, RoundKeys};

fn bench_encrypt(c: &mut Criterion) {
    let cipher = HeysCipher::new(RoundKeys::new([0x6942, 0x1234, 0x5678, 0xABCD, 0xEFEF]));
    c.bench_function("encrypt_full_codebook", |b| {
        b.iter(|| {
            let mut acc = 0u32;
            for value in 0u16..=u16::MAX {
                acc = acc.wrapping_add(u32::from(cipher.encrypt(Block::new(value)).value()));
            }
            acc
        })
    });
}

fn bench_bias(c: &mut Criterion) {
    let cipher = HeysCipher::new(RoundKeys::new([1, 2, 3, 4, 5]));
    let relation = LinearRelation::heys_tutorial();
    let plaintexts: Vec<Block> = (0u16..8192).map(Block::new).collect();
    let ciphertexts: Vec<Block> = plaintexts.iter().map(|pt| cipher.encrypt(*pt)).collect();

    c.bench_function("estimate_bias_8k_pairs", |b| {
        b.iter_batched(
            || (&plaintexts, &ciphertexts),
            |(pts, cts)| estimate_bias(pts, cts, &cipher, &relation).unwrap(),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_encrypt, bench_bias);
criterion_main!(benches);
