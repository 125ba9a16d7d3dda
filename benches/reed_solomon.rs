use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_qr_gen::encoder::{Gf256, ReedSolomonEncoder, generate_ec_codewords};

fn bench_generator_polynomial(c: &mut Criterion) {
    c.bench_function("generator_polynomial_30", |b| {
        b.iter(|| ReedSolomonEncoder::generator_polynomial(black_box(30)))
    });
}

fn bench_encode_7(c: &mut Criterion) {
    let encoder = ReedSolomonEncoder::new(7);
    let data: Vec<u8> = (0..19).collect();
    c.bench_function("rs_encode_19_plus_7", |b| b.iter(|| encoder.encode(black_box(&data))));
}

fn bench_encode_30(c: &mut Criterion) {
    let encoder = ReedSolomonEncoder::new(30);
    let data: Vec<u8> = (0..255u32).map(|i| (i * 7) as u8).collect();
    c.bench_function("rs_encode_255_plus_30", |b| b.iter(|| encoder.encode(black_box(&data))));
}

fn bench_one_shot(c: &mut Criterion) {
    let data = b"Hello, World!";
    c.bench_function("generate_ec_codewords_15", |b| {
        b.iter(|| generate_ec_codewords(black_box(data), black_box(15)))
    });
}

fn bench_gf_mul(c: &mut Criterion) {
    Gf256::init();
    c.bench_function("gf256_mul_all_pairs", |b| {
        b.iter(|| {
            let mut acc = 0u8;
            for a in 0..=255u8 {
                for x in 0..=255u8 {
                    acc ^= Gf256::mul(black_box(a), black_box(x));
                }
            }
            acc
        })
    });
}

criterion_group!(
    benches,
    bench_generator_polynomial,
    bench_encode_7,
    bench_encode_30,
    bench_one_shot,
    bench_gf_mul
);
criterion_main!(benches);
