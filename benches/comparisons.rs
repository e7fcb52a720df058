#[macro_use]
extern crate criterion;

use criterion::{black_box, Criterion};
use mpack::prelude::*;

fn mpack_i64_encode(c: &mut Criterion) {
    c.bench_function("mpack i64 encode", |b| {
        let v = 1_000_000i64.into_value();
        b.iter(|| encode_full(black_box(&v)))
    });
}

fn mpack_i64_ser(c: &mut Criterion) {
    c.bench_function("mpack i64 ser", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(128);
            out.put_int(black_box(1_000_000));
            out
        })
    });
}

fn json_i64_encode(c: &mut Criterion) {
    c.bench_function("JSON i64 encode", |b| {
        b.iter(|| serde_json::to_string(&black_box(1_000_000i64)))
    });
}

fn mpack_i64_decode(c: &mut Criterion) {
    c.bench_function("mpack i64 decode", |b| {
        let buf = encode_full(1_000_000i64).unwrap();
        b.iter(|| decode_full(black_box(&buf)))
    });
}

fn json_i64_decode(c: &mut Criterion) {
    c.bench_function("JSON i64 decode", |b| {
        let s = serde_json::to_string(&1_000_000i64).unwrap();
        b.iter(|| serde_json::from_str::<i64>(black_box(&s)))
    });
}

fn mpack_bin_encode(c: &mut Criterion) {
    c.bench_function("mpack binary encode", |b| {
        let s: Vec<u8> = (0..10_000).map(|x| x as u8).collect();
        let v = Bytes::from(s).into_value();
        b.iter(|| encode_full(black_box(&v)))
    });
}

fn json_bin_encode(c: &mut Criterion) {
    c.bench_function("JSON binary encode", |b| {
        let s: Vec<u8> = (0..10_000).map(|x| x as u8).collect();
        b.iter(|| serde_json::to_string(&black_box(&s)))
    });
}

fn mpack_str_decode(c: &mut Criterion) {
    c.bench_function("mpack string decode", |b| {
        let buf = encode_full("a string of moderate length, repeated ".repeat(100)).unwrap();
        b.iter(|| decode_full(black_box(&buf)))
    });
}

fn json_str_decode(c: &mut Criterion) {
    c.bench_function("JSON string decode", |b| {
        let s = serde_json::to_string(&"a string of moderate length, repeated ".repeat(100))
            .unwrap();
        b.iter(|| serde_json::from_str::<String>(black_box(&s)))
    });
}

criterion_group!(
    benches,
    mpack_i64_encode,
    mpack_i64_ser,
    json_i64_encode,
    mpack_i64_decode,
    json_i64_decode,
    mpack_bin_encode,
    json_bin_encode,
    mpack_str_decode,
    json_str_decode,
);

criterion_main!(benches);
