use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use serde_tjson::{decode, encode, from_str, to_string, TjsonValue};

#[derive(Serialize, Deserialize, Clone)]
struct User {
    id: u32,
    name: String,
    email: String,
    active: bool,
}

#[derive(Serialize, Deserialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
    delta: i64,
}

fn products(size: u32) -> Vec<Product> {
    (0..size)
        .map(|i| Product {
            sku: format!("SKU{}", i),
            name: format!("Product {}", i),
            price: 9.99 + f64::from(i),
            quantity: i,
            delta: -i64::from(i),
        })
        .collect()
}

fn benchmark_serialize_simple(c: &mut Criterion) {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    };

    c.bench_function("serialize_simple_struct", |b| {
        b.iter(|| to_string(black_box(&user)))
    });
}

fn benchmark_deserialize_simple(c: &mut Criterion) {
    let text = r#"{"s:id":"u:123","s:name":"s:Alice","s:email":"s:alice@example.com","s:active":true}"#;

    c.bench_function("deserialize_simple_struct", |b| {
        b.iter(|| from_str::<User>(black_box(text)))
    });
}

fn benchmark_serialize_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_array");

    for size in [10, 50, 100, 500].iter() {
        let items = products(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| to_string(black_box(&items)))
        });
    }
    group.finish();
}

fn benchmark_deserialize_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("deserialize_array");

    for size in [10, 50, 100, 500].iter() {
        let text = to_string(&products(*size)).unwrap_or_default();
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| from_str::<Vec<Product>>(black_box(&text)))
        });
    }
    group.finish();
}

fn benchmark_binary_encodings(c: &mut Criterion) {
    let payload: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    let encoded = encode(&TjsonValue::Array(vec![TjsonValue::Binary(payload.clone())]))
        .unwrap_or_default();
    let hex: String = payload.iter().map(|b| format!("{:02x}", b)).collect();
    let hex_doc = format!(r#"["b16:{}"]"#, hex);

    let mut group = c.benchmark_group("binary");
    group.bench_function("decode_b64", |b| b.iter(|| decode(black_box(&encoded))));
    group.bench_function("decode_b16", |b| b.iter(|| decode(black_box(&hex_doc))));
    group.finish();
}

fn benchmark_value_roundtrip(c: &mut Criterion) {
    let text = to_string(&products(100)).unwrap_or_default();

    c.bench_function("value_roundtrip", |b| {
        b.iter(|| decode(black_box(&text)).and_then(|value| encode(&value)))
    });
}

criterion_group!(
    benches,
    benchmark_serialize_simple,
    benchmark_deserialize_simple,
    benchmark_serialize_array,
    benchmark_deserialize_array,
    benchmark_binary_encodings,
    benchmark_value_roundtrip,
);

criterion_main!(benches);
