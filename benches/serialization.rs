use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use serde_ckt::{decode, encode, from_str, to_string, Indent};

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
}

#[derive(Serialize, Deserialize, Clone)]
struct NestedData {
    id: u32,
    metadata: Metadata,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone)]
struct Metadata {
    created: String,
    updated: String,
    version: u32,
}

fn alice() -> User {
    User {
        id: 123,
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
        active: true,
    }
}

fn products(size: u32) -> Vec<Product> {
    (0..size)
        .map(|i| Product {
            sku: format!("SKU{}", i),
            name: format!("Product {}", i),
            price: 9.99 + f64::from(i),
            quantity: i,
        })
        .collect()
}

fn nested() -> NestedData {
    NestedData {
        id: 42,
        metadata: Metadata {
            created: "2023-01-01T00:00:00Z".to_string(),
            updated: "2023-12-31T23:59:59Z".to_string(),
            version: 3,
        },
        tags: vec![
            "important".to_string(),
            "verified".to_string(),
            "production".to_string(),
        ],
    }
}

const CONFIG: &str = r#"
# service definition
name = "edge proxy"
listen = [0.0.0.0, 8080]
upstreams = [
  [host = alpha, weight = 3]
  [host = beta, weight = 1]
]
banner =
  | Welcome to the edge.
  | Be nice.
retries = 5; timeout = 2.5; verbose = false
"#;

fn benchmark_serialize_simple(c: &mut Criterion) {
    let user = alice();
    c.bench_function("serialize_simple_struct", |b| {
        b.iter(|| to_string(black_box(&user)))
    });
}

fn benchmark_deserialize_simple(c: &mut Criterion) {
    let text = "id=123,name=Alice,email=\"alice@example.com\",active=true";
    c.bench_function("deserialize_simple_struct", |b| {
        b.iter(|| from_str::<User>(black_box(text)))
    });
}

fn benchmark_serialize_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_array");

    for size in [10, 50, 100, 500].iter() {
        let products = products(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| to_string(black_box(&products)))
        });
    }
    group.finish();
}

fn benchmark_deserialize_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("deserialize_array");

    for size in [10, 50, 100, 500].iter() {
        let text = to_string(&products(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| from_str::<Vec<Product>>(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_nested(c: &mut Criterion) {
    let data = nested();
    let text = to_string(&data).unwrap();

    c.bench_function("serialize_nested_struct", |b| {
        b.iter(|| to_string(black_box(&data)))
    });

    c.bench_function("deserialize_nested_struct", |b| {
        b.iter(|| from_str::<NestedData>(black_box(&text)))
    });
}

fn benchmark_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("document");

    group.bench_function("decode", |b| b.iter(|| decode(black_box(CONFIG))));

    let table = decode(CONFIG).unwrap();
    group.bench_function("encode_compact", |b| {
        b.iter(|| encode(black_box(&table), Indent::None))
    });
    group.bench_function("encode_pretty", |b| {
        b.iter(|| encode(black_box(&table), Indent::Spaces(2)))
    });

    group.finish();
}

fn benchmark_string_escaping(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize_strings");

    let bare = "plain words only";
    let quoted = "needs quoting, because = and [brackets]";
    let escaped = "line\nbreaks\tand caf\u{e9} \u{1F600}";

    group.bench_function("bare_string", |b| b.iter(|| to_string(black_box(&bare))));
    group.bench_function("quoted_string", |b| {
        b.iter(|| to_string(black_box(&quoted)))
    });
    group.bench_function("escaped_string", |b| {
        b.iter(|| to_string(black_box(&escaped)))
    });

    group.finish();
}

fn benchmark_primitive_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitive_array");

    let numbers: Vec<i32> = (0..100).collect();
    let bools: Vec<bool> = (0..100).map(|i| i % 2 == 0).collect();
    let floats: Vec<f64> = (0..100).map(|i| i as f64 * 1.5).collect();

    group.bench_function("serialize_integers", |b| {
        b.iter(|| to_string(black_box(&numbers)))
    });
    group.bench_function("serialize_booleans", |b| {
        b.iter(|| to_string(black_box(&bools)))
    });
    group.bench_function("serialize_floats", |b| {
        b.iter(|| to_string(black_box(&floats)))
    });

    let numbers_text = to_string(&numbers).unwrap();
    let bools_text = to_string(&bools).unwrap();
    let floats_text = to_string(&floats).unwrap();

    group.bench_function("deserialize_integers", |b| {
        b.iter(|| from_str::<Vec<i32>>(black_box(&numbers_text)))
    });
    group.bench_function("deserialize_booleans", |b| {
        b.iter(|| from_str::<Vec<bool>>(black_box(&bools_text)))
    });
    group.bench_function("deserialize_floats", |b| {
        b.iter(|| from_str::<Vec<f64>>(black_box(&floats_text)))
    });

    group.finish();
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let user = alice();
    let mut group = c.benchmark_group("comparison");

    group.bench_function("ckt_serialize", |b| {
        b.iter(|| serde_ckt::to_string(black_box(&user)))
    });
    group.bench_function("json_serialize", |b| {
        b.iter(|| serde_json::to_string(black_box(&user)))
    });

    let ckt_str = serde_ckt::to_string(&user).unwrap();
    let json_str = serde_json::to_string(&user).unwrap();

    group.bench_function("ckt_deserialize", |b| {
        b.iter(|| serde_ckt::from_str::<User>(black_box(&ckt_str)))
    });
    group.bench_function("json_deserialize", |b| {
        b.iter(|| serde_json::from_str::<User>(black_box(&json_str)))
    });

    group.finish();
}

fn benchmark_roundtrip(c: &mut Criterion) {
    let user = alice();
    c.bench_function("roundtrip_simple", |b| {
        b.iter(|| {
            let serialized = to_string(black_box(&user)).unwrap();
            let _deserialized: User = from_str(black_box(&serialized)).unwrap();
        })
    });
}

criterion_group!(
    benches,
    benchmark_serialize_simple,
    benchmark_deserialize_simple,
    benchmark_serialize_array,
    benchmark_deserialize_array,
    benchmark_nested,
    benchmark_document,
    benchmark_string_escaping,
    benchmark_primitive_array,
    benchmark_comparison_with_json,
    benchmark_roundtrip
);
criterion_main!(benches);
