#![allow(
    missing_docs,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::similar_names
)]
use std::collections::HashMap;

use criterion::{Criterion, criterion_group, criterion_main};
use primehash::HashTable;
use proptest::{
    collection::vec,
    strategy::{Strategy, ValueTree},
    test_runner::TestRunner,
};

const ITEMS_AMOUNT: usize = 1000;
const SAMPLE_SIZE: usize = 10;

fn hash_table_benches(c: &mut Criterion) {
    let mut runner = TestRunner::default();
    let items: Vec<(String, String)> = vec(("[a-z0-9]{1,16}", "[a-z0-9]{0,16}"), ITEMS_AMOUNT)
        .new_tree(&mut runner)
        .unwrap()
        .current();

    let mut group = c.benchmark_group("Hash table comparison benchmark");
    group.sample_size(SAMPLE_SIZE);
    let mut prime_table = HashTable::new();
    let mut rust_map = HashMap::new();
    group.bench_function("primehash insert", |b| {
        b.iter(|| {
            for (key, value) in items.clone() {
                prime_table.insert(key, value).unwrap();
            }
        });
    });
    group.bench_function("rust std insert", |b| {
        b.iter(|| {
            for (key, value) in items.clone() {
                rust_map.insert(key, value);
            }
        });
    });
    group.bench_function("primehash search", |b| {
        b.iter(|| {
            for (key, _) in &items {
                let _ = prime_table.search(key);
            }
        });
    });
    group.bench_function("rust std get", |b| {
        b.iter(|| {
            for (key, _) in &items {
                let _ = rust_map.get(key);
            }
        });
    });
    group.bench_function("primehash insert then delete", |b| {
        b.iter(|| {
            let mut table = HashTable::new();
            for (key, value) in items.clone() {
                table.insert(key, value).unwrap();
            }
            for (key, _) in &items {
                table.delete(key).unwrap();
            }
        });
    });
    group.finish();
}

criterion_group!(benches, hash_table_benches);

criterion_main!(benches);
