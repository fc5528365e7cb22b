//! Cursed implementations against their correct counterparts.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cursed::commands::bit_reverse::{reverse_string, reverse_string_via_binary_shifts};
use cursed::commands::calculator::{calculator_correct, string_calculator};
use cursed::commands::csv_tree::{ArrayTree, BinaryTreeAsString};
use cursed::commands::fibonacci::{fib_iter, fibonacci};
use cursed::commands::fighting_queue::{QueueUsingTwoFightingStacks, QueueUsingTwoStacks};
use cursed::commands::linked_hashmap::LinkedHashMap;
use cursed::commands::paranoid_search::{binary_search, paranoid_binary_search};
use cursed::commands::regex_json::parse_json;
use cursed::store::memory::InMemoryStore;
use cursed::store::pickle::PickleDatabase;
use cursed::store::KeyValueStore;
use std::collections::HashMap;

const JSON_SAMPLE: &str = r#"{"name": "cursed", "tags": ["a", "b"], "nested": {"n": 1.5, "ok": true}}"#;

fn benchmark_fibonacci(c: &mut Criterion) {
    let mut group = c.benchmark_group("fibonacci");
    for n in [10u32, 20] {
        group.bench_with_input(BenchmarkId::new("naive", n), &n, |b, &n| {
            b.iter(|| fibonacci(black_box(n)))
        });
        group.bench_with_input(BenchmarkId::new("iterative", n), &n, |b, &n| {
            b.iter(|| fib_iter(black_box(n)))
        });
    }
    group.finish();
}

fn benchmark_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let data: Vec<i64> = (0..10_000).collect();
    group.bench_function("paranoid", |b| {
        b.iter(|| paranoid_binary_search(black_box(data.as_slice()), black_box(&7_777)))
    });
    group.bench_function("binary", |b| {
        b.iter(|| binary_search(black_box(data.as_slice()), black_box(&7_777)))
    });
    group.finish();
}

fn benchmark_maps(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_insert_lookup");
    for size in [100usize, 1_000] {
        group.bench_with_input(BenchmarkId::new("linked_hashmap", size), &size, |b, &size| {
            b.iter(|| {
                let mut map = LinkedHashMap::new();
                for i in 0..size {
                    map.put(i, i);
                }
                map.get(&(size - 1)).copied()
            })
        });
        group.bench_with_input(BenchmarkId::new("hashmap", size), &size, |b, &size| {
            b.iter(|| {
                let mut map = HashMap::new();
                for i in 0..size {
                    map.insert(i, i);
                }
                map.get(&(size - 1)).copied()
            })
        });
    }
    group.finish();
}

fn benchmark_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    group.bench_function("regex_json", |b| b.iter(|| parse_json(black_box(JSON_SAMPLE))));
    group.bench_function("serde_json", |b| {
        b.iter(|| serde_json::from_str::<serde_json::Value>(black_box(JSON_SAMPLE)))
    });
    group.bench_function("string_calculator", |b| {
        b.iter(|| string_calculator(black_box("123.45"), black_box("67.8"), "*"))
    });
    group.bench_function("f64_calculator", |b| {
        b.iter(|| calculator_correct(black_box(123.45), black_box(67.8), "*"))
    });
    group.finish();
}

fn benchmark_structures(c: &mut Criterion) {
    let mut group = c.benchmark_group("structures");
    group.bench_function("fighting_queue", |b| {
        b.iter(|| {
            let mut queue = QueueUsingTwoFightingStacks::new();
            for i in 0..100 {
                queue.enqueue(i);
            }
            while queue.dequeue().is_ok() {}
        })
    });
    group.bench_function("two_stack_queue", |b| {
        b.iter(|| {
            let mut queue = QueueUsingTwoStacks::new();
            for i in 0..100 {
                queue.enqueue(i);
            }
            while queue.dequeue().is_ok() {}
        })
    });
    group.bench_function("csv_tree", |b| {
        b.iter(|| {
            let mut tree = BinaryTreeAsString::new();
            for i in 0..100 {
                tree.insert(i);
            }
            tree.inorder_traversal()
        })
    });
    group.bench_function("array_tree", |b| {
        b.iter(|| {
            let mut tree = ArrayTree::new();
            for i in 0..100 {
                tree.insert(i);
            }
            tree.inorder_traversal()
        })
    });
    group.bench_function("bit_reverse", |b| {
        b.iter(|| reverse_string_via_binary_shifts(black_box("hello, world")))
    });
    group.bench_function("reverse", |b| b.iter(|| reverse_string(black_box("hello, world"))));
    group.finish();
}

fn benchmark_stores(c: &mut Criterion) {
    let mut group = c.benchmark_group("stores");
    group.sample_size(20);
    group.bench_function("pickle_100_inserts", |b| {
        b.iter(|| {
            let dir = tempfile::tempdir().unwrap();
            let mut db = PickleDatabase::<String>::open(dir.path()).unwrap();
            for i in 0..100 {
                db.insert(&format!("key{}", i), "x".repeat(100)).unwrap();
            }
        })
    });
    group.bench_function("memory_100_inserts", |b| {
        b.iter(|| {
            let mut store = InMemoryStore::<String>::new();
            for i in 0..100 {
                store.insert(&format!("key{}", i), "x".repeat(100)).unwrap();
            }
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_fibonacci,
    benchmark_search,
    benchmark_maps,
    benchmark_parsing,
    benchmark_structures,
    benchmark_stores
);
criterion_main!(benches);
