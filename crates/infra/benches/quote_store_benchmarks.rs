use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use std::sync::Arc;

use happyhome_catalog::{Product, supplies};
use happyhome_core::ProductId;
use happyhome_events::InMemoryEventBus;
use happyhome_infra::persistence;
use happyhome_infra::{InMemoryKeyValueStore, QuoteEnvelope, QuoteStore};
use happyhome_quote::QuoteItem;

type BenchStore = QuoteStore<Arc<InMemoryKeyValueStore>, InMemoryEventBus<QuoteEnvelope>>;

fn setup_store() -> BenchStore {
    QuoteStore::open(Arc::new(InMemoryKeyValueStore::new()), InMemoryEventBus::new())
}

fn quote_lines(count: usize) -> Vec<QuoteItem> {
    (0..count)
        .map(|i| {
            QuoteItem::new(
                Product::new(format!("p-{i}"), format!("Product {i}"))
                    .with_category("Daily Living Aids", "daily-living")
                    .with_price_range("$10-20")
                    .with_features(["Lightweight", "Adjustable"]),
                (i % 5 + 1) as u32,
            )
        })
        .collect()
}

fn bench_intent_latency(c: &mut Criterion) {
    let mut group = c.benchmark_group("intent_latency");
    let cane = supplies()
        .get(&ProductId::new("mob-001"))
        .cloned()
        .unwrap_or_else(|| Product::new("mob-001", "Cane"));

    // Add + write-through + notify on a populated quote
    group.bench_function("add_existing_line", |b| {
        let store = setup_store();
        store.add_item(cane.clone());
        b.iter(|| {
            black_box(store.add_item(black_box(cane.clone())));
        });
    });

    group.bench_function("set_quantity_with_subscriber", |b| {
        let store = setup_store();
        store.add_item(cane.clone());
        store.subscribe(|env: &QuoteEnvelope| {
            black_box(env.sequence_number());
        });
        let id = ProductId::new("mob-001");
        let mut q = 1i64;
        b.iter(|| {
            q = q % 9 + 2;
            black_box(store.set_quantity(&id, q));
        });
    });

    group.finish();
}

fn bench_snapshot_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_codec");

    for size in [1usize, 10, 100].iter() {
        let items = quote_lines(*size);
        let raw = persistence::encode(&items).unwrap();
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("encode", size), &items, |b, items| {
            b.iter(|| black_box(persistence::encode(items).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("decode", size), &raw, |b, raw| {
            b.iter(|| black_box(persistence::decode(raw).unwrap()));
        });
    }

    group.finish();
}

fn bench_hydration(c: &mut Criterion) {
    let mut group = c.benchmark_group("hydration");

    for size in [10usize, 100].iter() {
        let raw = persistence::encode(&quote_lines(*size)).unwrap();
        group.bench_with_input(BenchmarkId::new("open_saved_quote", size), &raw, |b, raw| {
            b.iter(|| {
                let kv = Arc::new(InMemoryKeyValueStore::new());
                happyhome_infra::KeyValueStore::set(&kv, persistence::QUOTE_STORAGE_KEY, raw).unwrap();
                let store: BenchStore = QuoteStore::open(kv, InMemoryEventBus::new());
                black_box(store.item_count())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_intent_latency, bench_snapshot_codec, bench_hydration);
criterion_main!(benches);
