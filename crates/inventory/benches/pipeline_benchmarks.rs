use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::{Duration, TimeZone, Utc};
use stockroom_inventory::{
    group_records, FilterSpec, InventoryPipeline, InventoryRecord, SortSpec,
};

const NAMES: [&str; 8] = [
    "Tomato", "Onion", "Garlic", "Flour", "Rice", "Butter", "Cream", "Basil",
];
const CATEGORIES: [&str; 4] = ["Produce", "Dry Goods", "Dairy", "Herbs"];

/// Restaurant-sized record list with many batches per product and mixed casing.
fn kitchen_records(count: usize) -> Vec<InventoryRecord> {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let name = NAMES[i % NAMES.len()];
            let name = if i % 3 == 0 { name.to_uppercase() } else { name.to_string() };
            let category = CATEGORIES[(i / NAMES.len()) % CATEGORIES.len()];
            InventoryRecord::new(i.to_string(), name, category, (i % 13) as f64)
                .with_cost_per_unit(1.0 + (i % 7) as f64)
                .with_updated_at(base + Duration::hours((i * 37 % 500) as i64))
        })
        .collect()
}

fn bench_grouping(c: &mut Criterion) {
    let mut group = c.benchmark_group("grouping");

    for size in [100usize, 1_000, 10_000] {
        let records = kitchen_records(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| group_records(black_box(records)));
        });
    }

    group.finish();
}

fn bench_full_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_view");
    let pipeline = InventoryPipeline::default();
    let filter = FilterSpec::default().search("o").low_stock_only(true);
    let sort = SortSpec::desc("quantity");

    for size in [100usize, 1_000, 10_000] {
        let records = kitchen_records(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| pipeline.view(black_box(records), &filter, &sort));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_grouping, bench_full_view);
criterion_main!(benches);
