use carbon_core::{
    derive_seed, estimate, seed_fields, Category, DistanceLevel, FactorTable, PurchaseInput,
    ShippingSpeed,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_estimate(c: &mut Criterion) {
    let table = FactorTable::default();
    c.bench_function("estimate", |b| {
        b.iter(|| {
            estimate(
                &table,
                black_box(Category::FurnitureHome),
                black_box(499.0),
                black_box(2),
                DistanceLevel::International,
                Some(35.0),
                ShippingSpeed::Express,
            )
        })
    });
}

fn bench_seed(c: &mut Criterion) {
    let input = PurchaseInput::simple("Oak table", Category::FurnitureHome, 499.0, 2)
        .expect("valid purchase");
    let fields = seed_fields(&input);
    c.bench_function("derive_seed", |b| {
        b.iter(|| derive_seed(black_box(&fields), "202610191432"))
    });
}

criterion_group!(benches, bench_estimate, bench_seed);
criterion_main!(benches);
