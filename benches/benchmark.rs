// Performance benchmarks for the scorer and the engines over a random catalog
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rand::rngs::StdRng;
use smartcompare::prelude::*;
use smartcompare::{relations, EquivalenceEngine};
use std::sync::Arc;

const CATEGORIES: [&str; 4] = ["Laptop", "Smartphone", "Tablet", "Desktop"];

fn generate_random_entity(rng: &mut StdRng, id: usize) -> Entity {
    let category = CATEGORIES[rng.random_range(0..CATEGORIES.len())];
    Entity::new(format!("product-{}", id))
        .with_type(category)
        .with_attribute("name", format!("Product {}", id))
        .with_attribute("price", rng.random_range(100.0..3000.0))
        .with_attribute("ram_gb", f64::from(1u32 << rng.random_range(2..7)))
        .with_attribute("storage_gb", f64::from(64u32 << rng.random_range(0..6)))
        .with_attribute("rating", rng.random_range(1.0..5.0))
        .with_attribute("battery_mah", rng.random_range(2000.0..9000.0))
        .with_attribute("screen_inches", rng.random_range(5.0..17.0))
        .with_attribute("screen_resolution", "1920x1080")
}

fn generate_catalog(size: usize) -> (Arc<dyn Catalog>, Arc<dyn Reasoner>) {
    let mut rng = StdRng::seed_from_u64(42);
    let entities: Vec<Entity> = (0..size).map(|i| generate_random_entity(&mut rng, i)).collect();

    let facts = FactStore::new();
    facts.declare_symmetric(relations::TECHNICAL_EQUIVALENT);
    for _ in 0..size / 4 {
        let a = rng.random_range(0..size);
        let b = rng.random_range(0..size);
        facts.assert_fact(Fact::new(
            format!("product-{}", a),
            relations::BETTER_OPTION,
            format!("product-{}", b),
        ));
    }

    (Arc::new(InMemoryCatalog::from_entities(entities)), Arc::new(facts))
}

fn benchmark_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("scoring");
    let mut rng = StdRng::seed_from_u64(7);
    let entities: Vec<Entity> = (0..1000).map(|i| generate_random_entity(&mut rng, i)).collect();
    let scorer = WeightedScorer::default();

    group.bench_function("weighted_score_1k", |b| {
        b.iter(|| {
            for entity in &entities {
                black_box(scorer.score(black_box(entity)));
            }
        });
    });

    group.finish();
}

fn benchmark_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare");
    let (catalog, reasoner) = generate_catalog(1000);
    let engine = ComparisonEngine::new(catalog, reasoner, None);
    let ids = ["product-1", "product-2", "product-3", "product-4", "product-5"];

    group.bench_function("compare_5", |b| {
        b.iter(|| black_box(engine.compare(black_box(&ids)).ok()));
    });

    group.finish();
}

fn benchmark_recommend(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend");

    for size in [100, 1000, 10000].iter() {
        let (catalog, reasoner) = generate_catalog(*size);
        let engine = RecommendationEngine::new(catalog, reasoner);
        let prefs = Preferences {
            budget: Some(1500.0),
            min_ram: Some(8.0),
            ..Preferences::default()
        };

        group.bench_with_input(BenchmarkId::new("recommend", size), size, |b, _| {
            b.iter(|| black_box(engine.recommend(black_box(&prefs), 10)));
        });
    }

    group.finish();
}

fn benchmark_equivalents(c: &mut Criterion) {
    let mut group = c.benchmark_group("equivalents");
    let (catalog, reasoner) = generate_catalog(10000);
    let engine = EquivalenceEngine::new(catalog, reasoner);

    group.bench_function("find_equivalents_10k", |b| {
        b.iter(|| black_box(engine.find_equivalents(black_box("product-0")).ok()));
    });

    group.finish();
}

criterion_group!(benches, benchmark_scoring, benchmark_compare, benchmark_recommend, benchmark_equivalents);
criterion_main!(benches);
