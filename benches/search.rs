//! Search benchmarks over a synthetic recipe graph.

use criterion::{criterion_group, criterion_main, Criterion};

use larder::ingest::{build_store, RawRecord};
use larder::query::{self, SearchFilters};

fn synthetic_records(count: usize) -> Vec<RawRecord> {
    let cuisines = ["Asian>Indian", "European>Italian", "American>Cajun"];
    (0..count)
        .map(|i| RawRecord {
            name: format!("Recipe {i}"),
            ingredients: vec![
                format!("Ingredient {i}"),
                "Olive Oil".into(),
                if i % 3 == 0 { "Chicken Breast".into() } else { "Chickpeas".into() },
            ],
            directions: vec!["Prepare.".into(), "Cook.".into()],
            cuisine_path: Some(cuisines[i % cuisines.len()].into()),
            total_time: Some((i % 90) as i64 + 10),
            ..Default::default()
        })
        .collect()
}

fn bench_search(c: &mut Criterion) {
    let store = build_store(synthetic_records(1_000));

    c.bench_function("search_unfiltered", |b| {
        b.iter(|| query::search(&store, &SearchFilters::default()))
    });

    c.bench_function("search_ingredient_substring", |b| {
        let filters = SearchFilters {
            ingredient: Some("chickpea".into()),
            ..Default::default()
        };
        b.iter(|| query::search(&store, &filters))
    });

    c.bench_function("search_diet_and_time", |b| {
        let filters = SearchFilters {
            diet: Some("Vegetarian".into()),
            max_total_time: Some(45),
            ..Default::default()
        };
        b.iter(|| query::search(&store, &filters))
    });
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
