//! End-to-end integration tests for the larder engine.
//!
//! These tests exercise the full pipeline from raw records through graph
//! building, the file round-trip, and the query surface the boundary layer
//! consumes.

use larder::context::StoreContext;
use larder::entity::EntityKind;
use larder::error::{LarderError, StoreError};
use larder::graph::format;
use larder::graph::store::FactStore;
use larder::ingest::{build_store, RawRecord};
use larder::query::{self, CategoryKind, SearchFilters};

fn sample_records() -> Vec<RawRecord> {
    vec![
        RawRecord {
            name: "Lentil Soup".into(),
            ingredients: vec!["Lentils".into(), "Vegetable Stock".into()],
            directions: vec!["Rinse lentils.".into(), "Simmer until soft.".into()],
            cuisine_path: Some("Asian>Indian".into()),
            total_time: Some(45),
            rating: Some(4.6),
            url: Some("https://example.org/lentil-soup".into()),
            ..Default::default()
        },
        RawRecord {
            name: "Chicken Korma".into(),
            ingredients: vec!["Chicken Stock".into(), "Cream".into(), "Rice".into()],
            cuisine_path: Some("Asian>Indian".into()),
            total_time: Some(75),
            ..Default::default()
        },
        RawRecord {
            name: "Bread Pudding".into(),
            ingredients: vec!["Bread".into(), "Milk".into(), "Egg".into()],
            cuisine_path: Some("European>British".into()),
            ..Default::default()
        },
        RawRecord {
            name: String::new(),
            ingredients: vec!["Ghost Pepper".into()],
            ..Default::default()
        },
    ]
}

#[test]
fn lentil_soup_scenario_end_to_end() {
    let store = build_store(sample_records());

    let soup = query::detail(&store, "recipe-lentil-soup").unwrap();
    assert_eq!(
        soup.summary.diets,
        vec!["Vegan", "Vegetarian", "GlutenFree"]
    );
    // only the leaf of the hierarchy chain is attached
    assert_eq!(soup.summary.cuisines, vec!["Indian"]);

    let by_diet = query::search(
        &store,
        &SearchFilters {
            diet: Some("Vegan".into()),
            ..Default::default()
        },
    );
    assert!(by_diet.iter().any(|r| r.label == "Lentil Soup"));

    let by_cuisine = query::search(
        &store,
        &SearchFilters {
            cuisine: Some("Indian".into()),
            ..Default::default()
        },
    );
    assert!(by_cuisine.iter().any(|r| r.label == "Lentil Soup"));
}

#[test]
fn nameless_records_never_become_recipes() {
    let store = build_store(sample_records());
    assert_eq!(store.registry().of_kind(EntityKind::Recipe).count(), 3);
    // the nameless record's ingredient is not interned either
    assert!(store.lookup(EntityKind::Ingredient, "ghost-pepper").is_none());
}

#[test]
fn chicken_stock_blocks_vegan_and_vegetarian_but_not_gluten_free() {
    let store = build_store(sample_records());
    let korma = query::detail(&store, "recipe-chicken-korma").unwrap();
    assert!(!korma.summary.diets.contains(&"Vegan".to_string()));
    assert!(!korma.summary.diets.contains(&"Vegetarian".to_string()));
    assert!(korma.summary.diets.contains(&"GlutenFree".to_string()));
}

#[test]
fn search_results_are_ordered_case_insensitively() {
    let mut records = sample_records();
    records.push(RawRecord {
        name: "apple Crumble".into(),
        ..Default::default()
    });
    let store = build_store(records);
    let labels: Vec<String> = query::search(&store, &SearchFilters::default())
        .into_iter()
        .map(|r| r.label)
        .collect();
    assert_eq!(
        labels,
        vec![
            "apple Crumble",
            "Bread Pudding",
            "Chicken Korma",
            "Lentil Soup"
        ]
    );
}

#[test]
fn ingredient_filter_returns_exactly_the_matching_recipes() {
    let store = build_store(sample_records());
    let rows = query::search(
        &store,
        &SearchFilters {
            ingredient: Some("lentil".into()),
            ..Default::default()
        },
    );
    let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["Lentil Soup"]);
}

#[test]
fn detail_of_unknown_reference_is_not_found() {
    let store = build_store(sample_records());
    assert!(query::detail(&store, "recipe-phantom").is_none());
}

#[test]
fn detail_lists_are_duplicate_free() {
    let store = build_store(sample_records());
    for reference in [
        "recipe-lentil-soup",
        "recipe-chicken-korma",
        "recipe-bread-pudding",
    ] {
        let d = query::detail(&store, reference).unwrap();
        for list in [
            &d.ingredients,
            &d.directions,
            &d.summary.cuisines,
            &d.summary.diets,
        ] {
            let unique: std::collections::HashSet<&String> = list.iter().collect();
            assert_eq!(unique.len(), list.len(), "duplicates in {reference}");
        }
    }
}

#[test]
fn graph_file_round_trip_preserves_the_fact_set() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("recipes.facts");

    let store = build_store(sample_records());
    format::save(&store, &path).unwrap();
    let loaded = format::load(&path).unwrap();

    assert_eq!(statement_set(&store), statement_set(&loaded));

    // queries behave identically on the reloaded store
    assert_eq!(
        query::list_category(&store, CategoryKind::Cuisine),
        query::list_category(&loaded, CategoryKind::Cuisine)
    );
    assert_eq!(
        query::search(&store, &SearchFilters::default()),
        query::search(&loaded, &SearchFilters::default())
    );
    assert_eq!(
        query::detail(&store, "recipe-lentil-soup"),
        query::detail(&loaded, "recipe-lentil-soup")
    );
}

#[test]
fn context_serves_queries_after_a_single_guarded_load() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("recipes.facts");
    format::save(&build_store(sample_records()), &path).unwrap();

    let context = StoreContext::new(&path);
    let store = context.store().unwrap();
    assert_eq!(
        query::list_category(&store, CategoryKind::Diet),
        vec!["GlutenFree", "Vegan", "Vegetarian"]
    );
}

#[test]
fn missing_graph_file_fails_before_any_query() {
    let dir = tempfile::TempDir::new().unwrap();
    let context = StoreContext::new(dir.path().join("nowhere.facts"));
    let err = context.store().unwrap_err();
    assert!(matches!(
        err,
        LarderError::Store(StoreError::GraphFileMissing { .. })
    ));
}

fn statement_set(store: &FactStore) -> std::collections::BTreeSet<String> {
    format::serialize(store)
        .lines()
        .map(str::to_string)
        .collect()
}
