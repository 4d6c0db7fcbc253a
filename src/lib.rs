//! # larder
//!
//! A semantic recipe knowledge graph engine: ingest tabular recipe records,
//! build an immutable store of typed facts (ingredients, cuisines, inferred
//! diets), and answer fixed-shape pattern-matching queries over it.
//!
//! ## Architecture
//!
//! - **Entity identity** (`entity`, `registry`): slug-derived stable
//!   references interned to compact ids
//! - **Fact model & store** (`graph`): subject/predicate/object facts with
//!   set semantics and lookup indexes, plus the text graph-file format
//! - **Classification** (`classify`): keyword category markers and diet
//!   inference
//! - **Ingestion** (`ingest`): tolerant record loading and graph building
//! - **Queries** (`query`): category listings, filtered search, detail lookup
//! - **Context** (`context`): once-only-guarded handle to the loaded store
//!
//! ## Library usage
//!
//! ```
//! use larder::ingest::{build_store, RawRecord};
//! use larder::query::{self, SearchFilters};
//!
//! let store = build_store(vec![RawRecord {
//!     name: "Lentil Soup".into(),
//!     ingredients: vec!["Lentils".into(), "Vegetable Stock".into()],
//!     cuisine_path: Some("Asian>Indian".into()),
//!     ..Default::default()
//! }]);
//!
//! let hits = query::search(&store, &SearchFilters {
//!     diet: Some("Vegan".into()),
//!     ..Default::default()
//! });
//! assert_eq!(hits[0].label, "Lentil Soup");
//! assert_eq!(hits[0].cuisines, vec!["Indian"]);
//! ```

pub mod classify;
pub mod context;
pub mod entity;
pub mod error;
pub mod export;
pub mod graph;
pub mod ingest;
pub mod query;
pub mod registry;
