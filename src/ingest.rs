//! Dataset ingestion: raw recipe records → fact graph.
//!
//! Records arrive from CSV or JSON datasets with loosely-typed fields; the
//! loader coerces scalars tolerantly (a non-numeric time becomes absent, it
//! never fails the batch) and accepts multi-valued fields in three shapes:
//! a native sequence, a newline/semicolon-delimited string, or a
//! bracket-encoded JSON sequence embedded in a string.
//!
//! [`build_store`] is the single-pass batch entry point; it must complete
//! before any query is served.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

use crate::classify::{self, CategoryMarkers};
use crate::entity::{slug, EntityId, EntityKind};
use crate::error::{IngestError, LarderResult};
use crate::graph::store::FactStore;
use crate::graph::{Category, Diet, Fact, Predicate};

/// One raw recipe row, scalars already coerced to tolerant optionals.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    pub name: String,
    pub prep_time: Option<i64>,
    pub cook_time: Option<i64>,
    pub total_time: Option<i64>,
    pub servings: Option<i64>,
    pub ingredients: Vec<String>,
    pub directions: Vec<String>,
    pub rating: Option<f64>,
    pub url: Option<String>,
    pub cuisine_path: Option<String>,
}

// ---------------------------------------------------------------------------
// Field coercion
// ---------------------------------------------------------------------------

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn to_opt_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        // numeric-looking strings widen through float, anything else is absent
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
        }
        _ => None,
    }
}

fn to_opt_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn to_opt_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Normalize a multi-valued field into an ordered list of trimmed,
/// non-empty strings.
pub fn parse_sequence(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => collect_items(items),
        Value::String(s) => parse_sequence_text(s),
        _ => Vec::new(),
    }
}

/// The string-shaped variants: a bracket-encoded JSON sequence, or a
/// newline/semicolon-delimited list.
pub fn parse_sequence_text(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(trimmed) {
        return collect_items(&items);
    }
    trimmed
        .split(['\n', ';'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn collect_items(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .map(|v| scalar_text(v).trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn record_from_map(map: &serde_json::Map<String, Value>) -> RawRecord {
    let field = |name: &str| map.get(name).unwrap_or(&Value::Null);
    RawRecord {
        name: scalar_text_or_empty(field("recipe_name")),
        prep_time: to_opt_int(field("prep_time")),
        cook_time: to_opt_int(field("cook_time")),
        total_time: to_opt_int(field("total_time")),
        servings: to_opt_int(field("servings")),
        ingredients: parse_sequence(field("ingredients")),
        directions: parse_sequence(field("directions")),
        rating: to_opt_float(field("rating")),
        url: to_opt_string(field("url")),
        cuisine_path: to_opt_string(field("cuisine_path")),
    }
}

fn scalar_text_or_empty(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => scalar_text(other).trim().to_string(),
    }
}

// ---------------------------------------------------------------------------
// Dataset loading
// ---------------------------------------------------------------------------

/// Load raw records from a CSV or JSON dataset.
pub fn load_records(path: &Path) -> LarderResult<Vec<RawRecord>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    match extension.as_deref() {
        Some("json") => load_json(path),
        Some("csv") => load_csv(path),
        _ => Err(IngestError::UnsupportedFormat {
            path: path.display().to_string(),
        }
        .into()),
    }
}

fn load_json(path: &Path) -> LarderResult<Vec<RawRecord>> {
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let data: Value = serde_json::from_str(&text).map_err(|source| IngestError::Json {
        path: path.display().to_string(),
        source,
    })?;
    let rows: &[Value] = match &data {
        Value::Array(rows) => rows,
        Value::Object(obj) => match obj.get("data") {
            Some(Value::Array(rows)) => rows,
            _ => &[],
        },
        _ => &[],
    };
    Ok(rows
        .iter()
        .filter_map(Value::as_object)
        .map(record_from_map)
        .collect())
}

fn load_csv(path: &Path) -> LarderResult<Vec<RawRecord>> {
    let map_err = |source: csv::Error| IngestError::Csv {
        path: path.display().to_string(),
        source,
    };
    let mut reader = csv::Reader::from_path(path).map_err(map_err)?;
    let headers = reader.headers().map_err(map_err)?.clone();
    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(map_err)?;
        let mut map = serde_json::Map::new();
        for (header, cell) in headers.iter().zip(row.iter()) {
            map.insert(header.to_string(), Value::String(cell.to_string()));
        }
        records.push(record_from_map(&map));
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// Graph building
// ---------------------------------------------------------------------------

/// Build a fact store from a batch of raw records.
pub fn build_store<I>(records: I) -> FactStore
where
    I: IntoIterator<Item = RawRecord>,
{
    let mut builder = GraphBuilder::new();
    let mut total = 0usize;
    let mut kept = 0usize;
    for record in records {
        total += 1;
        if builder.add_record(&record) {
            kept += 1;
        }
    }
    tracing::info!(total, kept, "built fact graph");
    builder.finish()
}

/// Single-pass ingestion state: the store under construction plus the
/// memoized ingredient category markers.
pub struct GraphBuilder {
    store: FactStore,
    markers: HashMap<EntityId, CategoryMarkers>,
    diets: [EntityId; 3],
    categories: [EntityId; 2],
    next_step: u64,
}

impl GraphBuilder {
    /// Create a builder with the diet and category singletons seeded.
    pub fn new() -> Self {
        let mut store = FactStore::new();
        let diets = Diet::ALL.map(|diet| {
            let id = store.intern(EntityKind::Diet, diet.ident());
            store.insert(Fact::new(id, Predicate::Label, diet.label()));
            id
        });
        let categories =
            Category::ALL.map(|category| store.intern(EntityKind::Category, category.ident()));
        Self {
            store,
            markers: HashMap::new(),
            diets,
            categories,
            next_step: 0,
        }
    }

    fn diet_id(&self, diet: Diet) -> EntityId {
        match diet {
            Diet::Vegan => self.diets[0],
            Diet::Vegetarian => self.diets[1],
            Diet::GlutenFree => self.diets[2],
        }
    }

    fn category_id(&self, category: Category) -> EntityId {
        match category {
            Category::AnimalProduct => self.categories[0],
            Category::GlutenIngredient => self.categories[1],
        }
    }

    /// Ingest one record. Returns `false` when the record was dropped
    /// because its name is empty or normalizes to nothing.
    pub fn add_record(&mut self, record: &RawRecord) -> bool {
        let name = record.name.trim();
        if name.is_empty() {
            return false;
        }
        let ident = slug(name);
        if ident.is_empty() {
            tracing::debug!(name, "record name has no identifier content, dropped");
            return false;
        }

        let recipe = self.store.intern(EntityKind::Recipe, &ident);
        self.store.insert(Fact::new(recipe, Predicate::Label, name));

        if let Some(url) = &record.url {
            self.store
                .insert(Fact::new(recipe, Predicate::Url, url.as_str()));
        }
        if let Some(rating) = record.rating {
            self.store.insert(Fact::new(recipe, Predicate::Rating, rating));
        }
        if let Some(minutes) = record.prep_time {
            self.store
                .insert(Fact::new(recipe, Predicate::PrepTime, minutes));
        }
        if let Some(minutes) = record.cook_time {
            self.store
                .insert(Fact::new(recipe, Predicate::CookTime, minutes));
        }
        if let Some(minutes) = record.total_time {
            self.store
                .insert(Fact::new(recipe, Predicate::TotalTime, minutes));
        }
        if let Some(servings) = record.servings {
            self.store
                .insert(Fact::new(recipe, Predicate::Servings, servings));
        }

        let mut pairs: Vec<(&str, CategoryMarkers)> = Vec::new();
        for label in &record.ingredients {
            let Some((ingredient, markers)) = self.ensure_ingredient(label) else {
                continue;
            };
            pairs.push((label.as_str(), markers));
            self.store
                .insert(Fact::new(recipe, Predicate::HasIngredient, ingredient));
        }

        let profile = classify::infer_diets(&pairs);
        for diet in profile.diets {
            self.store
                .insert(Fact::new(recipe, Predicate::HasDiet, self.diet_id(diet)));
        }
        for category in profile.contains {
            self.store.insert(Fact::new(
                recipe,
                Predicate::AvoidsCategory,
                self.category_id(category),
            ));
        }

        for (idx, direction) in record.directions.iter().enumerate() {
            let position = idx as i64 + 1;
            self.next_step += 1;
            let step_ident = format!("{ident}-{}", self.next_step);
            let step = self.store.intern(EntityKind::Step, &step_ident);
            self.store
                .insert(Fact::new(step, Predicate::Label, direction.as_str()));
            self.store.insert(Fact::new(step, Predicate::Position, position));
            self.store.insert(Fact::new(recipe, Predicate::HasStep, step));
        }

        if let Some(path) = &record.cuisine_path {
            self.attach_cuisine_chain(recipe, path);
        }

        true
    }

    /// Create-or-reuse an ingredient entity; markers are computed once at
    /// first occurrence and memoized.
    fn ensure_ingredient(&mut self, label: &str) -> Option<(EntityId, CategoryMarkers)> {
        let ident = slug(label);
        if ident.is_empty() {
            return None;
        }
        if let Some(id) = self.store.lookup(EntityKind::Ingredient, &ident) {
            let markers = self.markers.get(&id).copied().unwrap_or_default();
            return Some((id, markers));
        }
        let id = self.store.intern(EntityKind::Ingredient, &ident);
        self.store
            .insert(Fact::new(id, Predicate::Label, label.trim()));
        let markers = classify::categorize(label);
        for category in markers.categories() {
            self.store.insert(Fact::new(
                id,
                Predicate::InCategory,
                self.category_id(category),
            ));
        }
        self.markers.insert(id, markers);
        Some((id, markers))
    }

    /// Split the hierarchy path, link each node to its predecessor, and
    /// attach only the most specific node to the recipe.
    fn attach_cuisine_chain(&mut self, recipe: EntityId, path: &str) {
        let mut parent: Option<EntityId> = None;
        for segment in path.split('>').map(str::trim).filter(|s| !s.is_empty()) {
            let ident = slug(segment);
            if ident.is_empty() {
                continue;
            }
            let cuisine = match self.store.lookup(EntityKind::Cuisine, &ident) {
                Some(id) => id,
                None => {
                    let id = self.store.intern(EntityKind::Cuisine, &ident);
                    self.store.insert(Fact::new(id, Predicate::Label, segment));
                    id
                }
            };
            if let Some(parent) = parent {
                self.store
                    .insert(Fact::new(cuisine, Predicate::ParentCuisine, parent));
            }
            parent = Some(cuisine);
        }
        if let Some(leaf) = parent {
            self.store.insert(Fact::new(recipe, Predicate::HasCuisine, leaf));
        }
    }

    /// Finish building and hand over the store.
    pub fn finish(self) -> FactStore {
        self.store
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
