//! Pattern-matching queries over the fact store.
//!
//! Two query shapes: enumeration (distinct labels of a kind) and filtered
//! search. Filters are typed clauses, one tagged variant per filter kind,
//! evaluated against the store's indexes; nothing is ever assembled from
//! query text. Filters restrict the recipe set only: the displayed cuisine
//! and diet lists of a matching recipe are produced by an independent join
//! and still carry every association the recipe has.

use std::collections::HashSet;

use crate::entity::{EntityId, EntityKind};
use crate::export::{RecipeDetail, RecipeSummary};
use crate::graph::store::FactStore;
use crate::graph::{Predicate, Term};

/// Which category listing to enumerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    Cuisine,
    Diet,
}

/// One typed restriction on the search result set.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterClause {
    /// At least one ingredient label contains this text, case-insensitively.
    IngredientContains(String),
    /// Some cuisine association whose label equals this, case-insensitively.
    CuisineIs(String),
    /// Some diet association whose label equals this, case-insensitively.
    DietIs(String),
    /// Total time attribute present and not above this bound.
    MaxTotalTime(i64),
}

/// Optional conjunctive search filters; an absent field imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchFilters {
    pub ingredient: Option<String>,
    pub cuisine: Option<String>,
    pub diet: Option<String>,
    pub max_total_time: Option<i64>,
}

impl SearchFilters {
    /// The typed clauses for the supplied filters, in fixed order.
    pub fn clauses(&self) -> Vec<FilterClause> {
        let mut clauses = Vec::new();
        if let Some(text) = &self.ingredient {
            clauses.push(FilterClause::IngredientContains(text.clone()));
        }
        if let Some(name) = &self.cuisine {
            clauses.push(FilterClause::CuisineIs(name.clone()));
        }
        if let Some(name) = &self.diet {
            clauses.push(FilterClause::DietIs(name.clone()));
        }
        if let Some(bound) = self.max_total_time {
            clauses.push(FilterClause::MaxTotalTime(bound));
        }
        clauses
    }
}

/// All distinct labels of entities of a kind, ascending case-insensitively.
pub fn list_category(store: &FactStore, kind: CategoryKind) -> Vec<String> {
    let entity_kind = match kind {
        CategoryKind::Cuisine => EntityKind::Cuisine,
        CategoryKind::Diet => EntityKind::Diet,
    };
    let mut labels: Vec<String> = store
        .registry()
        .of_kind(entity_kind)
        .filter_map(|meta| store.label_of(meta.id))
        .map(str::to_string)
        .collect();
    labels.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()));
    labels.dedup();
    labels
}

/// Filtered recipe search.
///
/// Clauses compose conjunctively over the full recipe set; results are
/// assembled per recipe and ordered ascending by case-insensitive label.
/// The order is stable across repeated calls against the same store.
pub fn search(store: &FactStore, filters: &SearchFilters) -> Vec<RecipeSummary> {
    let mut candidates: Vec<EntityId> = store
        .registry()
        .of_kind(EntityKind::Recipe)
        .map(|meta| meta.id)
        .collect();
    for clause in filters.clauses() {
        apply_clause(store, &mut candidates, &clause);
    }
    let mut rows: Vec<RecipeSummary> = candidates
        .into_iter()
        .map(|recipe| summarize(store, recipe))
        .collect();
    rows.sort_by(|a, b| a.label.to_lowercase().cmp(&b.label.to_lowercase()));
    rows
}

fn apply_clause(store: &FactStore, candidates: &mut Vec<EntityId>, clause: &FilterClause) {
    match clause {
        FilterClause::IngredientContains(text) => {
            let needle = text.to_lowercase();
            candidates.retain(|&recipe| {
                store
                    .objects_of(recipe, Predicate::HasIngredient)
                    .filter_map(Term::as_entity)
                    .any(|ingredient| {
                        store
                            .label_of(ingredient)
                            .is_some_and(|label| label.to_lowercase().contains(&needle))
                    })
            });
        }
        FilterClause::CuisineIs(name) => {
            let allowed =
                subjects_with_labeled(store, EntityKind::Cuisine, Predicate::HasCuisine, name);
            candidates.retain(|recipe| allowed.contains(recipe));
        }
        FilterClause::DietIs(name) => {
            let allowed = subjects_with_labeled(store, EntityKind::Diet, Predicate::HasDiet, name);
            candidates.retain(|recipe| allowed.contains(recipe));
        }
        FilterClause::MaxTotalTime(bound) => {
            // an absent totalTime attribute never matches
            candidates.retain(|&recipe| {
                store
                    .int_of(recipe, Predicate::TotalTime)
                    .is_some_and(|minutes| minutes <= *bound)
            });
        }
    }
}

/// Subjects associated through `predicate` with any `kind` entity whose
/// label equals `name` case-insensitively. Uses the (predicate, object)
/// index, so cost tracks the matching associations, not the store size.
fn subjects_with_labeled(
    store: &FactStore,
    kind: EntityKind,
    predicate: Predicate,
    name: &str,
) -> HashSet<EntityId> {
    let needle = name.to_lowercase();
    let mut subjects = HashSet::new();
    for meta in store.registry().of_kind(kind) {
        let matches = store
            .label_of(meta.id)
            .is_some_and(|label| label.to_lowercase() == needle);
        if matches {
            subjects.extend(store.subjects_with(predicate, meta.id).iter().copied());
        }
    }
    subjects
}

/// Assemble the display row for one recipe: scalar attributes plus the full
/// (unfiltered) cuisine and diet association lists.
fn summarize(store: &FactStore, recipe: EntityId) -> RecipeSummary {
    RecipeSummary {
        id: store.registry().reference(recipe),
        label: store.label_of(recipe).unwrap_or_default().to_string(),
        url: store.str_of(recipe, Predicate::Url).map(str::to_string),
        rating: store.float_of(recipe, Predicate::Rating),
        total_time: store.int_of(recipe, Predicate::TotalTime),
        cuisines: labels_of_objects(store, recipe, Predicate::HasCuisine),
        diets: labels_of_objects(store, recipe, Predicate::HasDiet),
    }
}

/// Labels of the entity objects of (subject, predicate, _), deduplicated,
/// first-seen order preserved.
fn labels_of_objects(store: &FactStore, subject: EntityId, predicate: Predicate) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for term in store.objects_of(subject, predicate) {
        let Some(id) = term.as_entity() else { continue };
        let Some(label) = store.label_of(id) else {
            continue;
        };
        if !labels.iter().any(|seen| seen == label) {
            labels.push(label.to_string());
        }
    }
    labels
}

/// Resolve one recipe reference into its full denormalized record.
///
/// Returns `None` (not an error) when the reference is unknown or has no
/// facts. Directions are ordered by their stored step position, not by
/// traversal order.
pub fn detail(store: &FactStore, recipe_ref: &str) -> Option<RecipeDetail> {
    let recipe = store.registry().resolve_reference(recipe_ref)?;
    store.facts_about(recipe).next()?;

    let summary = summarize(store, recipe);
    let ingredients = labels_of_objects(store, recipe, Predicate::HasIngredient);

    let mut steps: Vec<(i64, EntityId)> = store
        .objects_of(recipe, Predicate::HasStep)
        .filter_map(Term::as_entity)
        .map(|step| {
            let position = store.int_of(step, Predicate::Position).unwrap_or(i64::MAX);
            (position, step)
        })
        .collect();
    // stable sort keeps encounter order among equal positions
    steps.sort_by_key(|&(position, _)| position);

    let mut directions: Vec<String> = Vec::new();
    for (_, step) in steps {
        let Some(text) = store.label_of(step) else {
            continue;
        };
        if !directions.iter().any(|seen| seen == text) {
            directions.push(text.to_string());
        }
    }

    Some(RecipeDetail {
        summary,
        ingredients,
        directions,
    })
}
