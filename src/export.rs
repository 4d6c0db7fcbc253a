//! Denormalized result records handed to the boundary layer.
//!
//! These are the label-resolved, JSON-ready shapes the HTTP layer and CLI
//! serialize directly; absent attributes are explicit `None`s, never
//! missing keys in an untyped map.

use serde::Serialize;

/// Summary row returned by search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeSummary {
    /// Stable entity reference, e.g. `recipe-lentil-soup`.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Source URL, when recorded.
    pub url: Option<String>,
    /// Rating, when recorded.
    pub rating: Option<f64>,
    /// Total time in minutes, when recorded.
    pub total_time: Option<i64>,
    /// Every cuisine association, deduplicated, first-seen order.
    pub cuisines: Vec<String>,
    /// Every diet association, deduplicated, first-seen order.
    pub diets: Vec<String>,
}

/// Full record returned by detail lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub summary: RecipeSummary,
    /// Ingredient labels, deduplicated, first-seen order.
    pub ingredients: Vec<String>,
    /// Direction texts, ordered by stored step position, deduplicated.
    pub directions: Vec<String>,
}
