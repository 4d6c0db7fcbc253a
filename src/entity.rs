//! Entity identity for the recipe graph.
//!
//! Every node in the graph is identified by an [`EntityId`] and described by
//! [`EntityMeta`]. Identity is a pure function of the entity's kind and its
//! normalized label: `slug("Lentil Soup")` and `slug("lentil soup")` collide,
//! so both spellings name the *same* recipe. Steps are the one exception;
//! they are anonymous and scoped to the recipe that owns them.

use std::num::NonZeroU32;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new("[^a-z0-9]+").expect("valid pattern"));

/// Normalize a free-text label into a stable identifier slug.
///
/// Lowercases, replaces every run of non-alphanumeric characters with a
/// single hyphen, and strips leading/trailing hyphens. Deterministic and
/// idempotent. Returns an empty string for labels with no alphanumeric
/// content; callers must treat that as an invalid label and skip the record.
pub fn slug(label: &str) -> String {
    let lowered = label.trim().to_lowercase();
    NON_ALNUM
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Unique, niche-optimized identifier for an entity.
///
/// Uses `NonZeroU32` so that `Option<EntityId>` is the same size as `EntityId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct EntityId(NonZeroU32);

impl EntityId {
    /// Create an `EntityId` from a raw `u32`. Returns `None` if `raw` is zero.
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(EntityId)
    }

    /// Get the underlying `u32` value.
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Zero-based registry slot for this id.
    pub(crate) fn index(self) -> usize {
        self.0.get() as usize - 1
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ent:{}", self.0)
    }
}

/// Classification of an entity in the recipe graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// A recipe record.
    Recipe,
    /// An ingredient, globally deduplicated by slug.
    Ingredient,
    /// A cuisine node in a hierarchy chain, globally deduplicated by slug.
    Cuisine,
    /// One of the three fixed diet singletons.
    Diet,
    /// An anonymous, recipe-scoped preparation step.
    Step,
    /// A coarse ingredient category marker (animal product, gluten-bearing).
    Category,
}

impl EntityKind {
    /// All entity kinds, in declaration order.
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Recipe,
        EntityKind::Ingredient,
        EntityKind::Cuisine,
        EntityKind::Diet,
        EntityKind::Step,
        EntityKind::Category,
    ];

    /// The reference prefix for this kind (`recipe-…`, `ingredient-…`, …).
    pub fn prefix(self) -> &'static str {
        match self {
            EntityKind::Recipe => "recipe",
            EntityKind::Ingredient => "ingredient",
            EntityKind::Cuisine => "cuisine",
            EntityKind::Diet => "diet",
            EntityKind::Step => "step",
            EntityKind::Category => "category",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Recipe => write!(f, "Recipe"),
            EntityKind::Ingredient => write!(f, "Ingredient"),
            EntityKind::Cuisine => write!(f, "Cuisine"),
            EntityKind::Diet => write!(f, "Diet"),
            EntityKind::Step => write!(f, "Step"),
            EntityKind::Category => write!(f, "Category"),
        }
    }
}

/// Metadata describing an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityMeta {
    /// Unique identifier.
    pub id: EntityId,
    /// What kind of entity this is.
    pub kind: EntityKind,
    /// Normalized identity within the kind (the slug, or the step key).
    pub ident: String,
}

impl EntityMeta {
    /// The stable textual reference for this entity, e.g. `recipe-lentil-soup`.
    pub fn reference(&self) -> String {
        format!("{}-{}", self.kind.prefix(), self.ident)
    }
}

/// Split a textual reference into its kind and identity parts.
///
/// Returns `None` when the reference carries no known kind prefix or an
/// empty identity.
pub fn parse_reference(reference: &str) -> Option<(EntityKind, &str)> {
    for kind in EntityKind::ALL {
        if let Some(rest) = reference.strip_prefix(kind.prefix()) {
            if let Some(ident) = rest.strip_prefix('-') {
                if !ident.is_empty() {
                    return Some((kind, ident));
                }
            }
        }
    }
    None
}
