//! Fact model: typed subject/predicate/object statements.
//!
//! The graph stores facts whose subject is always an entity and whose object
//! is either an entity or a typed literal (string, integer, float). The
//! predicate vocabulary is closed; every query shape in this crate is
//! expressed over it.
//!
//! - **In-memory store** ([`store::FactStore`]): indexed, write-once-then-read-only
//! - **Text format** ([`format`]): line-based serialization for the graph file

pub mod format;
pub mod store;

use serde::{Deserialize, Serialize};

use crate::entity::EntityId;

/// Closed predicate vocabulary of the recipe domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Predicate {
    /// Human-readable label of any entity (also carries step direction text).
    Label,
    /// Source URL of a recipe.
    Url,
    /// Recipe rating (float).
    Rating,
    /// Preparation time in minutes.
    PrepTime,
    /// Cooking time in minutes.
    CookTime,
    /// Total time in minutes.
    TotalTime,
    /// Serving count.
    Servings,
    /// Recipe → ingredient association.
    HasIngredient,
    /// Recipe → its most specific cuisine node.
    HasCuisine,
    /// Recipe → inferred diet singleton.
    HasDiet,
    /// Recipe → ingredient category present in it. The wire name reads as
    /// avoidance; the fact records presence.
    AvoidsCategory,
    /// Recipe → preparation step.
    HasStep,
    /// One-based position of a step within its recipe.
    Position,
    /// Cuisine → its next-more-general cuisine node.
    ParentCuisine,
    /// Ingredient → category marker.
    InCategory,
}

impl Predicate {
    /// All predicates, in declaration order.
    pub const ALL: [Predicate; 15] = [
        Predicate::Label,
        Predicate::Url,
        Predicate::Rating,
        Predicate::PrepTime,
        Predicate::CookTime,
        Predicate::TotalTime,
        Predicate::Servings,
        Predicate::HasIngredient,
        Predicate::HasCuisine,
        Predicate::HasDiet,
        Predicate::AvoidsCategory,
        Predicate::HasStep,
        Predicate::Position,
        Predicate::ParentCuisine,
        Predicate::InCategory,
    ];

    /// The wire name used in the graph file format.
    pub fn name(self) -> &'static str {
        match self {
            Predicate::Label => "label",
            Predicate::Url => "url",
            Predicate::Rating => "rating",
            Predicate::PrepTime => "prepTime",
            Predicate::CookTime => "cookTime",
            Predicate::TotalTime => "totalTime",
            Predicate::Servings => "servings",
            Predicate::HasIngredient => "hasIngredient",
            Predicate::HasCuisine => "hasCuisine",
            Predicate::HasDiet => "hasDiet",
            Predicate::AvoidsCategory => "avoidsIngredientCategory",
            Predicate::HasStep => "step",
            Predicate::Position => "position",
            Predicate::ParentCuisine => "parentCuisine",
            Predicate::InCategory => "inCategory",
        }
    }

    /// Parse a wire name back into a predicate.
    pub fn parse(name: &str) -> Option<Self> {
        Predicate::ALL.into_iter().find(|p| p.name() == name)
    }
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The three global diet singletons. Never created dynamically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Diet {
    Vegan,
    Vegetarian,
    GlutenFree,
}

impl Diet {
    /// All diet singletons.
    pub const ALL: [Diet; 3] = [Diet::Vegan, Diet::Vegetarian, Diet::GlutenFree];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Diet::Vegan => "Vegan",
            Diet::Vegetarian => "Vegetarian",
            Diet::GlutenFree => "GlutenFree",
        }
    }

    /// Normalized identity (`slug(label)`).
    pub fn ident(self) -> &'static str {
        match self {
            Diet::Vegan => "vegan",
            Diet::Vegetarian => "vegetarian",
            Diet::GlutenFree => "glutenfree",
        }
    }
}

/// Coarse ingredient category markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    AnimalProduct,
    GlutenIngredient,
}

impl Category {
    /// Both category markers.
    pub const ALL: [Category; 2] = [Category::AnimalProduct, Category::GlutenIngredient];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Category::AnimalProduct => "AnimalProduct",
            Category::GlutenIngredient => "GlutenIngredient",
        }
    }

    /// Normalized identity (`slug(label)`).
    pub fn ident(self) -> &'static str {
        match self {
            Category::AnimalProduct => "animalproduct",
            Category::GlutenIngredient => "gluteningredient",
        }
    }
}

/// Object position of a fact: an entity reference or a typed literal.
#[derive(Debug, Clone)]
pub enum Term {
    Entity(EntityId),
    Str(String),
    Int(i64),
    Float(f64),
}

impl Term {
    /// The entity id, if this term is an entity reference.
    pub fn as_entity(&self) -> Option<EntityId> {
        if let Term::Entity(id) = self { Some(*id) } else { None }
    }

    /// The string value, if this term is a string literal.
    pub fn as_str(&self) -> Option<&str> {
        if let Term::Str(s) = self { Some(s) } else { None }
    }

    /// The integer value, if this term is an integer literal.
    pub fn as_int(&self) -> Option<i64> {
        if let Term::Int(i) = self { Some(*i) } else { None }
    }

    /// The float value, if this term is a float literal.
    pub fn as_float(&self) -> Option<f64> {
        if let Term::Float(f) = self { Some(*f) } else { None }
    }
}

// Float terms compare by bit pattern so the fact set stays well-defined
// even for NaN and -0.0.
impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Term::Entity(a), Term::Entity(b)) => a == b,
            (Term::Str(a), Term::Str(b)) => a == b,
            (Term::Int(a), Term::Int(b)) => a == b,
            (Term::Float(a), Term::Float(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for Term {}

impl std::hash::Hash for Term {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Term::Entity(id) => id.hash(state),
            Term::Str(s) => s.hash(state),
            Term::Int(i) => i.hash(state),
            Term::Float(f) => f.to_bits().hash(state),
        }
    }
}

impl From<EntityId> for Term {
    fn from(id: EntityId) -> Self {
        Term::Entity(id)
    }
}

impl From<String> for Term {
    fn from(s: String) -> Self {
        Term::Str(s)
    }
}

impl From<&str> for Term {
    fn from(s: &str) -> Self {
        Term::Str(s.to_string())
    }
}

impl From<i64> for Term {
    fn from(i: i64) -> Self {
        Term::Int(i)
    }
}

impl From<f64> for Term {
    fn from(f: f64) -> Self {
        Term::Float(f)
    }
}

/// A (subject, predicate, object) fact in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fact {
    /// The subject of the fact; always an entity.
    pub subject: EntityId,
    /// The predicate relating subject and object.
    pub predicate: Predicate,
    /// The object: entity reference or typed literal.
    pub object: Term,
}

impl Fact {
    /// Create a new fact.
    pub fn new(subject: EntityId, predicate: Predicate, object: impl Into<Term>) -> Self {
        Self {
            subject,
            predicate,
            object: object.into(),
        }
    }
}
