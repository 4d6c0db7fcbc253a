//! In-memory fact store with lookup indexes.
//!
//! The store is append-only while the graph is built and read-only for the
//! rest of the process lifetime; shared immutable access afterwards needs no
//! locking. Inserts have set semantics: a duplicate (subject, predicate,
//! object) is silently absorbed.
//!
//! Three indexes back the fixed query shapes: by subject, by predicate, and
//! by (predicate, entity object) for the join-heavy search filters.

use std::collections::{HashMap, HashSet};

use crate::entity::{EntityId, EntityKind};
use crate::registry::EntityRegistry;

use super::{Fact, Predicate, Term};

/// Indexed collection of facts plus the entity registry that names them.
#[derive(Default)]
pub struct FactStore {
    registry: EntityRegistry,
    /// Facts in insertion order.
    facts: Vec<Fact>,
    /// Set view of `facts` for dedup and existence checks.
    seen: HashSet<Fact>,
    /// Subject → indices into `facts`.
    by_subject: HashMap<EntityId, Vec<usize>>,
    /// Predicate → indices into `facts`.
    by_predicate: HashMap<Predicate, Vec<usize>>,
    /// (predicate, entity object) → subjects, for reverse joins.
    by_pred_entity: HashMap<(Predicate, EntityId), Vec<EntityId>>,
}

impl FactStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern an entity by kind and pre-normalized identity.
    pub fn intern(&mut self, kind: EntityKind, ident: &str) -> EntityId {
        self.registry.intern(kind, ident)
    }

    /// Look up an interned entity.
    pub fn lookup(&self, kind: EntityKind, ident: &str) -> Option<EntityId> {
        self.registry.lookup(kind, ident)
    }

    /// The entity registry backing this store.
    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Insert a fact. Returns `false` when an identical fact was already
    /// present (the duplicate is absorbed, the store is unchanged).
    pub fn insert(&mut self, fact: Fact) -> bool {
        if !self.seen.insert(fact.clone()) {
            return false;
        }
        let idx = self.facts.len();
        self.by_subject.entry(fact.subject).or_default().push(idx);
        self.by_predicate.entry(fact.predicate).or_default().push(idx);
        if let Some(object) = fact.object.as_entity() {
            self.by_pred_entity
                .entry((fact.predicate, object))
                .or_default()
                .push(fact.subject);
        }
        self.facts.push(fact);
        true
    }

    /// Whether an identical fact exists in the store.
    pub fn has(&self, fact: &Fact) -> bool {
        self.seen.contains(fact)
    }

    /// Whether a specific (subject, predicate, object) triple exists.
    pub fn contains(&self, subject: EntityId, predicate: Predicate, object: &Term) -> bool {
        self.has(&Fact {
            subject,
            predicate,
            object: object.clone(),
        })
    }

    /// All facts, in insertion order.
    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    /// All facts with the given subject, in insertion order.
    pub fn facts_about(&self, subject: EntityId) -> impl Iterator<Item = &Fact> + '_ {
        self.by_subject
            .get(&subject)
            .into_iter()
            .flatten()
            .map(move |&i| &self.facts[i])
    }

    /// All facts with the given predicate, in insertion order.
    pub fn facts_with(&self, predicate: Predicate) -> impl Iterator<Item = &Fact> + '_ {
        self.by_predicate
            .get(&predicate)
            .into_iter()
            .flatten()
            .map(move |&i| &self.facts[i])
    }

    /// Objects of all (subject, predicate, _) facts, in insertion order.
    pub fn objects_of(
        &self,
        subject: EntityId,
        predicate: Predicate,
    ) -> impl Iterator<Item = &Term> + '_ {
        self.facts_about(subject)
            .filter(move |f| f.predicate == predicate)
            .map(|f| &f.object)
    }

    /// Subjects of all (_, predicate, object) facts for an entity object.
    pub fn subjects_with(&self, predicate: Predicate, object: EntityId) -> &[EntityId] {
        self.by_pred_entity
            .get(&(predicate, object))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First string object of (subject, predicate, _), if any.
    pub fn str_of(&self, subject: EntityId, predicate: Predicate) -> Option<&str> {
        self.objects_of(subject, predicate).find_map(Term::as_str)
    }

    /// First integer object of (subject, predicate, _), if any.
    pub fn int_of(&self, subject: EntityId, predicate: Predicate) -> Option<i64> {
        self.objects_of(subject, predicate).find_map(Term::as_int)
    }

    /// First float object of (subject, predicate, _), if any.
    pub fn float_of(&self, subject: EntityId, predicate: Predicate) -> Option<f64> {
        self.objects_of(subject, predicate).find_map(Term::as_float)
    }

    /// The label of an entity, read from its `label` fact.
    pub fn label_of(&self, subject: EntityId) -> Option<&str> {
        self.str_of(subject, Predicate::Label)
    }

    /// Number of facts.
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Whether the store holds no facts.
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

impl std::fmt::Debug for FactStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactStore")
            .field("entities", &self.registry.len())
            .field("facts", &self.len())
            .finish()
    }
}
