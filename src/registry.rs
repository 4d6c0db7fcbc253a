//! Entity registry: bidirectional reference ↔ id mapping.
//!
//! The [`EntityRegistry`] interns entities by their stable textual reference
//! (kind prefix + normalized identity) and hands out compact [`EntityId`]s.
//! Interning the same (kind, identity) pair twice returns the original id,
//! which is what merges identically-normalized labels into one entity.

use std::collections::HashMap;

use crate::entity::{EntityId, EntityKind, EntityMeta};

/// Interning registry mapping ids to metadata and references to ids.
#[derive(Default)]
pub struct EntityRegistry {
    /// Slot `id - 1` holds the metadata for `id` (source of truth).
    metas: Vec<EntityMeta>,
    /// Reverse map: textual reference → EntityId.
    by_reference: HashMap<String, EntityId>,
}

impl EntityRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            metas: Vec::new(),
            by_reference: HashMap::new(),
        }
    }

    /// Intern an entity by kind and pre-normalized identity.
    ///
    /// Returns the existing id when the (kind, identity) pair is already
    /// registered; ids are minted sequentially starting at 1.
    pub fn intern(&mut self, kind: EntityKind, ident: &str) -> EntityId {
        let reference = format!("{}-{}", kind.prefix(), ident);
        if let Some(&id) = self.by_reference.get(&reference) {
            return id;
        }
        let raw = u32::try_from(self.metas.len() + 1).expect("entity id space exhausted");
        let id = EntityId::new(raw).expect("ids start at 1");
        self.metas.push(EntityMeta {
            id,
            kind,
            ident: ident.to_string(),
        });
        self.by_reference.insert(reference, id);
        id
    }

    /// Look up an entity id by kind and pre-normalized identity.
    pub fn lookup(&self, kind: EntityKind, ident: &str) -> Option<EntityId> {
        self.by_reference
            .get(&format!("{}-{}", kind.prefix(), ident))
            .copied()
    }

    /// Resolve a full textual reference (e.g. `recipe-lentil-soup`) to an id.
    pub fn resolve_reference(&self, reference: &str) -> Option<EntityId> {
        self.by_reference.get(reference).copied()
    }

    /// Look up entity metadata by id.
    pub fn meta(&self, id: EntityId) -> Option<&EntityMeta> {
        self.metas.get(id.index())
    }

    /// The textual reference for an id, falling back to `ent-{id}` for
    /// ids not minted by this registry.
    pub fn reference(&self, id: EntityId) -> String {
        self.meta(id)
            .map(EntityMeta::reference)
            .unwrap_or_else(|| format!("ent-{}", id.get()))
    }

    /// All entities of a kind, in interning order.
    pub fn of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &EntityMeta> + '_ {
        self.metas.iter().filter(move |m| m.kind == kind)
    }

    /// Number of registered entities.
    pub fn len(&self) -> usize {
        self.metas.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.metas.is_empty()
    }
}

impl std::fmt::Debug for EntityRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityRegistry")
            .field("count", &self.len())
            .finish()
    }
}
