//! Live entity registry and query engine
//!
//! The context is scene-scoped: each scene owns exactly one, and tests can
//! build as many independent worlds as they like. Filtering is a deliberate
//! linear scan with O(1) per-entity presence checks — correctness over
//! asymptotics at the entity counts this engine targets. Query results are
//! fresh snapshots, never live views.

use rustc_hash::FxHashMap;

use super::component::{Component, ComponentKind};
use super::entity::{Entity, EntityId};

/// Registry of all currently-live entities, queryable by component
/// composition.
#[derive(Debug, Default)]
pub struct Context {
    entities: Vec<Entity>,
    /// id → position in `entities`, rebuilt on removal
    slots: FxHashMap<EntityId, usize>,
}

impl Context {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity to the live set.
    pub fn register(&mut self, entity: Entity) {
        debug_assert!(
            !self.slots.contains_key(&entity.id()),
            "entity {} registered twice",
            entity.id()
        );
        log::trace!("register entity {} '{}'", entity.id(), entity.name());
        self.slots.insert(entity.id(), self.entities.len());
        self.entities.push(entity);
    }

    /// Remove the matching entity, rebuilding the live set without it.
    ///
    /// O(n); reached only from explicit destruction, never the per-frame
    /// hot path. Returns `None` when the id is not registered.
    pub fn unregister(&mut self, id: EntityId) -> Option<Entity> {
        let slot = self.slots.remove(&id)?;
        let entity = self.entities.remove(slot);
        self.slots.clear();
        for (index, e) in self.entities.iter().enumerate() {
            self.slots.insert(e.id(), index);
        }
        log::trace!("unregister entity {} '{}'", id, entity.name());
        Some(entity)
    }

    /// Check whether an id is currently registered.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Resolve an id to its entity, `None` after destruction.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.slots.get(&id).map(|&slot| &self.entities[slot])
    }

    /// Resolve an id to its entity for mutation.
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let slot = *self.slots.get(&id)?;
        self.entities.get_mut(slot)
    }

    /// Number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Drop every entity. Used on scene load.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.slots.clear();
    }

    /// Iterate live entities in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Iterate live entities mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Every registered entity whose kind set is a superset of `kinds`.
    ///
    /// An empty request matches all entities. The result is a snapshot: it
    /// does not update if entities are mutated after the call, and its order
    /// carries no meaning.
    #[must_use]
    pub fn get_group(&self, kinds: &[ComponentKind]) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|entity| entity.has_kinds(kinds))
            .map(Entity::id)
            .collect()
    }

    /// (entity, component) pairs for every entity possessing `T`.
    ///
    /// Equivalent to a single-kind group plus component access, without the
    /// second lookup.
    #[must_use]
    pub fn view<T: Component>(&self) -> Vec<(EntityId, &T)> {
        self.entities
            .iter()
            .filter_map(|entity| entity.try_component::<T>().map(|c| (entity.id(), c)))
            .collect()
    }

    /// Mutable (entity, component) pairs for every entity possessing `T`.
    pub fn view_mut<T: Component>(&mut self) -> Vec<(EntityId, &mut T)> {
        self.entities
            .iter_mut()
            .filter_map(|entity| {
                let id = entity.id();
                entity.try_component_mut::<T>().map(|c| (id, c))
            })
            .collect()
    }
}
