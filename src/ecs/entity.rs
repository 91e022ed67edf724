//! Entities and their component store
//!
//! An entity is an identity plus a kind→value map; it has no behavior of
//! its own. Component adds and removes push structural events so the owning
//! scene can keep derived state consistent without polling.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use rustc_hash::FxHashMap;

use super::component::{Component, ComponentKind, KindSet};
use super::error::EcsError;
use super::events::{EventSink, StructuralEvent};

/// Process-wide id source. Ids are never recycled, so a handle to a
/// destroyed entity can never alias a later one.
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Unique entity identity, stable for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(u64);

impl EntityId {
    /// Allocate a fresh id. Safe to call from any context.
    pub(crate) fn allocate() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value, for logs and external serializers.
    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An identity, a mutable display name, and a set of components.
///
/// At most one component per kind; inserting an existing kind overwrites
/// (last write wins). Components are owned exclusively by their entity.
pub struct Entity {
    id: EntityId,
    name: String,
    components: FxHashMap<ComponentKind, Box<dyn Component>>,
    events: EventSink,
}

impl Entity {
    /// Create an entity wired to a scene's event queue.
    pub(crate) fn new(name: impl Into<String>, events: EventSink) -> Self {
        Self {
            id: EntityId::allocate(),
            name: name.into(),
            components: FxHashMap::default(),
            events,
        }
    }

    /// Unique id of this entity.
    #[must_use]
    #[inline]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Display name; mutable and not required to be unique.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the entity.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    // -------------------------------------------------------------------------
    // Component store
    // -------------------------------------------------------------------------

    /// Insert or overwrite the component of `T`'s kind.
    ///
    /// Overwriting is allowed (last write wins) and still pushes an added
    /// event, so caches treat it like any other structural change.
    pub fn add_component<T: Component>(&mut self, value: T) {
        self.insert_boxed(Box::new(value));
    }

    /// Insert an already-erased component. Used by duplication so the copy's
    /// components announce themselves like freshly added ones.
    pub(crate) fn insert_boxed(&mut self, value: Box<dyn Component>) {
        let kind = value.kind();
        self.components.insert(kind, value);
        self.events.push(StructuralEvent::ComponentAdded {
            entity: self.id,
            kind,
        });
    }

    /// Remove the component of `T`'s kind, returning it.
    ///
    /// Removing an absent kind is a no-op returning `None`, and pushes no
    /// event.
    pub fn remove_component<T: Component>(&mut self) -> Option<T> {
        let kind = ComponentKind::of::<T>();
        let boxed = self.components.remove(&kind)?;
        self.events.push(StructuralEvent::ComponentRemoved {
            entity: self.id,
            kind,
        });
        boxed.into_any().downcast::<T>().ok().map(|value| *value)
    }

    /// Shared access to the component of `T`'s kind.
    ///
    /// A missing kind is an error; callers with optional access use
    /// [`try_component`](Self::try_component) instead.
    pub fn component<T: Component>(&self) -> Result<&T, EcsError> {
        self.try_component::<T>().ok_or(EcsError::MissingComponent {
            entity: self.id,
            component: std::any::type_name::<T>(),
        })
    }

    /// Mutable access to the component of `T`'s kind; missing is an error.
    pub fn component_mut<T: Component>(&mut self) -> Result<&mut T, EcsError> {
        let id = self.id;
        self.try_component_mut::<T>()
            .ok_or(EcsError::MissingComponent {
                entity: id,
                component: std::any::type_name::<T>(),
            })
    }

    /// Shared access, `None` when absent.
    #[must_use]
    pub fn try_component<T: Component>(&self) -> Option<&T> {
        self.components
            .get(&ComponentKind::of::<T>())?
            .as_any()
            .downcast_ref::<T>()
    }

    /// Mutable access, `None` when absent.
    pub fn try_component_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.components
            .get_mut(&ComponentKind::of::<T>())?
            .as_any_mut()
            .downcast_mut::<T>()
    }

    /// Check for the component of `T`'s kind. Pure, no side effects.
    #[must_use]
    #[inline]
    pub fn has_component<T: Component>(&self) -> bool {
        self.has_kind(ComponentKind::of::<T>())
    }

    /// Check for a kind by value.
    #[must_use]
    #[inline]
    pub fn has_kind(&self, kind: ComponentKind) -> bool {
        self.components.contains_key(&kind)
    }

    /// Check that every kind in the set is present.
    #[must_use]
    pub fn has_kinds(&self, kinds: &[ComponentKind]) -> bool {
        kinds.iter().all(|kind| self.has_kind(*kind))
    }

    /// Kinds currently attached, in no particular order.
    #[must_use]
    pub fn kinds(&self) -> KindSet {
        self.components.keys().copied().collect()
    }

    /// Number of attached components.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Deep-copy this entity under a fresh id.
    ///
    /// Every component is copied through [`Component::duplicate`], so
    /// runtime-only state resets and mutating the copy never affects the
    /// original. Each copied component pushes an added event.
    pub(crate) fn duplicate(&self, name: impl Into<String>) -> Entity {
        let mut copy = Entity::new(name, self.events.clone());
        for value in self.components.values() {
            copy.insert_boxed(value.duplicate());
        }
        copy
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("components", &self.components.len())
            .finish()
    }
}
