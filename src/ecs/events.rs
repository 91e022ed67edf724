//! Structural change notifications
//!
//! Adding or removing a component, and destroying an entity, pushes an
//! event into a queue shared by every entity of a scene. Derived state (the
//! primary-camera cache) drains the queue instead of re-scanning the world;
//! there is no polling path.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use super::component::ComponentKind;
use super::entity::EntityId;

/// A structural change to the entity world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralEvent {
    /// A component was added to (or overwrote an existing one on) an entity.
    ComponentAdded {
        /// Entity that changed
        entity: EntityId,
        /// Kind that was inserted
        kind: ComponentKind,
    },
    /// A component was removed from an entity. The removed value itself is
    /// returned to the remover; consumers here only need the kind.
    ComponentRemoved {
        /// Entity that changed
        entity: EntityId,
        /// Kind that was removed
        kind: ComponentKind,
    },
    /// An entity was destroyed and unregistered from the live set.
    EntityDestroyed {
        /// The destroyed entity
        entity: EntityId,
    },
}

/// Shared handle to a scene's structural event queue.
///
/// Cloning is cheap: every entity of a scene holds a handle to the same
/// underlying queue, and the scene drains it when derived state is read.
#[derive(Debug, Clone)]
pub struct EventSink {
    queue: Rc<RefCell<VecDeque<StructuralEvent>>>,
}

impl EventSink {
    /// Default initial capacity of the queue.
    const DEFAULT_CAPACITY: usize = 64;

    /// Create a new, empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            queue: Rc::new(RefCell::new(VecDeque::with_capacity(
                Self::DEFAULT_CAPACITY,
            ))),
        }
    }

    /// Record a structural change.
    #[inline]
    pub fn push(&self, event: StructuralEvent) {
        self.queue.borrow_mut().push_back(event);
    }

    /// Remove and return all pending events, oldest first.
    pub fn drain(&self) -> Vec<StructuralEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }

    /// Number of events waiting to be drained.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Check if there are no pending events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    /// Drop all pending events without observing them.
    pub fn clear(&self) {
        self.queue.borrow_mut().clear();
    }
}

impl Default for EventSink {
    fn default() -> Self {
        Self::new()
    }
}
