//! Entity Component System module
//!
//! Map-backed storage: each entity owns a kind→value map, the context owns
//! the live set, and queries are linear scans over it. Structural changes
//! flow through a shared event queue so derived state never polls.

mod component;
mod components;
mod context;
mod entity;
mod error;
mod events;
mod system;

pub use component::{Component, ComponentKind, KindSet};
pub use components::{BodyType, Camera, Projection, RigidBody, Sprite, Transform};
pub use context::Context;
pub use entity::{Entity, EntityId};
pub use error::EcsError;
pub use events::{EventSink, StructuralEvent};
pub use system::{Scheduler, System};
