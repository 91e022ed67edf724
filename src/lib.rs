//! A scene runtime built on a map-backed Entity Component System
//!
//! This crate provides:
//! - Entities as kind→value component maps with structural change events
//! - A scene-scoped context with group/view queries
//! - A priority-ordered per-frame system scheduler
//! - A scene owning entity lifecycle and the primary-camera cache
//! - Narrow trait contracts for the rendering and physics collaborators

pub mod core;
pub mod ecs;
pub mod physics;
pub mod renderer;
pub mod scene;

// Re-exports for convenience
pub use glam;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::core::Time;
    pub use crate::ecs::{
        BodyType, Camera, Component, ComponentKind, Context, EcsError, Entity, EntityId,
        EventSink, KindSet, Projection, RigidBody, Scheduler, Sprite, StructuralEvent, System,
        Transform,
    };
    pub use crate::physics::{BodyHandle, PhysicsBackend};
    pub use crate::renderer::RenderBackend;
    pub use crate::scene::{PrimaryCameraCache, Scene};
    pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
}
