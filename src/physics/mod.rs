//! Physics collaborator contract
//!
//! The simulation itself lives outside this crate. The scene stores the
//! backend's opaque body handle on each `RigidBody` component while a
//! runtime session is active, clears it when the session stops, and never
//! dereferences it.

use glam::{Quat, Vec3};

use crate::ecs::{RigidBody, Transform};

/// Opaque handle to a body owned by the physics backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub u64);

/// Contract the scene drives at runtime start/stop and once per frame.
pub trait PhysicsBackend {
    /// Create a simulated body for an entity. Called once per rigid-body
    /// entity at runtime start.
    fn create_body(&mut self, transform: &Transform, body: &RigidBody) -> BodyHandle;

    /// Tear down a body created earlier. Called at runtime stop.
    fn destroy_body(&mut self, handle: BodyHandle);

    /// Advance the simulation.
    fn step(&mut self, dt: f32);

    /// Current pose of a simulated body, if it still exists.
    fn body_transform(&self, handle: BodyHandle) -> Option<(Vec3, Quat)>;
}
