//! Rendering collaborator contract
//!
//! Draw submission and GPU resources live outside this crate. The scene
//! supplies camera data from the primary-camera cache plus flat sprite
//! submissions; everything past that boundary is the backend's business.

use glam::Mat4;

use crate::ecs::{Camera, Sprite};

/// Contract the scene's render pass drives once per frame.
pub trait RenderBackend {
    /// Start a frame with the active camera and its world transform.
    fn begin_scene(&mut self, camera: &Camera, transform: Mat4);

    /// Submit one sprite with its world transform.
    fn submit_sprite(&mut self, transform: Mat4, sprite: &Sprite);

    /// Finish the frame.
    fn end_scene(&mut self);
}
