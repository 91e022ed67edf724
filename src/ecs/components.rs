//! Standard component kinds
//!
//! Plain data only; behavior lives in systems and in the collaborating
//! backends. All kinds here carry serde derives so an external persistence
//! layer can consume them — except runtime-only state, which is skipped.

use std::any::Any;

use glam::{Mat4, Quat, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use super::component::Component;
use crate::impl_component;
use crate::physics::BodyHandle;

// ============================================================================
// Transform
// ============================================================================

/// Position, rotation, and scale in world space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position in world space
    pub position: Vec3,
    /// Rotation as a quaternion
    pub rotation: Quat,
    /// Scale factor
    pub scale: Vec3,
}

impl Transform {
    /// Create a transform at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transform with just a position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Replace the scale, builder style
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Get the world transformation matrix
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Translate by a delta
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Rotate by euler angles (in radians)
    pub fn rotate_euler(&mut self, euler: Vec3) {
        self.rotation =
            Quat::from_euler(glam::EulerRot::XYZ, euler.x, euler.y, euler.z) * self.rotation;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

// ============================================================================
// Camera
// ============================================================================

/// Projection parameters for a camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Projection {
    /// Perspective projection with a vertical field of view in radians
    Perspective { fov_y: f32, near: f32, far: f32 },
    /// Orthographic projection; `size` is the vertical extent of the view
    Orthographic { size: f32, near: f32, far: f32 },
}

/// Camera component
///
/// The entity whose camera is flagged `primary` drives rendering for the
/// frame. Flagging more than one is tolerated; the lowest entity id wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Projection parameters
    pub projection: Projection,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Whether this camera drives rendering
    pub primary: bool,
}

impl Camera {
    /// Create a perspective camera; not primary until flagged
    pub fn perspective(fov_y: f32, near: f32, far: f32) -> Self {
        Self {
            projection: Projection::Perspective { fov_y, near, far },
            ..Default::default()
        }
    }

    /// Create an orthographic camera; not primary until flagged
    pub fn orthographic(size: f32, near: f32, far: f32) -> Self {
        Self {
            projection: Projection::Orthographic { size, near, far },
            ..Default::default()
        }
    }

    /// Set the primary flag, builder style
    pub fn with_primary(mut self, primary: bool) -> Self {
        self.primary = primary;
        self
    }

    /// Update the aspect ratio from a viewport size
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection {
            Projection::Perspective { fov_y, near, far } => {
                Mat4::perspective_rh(fov_y, self.aspect, near, far)
            }
            Projection::Orthographic { size, near, far } => {
                let half_h = size * 0.5;
                let half_w = half_h * self.aspect;
                Mat4::orthographic_rh(-half_w, half_w, -half_h, half_h, near, far)
            }
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            projection: Projection::Perspective {
                fov_y: std::f32::consts::FRAC_PI_4,
                near: 0.1,
                far: 1000.0,
            },
            aspect: 16.0 / 9.0,
            primary: false,
        }
    }
}

// ============================================================================
// Sprite
// ============================================================================

/// Flat-colored quad for the 2D render path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    /// RGBA tint
    pub color: Vec4,
}

impl Sprite {
    /// Create a sprite with the given tint
    pub fn new(color: Vec4) -> Self {
        Self { color }
    }
}

impl Default for Sprite {
    fn default() -> Self {
        Self { color: Vec4::ONE }
    }
}

// ============================================================================
// RigidBody
// ============================================================================

/// How the physics collaborator simulates a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BodyType {
    /// Never moves
    #[default]
    Static,
    /// Moved by forces
    Dynamic,
    /// Moved by setting its pose directly
    Kinematic,
}

/// Physical body description plus the collaborator's live handle
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RigidBody {
    /// Simulation mode
    pub body_type: BodyType,
    /// Handle owned by the physics backend while a runtime session is
    /// active. Never dereferenced here; excluded from duplication and
    /// from serialization.
    #[serde(skip)]
    pub runtime_body: Option<BodyHandle>,
}

impl RigidBody {
    /// Create a body description with no live handle
    pub fn new(body_type: BodyType) -> Self {
        Self {
            body_type,
            runtime_body: None,
        }
    }
}

impl_component!(Transform, Camera, Sprite);

// RigidBody implements Component by hand: the live handle belongs to the
// original's simulation session and must not survive duplication.
impl Component for RigidBody {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn duplicate(&self) -> Box<dyn Component> {
        Box::new(Self {
            body_type: self.body_type,
            runtime_body: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_matrix_carries_translation() {
        let t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let m = t.matrix();
        assert_eq!(m.w_axis.truncate(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_transform_translate() {
        let mut t = Transform::new();
        t.translate(Vec3::X);
        t.translate(Vec3::X);
        assert_eq!(t.position, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_camera_viewport_updates_aspect() {
        let mut camera = Camera::perspective(1.0, 0.1, 100.0);
        camera.set_viewport(800, 400);
        assert_eq!(camera.aspect, 2.0);

        // a degenerate viewport must not divide by zero
        camera.set_viewport(800, 0);
        assert_eq!(camera.aspect, 800.0);
    }

    #[test]
    fn test_camera_projection_is_finite() {
        let perspective = Camera::perspective(1.0, 0.1, 100.0);
        let orthographic = Camera::orthographic(10.0, -1.0, 1.0);
        assert!(perspective.projection_matrix().is_finite());
        assert!(orthographic.projection_matrix().is_finite());
    }

    #[test]
    fn test_rigid_body_duplicate_drops_handle() {
        let mut body = RigidBody::new(BodyType::Kinematic);
        body.runtime_body = Some(BodyHandle(7));

        let copy = body.duplicate();
        let copy = copy.as_any().downcast_ref::<RigidBody>().unwrap();
        assert_eq!(copy.body_type, BodyType::Kinematic);
        assert_eq!(copy.runtime_body, None);
        // the original keeps its handle
        assert_eq!(body.runtime_body, Some(BodyHandle(7)));
    }
}
