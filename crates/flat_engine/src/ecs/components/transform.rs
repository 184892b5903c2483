//! Transform component for the ECS system
//!
//! Pure data component; systems read and write it, it has no behavior of
//! its own beyond constructors.

use crate::ecs::Component;
use crate::foundation::math::Vec2;

/// ECS Transform component
///
/// World-space placement of an entity. Collision detection reads only
/// `position`; rotation and scale exist for rendering-adjacent systems and
/// never affect collision geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    /// World space position
    pub position: Vec2,

    /// Rotation in radians, counter-clockwise
    pub rotation: f32,

    /// Scale factors
    pub scale: Vec2,
}

impl Component for TransformComponent {}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl TransformComponent {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from position only
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder pattern: Set position
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    /// Builder pattern: Set rotation (radians)
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder pattern: Set uniform scale
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec2::new(scale, scale);
        self
    }
}
