//! Collider shape definitions

use crate::foundation::math::Vec2;

/// Model-space collision shape attached to entities
///
/// The solver matches exhaustively on shape pairs; adding a variant here
/// means extending [`super::narrow::test_collision`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    /// Circle centered on the collider's world center
    Circle {
        /// Circle radius
        radius: f32,
    },
    /// Axis-aligned box centered on the collider's world center
    Box {
        /// Half width (x) and half height (y)
        half_extents: Vec2,
    },
}

impl ColliderShape {
    /// Create a circle shape
    pub fn circle(radius: f32) -> Self {
        Self::Circle { radius }
    }

    /// Create an axis-aligned box shape from half width and half height
    pub fn rect(half_width: f32, half_height: f32) -> Self {
        Self::Box {
            half_extents: Vec2::new(half_width, half_height),
        }
    }

    /// Half-size of the shape's bounding box
    pub fn half_extents(&self) -> Vec2 {
        match self {
            Self::Circle { radius } => Vec2::new(*radius, *radius),
            Self::Box { half_extents } => *half_extents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_extents() {
        assert_eq!(
            ColliderShape::circle(3.0).half_extents(),
            Vec2::new(3.0, 3.0)
        );
        assert_eq!(
            ColliderShape::rect(4.0, 2.5).half_extents(),
            Vec2::new(4.0, 2.5)
        );
    }
}
