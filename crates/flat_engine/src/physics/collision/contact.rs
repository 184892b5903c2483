//! Narrow-phase contact data

use crate::foundation::math::Vec2;

/// Result of a narrow-phase overlap test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Whether the two shapes overlap
    pub colliding: bool,

    /// Representative contact point in world space
    pub point: Vec2,

    /// Unit contact normal; orientation per shape pair is documented on
    /// the individual solver functions
    pub normal: Vec2,

    /// Separation distance along the normal, `>= 0` when colliding
    pub penetration: f32,
}

impl Contact {
    /// The non-colliding result
    pub fn none() -> Self {
        Self {
            colliding: false,
            point: Vec2::zeros(),
            normal: Vec2::zeros(),
            penetration: 0.0,
        }
    }

    /// A colliding result with the given contact data
    pub fn new(point: Vec2, normal: Vec2, penetration: f32) -> Self {
        Self {
            colliding: true,
            point,
            normal,
            penetration,
        }
    }
}
