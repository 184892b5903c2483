//! Collision detection components for ECS
//!
//! `ColliderComponent` carries the configuration data for an entity's
//! collision behavior; `CollisionStateComponent` is the per-entity view of
//! the pair lifecycle, rewritten each tick by the collision system.

use crate::ecs::{Component, Entity};
use crate::foundation::math::{Aabb, Vec2};
use crate::physics::collision::ColliderShape;
use crate::physics::collision_layers::CollisionLayers;
use std::collections::HashSet;

/// Component that marks an entity as having collision detection enabled
#[derive(Debug, Clone, PartialEq)]
pub struct ColliderComponent {
    /// The collision shape (circle or axis-aligned box)
    pub shape: ColliderShape,

    /// Collision layer bitmask (what layer is this entity on?)
    pub layer: u32,

    /// Collision mask (what layers can this entity detect?)
    pub mask: u32,

    /// Is this a trigger volume (generates events but no physical response)?
    pub is_trigger: bool,

    /// Offset of the shape center from the entity position
    pub offset: Vec2,
}

impl Component for ColliderComponent {}

impl ColliderComponent {
    /// Create a new collider with default settings
    pub fn new(shape: ColliderShape) -> Self {
        Self {
            shape,
            layer: CollisionLayers::ALL,
            mask: CollisionLayers::ALL,
            is_trigger: false,
            offset: Vec2::zeros(),
        }
    }

    /// Create a collider with specific layer and mask
    pub fn with_layers(mut self, layer: u32, mask: u32) -> Self {
        self.layer = layer;
        self.mask = mask;
        self
    }

    /// Offset the shape center from the entity position
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Mark this as a trigger volume
    pub fn as_trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    /// World-space center of the shape for an entity at `position`
    pub fn world_center(&self, position: Vec2) -> Vec2 {
        position + self.offset
    }

    /// World-space bounding box of the shape for an entity at `position`
    pub fn world_bounds(&self, position: Vec2) -> Aabb {
        Aabb::from_center_extents(self.world_center(position), self.shape.half_extents())
    }
}

/// Marker component tagging an entity's collider as static level geometry
///
/// Static colliders are indexed once and persist across ticks until the
/// static grid is explicitly invalidated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StaticBodyComponent;

impl Component for StaticBodyComponent {}

/// Component that tracks the current collision state of an entity
///
/// Updated each tick by the collision system to reflect which entities are
/// currently overlapping this one, and which overlaps started or ended
/// this tick.
#[derive(Debug, Default, Clone)]
pub struct CollisionStateComponent {
    /// All entities we're currently colliding with
    pub colliding_with: HashSet<Entity>,

    /// Entities we started colliding with this tick
    pub collision_entered: Vec<Entity>,

    /// Entities we stopped colliding with this tick
    pub collision_exited: Vec<Entity>,
}

impl Component for CollisionStateComponent {}

impl CollisionStateComponent {
    /// Check if we're currently colliding with any entity
    pub fn is_colliding(&self) -> bool {
        !self.colliding_with.is_empty()
    }

    /// Check if we're currently colliding with a specific entity
    pub fn is_colliding_with(&self, entity: Entity) -> bool {
        self.colliding_with.contains(&entity)
    }

    /// Get the number of entities we're colliding with
    pub fn collision_count(&self) -> usize {
        self.colliding_with.len()
    }

    /// Check if we just started colliding with a specific entity this tick
    pub fn just_collided_with(&self, entity: Entity) -> bool {
        self.collision_entered.iter().any(|&e| e == entity)
    }

    /// Check if we just stopped colliding with a specific entity this tick
    pub fn just_stopped_colliding_with(&self, entity: Entity) -> bool {
        self.collision_exited.iter().any(|&e| e == entity)
    }

    /// Clear per-tick data (called by the collision system before updates)
    pub(crate) fn clear_frame_data(&mut self) {
        self.collision_entered.clear();
        self.collision_exited.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_bounds_circle() {
        let collider = ColliderComponent::new(ColliderShape::circle(5.0));
        let bounds = collider.world_bounds(Vec2::new(10.0, 20.0));
        assert_eq!(bounds.min, Vec2::new(5.0, 15.0));
        assert_eq!(bounds.max, Vec2::new(15.0, 25.0));
    }

    #[test]
    fn test_world_bounds_box_with_offset() {
        let collider = ColliderComponent::new(ColliderShape::rect(4.0, 2.0))
            .with_offset(Vec2::new(1.0, -1.0));
        let bounds = collider.world_bounds(Vec2::new(0.0, 0.0));
        assert_eq!(bounds.min, Vec2::new(-3.0, -3.0));
        assert_eq!(bounds.max, Vec2::new(5.0, 1.0));
        assert_eq!(collider.world_center(Vec2::zeros()), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_collision_state_helpers() {
        let mut world = crate::ecs::World::new();
        let other = world.create_entity();

        let mut state = CollisionStateComponent::default();
        assert!(!state.is_colliding());

        state.colliding_with.insert(other);
        state.collision_entered.push(other);
        assert!(state.is_colliding());
        assert!(state.is_colliding_with(other));
        assert!(state.just_collided_with(other));
        assert_eq!(state.collision_count(), 1);

        state.clear_frame_data();
        assert!(!state.just_collided_with(other));
        assert!(state.is_colliding_with(other));
    }
}
