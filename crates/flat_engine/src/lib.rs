//! # Flat Engine
//!
//! A modular 2D game engine core focused on real-time collision detection.
//!
//! ## Features
//!
//! - **Broad Phase**: Uniform spatial-grid index over entity bounds
//! - **Narrow Phase**: Exact circle/box overlap tests with contact data
//! - **Pair Lifecycle**: Enter/Stay/Exit collision events across ticks
//! - **ECS Architecture**: Minimal entity/component store with typed queries
//! - **Instance Configuration**: Per-system config, no process-wide toggles
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flat_engine::prelude::*;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let mut world = World::new();
//!     let player = world.create_entity();
//!     world.add_component(player, TransformComponent::from_position(Vec2::new(0.0, 0.0)));
//!     world.add_component(player, ColliderComponent::new(ColliderShape::circle(8.0)));
//!
//!     let mut collisions = EcsCollisionSystem::new(&CollisionConfig::default())?;
//!     collisions.update(&mut world);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod ecs;
pub mod events;
pub mod foundation;
pub mod physics;
pub mod spatial;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{CollisionConfig, Config, ConfigError},
        ecs::{
            components::{
                ColliderComponent, CollisionStateComponent, StaticBodyComponent,
                TransformComponent,
            },
            systems::EcsCollisionSystem,
            Component, Entity, System, World,
        },
        events::{CollisionEvent, CollisionEventDispatcher, CollisionEventHandler},
        foundation::math::{Aabb, Vec2},
        physics::{
            collision::{ColliderShape, Contact},
            CollisionLayers, CollisionPair, PhysicsCollisionSystem,
        },
        spatial::SpatialGrid,
    };
}
