//! Physics module: collider model, narrow-phase solver, and the per-tick
//! collision detection system.
//!
//! Detection is split into two phases: a broad phase over the uniform
//! spatial grids in [`crate::spatial`], and the narrow-phase shape tests in
//! [`collision::narrow`]. [`PhysicsCollisionSystem`] orchestrates both and
//! classifies the results into Enter/Stay/Exit events.

pub mod collision;
pub mod collision_layers;
pub mod collision_system;

pub use collision::{ColliderShape, Contact};
pub use collision_layers::CollisionLayers;
pub use collision_system::{CollisionPair, PhysicsCollisionSystem};
