//! Built-in ECS systems

pub mod collision_system;

pub use collision_system::EcsCollisionSystem;
