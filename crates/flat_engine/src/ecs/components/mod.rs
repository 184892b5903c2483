//! Built-in component types

pub mod collision;
pub mod transform;

pub use collision::{ColliderComponent, CollisionStateComponent, StaticBodyComponent};
pub use transform::TransformComponent;
