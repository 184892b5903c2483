//! Collision geometry: shapes, contact data, and the narrow-phase solver
//!
//! # Module Organization
//!
//! - [`shape`] - The [`ColliderShape`] sum type attached to entities
//! - [`contact`] - The [`Contact`] result of a narrow-phase test
//! - [`narrow`] - Pure shape-vs-shape overlap tests
//!
//! Shapes are stored in model space; world-space centers are computed on
//! demand from entity position plus collider offset during tests.

pub mod contact;
pub mod narrow;
pub mod shape;

pub use contact::Contact;
pub use narrow::test_collision;
pub use shape::ColliderShape;
