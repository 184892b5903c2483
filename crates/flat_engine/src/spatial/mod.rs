//! Spatial partitioning for broad-phase collision detection
//!
//! The broad phase cheaply proposes candidate pairs whose bounds share a
//! grid cell; the narrow phase confirms or refutes them exactly.

pub mod grid;

pub use grid::{GridError, SpatialGrid};
