//! Uniform-cell spatial grid
//!
//! Space is divided into fixed-size square cells; each entity is bucketed
//! into every cell its bounds overlap. A reverse membership map records the
//! cells touched per entity so removal never has to scan the bucket table.

use crate::ecs::Entity;
use crate::foundation::math::Aabb;
use crate::physics::collision_system::CollisionPair;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Spatial grid construction errors
#[derive(Debug, Error)]
pub enum GridError {
    /// Cell size was zero, negative, or NaN
    #[error("spatial grid cell size must be positive, got {0}")]
    InvalidCellSize(f32),
}

/// Uniform-cell broad-phase index over entity bounds
pub struct SpatialGrid {
    cell_size: f32,
    cells: HashMap<(i32, i32), Vec<Entity>>,
    memberships: HashMap<Entity, Vec<(i32, i32)>>,
}

impl SpatialGrid {
    /// Create a grid with the given cell size; fails fast for sizes `<= 0`
    pub fn new(cell_size: f32) -> Result<Self, GridError> {
        if !(cell_size > 0.0) {
            return Err(GridError::InvalidCellSize(cell_size));
        }
        Ok(Self {
            cell_size,
            cells: HashMap::new(),
            memberships: HashMap::new(),
        })
    }

    /// Cell size this grid was constructed with
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Inclusive cell-coordinate range spanned by `bounds`
    fn cell_range(&self, bounds: &Aabb) -> (i32, i32, i32, i32) {
        let min_x = (bounds.min.x / self.cell_size).floor() as i32;
        let min_y = (bounds.min.y / self.cell_size).floor() as i32;
        let max_x = (bounds.max.x / self.cell_size).floor() as i32;
        let max_y = (bounds.max.y / self.cell_size).floor() as i32;
        (min_x, min_y, max_x, max_y)
    }

    /// Insert an entity covering every cell its bounds overlap.
    ///
    /// Re-inserting an already present entity first clears its previous
    /// cell membership, so the grid always reflects the latest bounds.
    pub fn insert(&mut self, entity: Entity, bounds: &Aabb) {
        self.remove(entity);

        let (min_x, min_y, max_x, max_y) = self.cell_range(bounds);
        let mut touched =
            Vec::with_capacity(((max_x - min_x + 1) * (max_y - min_y + 1)) as usize);
        for cell_x in min_x..=max_x {
            for cell_y in min_y..=max_y {
                let key = (cell_x, cell_y);
                self.cells.entry(key).or_default().push(entity);
                touched.push(key);
            }
        }
        self.memberships.insert(entity, touched);
    }

    /// Remove an entity from every cell it was recorded in.
    ///
    /// Buckets left empty are dropped so long-running sessions don't
    /// accumulate dead cells.
    pub fn remove(&mut self, entity: Entity) {
        let Some(touched) = self.memberships.remove(&entity) else {
            return;
        };
        for key in touched {
            if let Some(bucket) = self.cells.get_mut(&key) {
                bucket.retain(|&id| id != entity);
                if bucket.is_empty() {
                    self.cells.remove(&key);
                }
            }
        }
    }

    /// Drop all buckets and membership records
    pub fn clear(&mut self) {
        self.cells.clear();
        self.memberships.clear();
    }

    /// All unordered pairs of entities sharing at least one cell.
    ///
    /// Pairs are canonical (smaller id first) and the result set dedups
    /// pairs that co-occur in several cells. Cost is quadratic in per-cell
    /// occupancy, which gameplay densities keep small.
    pub fn query_potential_pairs(&self) -> HashSet<CollisionPair> {
        let mut pairs = HashSet::new();
        for bucket in self.cells.values() {
            for i in 0..bucket.len() {
                for j in (i + 1)..bucket.len() {
                    pairs.insert(CollisionPair::new(bucket[i], bucket[j]));
                }
            }
        }
        pairs
    }

    /// Union of the buckets for every cell the query bounds touch
    pub fn query_nearby(&self, bounds: &Aabb) -> HashSet<Entity> {
        let mut nearby = HashSet::new();
        let (min_x, min_y, max_x, max_y) = self.cell_range(bounds);
        for cell_x in min_x..=max_x {
            for cell_y in min_y..=max_y {
                if let Some(bucket) = self.cells.get(&(cell_x, cell_y)) {
                    nearby.extend(bucket.iter().copied());
                }
            }
        }
        nearby
    }

    /// Number of entities currently indexed
    pub fn entity_count(&self) -> usize {
        self.memberships.len()
    }

    /// Whether the grid holds no entities
    pub fn is_empty(&self) -> bool {
        self.memberships.is_empty()
    }

    #[cfg(test)]
    fn bucket_count(&self) -> usize {
        self.cells.len()
    }
}
