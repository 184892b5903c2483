//! Core collision detection system
//!
//! Runs the full detection pass for one simulation tick: rebuild the
//! broad-phase grids, gather candidate pairs, confirm them in the narrow
//! phase, and classify each confirmed pair against the previous tick to
//! produce Enter/Stay/Exit events.
//!
//! The system never calls back into gameplay logic mid-pass; events are
//! buffered and handed to the caller after the pass completes.

use crate::config::{CollisionConfig, ConfigError};
use crate::ecs::components::{ColliderComponent, StaticBodyComponent, TransformComponent};
use crate::ecs::{Entity, World};
use crate::events::CollisionEvent;
use crate::physics::collision::narrow;
use crate::spatial::SpatialGrid;
use log::debug;
use std::collections::HashSet;

/// Collision pair representing two entities whose shapes overlap
///
/// Always canonical: `entity_a` has the smaller id, so the same two
/// entities hash to the same pair regardless of discovery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollisionPair {
    /// Entity with the smaller id
    pub entity_a: Entity,
    /// Entity with the larger id
    pub entity_b: Entity,
}

impl CollisionPair {
    /// Create a new collision pair (always stores the smaller entity id first)
    pub fn new(entity_a: Entity, entity_b: Entity) -> Self {
        debug_assert_ne!(entity_a, entity_b, "self-pair is never a valid collision");
        if entity_a.id() < entity_b.id() {
            Self { entity_a, entity_b }
        } else {
            Self {
                entity_a: entity_b,
                entity_b: entity_a,
            }
        }
    }
}

/// Core collision detection system
///
/// Owns two broad-phase grids: the dynamic grid is rebuilt from scratch
/// every tick, the static grid only when level geometry has been marked
/// dirty. Confirmed pairs are double-buffered across ticks to classify the
/// Enter/Stay/Exit lifecycle without reallocating.
pub struct PhysicsCollisionSystem {
    dynamic_grid: SpatialGrid,
    static_grid: SpatialGrid,
    static_dirty: bool,

    /// Pairs that passed the narrow phase this tick
    current_pairs: HashSet<CollisionPair>,

    /// Pairs that passed the narrow phase last tick
    previous_pairs: HashSet<CollisionPair>,

    /// Events produced by the most recent pass
    events: Vec<CollisionEvent>,

    debug_logging: bool,
}

impl PhysicsCollisionSystem {
    /// Create a collision system from a validated config.
    ///
    /// Fails fast on a non-positive grid cell size; there is no silent
    /// fallback value.
    pub fn new(config: &CollisionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let dynamic_grid = SpatialGrid::new(config.cell_size)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        let static_grid = SpatialGrid::new(config.static_cell_size.unwrap_or(config.cell_size))
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        Ok(Self {
            dynamic_grid,
            static_grid,
            static_dirty: true,
            current_pairs: HashSet::new(),
            previous_pairs: HashSet::new(),
            events: Vec::new(),
            debug_logging: config.debug_logging,
        })
    }

    /// Run the full detection pass for one tick.
    ///
    /// Returns the events produced this tick, ordered by canonical pair
    /// (Enters/Stays first, then Exits) so replays are deterministic.
    pub fn update(&mut self, world: &World) -> &[CollisionEvent] {
        if self.static_dirty {
            self.rebuild_static_grid(world);
            self.static_dirty = false;
        }
        self.rebuild_dynamic_grid(world);

        std::mem::swap(&mut self.current_pairs, &mut self.previous_pairs);
        self.current_pairs.clear();
        self.events.clear();

        let candidates = self.gather_candidates(world);
        for pair in &candidates {
            // The pair may reference entities destroyed earlier this tick
            // by another system; drop those candidates here.
            if !world.is_alive(pair.entity_a) || !world.is_alive(pair.entity_b) {
                continue;
            }
            let Some((transform_a, collider_a)) = Self::collision_data(world, pair.entity_a)
            else {
                continue;
            };
            let Some((transform_b, collider_b)) = Self::collision_data(world, pair.entity_b)
            else {
                continue;
            };

            // entity_a has the smaller id, so the contact normal already
            // matches the A-toward-B event convention.
            let contact = narrow::test_collision(
                collider_a,
                transform_a.position,
                collider_b,
                transform_b.position,
            );
            if !contact.colliding {
                continue;
            }

            self.current_pairs.insert(*pair);
            let event = if self.previous_pairs.contains(pair) {
                CollisionEvent::Stay {
                    entity_a: pair.entity_a,
                    entity_b: pair.entity_b,
                    contact_point: contact.point,
                    normal: contact.normal,
                }
            } else {
                CollisionEvent::Enter {
                    entity_a: pair.entity_a,
                    entity_b: pair.entity_b,
                    contact_point: contact.point,
                    normal: contact.normal,
                }
            };
            self.events.push(event);
        }

        // Pairs that were overlapping last tick and no longer are. An
        // entity destroyed while overlapping suppresses the Exit rather
        // than firing one for a corpse.
        let mut exited: Vec<CollisionPair> = self
            .previous_pairs
            .difference(&self.current_pairs)
            .copied()
            .collect();
        exited.sort_unstable();
        for pair in exited {
            if world.is_alive(pair.entity_a) && world.is_alive(pair.entity_b) {
                self.events.push(CollisionEvent::Exit {
                    entity_a: pair.entity_a,
                    entity_b: pair.entity_b,
                });
            }
        }

        if self.debug_logging {
            debug!(
                "collision tick: {} candidates, {} overlapping, {} events",
                candidates.len(),
                self.current_pairs.len(),
                self.events.len()
            );
        }

        &self.events
    }

    /// Force a static grid rebuild on the next tick (e.g. after level
    /// geometry spawned or despawned)
    pub fn mark_static_dirty(&mut self) {
        self.static_dirty = true;
    }

    /// Whether the static grid will be rebuilt next tick
    pub fn is_static_dirty(&self) -> bool {
        self.static_dirty
    }

    /// All pairs overlapping as of the most recent tick
    pub fn current_collisions(&self) -> &HashSet<CollisionPair> {
        &self.current_pairs
    }

    /// Events produced by the most recent tick
    pub fn events(&self) -> &[CollisionEvent] {
        &self.events
    }

    /// Reset all detection state: grids, pair buffers, pending events.
    ///
    /// The static grid is re-marked dirty so the next tick re-indexes
    /// whatever geometry the world then contains.
    pub fn clear(&mut self) {
        self.dynamic_grid.clear();
        self.static_grid.clear();
        self.current_pairs.clear();
        self.previous_pairs.clear();
        self.events.clear();
        self.static_dirty = true;
    }

    fn collision_data(
        world: &World,
        entity: Entity,
    ) -> Option<(&TransformComponent, &ColliderComponent)> {
        let transform = world.get_component::<TransformComponent>(entity)?;
        let collider = world.get_component::<ColliderComponent>(entity)?;
        Some((transform, collider))
    }

    fn rebuild_static_grid(&mut self, world: &World) {
        self.static_grid.clear();
        for (entity, collider) in world.query::<ColliderComponent>() {
            if !world.has_component::<StaticBodyComponent>(entity) {
                continue;
            }
            let Some(transform) = world.get_component::<TransformComponent>(entity) else {
                continue;
            };
            self.static_grid
                .insert(entity, &collider.world_bounds(transform.position));
        }
        if self.debug_logging {
            debug!(
                "static grid rebuilt with {} colliders",
                self.static_grid.entity_count()
            );
        }
    }

    fn rebuild_dynamic_grid(&mut self, world: &World) {
        self.dynamic_grid.clear();
        for (entity, collider) in world.query::<ColliderComponent>() {
            if world.has_component::<StaticBodyComponent>(entity) {
                continue;
            }
            let Some(transform) = world.get_component::<TransformComponent>(entity) else {
                continue;
            };
            self.dynamic_grid
                .insert(entity, &collider.world_bounds(transform.position));
        }
    }

    /// Candidate pairs for this tick: dynamic-vs-dynamic pairs straight
    /// from the dynamic grid, plus dynamic-vs-static pairs found by probing
    /// the static grid with each dynamic collider's bounds. Sorted so the
    /// narrow phase and event emission run in a deterministic order.
    fn gather_candidates(&self, world: &World) -> Vec<CollisionPair> {
        let mut candidates = self.dynamic_grid.query_potential_pairs();

        for (entity, collider) in world.query::<ColliderComponent>() {
            if world.has_component::<StaticBodyComponent>(entity) {
                continue;
            }
            let Some(transform) = world.get_component::<TransformComponent>(entity) else {
                continue;
            };
            let bounds = collider.world_bounds(transform.position);
            for other in self.static_grid.query_nearby(&bounds) {
                if other != entity {
                    candidates.insert(CollisionPair::new(entity, other));
                }
            }
        }

        let mut candidates: Vec<CollisionPair> = candidates.into_iter().collect();
        candidates.sort_unstable();
        candidates
    }
}
