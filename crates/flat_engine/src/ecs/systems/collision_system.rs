//! ECS collision system wrapper
//!
//! Wraps the core [`PhysicsCollisionSystem`] for worlds that use the
//! built-in component store: runs the detection pass, mirrors the results
//! into every [`CollisionStateComponent`], and forwards the tick's events
//! to a dispatcher once the pass has completed.

use crate::config::{CollisionConfig, ConfigError};
use crate::ecs::components::CollisionStateComponent;
use crate::ecs::{System, World};
use crate::events::{CollisionEvent, CollisionEventDispatcher, CollisionEventHandler};
use crate::physics::PhysicsCollisionSystem;

/// ECS-aware collision system
pub struct EcsCollisionSystem {
    collision_system: PhysicsCollisionSystem,
    dispatcher: CollisionEventDispatcher,
}

impl EcsCollisionSystem {
    /// Create a new ECS collision system from a validated config
    pub fn new(config: &CollisionConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            collision_system: PhysicsCollisionSystem::new(config)?,
            dispatcher: CollisionEventDispatcher::new(),
        })
    }

    /// Register an event handler with the internal dispatcher
    pub fn register_handler(&mut self, handler: Box<dyn CollisionEventHandler>) {
        self.dispatcher.register_handler(handler);
    }

    /// Force a static grid rebuild on the next tick
    pub fn mark_static_dirty(&mut self) {
        self.collision_system.mark_static_dirty();
    }

    /// Reset all detection state and drop undelivered events
    pub fn clear(&mut self) {
        self.collision_system.clear();
        self.dispatcher.clear();
    }

    /// Main update function: detect collisions, update state components,
    /// then deliver events
    pub fn update(&mut self, world: &mut World) {
        let events = self.collision_system.update(world).to_vec();
        Self::update_collision_states(world, &events);
        self.dispatcher.send_all(&events);
        self.dispatcher.dispatch();
    }

    /// Get reference to the underlying collision system
    pub fn collision_system(&self) -> &PhysicsCollisionSystem {
        &self.collision_system
    }

    /// Get mutable reference to the underlying collision system
    pub fn collision_system_mut(&mut self) -> &mut PhysicsCollisionSystem {
        &mut self.collision_system
    }

    /// Apply the tick's events to every entity that tracks collision state
    fn update_collision_states(world: &mut World, events: &[CollisionEvent]) {
        for (_, state) in world.query_mut::<CollisionStateComponent>() {
            state.clear_frame_data();
        }

        for event in events {
            let (entity_a, entity_b) = event.entities();
            match event {
                CollisionEvent::Enter { .. } => {
                    if let Some(state) = world.get_component_mut::<CollisionStateComponent>(entity_a)
                    {
                        state.colliding_with.insert(entity_b);
                        state.collision_entered.push(entity_b);
                    }
                    if let Some(state) = world.get_component_mut::<CollisionStateComponent>(entity_b)
                    {
                        state.colliding_with.insert(entity_a);
                        state.collision_entered.push(entity_a);
                    }
                }
                CollisionEvent::Stay { .. } => {
                    // State components added mid-overlap still converge.
                    if let Some(state) = world.get_component_mut::<CollisionStateComponent>(entity_a)
                    {
                        state.colliding_with.insert(entity_b);
                    }
                    if let Some(state) = world.get_component_mut::<CollisionStateComponent>(entity_b)
                    {
                        state.colliding_with.insert(entity_a);
                    }
                }
                CollisionEvent::Exit { .. } => {
                    if let Some(state) = world.get_component_mut::<CollisionStateComponent>(entity_a)
                    {
                        state.colliding_with.remove(&entity_b);
                        state.collision_exited.push(entity_b);
                    }
                    if let Some(state) = world.get_component_mut::<CollisionStateComponent>(entity_b)
                    {
                        state.colliding_with.remove(&entity_a);
                        state.collision_exited.push(entity_a);
                    }
                }
            }
        }
    }
}

impl System for EcsCollisionSystem {
    fn run(&mut self, world: &mut World) {
        self.update(world);
    }
}
