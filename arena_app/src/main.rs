//! Headless arena demo
//!
//! Spawns a walled arena with drifting circles and boxes, ticks the
//! collision system, and logs the Enter/Stay/Exit events it emits. Run
//! with `RUST_LOG=info` (or `debug` for per-tick diagnostics).

use flat_engine::prelude::*;
use log::info;
use rand::Rng;

const ARENA_HALF: f32 = 400.0;
const TICKS: u32 = 600;
const DT: f32 = 1.0 / 60.0;
const MOVER_COUNT: usize = 12;

/// Logs every lifecycle event without consuming it.
struct EventLogger;

impl CollisionEventHandler for EventLogger {
    fn on_collision_event(&mut self, event: &CollisionEvent) -> bool {
        let (a, b) = event.entities();
        match event {
            CollisionEvent::Enter { contact_point, .. } => {
                info!("enter: {} <-> {} at ({:.1}, {:.1})", a.id(), b.id(), contact_point.x, contact_point.y);
            }
            CollisionEvent::Stay { .. } => {}
            CollisionEvent::Exit { .. } => {
                info!("exit:  {} <-> {}", a.id(), b.id());
            }
        }
        false
    }
}

fn spawn_walls(world: &mut World) {
    let specs = [
        // (center x, center y, half width, half height)
        (0.0, ARENA_HALF, ARENA_HALF, 10.0),
        (0.0, -ARENA_HALF, ARENA_HALF, 10.0),
        (ARENA_HALF, 0.0, 10.0, ARENA_HALF),
        (-ARENA_HALF, 0.0, 10.0, ARENA_HALF),
    ];
    for (x, y, half_w, half_h) in specs {
        let wall = world.create_entity();
        world.add_component(wall, TransformComponent::from_position(Vec2::new(x, y)));
        world.add_component(
            wall,
            ColliderComponent::new(ColliderShape::rect(half_w, half_h))
                .with_layers(CollisionLayers::ENVIRONMENT, CollisionLayers::ALL),
        );
        world.add_component(wall, StaticBodyComponent);
    }
}

fn spawn_movers(world: &mut World) -> Vec<(Entity, Vec2)> {
    let mut rng = rand::thread_rng();
    let mut movers = Vec::with_capacity(MOVER_COUNT);
    for i in 0..MOVER_COUNT {
        let entity = world.create_entity();
        let position = Vec2::new(
            rng.gen_range(-ARENA_HALF * 0.8..ARENA_HALF * 0.8),
            rng.gen_range(-ARENA_HALF * 0.8..ARENA_HALF * 0.8),
        );
        let velocity = Vec2::new(rng.gen_range(-120.0..120.0), rng.gen_range(-120.0..120.0));

        let shape = if i % 3 == 0 {
            ColliderShape::rect(rng.gen_range(8.0..20.0), rng.gen_range(8.0..20.0))
        } else {
            ColliderShape::circle(rng.gen_range(8.0..24.0))
        };

        world.add_component(entity, TransformComponent::from_position(position));
        world.add_component(entity, ColliderComponent::new(shape));
        world.add_component(entity, CollisionStateComponent::default());
        movers.push((entity, velocity));
    }
    movers
}

fn integrate(world: &mut World, movers: &mut [(Entity, Vec2)]) {
    for (entity, velocity) in movers.iter_mut() {
        let Some(transform) = world.get_component_mut::<TransformComponent>(*entity) else {
            continue;
        };
        transform.position += *velocity * DT;

        // Bounce off the arena interior so movers keep crossing paths.
        if transform.position.x.abs() > ARENA_HALF - 30.0 {
            velocity.x = -velocity.x;
        }
        if transform.position.y.abs() > ARENA_HALF - 30.0 {
            velocity.y = -velocity.y;
        }
    }
}

fn main() -> Result<(), ConfigError> {
    env_logger::init();

    let config = CollisionConfig {
        cell_size: 64.0,
        ..Default::default()
    };
    let mut world = World::new();
    let mut collisions = EcsCollisionSystem::new(&config)?;
    collisions.register_handler(Box::new(EventLogger));

    spawn_walls(&mut world);
    let mut movers = spawn_movers(&mut world);

    info!(
        "arena demo: {} entities, {} ticks at {:.0} Hz",
        world.entity_count(),
        TICKS,
        1.0 / DT
    );

    for _ in 0..TICKS {
        integrate(&mut world, &mut movers);
        collisions.update(&mut world);
    }

    let overlapping = collisions.collision_system().current_collisions().len();
    info!("done; {overlapping} pairs still overlapping");
    Ok(())
}
