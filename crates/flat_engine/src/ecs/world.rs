//! ECS World implementation

use super::{Component, Entity};
use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};

/// Type-erased view over one component type's storage, so the world can
/// drop every component of a destroyed entity without knowing the types.
trait AnyStorage: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn remove_entity(&mut self, entity: Entity);
}

struct ComponentStorage<T: Component> {
    components: HashMap<Entity, T>,
}

impl<T: Component> ComponentStorage<T> {
    fn new() -> Self {
        Self {
            components: HashMap::new(),
        }
    }
}

impl<T: Component> AnyStorage for ComponentStorage<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn remove_entity(&mut self, entity: Entity) {
        self.components.remove(&entity);
    }
}

/// ECS World containing all entities and components
pub struct World {
    next_entity_id: u32,
    alive: HashSet<Entity>,
    storages: HashMap<TypeId, Box<dyn AnyStorage>>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self {
            next_entity_id: 0,
            alive: HashSet::new(),
            storages: HashMap::new(),
        }
    }

    /// Create a new entity
    pub fn create_entity(&mut self) -> Entity {
        let entity = Entity::new(self.next_entity_id);
        self.next_entity_id += 1;
        self.alive.insert(entity);
        entity
    }

    /// Destroy an entity, dropping all of its components
    pub fn destroy_entity(&mut self, entity: Entity) {
        if self.alive.remove(&entity) {
            for storage in self.storages.values_mut() {
                storage.remove_entity(entity);
            }
        }
    }

    /// Check whether an entity has been created and not yet destroyed
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.alive.contains(&entity)
    }

    /// Add a component to a live entity (no-op for destroyed entities)
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) {
        if !self.alive.contains(&entity) {
            return;
        }
        let storage = self
            .storages
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(ComponentStorage::<T>::new()));
        if let Some(storage) = storage.as_any_mut().downcast_mut::<ComponentStorage<T>>() {
            storage.components.insert(entity, component);
        }
    }

    /// Remove a component from an entity, returning it if present
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.storage_mut::<T>()?.components.remove(&entity)
    }

    /// Get a component from an entity
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.storage::<T>()?.components.get(&entity)
    }

    /// Get a mutable component from an entity
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.storage_mut::<T>()?.components.get_mut(&entity)
    }

    /// Check whether an entity carries a component of type `T`
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.get_component::<T>(entity).is_some()
    }

    /// Get all entities with a component of type `T`, ordered by entity id
    pub fn query<T: Component>(&self) -> Vec<(Entity, &T)> {
        let mut results: Vec<(Entity, &T)> = match self.storage::<T>() {
            Some(storage) => storage.components.iter().map(|(&e, c)| (e, c)).collect(),
            None => Vec::new(),
        };
        results.sort_by_key(|(entity, _)| entity.id());
        results
    }

    /// Get all entities with a component of type `T` mutably, ordered by entity id
    pub fn query_mut<T: Component>(&mut self) -> Vec<(Entity, &mut T)> {
        let mut results: Vec<(Entity, &mut T)> = match self.storage_mut::<T>() {
            Some(storage) => storage
                .components
                .iter_mut()
                .map(|(&e, c)| (e, c))
                .collect(),
            None => Vec::new(),
        };
        results.sort_by_key(|(entity, _)| entity.id());
        results
    }

    /// Get all live entities, ordered by id
    pub fn entities(&self) -> Vec<Entity> {
        let mut entities: Vec<Entity> = self.alive.iter().copied().collect();
        entities.sort();
        entities
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.alive.len()
    }

    /// Destroy all entities and components; entity ids are still not reused
    pub fn clear(&mut self) {
        self.alive.clear();
        self.storages.clear();
    }

    fn storage<T: Component>(&self) -> Option<&ComponentStorage<T>> {
        self.storages
            .get(&TypeId::of::<T>())
            .and_then(|s| s.as_any().downcast_ref())
    }

    fn storage_mut<T: Component>(&mut self) -> Option<&mut ComponentStorage<T>> {
        self.storages
            .get_mut(&TypeId::of::<T>())
            .and_then(|s| s.as_any_mut().downcast_mut())
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::TransformComponent;
    use crate::foundation::math::Vec2;

    #[test]
    fn test_create_and_destroy() {
        let mut world = World::new();
        let entity = world.create_entity();
        assert!(world.is_alive(entity));
        assert_eq!(world.entity_count(), 1);

        world.destroy_entity(entity);
        assert!(!world.is_alive(entity));
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn test_entity_ids_are_never_reused() {
        let mut world = World::new();
        let first = world.create_entity();
        world.destroy_entity(first);
        let second = world.create_entity();
        assert_ne!(first.id(), second.id());

        world.clear();
        let third = world.create_entity();
        assert_ne!(second.id(), third.id());
    }

    #[test]
    fn test_component_round_trip() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.add_component(entity, TransformComponent::from_position(Vec2::new(3.0, 4.0)));

        let transform = world.get_component::<TransformComponent>(entity).unwrap();
        assert_eq!(transform.position, Vec2::new(3.0, 4.0));

        world
            .get_component_mut::<TransformComponent>(entity)
            .unwrap()
            .position = Vec2::new(5.0, 6.0);
        let transform = world.get_component::<TransformComponent>(entity).unwrap();
        assert_eq!(transform.position, Vec2::new(5.0, 6.0));
    }

    #[test]
    fn test_destroy_drops_components() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.add_component(entity, TransformComponent::default());
        world.destroy_entity(entity);
        assert!(world.get_component::<TransformComponent>(entity).is_none());
    }

    #[test]
    fn test_add_component_to_dead_entity_is_ignored() {
        let mut world = World::new();
        let entity = world.create_entity();
        world.destroy_entity(entity);
        world.add_component(entity, TransformComponent::default());
        assert!(world.get_component::<TransformComponent>(entity).is_none());
    }

    #[test]
    fn test_query_is_ordered_by_id() {
        let mut world = World::new();
        let a = world.create_entity();
        let b = world.create_entity();
        let c = world.create_entity();
        world.add_component(c, TransformComponent::default());
        world.add_component(a, TransformComponent::default());
        world.add_component(b, TransformComponent::default());

        let ids: Vec<u32> = world
            .query::<TransformComponent>()
            .into_iter()
            .map(|(entity, _)| entity.id())
            .collect();
        assert_eq!(ids, vec![a.id(), b.id(), c.id()]);
    }
}
