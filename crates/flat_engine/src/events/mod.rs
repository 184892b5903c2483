//! Collision event system
//!
//! Key principles:
//! - Typed events (no stringly-keyed argument bags)
//! - Handler returns bool (true = consumed, stops forwarding)
//! - Queuing: producers enqueue during a tick, delivery happens at
//!   `dispatch`, never mid-pass

use crate::ecs::Entity;
use crate::foundation::math::Vec2;

/// A collision lifecycle event
///
/// `entity_a` always has the smaller id, and the normal points from A
/// toward B, so consumers can rely on a stable orientation per pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionEvent {
    /// The pair started overlapping this tick
    Enter {
        /// Entity with the smaller id
        entity_a: Entity,
        /// Entity with the larger id
        entity_b: Entity,
        /// Representative contact point in world space
        contact_point: Vec2,
        /// Unit contact normal, pointing from A toward B
        normal: Vec2,
    },
    /// The pair was already overlapping last tick and still is
    Stay {
        /// Entity with the smaller id
        entity_a: Entity,
        /// Entity with the larger id
        entity_b: Entity,
        /// Representative contact point in world space
        contact_point: Vec2,
        /// Unit contact normal, pointing from A toward B
        normal: Vec2,
    },
    /// The pair stopped overlapping this tick (both entities still alive)
    Exit {
        /// Entity with the smaller id
        entity_a: Entity,
        /// Entity with the larger id
        entity_b: Entity,
    },
}

impl CollisionEvent {
    /// The entity pair this event concerns, smaller id first
    pub fn entities(&self) -> (Entity, Entity) {
        match *self {
            Self::Enter { entity_a, entity_b, .. }
            | Self::Stay { entity_a, entity_b, .. }
            | Self::Exit { entity_a, entity_b } => (entity_a, entity_b),
        }
    }

    /// Whether this event involves the given entity
    pub fn involves(&self, entity: Entity) -> bool {
        let (a, b) = self.entities();
        a == entity || b == entity
    }

    /// True for [`CollisionEvent::Enter`]
    pub fn is_enter(&self) -> bool {
        matches!(self, Self::Enter { .. })
    }

    /// True for [`CollisionEvent::Stay`]
    pub fn is_stay(&self) -> bool {
        matches!(self, Self::Stay { .. })
    }

    /// True for [`CollisionEvent::Exit`]
    pub fn is_exit(&self) -> bool {
        matches!(self, Self::Exit { .. })
    }
}

/// Event handler trait
///
/// Returns true if the event was consumed, which stops forwarding to
/// handlers registered after this one.
pub trait CollisionEventHandler {
    /// Handle an event, return true if consumed
    fn on_collision_event(&mut self, event: &CollisionEvent) -> bool;
}

/// Collision event dispatcher with registration and queuing
///
/// Follows the chain-of-responsibility pattern: handlers are notified in
/// registration order until one consumes the event.
pub struct CollisionEventDispatcher {
    queue: Vec<CollisionEvent>,
    handlers: Vec<Box<dyn CollisionEventHandler>>,
}

impl CollisionEventDispatcher {
    /// Create a new empty dispatcher
    pub fn new() -> Self {
        Self {
            queue: Vec::new(),
            handlers: Vec::new(),
        }
    }

    /// Register a handler; handlers run in registration order
    pub fn register_handler(&mut self, handler: Box<dyn CollisionEventHandler>) {
        self.handlers.push(handler);
    }

    /// Queue a single event for the next dispatch
    pub fn send(&mut self, event: CollisionEvent) {
        self.queue.push(event);
    }

    /// Queue a batch of events for the next dispatch
    pub fn send_all(&mut self, events: &[CollisionEvent]) {
        self.queue.extend_from_slice(events);
    }

    /// Number of queued, undelivered events
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Deliver all queued events in order
    pub fn dispatch(&mut self) {
        let queued = std::mem::take(&mut self.queue);
        for event in queued {
            for handler in &mut self.handlers {
                if handler.on_collision_event(&event) {
                    break;
                }
            }
        }
    }

    /// Drop all queued events without delivering them
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

impl Default for CollisionEventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingHandler {
        seen: Arc<AtomicUsize>,
        consume: bool,
    }

    impl CollisionEventHandler for CountingHandler {
        fn on_collision_event(&mut self, _event: &CollisionEvent) -> bool {
            self.seen.fetch_add(1, Ordering::SeqCst);
            self.consume
        }
    }

    fn test_event() -> CollisionEvent {
        let mut world = crate::ecs::World::new();
        let a = world.create_entity();
        let b = world.create_entity();
        CollisionEvent::Exit {
            entity_a: a,
            entity_b: b,
        }
    }

    #[test]
    fn test_dispatch_delivers_queued_events() {
        let seen = Arc::new(AtomicUsize::new(0));
        let mut dispatcher = CollisionEventDispatcher::new();
        dispatcher.register_handler(Box::new(CountingHandler {
            seen: Arc::clone(&seen),
            consume: false,
        }));

        dispatcher.send(test_event());
        dispatcher.send(test_event());
        assert_eq!(dispatcher.pending(), 2);

        dispatcher.dispatch();
        assert_eq!(seen.load(Ordering::SeqCst), 2);
        assert_eq!(dispatcher.pending(), 0);
    }

    #[test]
    fn test_consumed_events_stop_forwarding() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let mut dispatcher = CollisionEventDispatcher::new();
        dispatcher.register_handler(Box::new(CountingHandler {
            seen: Arc::clone(&first),
            consume: true,
        }));
        dispatcher.register_handler(Box::new(CountingHandler {
            seen: Arc::clone(&second),
            consume: false,
        }));

        dispatcher.send(test_event());
        dispatcher.dispatch();

        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_clear_discards_pending() {
        let seen = Arc::new(AtomicUsize::new(0));
        let mut dispatcher = CollisionEventDispatcher::new();
        dispatcher.register_handler(Box::new(CountingHandler {
            seen: Arc::clone(&seen),
            consume: false,
        }));

        dispatcher.send(test_event());
        dispatcher.clear();
        dispatcher.dispatch();
        assert_eq!(seen.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_event_accessors() {
        let event = test_event();
        let (a, b) = event.entities();
        assert!(a.id() < b.id());
        assert!(event.involves(a));
        assert!(event.is_exit());
        assert!(!event.is_enter());
    }
}
