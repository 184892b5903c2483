//! Collision layer system for filtering collision detection
//!
//! Each collider declares what it *is* (`layer`) and what it can *detect*
//! (`mask`), both as 32-bit bitmasks.

/// Collision layer definitions and filtering predicates
pub struct CollisionLayers;

impl CollisionLayers {
    /// No collision layer
    pub const NONE: u32 = 0;

    /// All collision layers
    pub const ALL: u32 = 0xFFFF_FFFF;

    /// Player character layer
    pub const PLAYER: u32 = 1 << 0;

    /// Enemy character layer
    pub const ENEMY: u32 = 1 << 1;

    /// Projectiles (bullets, missiles, etc.)
    pub const PROJECTILE: u32 = 1 << 2;

    /// Static environment geometry
    pub const ENVIRONMENT: u32 = 1 << 3;

    /// Trigger volumes (no physical response)
    pub const TRIGGER: u32 = 1 << 4;

    /// Debris and small physics objects
    pub const DEBRIS: u32 = 1 << 5;

    /// Pickups and collectibles
    pub const PICKUP: u32 = 1 << 6;

    /// Check if two colliders can detect each other.
    ///
    /// Detection is one-sided: the pair tests positive when *either*
    /// collider's mask matches the other's layer. A projectile that watches
    /// for enemies will report hits even against enemies whose own mask
    /// ignores projectiles.
    pub fn can_collide(layer_a: u32, mask_a: u32, layer_b: u32, mask_b: u32) -> bool {
        (layer_a & mask_b) != 0 || (layer_b & mask_a) != 0
    }

    /// Helper to build a mask from multiple layers
    pub fn mask(layers: &[u32]) -> u32 {
        layers.iter().fold(0, |acc, &layer| acc | layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutual_interest_collides() {
        assert!(CollisionLayers::can_collide(
            CollisionLayers::PLAYER,
            CollisionLayers::ENEMY,
            CollisionLayers::ENEMY,
            CollisionLayers::PLAYER,
        ));
    }

    #[test]
    fn test_one_way_interest_is_enough() {
        // Enemy ignores projectiles, but the projectile watches enemies.
        assert!(CollisionLayers::can_collide(
            CollisionLayers::PROJECTILE,
            CollisionLayers::ENEMY,
            CollisionLayers::ENEMY,
            CollisionLayers::NONE,
        ));
        // Symmetric call order must agree.
        assert!(CollisionLayers::can_collide(
            CollisionLayers::ENEMY,
            CollisionLayers::NONE,
            CollisionLayers::PROJECTILE,
            CollisionLayers::ENEMY,
        ));
    }

    #[test]
    fn test_no_interest_never_collides() {
        assert!(!CollisionLayers::can_collide(
            CollisionLayers::PLAYER,
            CollisionLayers::ENVIRONMENT,
            CollisionLayers::PICKUP,
            CollisionLayers::DEBRIS,
        ));
    }

    #[test]
    fn test_mask_creation() {
        let mask = CollisionLayers::mask(&[
            CollisionLayers::PLAYER,
            CollisionLayers::ENEMY,
            CollisionLayers::ENVIRONMENT,
        ]);

        assert_eq!(
            mask,
            CollisionLayers::PLAYER | CollisionLayers::ENEMY | CollisionLayers::ENVIRONMENT
        );
    }
}
