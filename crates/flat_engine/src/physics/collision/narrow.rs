//! Narrow-phase overlap tests
//!
//! Pure functions with no side effects: each test takes world-space shape
//! data and returns a [`Contact`]. Distances are compared squared until a
//! real distance is needed for the normal.

use super::contact::Contact;
use super::shape::ColliderShape;
use crate::ecs::components::ColliderComponent;
use crate::foundation::math::Vec2;
use crate::physics::collision_layers::CollisionLayers;

/// Below this center distance two shapes are treated as coincident and the
/// normal falls back to +X instead of normalizing a near-zero vector.
const CENTER_EPSILON: f32 = 1e-6;

/// Test two colliders for overlap.
///
/// Layer/mask filtering is applied first; a filtered pair returns the
/// non-colliding contact without running any geometry. The contact normal
/// points from `a` toward `b` for circle-circle and box-box; for the mixed
/// pairs it is the circle's push-out direction (see [`circle_box`]).
pub fn test_collision(
    a: &ColliderComponent,
    pos_a: Vec2,
    b: &ColliderComponent,
    pos_b: Vec2,
) -> Contact {
    if !CollisionLayers::can_collide(a.layer, a.mask, b.layer, b.mask) {
        return Contact::none();
    }

    let center_a = a.world_center(pos_a);
    let center_b = b.world_center(pos_b);

    match (&a.shape, &b.shape) {
        (ColliderShape::Circle { radius: ra }, ColliderShape::Circle { radius: rb }) => {
            circle_circle(center_a, *ra, center_b, *rb)
        }
        (ColliderShape::Circle { radius }, ColliderShape::Box { half_extents }) => {
            circle_box(center_a, *radius, center_b, *half_extents)
        }
        (ColliderShape::Box { half_extents }, ColliderShape::Circle { radius }) => {
            let mut contact = circle_box(center_b, *radius, center_a, *half_extents);
            if contact.colliding {
                contact.normal = -contact.normal;
            }
            contact
        }
        (
            ColliderShape::Box { half_extents: ha },
            ColliderShape::Box { half_extents: hb },
        ) => box_box(center_a, *ha, center_b, *hb),
    }
}

/// Circle-vs-circle overlap test.
///
/// Boundaries are inclusive: circles touching at exactly the sum of radii
/// collide with zero penetration. The normal points from `a` toward `b`;
/// coincident centers fall back to +X with full penetration.
pub fn circle_circle(center_a: Vec2, radius_a: f32, center_b: Vec2, radius_b: f32) -> Contact {
    let delta = center_b - center_a;
    let distance_squared = delta.magnitude_squared();
    let radius_sum = radius_a + radius_b;

    if distance_squared > radius_sum * radius_sum {
        return Contact::none();
    }

    if distance_squared < CENTER_EPSILON * CENTER_EPSILON {
        let normal = Vec2::new(1.0, 0.0);
        return Contact::new(center_a + normal * radius_a, normal, radius_sum);
    }

    let distance = distance_squared.sqrt();
    let normal = delta / distance;
    Contact::new(center_a + normal * radius_a, normal, radius_sum - distance)
}

/// Circle-vs-box overlap test.
///
/// The circle center is clamped to the box to find the closest point. The
/// normal points from that closest point toward the circle center, i.e. the
/// direction that pushes the circle out of the box. When the center lies
/// inside the box the normal follows the axis of least penetration, signed
/// by which side of the box center the circle center sits on.
pub fn circle_box(circle_center: Vec2, radius: f32, box_center: Vec2, half_extents: Vec2) -> Contact {
    let min = box_center - half_extents;
    let max = box_center + half_extents;
    let closest = Vec2::new(
        circle_center.x.clamp(min.x, max.x),
        circle_center.y.clamp(min.y, max.y),
    );

    let delta = circle_center - closest;
    let distance_squared = delta.magnitude_squared();

    if distance_squared > radius * radius {
        return Contact::none();
    }

    if distance_squared < CENTER_EPSILON * CENTER_EPSILON {
        // Center inside the box; clamping collapsed to the center itself.
        let local = circle_center - box_center;
        let depth_x = half_extents.x - local.x.abs();
        let depth_y = half_extents.y - local.y.abs();

        let (normal, depth) = if depth_x <= depth_y {
            let sign = if local.x >= 0.0 { 1.0 } else { -1.0 };
            (Vec2::new(sign, 0.0), depth_x)
        } else {
            let sign = if local.y >= 0.0 { 1.0 } else { -1.0 };
            (Vec2::new(0.0, sign), depth_y)
        };

        return Contact::new(circle_center, normal, radius + depth);
    }

    let distance = distance_squared.sqrt();
    Contact::new(closest, delta / distance, radius - distance)
}

/// Box-vs-box overlap test.
///
/// Per-axis overlap of the half extents; the axis with the smaller overlap
/// separates, with ties resolving to X so results are deterministic. The
/// normal points from `a` toward `b` along the separating axis. Zero
/// overlap on an axis (exact edge contact) does not collide.
pub fn box_box(center_a: Vec2, half_a: Vec2, center_b: Vec2, half_b: Vec2) -> Contact {
    let delta = center_b - center_a;
    let overlap_x = (half_a.x + half_b.x) - delta.x.abs();
    let overlap_y = (half_a.y + half_b.y) - delta.y.abs();

    if overlap_x <= 0.0 || overlap_y <= 0.0 {
        return Contact::none();
    }

    // Representative contact point: center of the overlap rectangle.
    let overlap_min = Vec2::new(
        (center_a.x - half_a.x).max(center_b.x - half_b.x),
        (center_a.y - half_a.y).max(center_b.y - half_b.y),
    );
    let overlap_max = Vec2::new(
        (center_a.x + half_a.x).min(center_b.x + half_b.x),
        (center_a.y + half_a.y).min(center_b.y + half_b.y),
    );
    let point = (overlap_min + overlap_max) * 0.5;

    if overlap_x <= overlap_y {
        let sign = if delta.x >= 0.0 { 1.0 } else { -1.0 };
        Contact::new(point, Vec2::new(sign, 0.0), overlap_x)
    } else {
        let sign = if delta.y >= 0.0 { 1.0 } else { -1.0 };
        Contact::new(point, Vec2::new(0.0, sign), overlap_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn circle(radius: f32) -> ColliderComponent {
        ColliderComponent::new(ColliderShape::circle(radius))
    }

    fn rect(half_width: f32, half_height: f32) -> ColliderComponent {
        ColliderComponent::new(ColliderShape::rect(half_width, half_height))
    }

    #[test]
    fn test_layer_filter_short_circuits_geometry() {
        // Heavily overlapping circles, but neither mask matches the other's layer.
        let a = circle(10.0).with_layers(CollisionLayers::PLAYER, CollisionLayers::NONE);
        let b = circle(10.0).with_layers(CollisionLayers::ENEMY, CollisionLayers::NONE);
        let contact = test_collision(&a, Vec2::zeros(), &b, Vec2::new(1.0, 0.0));
        assert!(!contact.colliding);
    }

    #[test]
    fn test_layer_filter_one_way_detects() {
        let a = circle(10.0).with_layers(CollisionLayers::PROJECTILE, CollisionLayers::ENEMY);
        let b = circle(10.0).with_layers(CollisionLayers::ENEMY, CollisionLayers::NONE);
        let contact = test_collision(&a, Vec2::zeros(), &b, Vec2::new(1.0, 0.0));
        assert!(contact.colliding);
    }

    #[test]
    fn test_circle_circle_far_apart() {
        let contact = test_collision(
            &circle(10.0),
            Vec2::zeros(),
            &circle(10.0),
            Vec2::new(50.0, 0.0),
        );
        assert!(!contact.colliding);
    }

    #[test]
    fn test_circle_circle_overlapping() {
        let contact = test_collision(
            &circle(10.0),
            Vec2::zeros(),
            &circle(10.0),
            Vec2::new(15.0, 0.0),
        );
        assert!(contact.colliding);
        assert_relative_eq!(contact.penetration, 5.0);
        assert_relative_eq!(contact.normal.x, 1.0);
        assert_relative_eq!(contact.normal.y, 0.0);
        assert_relative_eq!(contact.point.x, 10.0);
    }

    #[test]
    fn test_circle_circle_touching_counts_as_colliding() {
        let contact = test_collision(
            &circle(10.0),
            Vec2::zeros(),
            &circle(10.0),
            Vec2::new(20.0, 0.0),
        );
        assert!(contact.colliding);
        assert_relative_eq!(contact.penetration, 0.0);
    }

    #[test]
    fn test_circle_circle_coincident_centers() {
        let contact = circle_circle(Vec2::new(3.0, 3.0), 4.0, Vec2::new(3.0, 3.0), 6.0);
        assert!(contact.colliding);
        assert_eq!(contact.normal, Vec2::new(1.0, 0.0));
        assert_relative_eq!(contact.penetration, 10.0);
    }

    #[test]
    fn test_circle_box_from_outside() {
        // Box half(10,10) at origin, circle r=5 at (12,0): closest point is
        // (10,0), two units from the center, well within the radius.
        let contact = test_collision(
            &circle(5.0),
            Vec2::new(12.0, 0.0),
            &rect(10.0, 10.0),
            Vec2::zeros(),
        );
        assert!(contact.colliding);
        assert_relative_eq!(contact.point.x, 10.0);
        assert_relative_eq!(contact.point.y, 0.0);
        assert_relative_eq!(contact.normal.x, 1.0);
        assert_relative_eq!(contact.penetration, 3.0);
    }

    #[test]
    fn test_circle_box_miss() {
        let contact = test_collision(
            &circle(5.0),
            Vec2::new(20.0, 0.0),
            &rect(10.0, 10.0),
            Vec2::zeros(),
        );
        assert!(!contact.colliding);
    }

    #[test]
    fn test_circle_box_center_inside() {
        // Center at (6,0) inside a 10x10-half box: least penetration is along
        // +X (depth 4), so the circle is pushed out the right side.
        let contact = circle_box(Vec2::new(6.0, 0.0), 2.0, Vec2::zeros(), Vec2::new(10.0, 10.0));
        assert!(contact.colliding);
        assert_eq!(contact.normal, Vec2::new(1.0, 0.0));
        assert_relative_eq!(contact.penetration, 6.0); // radius 2 + depth 4
    }

    #[test]
    fn test_circle_box_center_inside_negative_side() {
        let contact = circle_box(Vec2::new(0.0, -7.0), 1.0, Vec2::zeros(), Vec2::new(10.0, 10.0));
        assert!(contact.colliding);
        assert_eq!(contact.normal, Vec2::new(0.0, -1.0));
        assert_relative_eq!(contact.penetration, 4.0);
    }

    #[test]
    fn test_box_circle_negates_normal() {
        let circle_first = test_collision(
            &circle(5.0),
            Vec2::new(12.0, 0.0),
            &rect(10.0, 10.0),
            Vec2::zeros(),
        );
        let box_first = test_collision(
            &rect(10.0, 10.0),
            Vec2::zeros(),
            &circle(5.0),
            Vec2::new(12.0, 0.0),
        );
        assert!(box_first.colliding);
        assert_relative_eq!(box_first.normal.x, -circle_first.normal.x);
        assert_relative_eq!(box_first.normal.y, -circle_first.normal.y);
        assert_relative_eq!(box_first.penetration, circle_first.penetration);
    }

    #[test]
    fn test_box_box_overlap_on_x() {
        let contact = test_collision(
            &rect(10.0, 10.0),
            Vec2::zeros(),
            &rect(10.0, 10.0),
            Vec2::new(15.0, 0.0),
        );
        assert!(contact.colliding);
        assert_relative_eq!(contact.penetration, 5.0);
        assert_eq!(contact.normal, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_box_box_separated() {
        let contact = test_collision(
            &rect(10.0, 10.0),
            Vec2::zeros(),
            &rect(10.0, 10.0),
            Vec2::new(25.0, 0.0),
        );
        assert!(!contact.colliding);
    }

    #[test]
    fn test_box_box_picks_smaller_axis() {
        // Deep X overlap, shallow Y overlap: Y separates.
        let contact = box_box(
            Vec2::zeros(),
            Vec2::new(10.0, 10.0),
            Vec2::new(2.0, -18.0),
            Vec2::new(10.0, 10.0),
        );
        assert!(contact.colliding);
        assert_eq!(contact.normal, Vec2::new(0.0, -1.0));
        assert_relative_eq!(contact.penetration, 2.0);
    }

    #[test]
    fn test_box_box_equal_overlap_ties_to_x() {
        let contact = box_box(
            Vec2::zeros(),
            Vec2::new(10.0, 10.0),
            Vec2::new(15.0, 15.0),
            Vec2::new(10.0, 10.0),
        );
        assert!(contact.colliding);
        assert_eq!(contact.normal, Vec2::new(1.0, 0.0));
        assert_relative_eq!(contact.penetration, 5.0);
    }

    #[test]
    fn test_box_box_contact_point_is_overlap_center() {
        let contact = box_box(
            Vec2::zeros(),
            Vec2::new(10.0, 10.0),
            Vec2::new(15.0, 0.0),
            Vec2::new(10.0, 10.0),
        );
        assert_relative_eq!(contact.point.x, 7.5);
        assert_relative_eq!(contact.point.y, 0.0);
    }

    #[test]
    fn test_collider_offset_shifts_geometry() {
        // Offset moves the circle out of overlap range.
        let offset_away = circle(5.0).with_offset(Vec2::new(40.0, 0.0));
        let contact = test_collision(
            &offset_away,
            Vec2::zeros(),
            &circle(5.0),
            Vec2::new(8.0, 0.0),
        );
        assert!(!contact.colliding);

        // Offset brings a distant circle into overlap range.
        let offset_toward = circle(5.0).with_offset(Vec2::new(40.0, 0.0));
        let contact = test_collision(
            &offset_toward,
            Vec2::zeros(),
            &circle(5.0),
            Vec2::new(45.0, 0.0),
        );
        assert!(contact.colliding);
    }
}
