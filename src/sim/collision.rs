//! Sphere vs axis-aligned box intersection
//!
//! The player is a sphere; every obstacle is a box given by centre and
//! half-extents. All tests work on squared distances.

use glam::Vec3;

/// Point on (or in) the box closest to `point`
#[inline]
pub fn closest_point_on_box(point: Vec3, box_center: Vec3, half_extents: Vec3) -> Vec3 {
    point.clamp(box_center - half_extents, box_center + half_extents)
}

/// Squared distance from `point` to the box (0 when inside)
#[inline]
pub fn distance_sq_to_box(point: Vec3, box_center: Vec3, half_extents: Vec3) -> f32 {
    let closest = closest_point_on_box(point, box_center, half_extents);
    point.distance_squared(closest)
}

/// Whether a sphere overlaps a box; touching counts as a hit
#[inline]
pub fn sphere_box_intersects(
    sphere_center: Vec3,
    radius: f32,
    box_center: Vec3,
    half_extents: Vec3,
) -> bool {
    distance_sq_to_box(sphere_center, box_center, half_extents) <= radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT: Vec3 = Vec3::ONE;

    #[test]
    fn test_center_inside_box() {
        assert_eq!(distance_sq_to_box(Vec3::ZERO, Vec3::ZERO, UNIT), 0.0);
        assert!(sphere_box_intersects(Vec3::new(0.5, 0.5, 0.5), 0.01, Vec3::ZERO, UNIT));
    }

    #[test]
    fn test_face_distance() {
        // 3 units from centre along x, box face at 1
        let d = distance_sq_to_box(Vec3::new(3.0, 0.0, 0.0), Vec3::ZERO, UNIT);
        assert!((d - 4.0).abs() < 1e-6);
        assert!(sphere_box_intersects(Vec3::new(3.0, 0.0, 0.0), 2.0, Vec3::ZERO, UNIT));
        assert!(!sphere_box_intersects(Vec3::new(3.0, 0.0, 0.0), 1.99, Vec3::ZERO, UNIT));
    }

    #[test]
    fn test_corner_distance() {
        // Diagonal past the corner: closest point is (1,1,1)
        let d = distance_sq_to_box(Vec3::new(2.0, 2.0, 2.0), Vec3::ZERO, UNIT);
        assert!((d - 3.0).abs() < 1e-6);
        // Radius 1.5 would reach each face but not the corner
        assert!(!sphere_box_intersects(Vec3::new(2.0, 2.0, 2.0), 1.5, Vec3::ZERO, UNIT));
    }

    #[test]
    fn test_offset_box_with_non_uniform_extents() {
        let center = Vec3::new(10.0, -0.95, -5.0);
        let half = Vec3::new(1.3, 0.05, 1.5);
        let closest = closest_point_on_box(Vec3::new(10.0, 0.0, -5.0), center, half);
        assert!((closest.y + 0.9).abs() < 1e-6);
        assert!(sphere_box_intersects(Vec3::new(10.0, 0.0, -5.0), 0.95, center, half));
        assert!(!sphere_box_intersects(Vec3::new(10.0, 0.2, -5.0), 0.95, center, half));
    }
}
